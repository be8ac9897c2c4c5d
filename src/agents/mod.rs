mod personas;

pub use personas::{default_agents, find_agent, PERSONA_COUNT};
