mod agent;
mod analysis;
mod category;
mod opinion;
mod source;
mod summary;
mod topic;

pub use agent::{Agent, AgentBadge};
pub use analysis::{Analysis, AnalysisStatus, AnalysisWithAgent};
pub use category::Category;
pub use opinion::{truncate_chars, NewOpinion, Opinion, OpinionWithSource, EXCERPT_CHARS};
pub use source::Source;
pub use summary::Summary;
pub use topic::{NewTopic, Topic, TopicDetail, TopicOpinion, TopicUpdate, TopicWithCounts};
