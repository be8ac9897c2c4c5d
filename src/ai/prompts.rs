//! Prompt construction. Pure string building: same inputs, same prompt.
//!
//! The summary prompt's JSON keys (`pro_points`, `con_points`,
//! `neutral_context`) are read back by [`super::parse::decode_summary`] and
//! must stay in sync with it.

use crate::models::{Agent, Opinion, Topic};

const OPINION_SEPARATOR: &str = "\n\n---\n\n";

/// Appended to the analysis prompt so the response ends in a machine-readable trailer.
pub const TRAILER_REQUEST: &str = "\n\nAt the end of your analysis, add a line \"STANCE:\" followed by \
a 2-4 word summary of your position, and \"KEY_POINTS:\" followed by a JSON array of 3-5 key points.";

pub fn compose_analysis_prompt(agent: &Agent, topic: &Topic, opinions: &[Opinion]) -> String {
    let opinion_texts = opinions
        .iter()
        .map(|o| {
            format!(
                "Source: {}\nTitle: {}\nExcerpt: {}",
                o.author_or_unknown(),
                o.title,
                o.excerpt_or_content(500)
            )
        })
        .collect::<Vec<_>>()
        .join(OPINION_SEPARATOR);

    let context = topic
        .summary
        .as_deref()
        .map(|s| format!("CONTEXT: {}", s))
        .unwrap_or_default();

    format!(
        r#"{persona}

TOPIC: {title}
{context}

ORIGINAL OPINIONS TO ANALYZE:
{opinions}

Please provide your analysis of this topic from your unique perspective. Your response should:
1. State your overall stance on the issue
2. Identify 3-5 key points that support your view
3. Acknowledge the strongest counterarguments
4. Explain what you think is being missed in the debate
5. Conclude with your recommendation or prediction

Keep your response between 300-500 words. Be specific and substantive, not vague. Reference the original opinions when relevant."#,
        persona = agent.persona,
        title = topic.title,
        context = context,
        opinions = opinion_texts,
    )
}

pub fn compose_summary_prompt(topic: &Topic, opinions: &[Opinion]) -> String {
    let opinion_texts = opinions
        .iter()
        .map(|o| {
            format!(
                "\"{}\" by {}: {}",
                o.title,
                o.author_or_unknown(),
                o.excerpt_or_content(300)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"Analyze the following opinions on this topic and create a balanced pro/con summary.

TOPIC: {title}

OPINIONS:
{opinions}

Please provide:
1. PRO POINTS: 4-6 bullet points summarizing arguments IN FAVOR of or supporting one side
2. CON POINTS: 4-6 bullet points summarizing arguments AGAINST or opposing
3. NEUTRAL CONTEXT: 2-3 sentences providing important background context

Format your response as JSON:
{{
  "pro_points": ["point 1", "point 2", ...],
  "con_points": ["point 1", "point 2", ...],
  "neutral_context": "Context text here..."
}}

Be specific and substantive. Each point should be a complete thought that stands alone."#,
        title = topic.title,
        opinions = opinion_texts,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::default_agents;
    use crate::models::Category;
    use chrono::Utc;

    fn topic(summary: Option<&str>) -> Topic {
        Topic {
            id: 7,
            title: "Regulation, Innovation".to_string(),
            summary: summary.map(str::to_string),
            category: Category::Tech,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            is_featured: true,
        }
    }

    fn opinion(title: &str, author: Option<&str>, excerpt: Option<&str>, content: &str) -> Opinion {
        Opinion {
            id: 1,
            source_id: "reason".to_string(),
            title: title.to_string(),
            author: author.map(str::to_string),
            url: format!("https://example.com/{}", title.len()),
            content: content.to_string(),
            excerpt: excerpt.map(str::to_string),
            published_at: None,
            ingested_at: Utc::now(),
            category: Category::Tech,
        }
    }

    #[test]
    fn analysis_prompt_layout() {
        let agent = &default_agents()[0];
        let opinions = vec![
            opinion("AI Regulation Must Come Now", Some("Dr. Sarah Chen"), Some("Risks."), ""),
            opinion("Let Innovation Flourish", None, None, "Markets will sort it out."),
        ];
        let prompt = compose_analysis_prompt(agent, &topic(Some("Three views.")), &opinions);

        assert!(prompt.starts_with(&agent.persona));
        assert!(prompt.contains("TOPIC: Regulation, Innovation\nCONTEXT: Three views."));
        assert!(prompt.contains(
            "Source: Dr. Sarah Chen\nTitle: AI Regulation Must Come Now\nExcerpt: Risks.\n\n---\n\nSource: Unknown"
        ));
        assert!(prompt.contains("Excerpt: Markets will sort it out."));
        assert!(prompt.contains("3-5 key points"));
        assert!(prompt.contains("strongest counterarguments"));
        assert!(prompt.contains("being missed"));
        assert!(prompt.contains("300-500 words"));
    }

    #[test]
    fn analysis_prompt_without_summary_has_no_context_line() {
        let agent = &default_agents()[3];
        let prompt = compose_analysis_prompt(agent, &topic(None), &[]);
        assert!(!prompt.contains("CONTEXT:"));
    }

    #[test]
    fn content_fallback_is_capped_at_500_chars() {
        let agent = &default_agents()[1];
        let long = "y".repeat(800);
        let prompt =
            compose_analysis_prompt(agent, &topic(None), &[opinion("Long", None, None, &long)]);
        assert!(prompt.contains(&"y".repeat(500)));
        assert!(!prompt.contains(&"y".repeat(501)));
    }

    #[test]
    fn prompts_are_deterministic() {
        let agent = &default_agents()[2];
        let opinions = vec![opinion("One", None, Some("e"), "")];
        let t = topic(Some("s"));
        assert_eq!(
            compose_analysis_prompt(agent, &t, &opinions),
            compose_analysis_prompt(agent, &t, &opinions)
        );
        assert_eq!(
            compose_summary_prompt(&t, &opinions),
            compose_summary_prompt(&t, &opinions)
        );
    }

    #[test]
    fn summary_prompt_requests_the_wire_keys() {
        let opinions = vec![opinion("Title A", Some("Author A"), Some("Excerpt A"), "")];
        let prompt = compose_summary_prompt(&topic(None), &opinions);

        assert!(prompt.contains("\"Title A\" by Author A: Excerpt A"));
        assert!(prompt.contains("\"pro_points\""));
        assert!(prompt.contains("\"con_points\""));
        assert!(prompt.contains("\"neutral_context\""));
        assert!(prompt.contains("4-6 bullet points"));
        assert!(prompt.contains("2-3 sentences"));
    }
}
