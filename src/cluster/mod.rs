//! Topic formation.
//!
//! Opinions are bucketed by category; every bucket with at least two members
//! becomes one topic. Titles come from the words most member titles share.
//! Batch and stateless: clustering overlapping input twice makes duplicate
//! topics, so callers feed only fresh opinions.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info};

use crate::db::Repository;
use crate::error::Result;
use crate::models::{Category, NewTopic, Opinion, Topic};

pub const MIN_TOPIC_SIZE: usize = 2;
pub const FEATURED_SIZE: usize = 3;
const TITLE_WORDS: usize = 3;

const STOP_WORDS: [&str; 33] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "is", "are", "was",
    "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "must", "can",
];

/// A topic ready to persist, with the opinions it groups.
#[derive(Debug, Clone)]
pub struct TopicDraft {
    pub topic: NewTopic,
    pub opinion_ids: Vec<i64>,
}

/// Group opinions into topic drafts without touching storage.
pub fn plan_topics(opinions: &[Opinion]) -> Vec<TopicDraft> {
    let mut buckets: BTreeMap<Category, Vec<&Opinion>> = BTreeMap::new();
    for opinion in opinions {
        buckets.entry(opinion.category).or_default().push(opinion);
    }

    buckets
        .into_iter()
        .filter_map(|(category, members)| {
            if members.len() < MIN_TOPIC_SIZE {
                debug!("Skipping {} bucket with {} opinion(s)", category, members.len());
                return None;
            }

            let titles: Vec<&str> = members.iter().map(|o| o.title.as_str()).collect();
            Some(TopicDraft {
                topic: NewTopic {
                    title: topic_title(&titles, category),
                    summary: Some(topic_summary(members.len(), category)),
                    category,
                    is_featured: members.len() >= FEATURED_SIZE,
                },
                opinion_ids: members.iter().map(|o| o.id).collect(),
            })
        })
        .collect()
}

/// Title from the up-to-three words found in the most member titles; only
/// words shared by at least two titles qualify. Falls back to "{Category} Debate".
pub fn topic_title(titles: &[&str], category: Category) -> String {
    // (word, number of titles containing it), in first-seen order
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for title in titles {
        for word in title_words(title) {
            match index.get(&word) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(word.clone(), counts.len());
                    counts.push((word, 1));
                }
            }
        }
    }

    // stable: ties keep first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    let words: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n >= MIN_TOPIC_SIZE)
        .take(TITLE_WORDS)
        .map(|(word, _)| capitalize(&word))
        .collect();

    if words.is_empty() {
        format!("{} Debate", category.label())
    } else {
        words.join(", ")
    }
}

pub fn topic_summary(count: usize, category: Category) -> String {
    format!(
        "A collection of {} opinions on {} topics, featuring perspectives from various sources.",
        count, category
    )
}

/// Lowercased words of a title that can name a topic: longer than three
/// characters, not a stop word, not a bare number. Each word appears once.
fn title_words(title: &str) -> impl Iterator<Item = String> + '_ {
    let mut seen = HashSet::new();
    title
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| w.chars().count() > 3)
        .filter(|w| !STOP_WORDS.contains(&w.as_str()))
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .filter(move |w| seen.insert(w.clone()))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct TopicClusterer {
    repository: Repository,
}

impl TopicClusterer {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Plan topics for `opinions` and persist each with its opinion links.
    pub async fn cluster_topics(&self, opinions: &[Opinion]) -> Result<Vec<Topic>> {
        let drafts = plan_topics(opinions);
        let mut topics = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let size = draft.opinion_ids.len();
            let topic = self
                .repository
                .create_topic(draft.topic, draft.opinion_ids)
                .await?;
            debug!(
                "Created topic {} '{}' ({}, {} opinions, featured={})",
                topic.id, topic.title, topic.category, size, topic.is_featured
            );
            topics.push(topic);
        }

        info!(
            "Clustering completed - opinions={}, topics={}",
            opinions.len(),
            topics.len()
        );
        Ok(topics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn opinion(id: i64, title: &str, category: Category) -> Opinion {
        Opinion {
            id,
            source_id: "reason".to_string(),
            title: title.to_string(),
            author: None,
            url: format!("https://example.com/{}", id),
            content: String::new(),
            excerpt: None,
            published_at: None,
            ingested_at: Utc::now(),
            category,
        }
    }

    fn ai_debate() -> Vec<Opinion> {
        vec![
            opinion(1, "AI Regulation Must Come Now", Category::Tech),
            opinion(2, "Let Innovation Flourish: Against AI Regulation", Category::Tech),
            opinion(3, "A Balanced Approach to AI Governance", Category::Tech),
        ]
    }

    #[test]
    fn empty_input_plans_nothing() {
        assert!(plan_topics(&[]).is_empty());
    }

    #[test]
    fn singleton_buckets_are_dropped() {
        let opinions = vec![
            opinion(1, "Senate vote looms", Category::Politics),
            opinion(2, "Chip exports", Category::Tech),
            opinion(3, "Chip subsidies", Category::Tech),
        ];
        let drafts = plan_topics(&opinions);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].topic.category, Category::Tech);
        assert_eq!(drafts[0].opinion_ids, vec![2, 3]);
    }

    #[test]
    fn featured_threshold() {
        let pair = vec![
            opinion(1, "Tariff talk", Category::Business),
            opinion(2, "Tariff truth", Category::Business),
        ];
        assert!(!plan_topics(&pair)[0].topic.is_featured);

        let drafts = plan_topics(&ai_debate());
        assert!(drafts[0].topic.is_featured);
    }

    #[test]
    fn ai_debate_title_names_regulation() {
        let drafts = plan_topics(&ai_debate());
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].topic.title, "Regulation");
        assert_eq!(drafts[0].opinion_ids.len(), 3);
    }

    #[test]
    fn title_takes_top_three_shared_words() {
        let titles = [
            "Housing costs crush young renters",
            "Young renters face housing costs",
            "Why housing policy fails young families",
            "Renters deserve better housing",
        ];
        assert_eq!(
            topic_title(&titles, Category::Business),
            "Housing, Young, Renters"
        );
    }

    #[test]
    fn title_falls_back_without_shared_words() {
        assert_eq!(
            topic_title(&["Why We Act", "Yes, But How?"], Category::Global),
            "Global Debate"
        );
        assert_eq!(
            topic_title(&["Pension reform", "Border wall funding"], Category::Politics),
            "Politics Debate"
        );
    }

    #[test]
    fn stop_words_and_numbers_never_title() {
        assert_eq!(
            topic_title(&["Should 2025 matter", "Should 2025 matter more"], Category::General),
            "Matter"
        );
    }

    #[test]
    fn repeated_word_in_one_title_counts_once() {
        assert_eq!(
            topic_title(&["Crypto crypto crypto", "Markets today"], Category::Tech),
            "Tech Debate"
        );
    }

    #[test]
    fn general_is_a_normal_bucket() {
        let opinions = vec![
            opinion(1, "Musings", Category::General),
            opinion(2, "Ramblings", Category::General),
        ];
        let drafts = plan_topics(&opinions);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].topic.title, "General Debate");
    }

    #[test]
    fn summary_mentions_count_and_category() {
        assert_eq!(
            topic_summary(3, Category::Tech),
            "A collection of 3 opinions on tech topics, featuring perspectives from various sources."
        );
    }
}
