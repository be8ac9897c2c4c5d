//! Keyword-scoring categorizer.
//!
//! A heuristic, not a classifier: each category scores one point per keyword
//! that appears anywhere in the lowercased title + content (plain substring
//! match, so "ai" also hits "chair"). A hit lying wholly inside a hit of a
//! longer keyword does not count, so "software" is not also "war" and
//! "startup" is not also "art". The strictly highest score wins; a tie for
//! first place or no hits at all yields `General`. Miscategorization is
//! expected and tolerated downstream.

use std::ops::Range;

use crate::models::Category;

fn keywords(category: Category) -> &'static [&'static str] {
    match category {
        Category::Politics => &[
            "election",
            "congress",
            "senate",
            "president",
            "democrat",
            "republican",
            "vote",
            "policy",
            "legislation",
            "government",
        ],
        Category::Tech => &[
            "ai",
            "artificial intelligence",
            "technology",
            "software",
            "startup",
            "silicon valley",
            "crypto",
            "blockchain",
            "algorithm",
            "data",
        ],
        Category::Business => &[
            "economy",
            "market",
            "stock",
            "investment",
            "business",
            "corporate",
            "finance",
            "trade",
            "gdp",
            "inflation",
        ],
        Category::Culture => &[
            "culture",
            "art",
            "music",
            "movie",
            "book",
            "entertainment",
            "media",
            "social",
            "education",
            "religion",
        ],
        Category::Global => &[
            "international",
            "foreign",
            "war",
            "climate",
            "global",
            "world",
            "nation",
            "treaty",
            "diplomatic",
            "united nations",
        ],
        Category::General => &[],
    }
}

/// Every keyword occurrence in `text` (already lowercased), across all categories.
fn hits(text: &str) -> Vec<(Category, &'static str, Range<usize>)> {
    Category::SCORED
        .iter()
        .flat_map(|&category| {
            keywords(category).iter().flat_map(move |&kw| {
                text.match_indices(kw)
                    .map(move |(start, _)| (category, kw, start..start + kw.len()))
            })
        })
        .collect()
}

fn shadowed(span: &Range<usize>, len: usize, hits: &[(Category, &str, Range<usize>)]) -> bool {
    hits.iter().any(|(_, kw, other)| {
        kw.len() > len && other.start <= span.start && span.end <= other.end
    })
}

/// Number of distinct keywords of `category` with at least one hit not
/// swallowed by a longer keyword.
fn score(category: Category, hits: &[(Category, &str, Range<usize>)]) -> usize {
    keywords(category)
        .iter()
        .filter(|&&kw| {
            hits.iter().any(|(c, k, span)| {
                *c == category && *k == kw && !shadowed(span, kw.len(), hits)
            })
        })
        .count()
}

pub fn categorize(title: &str, content: &str) -> Category {
    let text = format!("{} {}", title, content).to_lowercase();
    let hits = hits(&text);

    let mut best = Category::General;
    let mut best_score = 0;
    let mut tied = false;

    for category in Category::SCORED {
        let s = score(category, &hits);
        if s > best_score {
            best = category;
            best_score = s;
            tied = false;
        } else if s == best_score && s > 0 {
            tied = true;
        }
    }

    if tied {
        Category::General
    } else {
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tech_keywords_only() {
        assert_eq!(categorize("Crypto and blockchain", "an algorithm"), Category::Tech);
    }

    #[test]
    fn empty_text_is_general() {
        assert_eq!(categorize("", ""), Category::General);
    }

    #[test]
    fn no_keywords_is_general() {
        assert_eq!(categorize("Thoughts", "on nothing much"), Category::General);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(categorize("SENATE VOTE", "CONGRESS"), Category::Politics);
    }

    #[test]
    fn highest_score_wins() {
        // politics: election, vote, senate (3); business: economy (1)
        assert_eq!(
            categorize("Election night", "the senate vote and the economy"),
            Category::Politics
        );
    }

    #[test]
    fn tie_for_first_is_general() {
        // politics: election (1); business: inflation (1)
        assert_eq!(categorize("Election", "inflation"), Category::General);
    }

    #[test]
    fn keyword_counts_once_however_often_it_appears() {
        // business: stock x3 counts 1; culture: music, movie (2)
        assert_eq!(
            categorize("stock stock stock", "music movie"),
            Category::Culture
        );
    }

    #[test]
    fn single_tech_keyword_is_tech() {
        assert_eq!(categorize("software", ""), Category::Tech);
        assert_eq!(categorize("startup", ""), Category::Tech);
        assert_eq!(categorize("artificial intelligence", ""), Category::Tech);
    }

    #[test]
    fn keyword_inside_longer_keyword_does_not_count() {
        assert_eq!(score(Category::Global, &hits("software")), 0);
        assert_eq!(score(Category::Culture, &hits("startup")), 0);
        assert_eq!(score(Category::Tech, &hits("software startup")), 2);
    }

    #[test]
    fn standalone_short_keyword_still_counts() {
        // tech: software; global: war (standalone), climate
        assert_eq!(categorize("Software at war", "climate"), Category::Global);
    }
}
