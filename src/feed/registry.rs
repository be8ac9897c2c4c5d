use crate::models::Source;

struct SourceSpec {
    id: &'static str,
    name: &'static str,
    url: &'static str,
    feed_url: &'static str,
    bias: &'static str,
    category: &'static str,
}

const DEFAULT_SOURCES: [SourceSpec; 6] = [
    SourceSpec {
        id: "nyt-opinion",
        name: "New York Times Opinion",
        url: "https://www.nytimes.com/section/opinion",
        feed_url: "https://rss.nytimes.com/services/xml/rss/nyt/Opinion.xml",
        bias: "center-left",
        category: "mainstream",
    },
    SourceSpec {
        id: "wsj-opinion",
        name: "Wall Street Journal Opinion",
        url: "https://www.wsj.com/news/opinion",
        feed_url: "https://feeds.a.dj.com/rss/RSSOpinion.xml",
        bias: "center-right",
        category: "mainstream",
    },
    SourceSpec {
        id: "atlantic",
        name: "The Atlantic",
        url: "https://www.theatlantic.com/ideas/",
        feed_url: "https://www.theatlantic.com/feed/channel/ideas/",
        bias: "center-left",
        category: "magazine",
    },
    SourceSpec {
        id: "national-review",
        name: "National Review",
        url: "https://www.nationalreview.com/",
        feed_url: "https://www.nationalreview.com/feed/",
        bias: "conservative",
        category: "magazine",
    },
    SourceSpec {
        id: "jacobin",
        name: "Jacobin",
        url: "https://jacobin.com/",
        feed_url: "https://jacobin.com/feed",
        bias: "left",
        category: "magazine",
    },
    SourceSpec {
        id: "reason",
        name: "Reason",
        url: "https://reason.com/",
        feed_url: "https://reason.com/feed/",
        bias: "libertarian",
        category: "magazine",
    },
];

/// Built-in opinion outlets, used unless the config supplies its own list.
pub fn default_sources() -> Vec<Source> {
    DEFAULT_SOURCES
        .iter()
        .map(|s| Source {
            id: s.id.to_string(),
            name: s.name.to_string(),
            url: s.url.to_string(),
            feed_url: Some(s.feed_url.to_string()),
            bias: s.bias.to_string(),
            category: s.category.to_string(),
        })
        .collect()
}
