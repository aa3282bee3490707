//! News models

/// A single headline returned by a news provider.
///
/// Items keep the provider's relevance order on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub url: String,
}
