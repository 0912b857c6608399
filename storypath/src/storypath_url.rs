use crate::domain::StoryPathFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct StoryPathURL(String);

impl AsRef<str> for StoryPathURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl StoryPathURL {
    pub fn new(base: &str) -> Self {
        Self(base.trim_end_matches('/').to_string())
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    pub fn with_filter(&self, filter: &impl StoryPathFilter) -> Self {
        let (column, condition) = filter.as_query_pair();
        if self.0.contains('?') {
            Self(format!("{}&{}={}", self.0, column, condition))
        } else {
            Self(format!("{}?{}={}", self.0, column, condition))
        }
    }
}
