#[derive(Debug, thiserror::Error)]
pub enum GithubStatsError {
    #[error("GitHub API error: {0}")]
    GitHub(#[from] octocrab::Error),

    #[error("{0}")]
    InvalidParam(String),
}

impl GithubStatsError {
    /// Text shown to the caller of a tool. GitHub API failures surface the
    /// API's own message (e.g. "Not Found") rather than the client's wrapper.
    /// Transport and decoding failures keep a single line of description;
    /// octocrab appends a captured backtrace to those that must not leak.
    pub fn message(&self) -> String {
        match self {
            GithubStatsError::GitHub(octocrab::Error::GitHub { source, .. }) => {
                source.message.clone()
            }
            GithubStatsError::GitHub(e) => single_line(&e.to_string()),
            GithubStatsError::InvalidParam(msg) => msg.clone(),
        }
    }
}

/// Drops octocrab's `Found at <backtrace>` suffix and joins whatever remains
/// onto one line.
fn single_line(text: &str) -> String {
    let head = match text.find("Found at") {
        Some(idx) => &text[..idx],
        None => text,
    };
    head.split_whitespace().collect::<Vec<_>>().join(" ")
}
