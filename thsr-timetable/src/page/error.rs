//! Page automation error types.

/// Errors reported while driving the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomationError {
    /// No element matched a selector that was expected to match
    #[error("no element matches `{0}`")]
    ElementNotFound(String),

    /// A select control has no option with the requested text
    #[error("no option `{option}` in `{select}`")]
    OptionNotFound { select: String, option: String },

    /// The browser driver reported an error
    #[error("browser driver error: {0}")]
    Driver(String),
}
