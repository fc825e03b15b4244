use crate::token::Mark;

/// Malformed structural input. Raised by the scanner and the parser and
/// passed through the composer unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("grammar error at {mark}: {message}")]
pub struct GrammarError {
    pub mark: Mark,
    pub message: String,
}

impl GrammarError {
    pub fn new(mark: Mark, message: impl Into<String>) -> Self {
        Self {
            mark,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error("no more documents to compose")]
    Exhausted,
    #[error("expected a single document in the stream, but found another document at {0}")]
    MultipleDocuments(Mark),
}
