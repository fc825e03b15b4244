/// What to compose for a document that has an explicit `---` separator but
/// holds nothing except comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyDocumentPolicy {
    /// An empty scalar carrying the comments.
    #[default]
    EmptyScalar,
    /// An empty mapping carrying the comments, as for a comment-only stream
    /// without any separator.
    EmptyMapping,
    /// Skip the document together with its comments.
    Drop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Emit comment events. When off, comments and blank lines are skipped.
    pub comments: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { comments: true }
    }
}

impl ParserOptions {
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposerOptions {
    pub empty_document: EmptyDocumentPolicy,
}

impl ComposerOptions {
    pub fn with_empty_document(mut self, policy: EmptyDocumentPolicy) -> Self {
        self.empty_document = policy;
        self
    }
}
