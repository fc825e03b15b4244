use std::fmt;

use crate::error::GrammarError;

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mark {
    pub line: usize,
    pub column: usize,
}

impl Mark {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// A comment lexeme. Blank source lines are delivered as comments with
/// `blank` set and empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentToken {
    pub text: String,
    pub blank: bool,
    /// The physical line already held non-whitespace, non-comment content.
    pub after_content: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Directive { name: String, params: Vec<String> },
    DocumentStart,
    DocumentEnd,
    BlockEntry,
    Value,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    FlowEntry,
    Scalar {
        value: String,
        style: ScalarStyle,
        /// Followed by a `:` value indicator on the same line.
        key: bool,
    },
    Comment(CommentToken),
}

impl TokenKind {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            TokenKind::Directive { .. } => "a directive",
            TokenKind::DocumentStart => "'---'",
            TokenKind::DocumentEnd => "'...'",
            TokenKind::BlockEntry => "'-'",
            TokenKind::Value => "':'",
            TokenKind::FlowSequenceStart => "'['",
            TokenKind::FlowSequenceEnd => "']'",
            TokenKind::FlowMappingStart => "'{'",
            TokenKind::FlowMappingEnd => "'}'",
            TokenKind::FlowEntry => "','",
            TokenKind::Scalar { .. } => "a scalar",
            TokenKind::Comment(_) => "a comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: Mark,
}

impl Token {
    pub fn new(kind: TokenKind, start: Mark) -> Self {
        Self { kind, start }
    }
}

/// Pull interface over positioned lexemes. `Ok(None)` marks end of input.
pub trait LexicalSource {
    fn next_token(&mut self) -> Result<Option<Token>, GrammarError>;
}

impl<T: LexicalSource + ?Sized> LexicalSource for &mut T {
    fn next_token(&mut self) -> Result<Option<Token>, GrammarError> {
        (**self).next_token()
    }
}

/// Replays a prepared token list; handy when the lexemes come from
/// somewhere other than [`crate::Scanner`].
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    tokens: std::collections::VecDeque<Token>,
}

impl TokenList {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }
}

impl LexicalSource for TokenList {
    fn next_token(&mut self) -> Result<Option<Token>, GrammarError> {
        Ok(self.tokens.pop_front())
    }
}
