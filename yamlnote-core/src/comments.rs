//! Comment classification.
//!
//! Every comment lexeme is routed to exactly one of three lists on the
//! composed tree. The decision depends only on the lexeme itself, the
//! grammar context it was found in, and what the token terminating its
//! comment run does to the open collections, so it is a pure function here
//! and the parser only has to gather those inputs.

use crate::token::{CommentToken, Mark};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// Occupies its own line(s) and belongs to the node that follows.
    Block,
    /// Trails content on the same line and belongs to that content's node.
    InLine,
    /// Trails the last child of a collection and belongs to the collection.
    End,
}

/// One source comment line. Blank source lines are kept as `Block` lines
/// with empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    kind: CommentKind,
    text: String,
    start: Mark,
}

impl CommentLine {
    pub fn new(kind: CommentKind, text: impl Into<String>, start: Mark) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
        }
    }

    pub fn kind(&self) -> CommentKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> Mark {
        self.start
    }

    pub fn start_line(&self) -> usize {
        self.start.line
    }

    pub fn start_column(&self) -> usize {
        self.start.column
    }

    pub(crate) fn into_kind(self, kind: CommentKind) -> Self {
        Self { kind, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Awaiting {
    Key,
    Value,
}

/// Where in the grammar a comment run was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    TopLevel,
    InMapping(Awaiting),
    /// `entry_open` is set between a `-` indicator and the entry's node.
    InSequence { entry_open: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Block,
    InLine,
    /// Emit before the end of the open collection at `depth` (0 = outermost).
    End { depth: usize },
}

impl Classification {
    pub fn kind(self) -> CommentKind {
        match self {
            Classification::Block => CommentKind::Block,
            Classification::InLine => CommentKind::InLine,
            Classification::End { .. } => CommentKind::End,
        }
    }
}

/// Classifies one comment.
///
/// `inline_column` is the column of the immediately preceding comment when
/// that one was inline; an own-line comment aligned with it continues it.
/// `end_target` is the collection this comment would trail if it is not
/// inline.
pub fn classify(
    comment: &CommentToken,
    start: Mark,
    context: Context,
    inline_column: Option<usize>,
    end_target: Option<usize>,
) -> Classification {
    let after_indicator = matches!(context, Context::InSequence { entry_open: true });
    if comment.after_content && !after_indicator {
        return Classification::InLine;
    }
    if !comment.blank && inline_column == Some(start.column) {
        return Classification::InLine;
    }
    match end_target {
        Some(depth) => Classification::End { depth },
        None => Classification::Block,
    }
}

/// A non-empty collection that the token ending a comment run closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Closing {
    pub depth: usize,
    /// Comments at or right of this 1-based column may trail the collection.
    pub indent: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Open,
    Depth(usize),
    Blocked,
}

/// Classifies a whole comment run in source order. Targets only move
/// outwards along a run, and once a comment of the run is `Block` the rest
/// are too, so emitting each comment before its target's end keeps source
/// order.
pub(crate) struct RunClassifier<'a> {
    context: Context,
    // innermost first
    closing: &'a [Closing],
    inline_column: Option<usize>,
    bound: Bound,
}

impl<'a> RunClassifier<'a> {
    pub fn new(context: Context, closing: &'a [Closing]) -> Self {
        Self {
            context,
            closing,
            inline_column: None,
            bound: Bound::Open,
        }
    }

    pub fn classify(&mut self, comment: &CommentToken, start: Mark) -> Classification {
        let end_target = self.end_target(start.column);
        let result = classify(comment, start, self.context, self.inline_column, end_target);
        match result {
            Classification::InLine => self.inline_column = Some(start.column),
            Classification::End { depth } => {
                self.inline_column = None;
                self.bound = Bound::Depth(depth);
            }
            Classification::Block => {
                self.inline_column = None;
                self.bound = Bound::Blocked;
            }
        }
        result
    }

    fn end_target(&self, column: usize) -> Option<usize> {
        let mut candidates = self
            .closing
            .iter()
            .filter(|closing| closing.indent <= column);
        match self.bound {
            Bound::Blocked => None,
            Bound::Open => candidates.next().map(|closing| closing.depth),
            Bound::Depth(limit) => candidates
                .find(|closing| closing.depth <= limit)
                .map(|closing| closing.depth),
        }
    }
}
