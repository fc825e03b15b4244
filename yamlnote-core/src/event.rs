use std::fmt;

use crate::comments::{CommentKind, CommentLine};
use crate::token::ScalarStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StreamStart,
    StreamEnd,
    DocumentStart {
        explicit: bool,
    },
    DocumentEnd {
        explicit: bool,
    },
    MappingStart {
        flow: bool,
    },
    MappingEnd,
    SequenceStart {
        flow: bool,
    },
    SequenceEnd,
    Scalar {
        value: String,
        style: ScalarStyle,
        /// Stands in for a document that has `---` but no content.
        placeholder: bool,
    },
    Comment(CommentLine),
}

/// Event discriminant, convenient for comparing event shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventId {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    MappingStart,
    MappingEnd,
    SequenceStart,
    SequenceEnd,
    Scalar,
    Comment,
}

impl Event {
    pub fn id(&self) -> EventId {
        match self {
            Event::StreamStart => EventId::StreamStart,
            Event::StreamEnd => EventId::StreamEnd,
            Event::DocumentStart { .. } => EventId::DocumentStart,
            Event::DocumentEnd { .. } => EventId::DocumentEnd,
            Event::MappingStart { .. } => EventId::MappingStart,
            Event::MappingEnd => EventId::MappingEnd,
            Event::SequenceStart { .. } => EventId::SequenceStart,
            Event::SequenceEnd => EventId::SequenceEnd,
            Event::Scalar { .. } => EventId::Scalar,
            Event::Comment(_) => EventId::Comment,
        }
    }

    pub(crate) fn empty_scalar(placeholder: bool) -> Self {
        Event::Scalar {
            value: String::new(),
            style: ScalarStyle::Plain,
            placeholder,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::StreamStart => f.write_str("+STR"),
            Event::StreamEnd => f.write_str("-STR"),
            Event::DocumentStart { explicit } => {
                f.write_str("+DOC")?;
                if *explicit {
                    f.write_str(" ---")?;
                }
                Ok(())
            }
            Event::DocumentEnd { explicit } => {
                f.write_str("-DOC")?;
                if *explicit {
                    f.write_str(" ...")?;
                }
                Ok(())
            }
            Event::MappingStart { flow } => {
                f.write_str(if *flow { "+MAP {}" } else { "+MAP" })
            }
            Event::MappingEnd => f.write_str("-MAP"),
            Event::SequenceStart { flow } => {
                f.write_str(if *flow { "+SEQ []" } else { "+SEQ" })
            }
            Event::SequenceEnd => f.write_str("-SEQ"),
            Event::Scalar { value, .. } => write!(f, "=VAL {value:?}"),
            Event::Comment(comment) => {
                let kind = match comment.kind() {
                    CommentKind::Block => "BLOCK",
                    CommentKind::InLine => "INLINE",
                    CommentKind::End => "END",
                };
                write!(f, "=COMMENT {kind} {:?}", comment.text())
            }
        }
    }
}
