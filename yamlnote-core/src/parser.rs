use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::comments::{
    Awaiting, Classification, Closing, CommentKind, CommentLine, Context, RunClassifier,
};
use crate::error::GrammarError;
use crate::event::Event;
use crate::options::ParserOptions;
use crate::token::{CommentToken, LexicalSource, Mark, Token, TokenKind};

/// Shape of the lookahead token, detached from its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Look {
    End,
    Directive,
    DocumentStart,
    DocumentEnd,
    BlockEntry,
    Value,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
    FlowEntry,
    Scalar { key: bool },
}

impl Look {
    fn of(token: Option<&Token>, eof: Mark) -> (Look, Mark) {
        let Some(token) = token else {
            return (Look::End, eof);
        };
        let look = match &token.kind {
            TokenKind::Directive { .. } => Look::Directive,
            TokenKind::DocumentStart => Look::DocumentStart,
            TokenKind::DocumentEnd => Look::DocumentEnd,
            TokenKind::BlockEntry => Look::BlockEntry,
            TokenKind::Value => Look::Value,
            TokenKind::FlowSequenceStart => Look::SequenceStart,
            TokenKind::FlowSequenceEnd => Look::SequenceEnd,
            TokenKind::FlowMappingStart => Look::MappingStart,
            TokenKind::FlowMappingEnd => Look::MappingEnd,
            TokenKind::FlowEntry => Look::FlowEntry,
            TokenKind::Scalar { key, .. } => Look::Scalar { key: *key },
            // comments are split off into runs before they can become lookahead
            TokenKind::Comment(_) => Look::End,
        };
        (look, token.start)
    }

    fn ends_document(self) -> bool {
        matches!(
            self,
            Look::End | Look::Directive | Look::DocumentStart | Look::DocumentEnd
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Indicator {
    Document,
    Entry,
    MapValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    StreamStart,
    ImplicitDocumentStart,
    DocumentStart,
    DocumentContent,
    DocumentEnd,
    BlockNode {
        parent: Option<usize>,
        indicator: Indicator,
        line: usize,
    },
    BlockSequenceEntry,
    BlockMappingKey,
    FlowSequenceEntry {
        first: bool,
    },
    FlowPairEnd,
    FlowMappingKey {
        first: bool,
    },
    FlowValue,
    FlowNode,
    End,
}

/// An open collection. `indent` is the 1-based column of its first token.
#[derive(Debug, Clone, Copy)]
struct Open {
    mapping: bool,
    flow: bool,
    // single `key: value` pair inside a flow sequence
    pair: bool,
    // block sequence sharing its parent mapping's column
    indentless: bool,
    indent: usize,
    children: usize,
}

impl Open {
    fn block(mapping: bool, indent: usize) -> Self {
        Self {
            mapping,
            flow: false,
            pair: false,
            indentless: false,
            indent,
            children: 0,
        }
    }

    fn flow(mapping: bool, indent: usize) -> Self {
        Self {
            flow: true,
            ..Self::block(mapping, indent)
        }
    }

    /// Whether a block collection ends before the token at `mark`.
    fn closed_by(&self, look: Look, mark: Mark) -> bool {
        if look.ends_document() {
            return true;
        }
        mark.column < self.indent
            || (!self.mapping && mark.column == self.indent && look != Look::BlockEntry)
    }
}

/// Event-generating parser.
///
/// Drives the stream → document → node grammar over a [`LexicalSource`] and
/// weaves classified comment events into the structural events. Comments
/// are read in runs together with the structural token that ends the run,
/// so the run can be classified knowing which collections that token
/// closes: inline comments go out at once, end comments right before the
/// end of the collection they trail, block comments before the next node.
pub struct Parser<S> {
    source: S,
    options: ParserOptions,
    state: State,
    states: Vec<State>,
    collections: Vec<Open>,
    token: Option<Token>,
    fetched: bool,
    last_mark: Mark,
    ends: VecDeque<(usize, CommentLine)>,
    blocks: Vec<CommentLine>,
    queue: VecDeque<(Event, Mark)>,
}

impl<S: LexicalSource> Parser<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: S, options: ParserOptions) -> Self {
        Self {
            source,
            options,
            state: State::StreamStart,
            states: Vec::new(),
            collections: Vec::new(),
            token: None,
            fetched: false,
            last_mark: Mark::new(1, 1),
            ends: VecDeque::new(),
            blocks: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Pulls the next event; `Ok(None)` after `StreamEnd`.
    pub fn next_event(&mut self) -> Result<Option<(Event, Mark)>, GrammarError> {
        self.next().transpose()
    }

    fn look(&mut self) -> Result<(Look, Mark), GrammarError> {
        if !self.fetched {
            self.fetch_run()?;
        }
        Ok(Look::of(self.token.as_ref(), self.last_mark))
    }

    fn take(&mut self) -> Result<Token, GrammarError> {
        if !self.fetched {
            self.fetch_run()?;
        }
        self.fetched = false;
        self.token
            .take()
            .ok_or_else(|| GrammarError::new(self.last_mark, "unexpected end of stream"))
    }

    fn found(&self) -> &'static str {
        match &self.token {
            Some(token) => token.kind.describe(),
            None => "end of stream",
        }
    }

    fn unexpected(&self, expected: &str, mark: Mark) -> GrammarError {
        GrammarError::new(mark, format!("expected {expected}, but found {}", self.found()))
    }

    fn pop_state(&mut self) -> State {
        self.states.pop().unwrap_or(State::End)
    }

    fn fetch_run(&mut self) -> Result<(), GrammarError> {
        let mut run: Vec<(CommentToken, Mark)> = Vec::new();
        let token = loop {
            match self.source.next_token()? {
                Some(Token {
                    kind: TokenKind::Comment(comment),
                    start,
                }) => {
                    self.last_mark = start;
                    if self.options.comments {
                        run.push((comment, start));
                    }
                }
                other => break other,
            }
        };
        if let Some(token) = &token {
            self.last_mark = token.start;
        }
        self.token = token;
        self.fetched = true;
        if !run.is_empty() {
            self.classify_run(run);
        }
        Ok(())
    }

    fn context(&self) -> Context {
        match self.state {
            State::BlockNode {
                indicator: Indicator::Entry,
                ..
            } => Context::InSequence { entry_open: true },
            State::BlockNode {
                indicator: Indicator::MapValue,
                ..
            }
            | State::FlowValue => Context::InMapping(Awaiting::Value),
            _ => match self.collections.last() {
                None => Context::TopLevel,
                Some(open) if open.mapping => Context::InMapping(Awaiting::Key),
                Some(_) => Context::InSequence { entry_open: false },
            },
        }
    }

    /// Non-empty collections the current lookahead closes, innermost first.
    fn closing(&self) -> Vec<Closing> {
        let (look, mark) = Look::of(self.token.as_ref(), self.last_mark);
        let mut closing = Vec::new();
        for (depth, open) in self.collections.iter().enumerate().rev() {
            if open.pair {
                if look == Look::SequenceEnd {
                    continue;
                }
                break;
            }
            if open.flow {
                let closes = if open.mapping {
                    look == Look::MappingEnd
                } else {
                    look == Look::SequenceEnd
                };
                if closes && open.children > 0 {
                    closing.push(Closing { depth, indent: 0 });
                }
                break;
            }
            if !open.closed_by(look, mark) {
                break;
            }
            if open.children > 0 {
                let indent = if open.indentless {
                    open.indent + 1
                } else {
                    open.indent
                };
                closing.push(Closing { depth, indent });
            }
        }
        closing
    }

    fn classify_run(&mut self, run: Vec<(CommentToken, Mark)>) {
        let closing = self.closing();
        let mut classifier = RunClassifier::new(self.context(), &closing);
        for (comment, start) in run {
            let classification = classifier.classify(&comment, start);
            trace!(?classification, mark = %start, text = %comment.text, "classified comment");
            let line = CommentLine::new(classification.kind(), comment.text, start);
            match classification {
                Classification::InLine => {
                    self.flush_blocks();
                    self.queue.push_back((Event::Comment(line), start));
                }
                Classification::End { depth } => self.ends.push_back((depth, line)),
                Classification::Block => self.blocks.push(line),
            }
        }
    }

    fn push(&mut self, event: Event, mark: Mark) {
        trace!(%event, %mark, "event");
        self.queue.push_back((event, mark));
    }

    /// Releases pending block comments. End comments still pending here
    /// trailed a collection that did not close after all, so they become
    /// block comments of whatever comes next.
    fn flush_blocks(&mut self) {
        while let Some((_, line)) = self.ends.pop_front() {
            let mark = line.start();
            self.push(Event::Comment(line.into_kind(CommentKind::Block)), mark);
        }
        for line in std::mem::take(&mut self.blocks) {
            let mark = line.start();
            self.push(Event::Comment(line), mark);
        }
    }

    fn emit(&mut self, event: Event, mark: Mark) {
        self.flush_blocks();
        self.push(event, mark);
    }

    fn emit_node(&mut self, event: Event, mark: Mark) {
        self.flush_blocks();
        if let Some(open) = self.collections.last_mut() {
            open.children += 1;
        }
        self.push(event, mark);
    }

    fn open(&mut self, open: Open, mark: Mark) {
        let event = if open.mapping {
            Event::MappingStart { flow: open.flow }
        } else {
            Event::SequenceStart { flow: open.flow }
        };
        self.emit_node(event, mark);
        self.collections.push(open);
    }

    fn close(&mut self, mark: Mark) {
        let depth = self.collections.len().saturating_sub(1);
        // comments still inside the brackets trail the flow collection
        if self.collections.last().is_some_and(|open| open.flow && !open.pair) {
            for line in std::mem::take(&mut self.blocks) {
                let line_mark = line.start();
                self.push(Event::Comment(line.into_kind(CommentKind::End)), line_mark);
            }
        }
        while let Some((target, _)) = self.ends.front() {
            if *target < depth {
                break;
            }
            let Some((target, line)) = self.ends.pop_front() else {
                break;
            };
            let line_mark = line.start();
            let line = if target == depth {
                line
            } else {
                line.into_kind(CommentKind::Block)
            };
            self.push(Event::Comment(line), line_mark);
        }
        let Some(open) = self.collections.pop() else {
            return;
        };
        let event = if open.mapping {
            Event::MappingEnd
        } else {
            Event::SequenceEnd
        };
        self.push(event, mark);
    }

    fn top(&self, mark: Mark) -> Result<Open, GrammarError> {
        self.collections
            .last()
            .copied()
            .ok_or_else(|| GrammarError::new(mark, "no open collection"))
    }

    fn scalar(&mut self, token: Token) {
        if let TokenKind::Scalar { value, style, .. } = token.kind {
            let event = Event::Scalar {
                value,
                style,
                placeholder: false,
            };
            self.emit_node(event, token.start);
        }
    }

    /// An implicit empty value. Pending comments are left for the node or
    /// collection end that follows it.
    fn empty_scalar(&mut self, mark: Mark) {
        if let Some(open) = self.collections.last_mut() {
            open.children += 1;
        }
        self.push(Event::empty_scalar(false), mark);
        self.state = self.pop_state();
    }

    fn step(&mut self) -> Result<(), GrammarError> {
        match self.state {
            State::StreamStart => {
                self.push(Event::StreamStart, Mark::new(1, 1));
                self.state = State::ImplicitDocumentStart;
            }
            State::ImplicitDocumentStart => {
                let (look, mark) = self.look()?;
                if look.ends_document() {
                    self.state = State::DocumentStart;
                } else {
                    self.begin_implicit_document(mark);
                }
            }
            State::DocumentStart => self.document_start()?,
            State::DocumentContent => {
                let (look, mark) = self.look()?;
                if look.ends_document() {
                    debug!(%mark, "explicit document without content");
                    self.emit_node(Event::empty_scalar(true), mark);
                    self.state = self.pop_state();
                } else {
                    self.state = State::BlockNode {
                        parent: None,
                        indicator: Indicator::Document,
                        line: mark.line,
                    };
                }
            }
            State::DocumentEnd => self.document_end()?,
            State::BlockNode {
                parent,
                indicator,
                line,
            } => self.block_node(parent, indicator, line)?,
            State::BlockSequenceEntry => self.block_sequence_entry()?,
            State::BlockMappingKey => self.block_mapping_key()?,
            State::FlowSequenceEntry { first } => self.flow_sequence_entry(first)?,
            State::FlowPairEnd => {
                let mark = self.last_mark;
                self.close(mark);
                self.state = self.pop_state();
            }
            State::FlowMappingKey { first } => self.flow_mapping_key(first)?,
            State::FlowValue => {
                let (look, mark) = self.look()?;
                if matches!(
                    look,
                    Look::FlowEntry | Look::SequenceEnd | Look::MappingEnd
                ) {
                    self.empty_scalar(mark);
                } else {
                    self.state = State::FlowNode;
                }
            }
            State::FlowNode => self.flow_node()?,
            State::End => {}
        }
        Ok(())
    }

    fn begin_implicit_document(&mut self, mark: Mark) {
        debug!(%mark, "implicit document start");
        self.emit(Event::DocumentStart { explicit: false }, mark);
        self.states.push(State::DocumentEnd);
        self.state = State::BlockNode {
            parent: None,
            indicator: Indicator::Document,
            line: mark.line,
        };
    }

    fn document_start(&mut self) -> Result<(), GrammarError> {
        let mut directives = false;
        loop {
            let (look, mark) = self.look()?;
            match look {
                Look::DocumentEnd => {
                    self.take()?;
                }
                Look::Directive => {
                    let token = self.take()?;
                    self.directive(token)?;
                    directives = true;
                }
                Look::End => {
                    self.emit(Event::StreamEnd, mark);
                    self.state = State::End;
                    return Ok(());
                }
                Look::DocumentStart => {
                    self.take()?;
                    debug!(%mark, "explicit document start");
                    self.emit(Event::DocumentStart { explicit: true }, mark);
                    self.states.push(State::DocumentEnd);
                    self.state = State::DocumentContent;
                    return Ok(());
                }
                _ if directives => return Err(self.unexpected("'<document start>'", mark)),
                _ => {
                    self.begin_implicit_document(mark);
                    return Ok(());
                }
            }
        }
    }

    fn directive(&mut self, token: Token) -> Result<(), GrammarError> {
        let TokenKind::Directive { name, params } = token.kind else {
            return Ok(());
        };
        match name.as_str() {
            "YAML" => {
                let version = params.first().ok_or_else(|| {
                    GrammarError::new(token.start, "expected a version in the %YAML directive")
                })?;
                let major = version.split('.').next().and_then(|m| m.parse::<u32>().ok());
                if major != Some(1) {
                    return Err(GrammarError::new(
                        token.start,
                        format!("found incompatible YAML document (version {version})"),
                    ));
                }
            }
            "TAG" => {}
            _ => debug!(%name, "ignoring unknown directive"),
        }
        Ok(())
    }

    fn document_end(&mut self) -> Result<(), GrammarError> {
        let (look, mark) = self.look()?;
        match look {
            Look::DocumentEnd => {
                self.take()?;
                self.emit(Event::DocumentEnd { explicit: true }, mark);
            }
            Look::End | Look::DocumentStart | Look::Directive => {
                self.emit(Event::DocumentEnd { explicit: false }, mark);
            }
            _ => return Err(self.unexpected("'<document end>'", mark)),
        }
        self.state = State::DocumentStart;
        Ok(())
    }

    fn block_node(
        &mut self,
        parent: Option<usize>,
        indicator: Indicator,
        line: usize,
    ) -> Result<(), GrammarError> {
        let (look, mark) = self.look()?;
        let same_line = indicator != Indicator::Document && mark.line == line;
        let indentless = indicator == Indicator::MapValue
            && look == Look::BlockEntry
            && parent == Some(mark.column);
        let shallow = !same_line
            && parent.is_some_and(|p| mark.column < p || (mark.column == p && !indentless));
        if shallow {
            self.empty_scalar(mark);
            return Ok(());
        }

        match look {
            Look::BlockEntry => {
                if same_line && indicator == Indicator::MapValue {
                    return Err(GrammarError::new(
                        mark,
                        "block sequence entries are not allowed in this context",
                    ));
                }
                let open = Open {
                    indentless,
                    ..Open::block(false, mark.column)
                };
                self.open(open, mark);
                self.state = State::BlockSequenceEntry;
            }
            Look::Scalar { key: true } => {
                if same_line && indicator == Indicator::MapValue {
                    return Err(GrammarError::new(
                        mark,
                        "mapping values are not allowed in this context",
                    ));
                }
                self.open(Open::block(true, mark.column), mark);
                self.state = State::BlockMappingKey;
            }
            Look::Scalar { key: false } => {
                let token = self.take()?;
                self.scalar(token);
                self.state = self.pop_state();
            }
            Look::SequenceStart => {
                self.take()?;
                self.open(Open::flow(false, mark.column), mark);
                self.state = State::FlowSequenceEntry { first: true };
            }
            Look::MappingStart => {
                self.take()?;
                self.open(Open::flow(true, mark.column), mark);
                self.state = State::FlowMappingKey { first: true };
            }
            _ => self.empty_scalar(mark),
        }
        Ok(())
    }

    fn block_sequence_entry(&mut self) -> Result<(), GrammarError> {
        let (look, mark) = self.look()?;
        let open = self.top(mark)?;
        if look == Look::BlockEntry && mark.column == open.indent {
            self.take()?;
            self.states.push(State::BlockSequenceEntry);
            self.state = State::BlockNode {
                parent: Some(open.indent),
                indicator: Indicator::Entry,
                line: mark.line,
            };
        } else if open.closed_by(look, mark) {
            self.close(mark);
            self.state = self.pop_state();
        } else {
            return Err(self.unexpected("a block sequence entry", mark));
        }
        Ok(())
    }

    fn block_mapping_key(&mut self) -> Result<(), GrammarError> {
        let (look, mark) = self.look()?;
        let open = self.top(mark)?;
        match look {
            Look::Scalar { key: true } if mark.column == open.indent => {
                let key = self.take()?;
                self.scalar(key);
                let value_mark = self.expect_value()?;
                self.states.push(State::BlockMappingKey);
                self.state = State::BlockNode {
                    parent: Some(open.indent),
                    indicator: Indicator::MapValue,
                    line: value_mark.line,
                };
            }
            _ if open.closed_by(look, mark) => {
                self.close(mark);
                self.state = self.pop_state();
            }
            Look::Scalar { key: false } if mark.column == open.indent => {
                return Err(GrammarError::new(
                    mark,
                    "could not find expected ':' while scanning a simple key",
                ));
            }
            _ => return Err(self.unexpected("a mapping key", mark)),
        }
        Ok(())
    }

    fn expect_value(&mut self) -> Result<Mark, GrammarError> {
        let (look, mark) = self.look()?;
        if look != Look::Value {
            return Err(self.unexpected("':'", mark));
        }
        self.take()?;
        Ok(mark)
    }

    /// Consumes the `,` separating flow entries, returning the lookahead after it.
    fn flow_separator(
        &mut self,
        first: bool,
        end: Look,
        expected: &str,
    ) -> Result<(Look, Mark), GrammarError> {
        let (look, mark) = self.look()?;
        if first || look == end {
            return Ok((look, mark));
        }
        if look != Look::FlowEntry {
            return Err(self.unexpected(expected, mark));
        }
        self.take()?;
        self.look()
    }

    fn flow_sequence_entry(&mut self, first: bool) -> Result<(), GrammarError> {
        let (look, mark) = self.flow_separator(first, Look::SequenceEnd, "',' or ']'")?;
        match look {
            Look::SequenceEnd => {
                self.take()?;
                self.close(mark);
                self.state = self.pop_state();
            }
            Look::Scalar { key: true } => {
                let pair = Open {
                    pair: true,
                    ..Open::flow(true, mark.column)
                };
                self.open(pair, mark);
                let key = self.take()?;
                self.scalar(key);
                self.expect_value()?;
                self.states.push(State::FlowSequenceEntry { first: false });
                self.states.push(State::FlowPairEnd);
                self.state = State::FlowValue;
            }
            _ => {
                self.states.push(State::FlowSequenceEntry { first: false });
                self.state = State::FlowNode;
            }
        }
        Ok(())
    }

    fn flow_mapping_key(&mut self, first: bool) -> Result<(), GrammarError> {
        let (look, mark) = self.flow_separator(first, Look::MappingEnd, "',' or '}'")?;
        match look {
            Look::MappingEnd => {
                self.take()?;
                self.close(mark);
                self.state = self.pop_state();
            }
            Look::Scalar { key } => {
                let token = self.take()?;
                self.scalar(token);
                if key {
                    self.expect_value()?;
                    self.states.push(State::FlowMappingKey { first: false });
                    self.state = State::FlowValue;
                } else {
                    self.emit_node(Event::empty_scalar(false), mark);
                    self.state = State::FlowMappingKey { first: false };
                }
            }
            _ => return Err(self.unexpected("a flow mapping key", mark)),
        }
        Ok(())
    }

    fn flow_node(&mut self) -> Result<(), GrammarError> {
        let (look, mark) = self.look()?;
        match look {
            Look::Scalar { key: false } => {
                let token = self.take()?;
                self.scalar(token);
                self.state = self.pop_state();
            }
            Look::Scalar { key: true } => {
                return Err(GrammarError::new(
                    mark,
                    "mapping values are not allowed in this context",
                ));
            }
            Look::SequenceStart => {
                self.take()?;
                self.open(Open::flow(false, mark.column), mark);
                self.state = State::FlowSequenceEntry { first: true };
            }
            Look::MappingStart => {
                self.take()?;
                self.open(Open::flow(true, mark.column), mark);
                self.state = State::FlowMappingKey { first: true };
            }
            _ => return Err(self.unexpected("a flow node", mark)),
        }
        Ok(())
    }
}

impl<S: LexicalSource> Iterator for Parser<S> {
    type Item = Result<(Event, Mark), GrammarError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                return Some(Ok(item));
            }
            if self.state == State::End {
                return None;
            }
            if let Err(err) = self.step() {
                self.state = State::End;
                self.queue.clear();
                return Some(Err(err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use crate::scanner::Scanner;
    use crate::token::{ScalarStyle, TokenList};
    use pretty_assertions::assert_eq;

    fn events(input: &str) -> Vec<String> {
        Parser::new(Scanner::new(input))
            .map(|item| item.map(|(event, _)| event.to_string()))
            .collect::<Result<_, _>>()
            .expect("parse should succeed")
    }

    fn ids(input: &str) -> Vec<EventId> {
        Parser::new(Scanner::new(input))
            .map(|item| item.map(|(event, _)| event.id()))
            .collect::<Result<_, _>>()
            .expect("parse should succeed")
    }

    #[test]
    fn empty_stream() {
        assert_eq!(events(""), ["+STR", "-STR"]);
    }

    #[test]
    fn comment_only_stream_has_no_document() {
        assert_eq!(
            events("# Comment"),
            ["+STR", "=COMMENT BLOCK \"Comment\"", "-STR"]
        );
    }

    #[test]
    fn inline_after_key_then_value() {
        assert_eq!(
            events("key: # Comment\n     # lines\n  value\n\n"),
            [
                "+STR",
                "+DOC",
                "+MAP",
                "=VAL \"key\"",
                "=COMMENT INLINE \"Comment\"",
                "=COMMENT INLINE \"lines\"",
                "=VAL \"value\"",
                "-MAP",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn blank_lines_after_last_entry_are_end_comments() {
        assert_eq!(
            events("\nabc: def # commment\n\n\n"),
            [
                "+STR",
                "=COMMENT BLOCK \"\"",
                "+DOC",
                "+MAP",
                "=VAL \"abc\"",
                "=VAL \"def\"",
                "=COMMENT INLINE \"commment\"",
                "=COMMENT END \"\"",
                "=COMMENT END \"\"",
                "-MAP",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn directive_comment_is_dropped() {
        assert_eq!(ids("%YAML 1.1 #Comment\n"), [EventId::StreamStart, EventId::StreamEnd]);
    }

    #[test]
    fn end_comment_trails_the_outer_mapping_of_an_indentless_sequence() {
        assert_eq!(
            events("# Comment\nlist: # InlineComment1\n# Block Comment\n- item # InlineComment2\n# Comment\n"),
            [
                "+STR",
                "=COMMENT BLOCK \"Comment\"",
                "+DOC",
                "+MAP",
                "=VAL \"list\"",
                "=COMMENT INLINE \"InlineComment1\"",
                "=COMMENT BLOCK \"Block Comment\"",
                "+SEQ",
                "=VAL \"item\"",
                "=COMMENT INLINE \"InlineComment2\"",
                "-SEQ",
                "=COMMENT END \"Comment\"",
                "-MAP",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn indented_comment_trails_the_nested_mapping() {
        assert_eq!(
            events("a:\n  b: 1\n  # tail of a\nc: 2\n"),
            [
                "+STR",
                "+DOC",
                "+MAP",
                "=VAL \"a\"",
                "+MAP",
                "=VAL \"b\"",
                "=VAL \"1\"",
                "=COMMENT END \"tail of a\"",
                "-MAP",
                "=VAL \"c\"",
                "=VAL \"2\"",
                "-MAP",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn unindented_comment_before_a_sibling_key_is_block() {
        assert_eq!(
            events("a:\n  b: 1\n# about c\nc: 2\n"),
            [
                "+STR",
                "+DOC",
                "+MAP",
                "=VAL \"a\"",
                "+MAP",
                "=VAL \"b\"",
                "=VAL \"1\"",
                "-MAP",
                "=COMMENT BLOCK \"about c\"",
                "=VAL \"c\"",
                "=VAL \"2\"",
                "-MAP",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn entry_indicator_comment_is_block() {
        assert_eq!(
            events("- # about b\n  b\n"),
            [
                "+STR",
                "+DOC",
                "+SEQ",
                "=COMMENT BLOCK \"about b\"",
                "=VAL \"b\"",
                "-SEQ",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn flow_collection_comments() {
        assert_eq!(
            events("[ a, # after a\n  b\n  # tail\n]\n"),
            [
                "+STR",
                "+DOC",
                "+SEQ []",
                "=VAL \"a\"",
                "=COMMENT INLINE \"after a\"",
                "=VAL \"b\"",
                "=COMMENT END \"tail\"",
                "-SEQ",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn comment_inside_an_empty_flow_sequence_trails_it() {
        assert_eq!(
            events("[\n# c\n]"),
            [
                "+STR",
                "+DOC",
                "+SEQ []",
                "=COMMENT END \"c\"",
                "-SEQ",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn comment_after_an_empty_value_trails_the_mapping() {
        assert_eq!(
            events("a:\n# c\n"),
            [
                "+STR",
                "+DOC",
                "+MAP",
                "=VAL \"a\"",
                "=VAL \"\"",
                "=COMMENT END \"c\"",
                "-MAP",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn comment_after_an_empty_value_stays_with_the_next_key() {
        assert_eq!(
            events("a:\n# about b\nb: 1\n"),
            [
                "+STR",
                "+DOC",
                "+MAP",
                "=VAL \"a\"",
                "=VAL \"\"",
                "=COMMENT BLOCK \"about b\"",
                "=VAL \"b\"",
                "=VAL \"1\"",
                "-MAP",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn explicit_empty_document_yields_placeholder() {
        assert_eq!(
            events("a: 1\n---\n# Block Comment7\n"),
            [
                "+STR",
                "+DOC",
                "+MAP",
                "=VAL \"a\"",
                "=VAL \"1\"",
                "-MAP",
                "-DOC",
                "+DOC ---",
                "=COMMENT BLOCK \"Block Comment7\"",
                "=VAL \"\"",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn comments_can_be_switched_off() {
        let parser = Parser::with_options(
            Scanner::new("# a\nkey: value # b\n\n"),
            ParserOptions::default().with_comments(false),
        );
        let ids: Vec<EventId> = parser
            .map(|item| item.map(|(event, _)| event.id()))
            .collect::<Result<_, _>>()
            .expect("parse should succeed");
        assert!(!ids.contains(&EventId::Comment));
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn runs_over_any_lexical_source() {
        let scalar = |value: &str, key, column| {
            let kind = TokenKind::Scalar {
                value: value.to_string(),
                style: ScalarStyle::Plain,
                key,
            };
            Token::new(kind, Mark::new(1, column))
        };
        let comment = |text: &str, after_content, line, column| {
            let kind = TokenKind::Comment(CommentToken {
                text: text.to_string(),
                blank: false,
                after_content,
            });
            Token::new(kind, Mark::new(line, column))
        };
        let tokens = TokenList::new([
            scalar("k", true, 1),
            Token::new(TokenKind::Value, Mark::new(1, 2)),
            scalar("v", false, 4),
            comment("note", true, 1, 6),
            comment("tail", false, 2, 1),
        ]);
        let events: Vec<String> = Parser::new(tokens)
            .map(|item| item.map(|(event, _)| event.to_string()))
            .collect::<Result<_, _>>()
            .expect("parse should succeed");
        assert_eq!(
            events,
            [
                "+STR",
                "+DOC",
                "+MAP",
                "=VAL \"k\"",
                "=VAL \"v\"",
                "=COMMENT INLINE \"note\"",
                "=COMMENT END \"tail\"",
                "-MAP",
                "-DOC",
                "-STR",
            ]
        );
    }

    #[test]
    fn reports_grammar_errors() {
        let err = Parser::new(Scanner::new("a: b: c\n"))
            .collect::<Result<Vec<_>, _>>()
            .expect_err("nested mapping on one line must fail");
        assert_eq!(err.mark, Mark::new(1, 4));

        let err = Parser::new(Scanner::new("[a, b\n"))
            .collect::<Result<Vec<_>, _>>()
            .expect_err("unterminated flow sequence must fail");
        assert!(err.message.contains("',' or ']'"), "{}", err.message);

        let err = Parser::new(Scanner::new("%YAML 2.0\n---\na\n"))
            .collect::<Result<Vec<_>, _>>()
            .expect_err("incompatible version must fail");
        assert!(err.message.contains("incompatible"));
    }
}
