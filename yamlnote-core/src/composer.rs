use std::mem;

use tailcall::trampoline::{self, Next};
use tracing::{debug, trace};

use crate::comments::{CommentKind, CommentLine};
use crate::error::{ComposeError, GrammarError};
use crate::event::Event;
use crate::node::{MappingNode, Node, ScalarNode, SequenceNode};
use crate::options::{ComposerOptions, EmptyDocumentPolicy};
use crate::parser::Parser;
use crate::token::{LexicalSource, Mark, ScalarStyle};

/// Builds one node tree per document from the parser's event stream and
/// hangs every comment event on the node it belongs to.
///
/// Comments are attached as they arrive: block comments wait in a buffer
/// for the next node created, inline comments go to the node finished
/// last at the current depth, end comments to the innermost open
/// collection.
pub struct Composer<S> {
    parser: Parser<S>,
    options: ComposerOptions,
    // block comments waiting for the next node
    pending: Vec<CommentLine>,
    // inline comments that arrived before any node could take them
    held: Vec<CommentLine>,
    ready: Option<Node>,
    // an event read past the end of a document and put back
    lookahead: Option<(Event, Mark)>,
    finished: bool,
    discard_leading: bool,
}

impl<S: LexicalSource> Composer<S> {
    pub fn new(parser: Parser<S>) -> Self {
        Self::with_options(parser, ComposerOptions::default())
    }

    pub fn with_options(parser: Parser<S>, options: ComposerOptions) -> Self {
        Self {
            parser,
            options,
            pending: Vec::new(),
            held: Vec::new(),
            ready: None,
            lookahead: None,
            finished: false,
            discard_leading: false,
        }
    }

    /// Whether another document node can be composed. Composes it ahead of
    /// time; the next call to [`Composer::next_document`] hands it out.
    pub fn has_next(&mut self) -> Result<bool, ComposeError> {
        if self.ready.is_none() {
            self.ready = self.pull()?;
        }
        Ok(self.ready.is_some())
    }

    pub fn next_document(&mut self) -> Result<Node, ComposeError> {
        self.pull()?.ok_or(ComposeError::Exhausted)
    }

    pub fn compose_all(&mut self) -> Result<Vec<Node>, ComposeError> {
        self.collect()
    }

    /// Composes the only document of the stream, discarding comments that
    /// precede it. `Ok(None)` for a stream without documents.
    pub fn compose_single(&mut self) -> Result<Option<Node>, ComposeError> {
        self.discard_leading = self.ready.is_none();
        let document = self.pull();
        self.discard_leading = false;
        let Some(document) = document? else {
            return Ok(None);
        };
        match self.pull()? {
            Some(extra) => Err(ComposeError::MultipleDocuments(extra.start())),
            None => Ok(Some(document)),
        }
    }

    fn pull(&mut self) -> Result<Option<Node>, ComposeError> {
        if let Some(node) = self.ready.take() {
            return Ok(Some(node));
        }
        if self.finished {
            return Ok(None);
        }
        let result = self.compose_next();
        if result.is_err() {
            self.finished = true;
        }
        result
    }

    fn compose_next(&mut self) -> Result<Option<Node>, ComposeError> {
        loop {
            let Some((event, mark)) = self.next_event()? else {
                self.finished = true;
                return Ok(None);
            };
            match event {
                Event::StreamStart => {}
                Event::Comment(line) if self.discard_leading => {
                    trace!(text = line.text(), "discarding comment before the document");
                }
                Event::Comment(line) => self.buffer(line),
                Event::DocumentStart { .. } => {
                    let machine = DocumentMachine::new(self, mark);
                    if let Some(mut root) = run_document_machine(machine)? {
                        if root.end_comments_mut().is_none()
                            && !(self.pending.is_empty() && self.held.is_empty())
                        {
                            self.settle_trailing(&mut root)?;
                        }
                        return Ok(Some(root));
                    }
                }
                Event::StreamEnd => {
                    self.finished = true;
                    return Ok(self.comment_only_stream(mark));
                }
                other => {
                    return Err(GrammarError::new(
                        mark,
                        format!("unexpected event {other} outside of a document"),
                    )
                    .into());
                }
            }
        }
    }

    fn next_event(&mut self) -> Result<Option<(Event, Mark)>, ComposeError> {
        if let Some(item) = self.lookahead.take() {
            return Ok(Some(item));
        }
        Ok(self.parser.next_event()?)
    }

    /// Comments trailing a scalar root belong to it when only the end of
    /// the stream follows. Before another document they stay buffered and
    /// lead that document instead.
    fn settle_trailing(&mut self, root: &mut Node) -> Result<(), ComposeError> {
        while let Some((event, mark)) = self.next_event()? {
            match event {
                Event::Comment(line) => self.buffer(line),
                Event::StreamEnd => {
                    self.lookahead = Some((event, mark));
                    break;
                }
                other => {
                    self.lookahead = Some((other, mark));
                    return Ok(());
                }
            }
        }
        let (pending, held) = self.take_comments();
        trace!(
            count = pending.len() + held.len(),
            "trailing comments stay with the scalar root"
        );
        root.inline_comments_mut().extend(
            pending
                .into_iter()
                .chain(held)
                .map(|line| line.into_kind(CommentKind::InLine)),
        );
        Ok(())
    }

    fn buffer(&mut self, line: CommentLine) {
        match line.kind() {
            CommentKind::InLine => self.held.push(line),
            CommentKind::Block => self.pending.push(line),
            CommentKind::End => self.pending.push(line.into_kind(CommentKind::Block)),
        }
    }

    /// Comments left over at the end of the stream become an empty mapping.
    fn comment_only_stream(&mut self, mark: Mark) -> Option<Node> {
        if self.pending.is_empty() && self.held.is_empty() {
            return None;
        }
        debug!(%mark, "synthesizing an empty mapping for trailing comments");
        let mut node = MappingNode::new(false, mark);
        node.block_comments = mem::take(&mut self.pending);
        node.inline_comments = mem::take(&mut self.held);
        Some(Node::Mapping(node))
    }

    fn take_comments(&mut self) -> (Vec<CommentLine>, Vec<CommentLine>) {
        (mem::take(&mut self.pending), mem::take(&mut self.held))
    }
}

impl<S: LexicalSource> Iterator for Composer<S> {
    type Item = Result<Node, ComposeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().transpose()
    }
}

struct DocumentMachine<'a, S> {
    composer: &'a mut Composer<S>,
    stack: Vec<Frame>,
    root: Option<Node>,
    placeholder: bool,
    mark: Mark,
}

impl<'a, S: LexicalSource> DocumentMachine<'a, S> {
    fn new(composer: &'a mut Composer<S>, mark: Mark) -> Self {
        Self {
            composer,
            stack: Vec::new(),
            root: None,
            placeholder: false,
            mark,
        }
    }

    /// Consumes one event; `Some` once the document is complete. The inner
    /// option is `None` for a document dropped by the empty-document policy.
    fn run_step(&mut self) -> Result<Option<Option<Node>>, ComposeError> {
        let Some((event, mark)) = self.composer.next_event()? else {
            return Err(GrammarError::new(self.mark, "event stream ended inside a document").into());
        };
        self.mark = mark;
        match event {
            Event::Comment(line) => self.attach(line),
            Event::Scalar {
                value,
                style,
                placeholder,
            } => {
                let mut node = ScalarNode::new(value, style, mark);
                (node.block_comments, node.inline_comments) = self.composer.take_comments();
                self.placeholder |= placeholder;
                self.finish_node(Node::Scalar(node));
            }
            Event::SequenceStart { flow } => {
                let mut node = SequenceNode::new(flow, mark);
                (node.block_comments, node.inline_comments) = self.composer.take_comments();
                self.stack.push(Frame::Seq(node));
            }
            Event::MappingStart { flow } => {
                let mut node = MappingNode::new(flow, mark);
                (node.block_comments, node.inline_comments) = self.composer.take_comments();
                self.stack.push(Frame::Map(MapFrame { node, key: None }));
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let frame = self.stack.pop().ok_or_else(|| {
                    GrammarError::new(mark, "collection end without an open collection")
                })?;
                self.finish_node(frame.into_node());
            }
            Event::DocumentEnd { .. } => return Ok(Some(self.finish_document(mark))),
            other => {
                return Err(GrammarError::new(
                    mark,
                    format!("unexpected event {other} inside a document"),
                )
                .into());
            }
        }
        Ok(None)
    }

    fn step(mut self) -> Next<Self, Result<Option<Node>, ComposeError>> {
        match self.run_step() {
            Ok(Some(root)) => Next::Finish(Ok(root)),
            Ok(None) => Next::Recurse(self),
            Err(err) => Next::Finish(Err(err)),
        }
    }

    fn attach(&mut self, line: CommentLine) {
        trace!(kind = ?line.kind(), text = line.text(), "attaching comment");
        match line.kind() {
            CommentKind::Block => self.composer.pending.push(line),
            CommentKind::InLine => match self.last_finished() {
                Some(node) => node.inline_comments_mut().push(line),
                None => self.composer.held.push(line),
            },
            CommentKind::End => match self.stack.last_mut() {
                Some(frame) => frame.end_comments_mut().push(line),
                None => self.composer.buffer(line),
            },
        }
    }

    /// The node finished most recently at the current depth: a key still
    /// waiting for its value, the last value or item, or the root.
    fn last_finished(&mut self) -> Option<&mut Node> {
        match self.stack.last_mut() {
            Some(Frame::Seq(seq)) => seq.items.last_mut(),
            Some(Frame::Map(MapFrame { node, key })) => key
                .as_mut()
                .or_else(|| node.entries.last_mut().map(|(_, value)| value)),
            None => self.root.as_mut(),
        }
    }

    fn finish_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.handle_child(node),
            None => self.root = Some(node),
        }
    }

    fn finish_document(&mut self, mark: Mark) -> Option<Node> {
        let mut root = match self.root.take() {
            Some(root) => root,
            None => Node::Scalar(ScalarNode::new("", ScalarStyle::Plain, mark)),
        };

        if self.placeholder && !root.comments().is_empty() {
            match self.composer.options.empty_document {
                EmptyDocumentPolicy::EmptyScalar => {}
                EmptyDocumentPolicy::EmptyMapping => {
                    debug!(%mark, "composing a comment-only document as an empty mapping");
                    let mut node = MappingNode::new(false, root.start());
                    node.block_comments = mem::take(root.block_comments_mut());
                    node.inline_comments = mem::take(root.inline_comments_mut());
                    root = Node::Mapping(node);
                }
                EmptyDocumentPolicy::Drop => {
                    debug!(%mark, "dropping a comment-only document");
                    return None;
                }
            }
        }

        let leftover = mem::take(&mut self.composer.pending);
        if !leftover.is_empty() {
            match root.end_comments_mut() {
                Some(end) => end.extend(
                    leftover
                        .into_iter()
                        .map(|line| line.into_kind(CommentKind::End)),
                ),
                // settled by the composer once it sees what follows
                None => self.composer.pending = leftover,
            }
        }
        debug!(%mark, "composed document");
        Some(root)
    }
}

fn run_document_machine<S: LexicalSource>(
    machine: DocumentMachine<'_, S>,
) -> Result<Option<Node>, ComposeError> {
    trampoline::run(DocumentMachine::step, machine)
}

enum Frame {
    Seq(SequenceNode),
    Map(MapFrame),
}

struct MapFrame {
    node: MappingNode,
    key: Option<Node>,
}

impl Frame {
    fn handle_child(&mut self, child: Node) {
        match self {
            Frame::Seq(seq) => seq.items.push(child),
            Frame::Map(map) => match map.key.take() {
                Some(key) => map.node.entries.push((key, child)),
                None => map.key = Some(child),
            },
        }
    }

    fn end_comments_mut(&mut self) -> &mut Vec<CommentLine> {
        match self {
            Frame::Seq(seq) => &mut seq.end_comments,
            Frame::Map(map) => &mut map.node.end_comments,
        }
    }

    fn into_node(self) -> Node {
        match self {
            Frame::Seq(seq) => Node::Sequence(seq),
            Frame::Map(mut map) => {
                if let Some(key) = map.key.take() {
                    let value = ScalarNode::new("", ScalarStyle::Plain, key.start());
                    map.node.entries.push((key, Node::Scalar(value)));
                }
                Node::Mapping(map.node)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::Scanner;
    use pretty_assertions::assert_eq;

    fn composer(input: &str) -> Composer<Scanner> {
        Composer::new(Parser::new(Scanner::new(input)))
    }

    fn texts(comments: &[CommentLine]) -> Vec<&str> {
        comments.iter().map(CommentLine::text).collect()
    }

    #[test]
    fn next_document_past_the_end_is_exhausted() {
        let mut composer = composer("a: 1\n");
        assert!(composer.has_next().expect("lookahead"));
        assert!(composer.has_next().expect("lookahead is idempotent"));
        let root = composer.next_document().expect("one document");
        assert!(root.as_mapping().is_some());
        assert!(!composer.has_next().expect("lookahead"));
        assert_eq!(composer.next_document(), Err(ComposeError::Exhausted));
    }

    #[test]
    fn empty_stream_has_no_documents() {
        assert!(composer("").compose_all().expect("compose").is_empty());
    }

    #[test]
    fn comments_after_a_flow_root_become_end_comments() {
        let nodes = composer("[a]\n# after\n").compose_all().expect("compose");
        assert_eq!(nodes.len(), 1);
        let end = nodes[0].end_comments();
        assert_eq!(texts(end), ["after"]);
        assert_eq!(end[0].kind(), CommentKind::End);
    }

    #[test]
    fn comments_after_a_scalar_root_move_to_the_next_document() {
        let nodes = composer("a\n# about b\n---\nb\n").compose_all().expect("compose");
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].comments().is_empty());
        assert_eq!(texts(nodes[1].block_comments()), ["about b"]);
    }

    #[test]
    fn comments_after_the_only_scalar_root_stay_with_it() {
        let nodes = composer("a\n# c\n").compose_all().expect("compose");
        assert_eq!(nodes.len(), 1);
        let root = nodes[0].as_scalar().expect("scalar root");
        assert_eq!(root.value, "a");
        assert_eq!(texts(&root.inline_comments), ["c"]);
        assert_eq!(root.inline_comments[0].kind(), CommentKind::InLine);

        let root = composer("a\n# c\n")
            .compose_single()
            .expect("a single document")
            .expect("one node");
        assert_eq!(texts(root.inline_comments()), ["c"]);
    }

    #[test]
    fn empty_document_policies() {
        let input = "a: 1\n---\n# Block Comment7\n";
        let compose = |policy| {
            let parser = Parser::new(Scanner::new(input));
            let options = ComposerOptions::default().with_empty_document(policy);
            Composer::with_options(parser, options).compose_all().expect("compose")
        };

        let nodes = compose(EmptyDocumentPolicy::EmptyScalar);
        assert_eq!(nodes.len(), 2);
        let placeholder = nodes[1].as_scalar().expect("empty scalar");
        assert_eq!(placeholder.value, "");
        assert_eq!(texts(&placeholder.block_comments), ["Block Comment7"]);

        let nodes = compose(EmptyDocumentPolicy::EmptyMapping);
        let mapping = nodes[1].as_mapping().expect("empty mapping");
        assert!(mapping.entries.is_empty());
        assert_eq!(texts(&mapping.block_comments), ["Block Comment7"]);

        let nodes = compose(EmptyDocumentPolicy::Drop);
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn bare_separator_keeps_its_empty_scalar_under_every_policy() {
        let parser = Parser::new(Scanner::new("---\n"));
        let options = ComposerOptions::default().with_empty_document(EmptyDocumentPolicy::Drop);
        let nodes = Composer::with_options(parser, options)
            .compose_all()
            .expect("compose");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].as_scalar().map(|s| s.value.as_str()), Some(""));
    }

    #[test]
    fn compose_single_discards_leading_comments() {
        let root = composer("\nabc: def # commment\n\n\n")
            .compose_single()
            .expect("compose")
            .expect("one document");
        assert!(root.block_comments().is_empty());
        assert_eq!(root.end_comments().len(), 2);
    }

    #[test]
    fn compose_single_rejects_a_second_document() {
        let err = composer("a\n---\nb\n")
            .compose_single()
            .expect_err("two documents");
        assert_eq!(err, ComposeError::MultipleDocuments(Mark::new(3, 1)));
    }

    #[test]
    fn grammar_errors_pass_through_and_stop_the_composer() {
        let mut composer = composer("a:\n\tb: 2\n");
        let err = composer.next_document().expect_err("tab indentation");
        assert!(matches!(err, ComposeError::Grammar(_)));
        assert!(composer.next().is_none());
    }
}
