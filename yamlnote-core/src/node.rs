use crate::comments::CommentLine;
use crate::token::{Mark, ScalarStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(ScalarNode),
    Sequence(SequenceNode),
    Mapping(MappingNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarNode {
    pub value: String,
    pub style: ScalarStyle,
    pub start: Mark,
    pub block_comments: Vec<CommentLine>,
    pub inline_comments: Vec<CommentLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceNode {
    pub items: Vec<Node>,
    pub flow: bool,
    pub start: Mark,
    pub block_comments: Vec<CommentLine>,
    pub inline_comments: Vec<CommentLine>,
    pub end_comments: Vec<CommentLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingNode {
    pub entries: Vec<(Node, Node)>,
    pub flow: bool,
    pub start: Mark,
    pub block_comments: Vec<CommentLine>,
    pub inline_comments: Vec<CommentLine>,
    pub end_comments: Vec<CommentLine>,
}

impl ScalarNode {
    pub fn new(value: impl Into<String>, style: ScalarStyle, start: Mark) -> Self {
        Self {
            value: value.into(),
            style,
            start,
            block_comments: Vec::new(),
            inline_comments: Vec::new(),
        }
    }
}

impl SequenceNode {
    pub fn new(flow: bool, start: Mark) -> Self {
        Self {
            items: Vec::new(),
            flow,
            start,
            block_comments: Vec::new(),
            inline_comments: Vec::new(),
            end_comments: Vec::new(),
        }
    }
}

impl MappingNode {
    pub fn new(flow: bool, start: Mark) -> Self {
        Self {
            entries: Vec::new(),
            flow,
            start,
            block_comments: Vec::new(),
            inline_comments: Vec::new(),
            end_comments: Vec::new(),
        }
    }

    /// Looks up the value of the first entry whose key is the scalar `key`.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_scalar().is_some_and(|k| k.value == key))
            .map(|(_, v)| v)
    }
}

impl Node {
    pub fn start(&self) -> Mark {
        match self {
            Node::Scalar(node) => node.start,
            Node::Sequence(node) => node.start,
            Node::Mapping(node) => node.start,
        }
    }

    pub fn block_comments(&self) -> &[CommentLine] {
        match self {
            Node::Scalar(node) => &node.block_comments,
            Node::Sequence(node) => &node.block_comments,
            Node::Mapping(node) => &node.block_comments,
        }
    }

    pub fn inline_comments(&self) -> &[CommentLine] {
        match self {
            Node::Scalar(node) => &node.inline_comments,
            Node::Sequence(node) => &node.inline_comments,
            Node::Mapping(node) => &node.inline_comments,
        }
    }

    /// Always empty for scalars.
    pub fn end_comments(&self) -> &[CommentLine] {
        match self {
            Node::Scalar(_) => &[],
            Node::Sequence(node) => &node.end_comments,
            Node::Mapping(node) => &node.end_comments,
        }
    }

    pub(crate) fn block_comments_mut(&mut self) -> &mut Vec<CommentLine> {
        match self {
            Node::Scalar(node) => &mut node.block_comments,
            Node::Sequence(node) => &mut node.block_comments,
            Node::Mapping(node) => &mut node.block_comments,
        }
    }

    pub(crate) fn inline_comments_mut(&mut self) -> &mut Vec<CommentLine> {
        match self {
            Node::Scalar(node) => &mut node.inline_comments,
            Node::Sequence(node) => &mut node.inline_comments,
            Node::Mapping(node) => &mut node.inline_comments,
        }
    }

    pub(crate) fn end_comments_mut(&mut self) -> Option<&mut Vec<CommentLine>> {
        match self {
            Node::Scalar(_) => None,
            Node::Sequence(node) => Some(&mut node.end_comments),
            Node::Mapping(node) => Some(&mut node.end_comments),
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarNode> {
        match self {
            Node::Scalar(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceNode> {
        match self {
            Node::Sequence(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&MappingNode> {
        match self {
            Node::Mapping(node) => Some(node),
            _ => None,
        }
    }

    /// Every comment in the subtree, in tree order: a node's block comments,
    /// then its children, then its inline and end comments. Keys come before
    /// their values.
    pub fn comments(&self) -> Vec<&CommentLine> {
        let mut out = Vec::new();
        collect_comments(self, &mut out);
        out
    }
}

fn collect_comments<'a>(node: &'a Node, out: &mut Vec<&'a CommentLine>) {
    out.extend(node.block_comments());
    match node {
        Node::Scalar(_) => {}
        Node::Sequence(seq) => seq.items.iter().for_each(|item| collect_comments(item, out)),
        Node::Mapping(map) => map.entries.iter().for_each(|(key, value)| {
            collect_comments(key, out);
            collect_comments(value, out);
        }),
    }
    out.extend(node.inline_comments());
    out.extend(node.end_comments());
}
