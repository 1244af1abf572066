//! Arena syntax tree the annotator works on.
//!
//! Nodes live in a single `Vec` owned by [`SyntaxTree`] and refer to each
//! other through [`NodeId`]. Ownership flows from parent to children; the
//! `parent` id is a plain back reference used for ascent only.
//!
//! The node-kind set is closed: every construct the locator has to reason
//! about has its own [`NodeKind`] variant and everything else collapses into
//! `Syntax`, `Statement` or `Expression`.
//!
//! ## Child layout
//!
//! - `If`: `[test, consequent, alternate?]`
//! - `MarkupElement` / `MarkupFragment`: `[opening tag, markup children..., closing tag?]`
//! - `MarkupExpressionHole`: exactly one child

mod edit;

/// Unique identifier for nodes in the syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Source range of a node or comment.
///
/// `lo`/`hi` are byte offsets into the parsed source, lines are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub lo: usize,
    pub hi: usize,
    pub start_line: usize,
    pub end_line: usize,
}

impl Span {
    pub fn new(lo: usize, hi: usize, start_line: usize, end_line: usize) -> Self {
        Self {
            lo,
            hi,
            start_line,
            end_line,
        }
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Block,
    If,
    /// Empty statement; also used as the placeholder statement inserted into
    /// empty blocks.
    Empty,
    Statement,
    Expression,
    /// Any other construct (declarators, parameters, patterns, properties...).
    Syntax,
    MarkupElement,
    MarkupFragment,
    MarkupOpeningTag,
    MarkupClosingTag,
    MarkupAttribute,
    MarkupText {
        value: String,
    },
    MarkupExpressionHole,
    MarkupEmptyExpression,
}

impl NodeKind {
    /// True for every node of the embedded markup dialect.
    pub fn is_markup(&self) -> bool {
        matches!(
            self,
            Self::MarkupElement
                | Self::MarkupFragment
                | Self::MarkupOpeningTag
                | Self::MarkupClosingTag
                | Self::MarkupAttribute
                | Self::MarkupText { .. }
                | Self::MarkupExpressionHole
                | Self::MarkupEmptyExpression
        )
    }

    /// Elements and fragments own a list of markup children.
    pub fn has_markup_children(&self) -> bool {
        matches!(self, Self::MarkupElement | Self::MarkupFragment)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::MarkupText { value } => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// text`
    Line,
    /// `/* text */`
    Block,
}

/// Where a comment sits relative to the node that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Leading,
    /// `own_line` comments are printed on a fresh line after the node,
    /// others directly after it on the same line.
    Trailing { own_line: bool },
    Inner,
}

/// Which comment list of a node to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSlot {
    Leading,
    Trailing,
    Inner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    /// Comment body without the `//` or `/* */` delimiters.
    pub text: String,
    pub placement: Placement,
    /// Present for comments read from the source, `None` for inserted ones.
    pub span: Option<Span>,
    /// Set once the text of an original comment was overwritten.
    pub rewritten: bool,
}

impl Comment {
    pub fn new(kind: CommentKind, text: impl Into<String>, placement: Placement) -> Self {
        Self {
            kind,
            text: text.into(),
            placement,
            span: None,
            rewritten: false,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Overwrite the body, remembering that the source text is now stale.
    pub fn set_text(&mut self, text: String) {
        self.text = text;
        self.rewritten = true;
    }

    pub fn is_inserted(&self) -> bool {
        self.span.is_none()
    }

    /// Render the comment with its delimiters.
    pub fn render(&self) -> String {
        match self.kind {
            CommentKind::Line => format!("//{}", self.text),
            CommentKind::Block => format!("/*{}*/", self.text),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Option<Span>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub leading_comments: Vec<Comment>,
    pub trailing_comments: Vec<Comment>,
    pub inner_comments: Vec<Comment>,
}

impl Node {
    fn new(kind: NodeKind, span: Option<Span>) -> Self {
        Self {
            kind,
            span,
            parent: None,
            children: Vec::new(),
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            inner_comments: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn comments(&self, slot: CommentSlot) -> &[Comment] {
        match slot {
            CommentSlot::Leading => &self.leading_comments,
            CommentSlot::Trailing => &self.trailing_comments,
            CommentSlot::Inner => &self.inner_comments,
        }
    }

    pub fn comments_mut(&mut self, slot: CommentSlot) -> &mut Vec<Comment> {
        match slot {
            CommentSlot::Leading => &mut self.leading_comments,
            CommentSlot::Trailing => &mut self.trailing_comments,
            CommentSlot::Inner => &mut self.inner_comments,
        }
    }
}

/// Line terminator used by `source`: `"\r\n"` as soon as one appears,
/// `"\n"` otherwise.
pub fn detect_line_ending(source: &str) -> &'static str {
    if source.contains("\r\n") { "\r\n" } else { "\n" }
}

/// A parsed file: the arena plus its root `Program` node.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
    line_ending: &'static str,
}

impl SyntaxTree {
    pub fn new(root_span: Option<Span>) -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Program, root_span)],
            root: NodeId(0),
            line_ending: "\n",
        }
    }

    pub fn with_line_ending(mut self, line_ending: &'static str) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Terminator for line breaks added to this tree.
    pub fn line_ending(&self) -> &'static str {
        self.line_ending
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.nodes[id.0].span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Allocate a detached node. Attach it with [`SyntaxTree::append_child`]
    /// or one of the editing operations.
    pub fn alloc(&mut self, kind: NodeKind, span: Option<Span>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, span));
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Position of `id` among its parent's children.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// All nodes reachable from the root, in document order (pre-order).
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        order
    }

    /// `consequent` and `alternate` of an `If` node.
    pub fn if_branches(&self, id: NodeId) -> Option<(NodeId, Option<NodeId>)> {
        if *self.kind(id) != NodeKind::If {
            return None;
        }
        let children = self.children(id);
        Some((*children.get(1)?, children.get(2).copied()))
    }

    /// Index range of the markup children of an element or fragment,
    /// excluding its opening and closing tags.
    pub fn markup_range(&self, id: NodeId) -> Option<std::ops::Range<usize>> {
        if !self.kind(id).has_markup_children() {
            return None;
        }
        let children = self.children(id);
        let start = usize::from(
            children
                .first()
                .is_some_and(|&c| *self.kind(c) == NodeKind::MarkupOpeningTag),
        );
        let end = if children
            .last()
            .is_some_and(|&c| *self.kind(c) == NodeKind::MarkupClosingTag)
        {
            children.len() - 1
        } else {
            children.len()
        };
        Some(start..end.max(start))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.kind(id).text()
    }
}
