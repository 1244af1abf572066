//! Tree-editing operations.
//!
//! The annotator never writes node fields directly; every mutation goes
//! through one of these methods. Each states the postcondition it
//! guarantees.

use super::{Comment, CommentKind, CommentSlot, NodeId, NodeKind, Placement, Span, SyntaxTree};

impl SyntaxTree {
    /// Append `comment` to `slot` of `id`.
    ///
    /// Postcondition: `comment` is the last entry of that slot.
    pub fn append_comment(&mut self, id: NodeId, slot: CommentSlot, comment: Comment) {
        self.node_mut(id).comments_mut(slot).push(comment);
    }

    /// Splice detached `nodes` into the children of `parent` at `index`.
    ///
    /// Postcondition: `children(parent)[index..index + nodes.len()] == nodes`
    /// and every inserted node has `parent` as its parent.
    pub fn insert_children(&mut self, parent: NodeId, index: usize, nodes: &[NodeId]) {
        for &node in nodes {
            self.nodes[node.0].parent = Some(parent);
        }
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.splice(index..index, nodes.iter().copied());
    }

    /// Replace the text node `id` by the detached text `fragments`.
    ///
    /// Postcondition: the fragments occupy the former position of `id`, their
    /// values concatenate to the old value, and `id` is detached.
    pub fn replace_with_fragments(&mut self, id: NodeId, fragments: &[NodeId]) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(index) = self.index_in_parent(id) else {
            return;
        };

        debug_assert_eq!(
            fragments
                .iter()
                .filter_map(|&f| self.text(f))
                .collect::<String>(),
            self.text(id).unwrap_or_default()
        );

        for &fragment in fragments {
            self.nodes[fragment.0].parent = Some(parent);
        }
        self.nodes[parent.0]
            .children
            .splice(index..index + 1, fragments.iter().copied());
        self.nodes[id.0].parent = None;
    }

    /// Create a detached text node holding `value[offset..offset + len]` of
    /// the text node `source`.
    ///
    /// The fragment's span is the matching sub-range of the source span, so
    /// the printer keeps emitting the original bytes.
    pub fn text_fragment(&mut self, source: NodeId, offset: usize, len: usize) -> NodeId {
        let value = self.text(source).unwrap_or_default();
        let fragment = value[offset..offset + len].to_string();
        let span = self.span(source).map(|s| {
            let start_line = s.start_line + value[..offset].matches('\n').count();
            let end_line = start_line + fragment.matches('\n').count();
            Span::new(s.lo + offset, s.lo + offset + len, start_line, end_line)
        });
        self.alloc(NodeKind::MarkupText { value: fragment }, span)
    }

    /// Split the text node `id` at byte offset `at`.
    ///
    /// Postcondition: `id` is replaced by `(head, tail)` where
    /// `head + tail` equals the old value. Returns `None` for non-text nodes
    /// or an offset that is not a char boundary.
    pub fn split_text(&mut self, id: NodeId, at: usize) -> Option<(NodeId, NodeId)> {
        let value = self.text(id)?;
        if !value.is_char_boundary(at) {
            return None;
        }
        let len = value.len();
        let head = self.text_fragment(id, 0, at);
        let tail = self.text_fragment(id, at, len - at);
        self.replace_with_fragments(id, &[head, tail]);
        Some((head, tail))
    }

    /// Order every child list by source position. Span-less children sort
    /// last, keeping their relative order.
    pub fn sort_children_by_position(&mut self) {
        for index in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[index].children);
            children.sort_by_key(|c| self.nodes[c.0].span.map_or(usize::MAX, |s| s.lo));
            self.nodes[index].children = children;
        }
    }

    /// Append a placeholder empty statement to `block`.
    ///
    /// Postcondition: the block's last child is a span-less `Empty` node,
    /// which gives comments an attach point inside an otherwise empty block.
    pub fn insert_placeholder(&mut self, block: NodeId) -> NodeId {
        let placeholder = self.alloc(NodeKind::Empty, None);
        self.append_child(block, placeholder);
        placeholder
    }

    /// Detached, span-less text node.
    pub fn new_text(&mut self, value: impl Into<String>) -> NodeId {
        self.alloc(
            NodeKind::MarkupText {
                value: value.into(),
            },
            None,
        )
    }

    /// Detached `{/*text*/}` markup comment.
    ///
    /// Built the same way the parser represents one: an expression hole
    /// holding an empty expression whose inner comment carries `text`.
    pub fn new_markup_comment(&mut self, text: impl Into<String>) -> NodeId {
        let hole = self.alloc(NodeKind::MarkupExpressionHole, None);
        let empty = self.alloc(NodeKind::MarkupEmptyExpression, None);
        self.append_child(hole, empty);
        self.append_comment(
            empty,
            CommentSlot::Inner,
            Comment::new(CommentKind::Block, text, Placement::Inner),
        );
        hole
    }

    /// Comments of the empty expression inside a `{/* */}` hole.
    pub fn markup_comment_slot(&self, hole: NodeId) -> Option<NodeId> {
        if *self.kind(hole) != NodeKind::MarkupExpressionHole {
            return None;
        }
        let &inner = self.children(hole).first()?;
        (*self.kind(inner) == NodeKind::MarkupEmptyExpression).then_some(inner)
    }
}
