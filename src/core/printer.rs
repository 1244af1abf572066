//! Source-preserving printer.
//!
//! Only what the annotator touched is regenerated. The printer walks the tree
//! and copies the original bytes between spanned nodes verbatim, splicing in:
//!
//! - inserted comments, next to the node that owns them
//! - rewritten comments, in place of their original text
//! - span-less nodes (placeholders, inserted markup), rendered from the tree
//!
//! An untouched tree prints back to the exact input.

use std::collections::BTreeMap;

use crate::core::tree::{Comment, CommentKind, NodeId, NodeKind, Placement, Span, SyntaxTree};

/// Render `tree` against the `source` it was parsed from.
pub fn print(tree: &SyntaxTree, source: &str) -> String {
    let mut printer = Printer::new(tree, source);
    printer.emit(tree.root());
    printer.flush_to(source.len());
    printer.out
}

struct Printer<'a> {
    tree: &'a SyntaxTree,
    source: &'a str,
    out: String,
    /// Source offset up to which the input has been emitted.
    pos: usize,
    /// Rewritten original comments by start offset: `(end, rendered)`.
    replacements: BTreeMap<usize, (usize, String)>,
}

impl<'a> Printer<'a> {
    fn new(tree: &'a SyntaxTree, source: &'a str) -> Self {
        let mut replacements = BTreeMap::new();
        for id in tree.preorder() {
            let node = tree.node(id);
            for comment in node
                .leading_comments
                .iter()
                .chain(&node.trailing_comments)
                .chain(&node.inner_comments)
            {
                if let Some(span) = comment.span
                    && comment.rewritten
                {
                    replacements.insert(span.lo, (span.hi, comment.render()));
                }
            }
        }

        Self {
            tree,
            source,
            out: String::with_capacity(source.len() + 256),
            pos: 0,
            replacements,
        }
    }

    /// Copy the source up to `target`, substituting rewritten comments.
    fn flush_to(&mut self, target: usize) {
        let target = target.min(self.source.len());
        if target <= self.pos {
            return;
        }
        let pending: Vec<(usize, usize)> = self
            .replacements
            .range(self.pos..target)
            .map(|(&lo, (hi, _))| (lo, *hi))
            .filter(|&(_, hi)| hi <= target)
            .collect();
        for (lo, hi) in pending {
            self.out.push_str(&self.source[self.pos..lo]);
            if let Some((_, rendered)) = self.replacements.get(&lo) {
                self.out.push_str(rendered);
            }
            self.pos = hi;
        }
        self.out.push_str(&self.source[self.pos..target]);
        self.pos = target;
    }

    fn emit(&mut self, id: NodeId) {
        match self.tree.span(id) {
            Some(span) => {
                self.flush_to(span.lo);
                self.emit_inserted_leading(id, span);
                self.emit_children(id);
                self.flush_to(span.hi);
            }
            None => self.emit_synthetic(id),
        }
    }

    fn emit_children(&mut self, id: NodeId) {
        let tree = self.tree;
        let children = tree.children(id);
        for (index, &child) in children.iter().enumerate() {
            if tree.span(child).is_none()
                && *tree.kind(id) == NodeKind::Block
                && !children[index + 1..]
                    .iter()
                    .any(|&c| tree.span(c).is_some())
            {
                let interior = self.block_interior_start(id);
                self.flush_to(interior);
            }
            self.emit(child);
            self.emit_inserted_trailing(child, id);
        }
    }

    /// Nodes without a span have no source text to copy.
    fn emit_synthetic(&mut self, id: NodeId) {
        let tree = self.tree;
        let node = tree.node(id);
        match &node.kind {
            NodeKind::Empty => {}
            NodeKind::MarkupText { value } => self.out.push_str(value),
            NodeKind::MarkupExpressionHole => {
                self.out.push('{');
                self.emit_children(id);
                self.out.push('}');
            }
            NodeKind::MarkupEmptyExpression => {
                for comment in &node.inner_comments {
                    self.out.push_str(&comment.render());
                }
            }
            _ => self.emit_children(id),
        }
    }

    fn emit_inserted_leading(&mut self, id: NodeId, span: Span) {
        let tree = self.tree;
        let eol = tree.line_ending();
        let mut comments = inserted(&tree.node(id).leading_comments).peekable();
        if comments.peek().is_none() {
            return;
        }

        let indent = self.line_indent(span.lo);
        if !self.first_on_line(span.lo) {
            // No trailing blanks before the break.
            let kept = self.out.trim_end_matches([' ', '\t']).len();
            self.out.truncate(kept);
            self.out.push_str(eol);
            self.out.push_str(&indent);
        }
        for comment in comments {
            self.out.push_str(&comment.render());
            self.out.push_str(eol);
            self.out.push_str(&indent);
        }
    }

    /// Inserted trailing comments of `id`, placed after its last original
    /// trailing comment.
    fn emit_inserted_trailing(&mut self, id: NodeId, parent: NodeId) {
        let tree = self.tree;
        let node = tree.node(id);
        let comments: Vec<&Comment> = inserted(&node.trailing_comments).collect();
        if comments.is_empty() {
            return;
        }

        if let Some(anchor) = node
            .trailing_comments
            .iter()
            .filter_map(|c| c.span.map(|s| s.hi))
            .max()
        {
            self.flush_to(anchor);
        }
        let indent = match node.span {
            Some(span) => self.line_indent(span.lo),
            None => self.nested_indent(parent),
        };

        let eol = tree.line_ending();
        for comment in comments {
            let code_follows = self.code_follows();
            match comment.placement {
                Placement::Trailing { own_line: true } => {
                    self.out.push_str(eol);
                    self.out.push_str(&indent);
                    self.out.push_str(&comment.render());
                    if code_follows && comment.kind == CommentKind::Line {
                        let resume = self.line_indent(self.pos);
                        self.out.push_str(eol);
                        self.out.push_str(&resume);
                    }
                }
                _ if code_follows && comment.kind == CommentKind::Line => {
                    // A line comment would swallow the rest of the line.
                    self.out.push_str(&format!(" /*{} */", comment.text.trim_end()));
                }
                _ => {
                    self.out.push(' ');
                    self.out.push_str(&comment.render());
                }
            }
        }
    }

    /// Offset right after a block's `{` and any comments inside it.
    fn block_interior_start(&self, block: NodeId) -> usize {
        let node = self.tree.node(block);
        let open = node.span.map_or(self.pos, |s| s.lo + 1);
        node.inner_comments
            .iter()
            .filter_map(|c| c.span.map(|s| s.hi))
            .fold(open, usize::max)
    }

    /// Whether non-whitespace source follows `pos` on the same line.
    fn code_follows(&self) -> bool {
        let rest = &self.source[self.pos..];
        let line = rest.split('\n').next().unwrap_or_default();
        !line.trim().is_empty()
    }

    fn line_start(&self, offset: usize) -> usize {
        self.source[..offset].rfind('\n').map_or(0, |i| i + 1)
    }

    fn first_on_line(&self, offset: usize) -> bool {
        self.source[self.line_start(offset)..offset].trim().is_empty()
    }

    /// Leading spaces and tabs of the line containing `offset`.
    fn line_indent(&self, offset: usize) -> String {
        let offset = offset.min(self.source.len());
        self.source[self.line_start(offset)..]
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect()
    }

    /// Indentation for content nested one level inside `parent`.
    fn nested_indent(&self, parent: NodeId) -> String {
        let base = self
            .tree
            .span(parent)
            .map(|s| self.line_indent(s.lo))
            .unwrap_or_default();
        let unit = if base.contains('\t') { "\t" } else { "  " };
        format!("{base}{unit}")
    }
}

fn inserted(comments: &[Comment]) -> impl Iterator<Item = &Comment> {
    comments.iter().filter(|c| c.is_inserted())
}
