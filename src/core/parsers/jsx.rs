//! JS/TS/JSX parsing into the annotator's [`SyntaxTree`].
//!
//! swc produces the AST and the raw comments; [`TreeBuilder`] walks the AST
//! once and mirrors the constructs the annotator cares about into arena
//! nodes. Comments are attached afterwards by [`super::comments`].

use anyhow::{Result, anyhow, bail};
use std::path::Path;
use std::sync::Arc;
use swc_common::{
    BytePos, FileName, Globals, SourceMap, Spanned,
    comments::{Comment as SwcComment, CommentKind as SwcCommentKind, SingleThreadedComments},
};
use swc_ecma_ast::{
    BlockStmt, CatchClause, ClassMember, Expr, IfStmt, JSXAttr, JSXClosingElement,
    JSXClosingFragment, JSXElement, JSXExpr, JSXExprContainer, JSXFragment, JSXOpeningElement,
    JSXOpeningFragment, JSXText, ModuleDecl, Param, Pat, Prop, Stmt, SwitchCase, VarDeclarator,
};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use super::comments::{RawComment, attach_comments};
use super::lines::LineIndex;
use crate::core::tree::{CommentKind, NodeId, NodeKind, Span, SyntaxTree, detect_line_ending};

/// Pick the swc dialect from the file extension.
///
/// `.tsx` enables TypeScript with JSX, the other TypeScript extensions keep
/// angle-bracket casts working, everything else is parsed as JSX-enabled
/// ECMAScript.
pub fn syntax_for_path(file_path: &str) -> Syntax {
    let extension = Path::new(file_path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    match extension {
        "tsx" => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax::default()),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse `source` into a syntax tree with comments attached.
///
/// # Errors
/// Returns an error if swc cannot parse the source.
pub fn parse_source(source: &str, file_path: &str) -> Result<SyntaxTree> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let source_map = Arc::new(SourceMap::default());
        let source_file = source_map.new_source_file(
            FileName::Real(file_path.into()).into(),
            source.to_string(),
        );

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            syntax_for_path(file_path),
            StringInput::from(&*source_file),
            Some(&comments),
        );
        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e.kind()))?;
        // Recoverable errors count too.
        if let Some(error) = parser.take_errors().into_iter().next() {
            bail!("Failed to parse {}: {:?}", file_path, error.kind());
        }

        let lines = LineIndex::new(source);
        let base = source_file.start_pos;
        let root_span = Span::new(0, source.len(), 1, lines.line_of(source.len()));

        let mut builder = TreeBuilder {
            tree: SyntaxTree::new(Some(root_span)).with_line_ending(detect_line_ending(source)),
            stack: Vec::new(),
            source,
            lines: &lines,
            base,
        };
        builder.stack.push(builder.tree.root());
        module.visit_with(&mut builder);

        let mut tree = builder.tree;
        tree.sort_children_by_position();

        let raw = collect_comments(&comments, base, &lines);
        attach_comments(&mut tree, raw);
        Ok(tree)
    })
}

/// Drain swc's comment maps into position-sorted, de-duplicated comments.
fn collect_comments(
    comments: &SingleThreadedComments,
    base: BytePos,
    lines: &LineIndex,
) -> Vec<RawComment> {
    let (leading, trailing) = comments.borrow_all();
    let mut all: Vec<SwcComment> = leading
        .values()
        .chain(trailing.values())
        .flatten()
        .cloned()
        .collect();
    all.sort_by_key(|c| c.span.lo);
    all.dedup_by_key(|c| c.span.lo);

    all.into_iter()
        .map(|c| {
            let lo = (c.span.lo.0 - base.0) as usize;
            let hi = (c.span.hi.0 - base.0) as usize;
            RawComment {
                kind: match c.kind {
                    SwcCommentKind::Line => CommentKind::Line,
                    SwcCommentKind::Block => CommentKind::Block,
                },
                text: c.text.to_string(),
                span: Span::new(lo, hi, lines.line_of(lo), lines.line_of(hi)),
            }
        })
        .collect()
}

/// Visitor mirroring swc nodes into the arena.
///
/// `stack` holds the chain of open arena nodes; every node created while a
/// node is open becomes its child.
struct TreeBuilder<'a> {
    tree: SyntaxTree,
    stack: Vec<NodeId>,
    source: &'a str,
    lines: &'a LineIndex,
    base: BytePos,
}

impl TreeBuilder<'_> {
    fn span_of(&self, lo: BytePos, hi: BytePos) -> Option<Span> {
        if lo.0 < self.base.0 || hi.0 < lo.0 {
            return None;
        }
        let lo = (lo.0 - self.base.0) as usize;
        let hi = ((hi.0 - self.base.0) as usize).min(self.source.len());
        Some(Span::new(
            lo,
            hi,
            self.lines.line_of(lo),
            self.lines.line_of(hi),
        ))
    }

    fn open(&mut self, kind: NodeKind, lo: BytePos, hi: BytePos) -> NodeId {
        let span = self.span_of(lo, hi);
        let id = self.tree.alloc(kind, span);
        if let Some(&parent) = self.stack.last() {
            self.tree.append_child(parent, id);
        }
        self.stack.push(id);
        id
    }

    fn close(&mut self) {
        self.stack.pop();
    }

    fn with_node<N: Spanned>(&mut self, kind: NodeKind, node: &N, f: impl FnOnce(&mut Self)) {
        let span = node.span();
        self.open(kind, span.lo, span.hi);
        f(self);
        self.close();
    }

    fn leaf<N: Spanned>(&mut self, kind: NodeKind, node: &N) {
        self.with_node(kind, node, |_| {});
    }
}

impl Visit for TreeBuilder<'_> {
    fn visit_stmt(&mut self, node: &Stmt) {
        match node {
            // Blocks and conditionals get their own node kinds.
            Stmt::Block(_) | Stmt::If(_) => node.visit_children_with(self),
            Stmt::Empty(_) => self.leaf(NodeKind::Empty, node),
            _ => self.with_node(NodeKind::Statement, node, |b| node.visit_children_with(b)),
        }
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        self.with_node(NodeKind::Block, node, |b| node.visit_children_with(b));
    }

    fn visit_if_stmt(&mut self, node: &IfStmt) {
        self.with_node(NodeKind::If, node, |b| node.visit_children_with(b));
    }

    fn visit_module_decl(&mut self, node: &ModuleDecl) {
        self.with_node(NodeKind::Statement, node, |b| node.visit_children_with(b));
    }

    fn visit_expr(&mut self, node: &Expr) {
        match node {
            Expr::JSXElement(_) | Expr::JSXFragment(_) => node.visit_children_with(self),
            _ => self.with_node(NodeKind::Expression, node, |b| node.visit_children_with(b)),
        }
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.with_node(NodeKind::MarkupElement, node, |b| {
            node.visit_children_with(b)
        });
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        self.with_node(NodeKind::MarkupFragment, node, |b| {
            node.visit_children_with(b)
        });
    }

    fn visit_jsx_opening_element(&mut self, node: &JSXOpeningElement) {
        self.with_node(NodeKind::MarkupOpeningTag, node, |b| {
            node.visit_children_with(b)
        });
    }

    fn visit_jsx_closing_element(&mut self, node: &JSXClosingElement) {
        self.leaf(NodeKind::MarkupClosingTag, node);
    }

    fn visit_jsx_opening_fragment(&mut self, node: &JSXOpeningFragment) {
        self.leaf(NodeKind::MarkupOpeningTag, node);
    }

    fn visit_jsx_closing_fragment(&mut self, node: &JSXClosingFragment) {
        self.leaf(NodeKind::MarkupClosingTag, node);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        self.with_node(NodeKind::MarkupAttribute, node, |b| {
            node.visit_children_with(b)
        });
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        // The source slice, not the cooked value, so printing is lossless.
        let value = self
            .span_of(node.span.lo, node.span.hi)
            .map(|s| self.source[s.lo..s.hi].to_string())
            .unwrap_or_else(|| node.raw.to_string());
        self.leaf(NodeKind::MarkupText { value }, node);
    }

    fn visit_jsx_expr_container(&mut self, node: &JSXExprContainer) {
        self.with_node(NodeKind::MarkupExpressionHole, node, |b| match &node.expr {
            JSXExpr::JSXEmptyExpr(_) => {
                // Interior of the braces, where `{/* ... */}` comments live.
                let lo = node.span.lo + BytePos(1);
                let hi = node.span.hi - BytePos(1);
                b.open(NodeKind::MarkupEmptyExpression, lo, hi.max(lo));
                b.close();
            }
            JSXExpr::Expr(expr) => expr.visit_with(b),
        });
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        self.with_node(NodeKind::Syntax, node, |b| node.visit_children_with(b));
    }

    fn visit_param(&mut self, node: &Param) {
        self.with_node(NodeKind::Syntax, node, |b| node.visit_children_with(b));
    }

    fn visit_pat(&mut self, node: &Pat) {
        match node {
            Pat::Expr(expr) => expr.visit_with(self),
            _ => self.with_node(NodeKind::Syntax, node, |b| node.visit_children_with(b)),
        }
    }

    fn visit_prop(&mut self, node: &Prop) {
        self.with_node(NodeKind::Syntax, node, |b| node.visit_children_with(b));
    }

    fn visit_class_member(&mut self, node: &ClassMember) {
        self.with_node(NodeKind::Syntax, node, |b| node.visit_children_with(b));
    }

    fn visit_switch_case(&mut self, node: &SwitchCase) {
        self.with_node(NodeKind::Syntax, node, |b| node.visit_children_with(b));
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        self.with_node(NodeKind::Syntax, node, |b| node.visit_children_with(b));
    }
}
