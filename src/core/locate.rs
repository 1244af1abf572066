//! Target location: which node receives the directive for a diagnostic line.
//!
//! 1. Collect nodes starting on the line, prefer one that also ends there.
//! 2. Ascend to the outermost ancestor still starting on that line.
//! 3. An `else` branch redirects to the tail of the preceding block, since
//!    there is no attach point in front of the `else` keyword.

use crate::core::tree::{NodeId, NodeKind, SyntaxTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Attach at `node`; `parent` drives the choice of insertion strategy.
    Node {
        node: NodeId,
        parent: Option<NodeId>,
    },
    /// Attach after the last statement of the `consequent` block of a
    /// conditional whose alternate starts on the diagnostic line.
    ConditionalTail { consequent: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateError {
    /// No spanned node starts on the line.
    NoNodeOnLine,
}

/// Find the attach point for a diagnostic on `line`.
pub fn locate(tree: &SyntaxTree, line: usize) -> Result<Target, LocateError> {
    let starting = nodes_starting_on(tree, line);

    let first = starting
        .iter()
        .copied()
        .find(|&id| tree.span(id).is_some_and(|s| s.end_line == line))
        .or_else(|| starting.first().copied())
        .ok_or(LocateError::NoNodeOnLine)?;

    let node = ascend(tree, first, line);
    let parent = tree.parent(node);

    if let Some(parent) = parent
        && let Some((consequent, Some(alternate))) = tree.if_branches(parent)
        && alternate == node
        && *tree.kind(consequent) == NodeKind::Block
    {
        return Ok(Target::ConditionalTail { consequent });
    }

    Ok(Target::Node { node, parent })
}

/// Spanned nodes below the program whose span starts on `line`, in document
/// order. Whitespace-only markup text is layout, never a target.
fn nodes_starting_on(tree: &SyntaxTree, line: usize) -> Vec<NodeId> {
    tree.preorder()
        .into_iter()
        .filter(|&id| id != tree.root())
        .filter(|&id| !tree.text(id).is_some_and(|t| t.trim().is_empty()))
        .filter(|&id| tree.span(id).is_some_and(|s| s.start_line == line))
        .collect()
}

/// Walk up while the parent has no span or starts on the same line.
///
/// The stop condition is exact: the first ancestor starting on another line
/// ends the ascent. The program itself spans the whole file and is never
/// climbed into.
fn ascend(tree: &SyntaxTree, id: NodeId, line: usize) -> NodeId {
    let mut current = id;
    while let Some(parent) = tree.parent(current) {
        if parent == tree.root() || tree.span(parent).is_some_and(|s| s.start_line != line) {
            break;
        }
        current = parent;
    }
    current
}
