//! Merging a rule into an existing suppression comment.
//!
//! Only the last comment of a slot is ever considered: that is the one
//! directly adjacent to the code it suppresses.

use crate::core::directive::SuppressionDirective;
use crate::core::tree::{Comment, CommentSlot, NodeId, SyntaxTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeResult {
    /// The comment is not a suppression directive; try another attach point.
    NotADirective,
    /// The directive already covers the rule. Nothing was changed.
    AlreadySuppressed,
    /// The rule was appended and the comment text rewritten.
    Merged,
}

impl MergeResult {
    /// True when the caller must not create a new comment.
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::NotADirective)
    }
}

/// Merge `rule_id` into `comment` if it is a directive.
///
/// The existing keyword and explanation are kept as they are.
pub fn merge_into_comment(comment: &mut Comment, rule_id: &str) -> MergeResult {
    let Some(mut directive) = SuppressionDirective::parse(&comment.text) else {
        return MergeResult::NotADirective;
    };
    if !directive.add_rule(rule_id) {
        return MergeResult::AlreadySuppressed;
    }
    comment.set_text(directive.encode(comment.kind));
    MergeResult::Merged
}

/// Merge `rule_id` into the last comment of `slot` on `id`.
pub fn merge_into_slot(
    tree: &mut SyntaxTree,
    id: NodeId,
    slot: CommentSlot,
    rule_id: &str,
) -> MergeResult {
    match tree.node_mut(id).comments_mut(slot).last_mut() {
        Some(comment) => merge_into_comment(comment, rule_id),
        None => MergeResult::NotADirective,
    }
}
