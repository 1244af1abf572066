//! Comment attachment.
//!
//! Every comment is owned by exactly one node. The owner is found by
//! descending to the smallest node enclosing the comment and looking at the
//! children on either side of it:
//!
//! | preceding | following | comment starts on preceding's last line | result |
//! |-----------|-----------|------------------------------------------|--------|
//! | yes       | yes       | yes                                      | trailing of preceding |
//! | yes       | yes       | no                                       | leading of following |
//! | no        | yes       | -                                        | leading of following |
//! | yes       | no        | -                                        | trailing of preceding |
//! | no        | no        | -                                        | inner of enclosing |

use crate::core::tree::{Comment, CommentKind, CommentSlot, NodeId, Placement, Span, SyntaxTree};

/// A comment as read from the source, before it has an owner.
#[derive(Debug, Clone)]
pub struct RawComment {
    pub kind: CommentKind,
    pub text: String,
    pub span: Span,
}

/// Attach `comments` (sorted by position) to the nodes of `tree`.
pub fn attach_comments(tree: &mut SyntaxTree, comments: Vec<RawComment>) {
    for raw in comments {
        let (owner, slot, placement) = find_owner(tree, &raw.span);
        let comment = Comment::new(raw.kind, raw.text, placement).with_span(raw.span);
        tree.append_comment(owner, slot, comment);
    }
}

fn find_owner(tree: &SyntaxTree, comment: &Span) -> (NodeId, CommentSlot, Placement) {
    let mut enclosing = tree.root();
    while let Some(child) = tree
        .children(enclosing)
        .iter()
        .copied()
        .find(|&c| tree.span(c).is_some_and(|s| s.contains(comment)))
    {
        enclosing = child;
    }

    let spanned = || {
        tree.children(enclosing)
            .iter()
            .filter_map(|&c| tree.span(c).map(|s| (c, s)))
    };
    let preceding = spanned().filter(|(_, s)| s.hi <= comment.lo).last();
    let following = spanned().find(|(_, s)| s.lo >= comment.hi);

    match (preceding, following) {
        (Some((prev, prev_span)), Some(_)) if prev_span.end_line == comment.start_line => (
            prev,
            CommentSlot::Trailing,
            Placement::Trailing { own_line: false },
        ),
        (_, Some((next, _))) => (next, CommentSlot::Leading, Placement::Leading),
        (Some((prev, prev_span)), None) => (
            prev,
            CommentSlot::Trailing,
            Placement::Trailing {
                own_line: prev_span.end_line != comment.start_line,
            },
        ),
        (None, None) => (enclosing, CommentSlot::Inner, Placement::Inner),
    }
}
