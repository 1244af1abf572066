//! Suppression placement.
//!
//! For every actionable diagnostic the annotator locates an attach point and
//! either merges the rule into an adjacent directive or creates a new one.
//! The shape of the new comment depends on where the target sits:
//!
//! - `else` branch: own-line comment at the end of the preceding block
//! - closing tag: `{/* */}` comment as the element's last child
//! - markup child: `{/* */}` comment on a line of its own before the target
//! - anything else: ordinary comment on the target

use crate::core::diagnostic::Diagnostic;
use crate::core::directive::{DirectiveForm, SuppressionDirective};
use crate::core::locate::{LocateError, Target, locate};
use crate::core::merge::{MergeResult, merge_into_slot};
use crate::core::segment::segment_children;
use crate::core::tree::{Comment, CommentKind, CommentSlot, NodeId, NodeKind, Placement, SyntaxTree};

pub const DEFAULT_MESSAGE: &str = "TODO: Fix this the next time the file is edited.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotateOptions {
    /// Explanation appended to new directives after `--`.
    pub message: String,
    /// Only these rules are suppressed. Empty means every rule.
    pub rules: Vec<String>,
    /// Use `eslint-disable-line` comments after the target instead of
    /// `eslint-disable-next-line` comments before it.
    pub inline: bool,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.to_string(),
            rules: Vec::new(),
            inline: false,
        }
    }
}

impl AnnotateOptions {
    pub fn allows(&self, rule_id: &str) -> bool {
        self.rules.is_empty() || self.rules.iter().any(|r| r == rule_id)
    }
}

/// Split a comma-separated rule list, dropping empty entries.
pub fn parse_rule_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No node starts on the diagnostic line.
    NoNodeOnLine,
    /// The target's markup parent has no child list to insert into.
    NoMarkupChildren,
}

impl SkipReason {
    pub fn description(self) -> &'static str {
        match self {
            Self::NoNodeOnLine => "no syntax node starts on this line",
            Self::NoMarkupChildren => "the enclosing markup node has no children to insert into",
        }
    }
}

/// What happened to one diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Inserted,
    Merged,
    AlreadySuppressed,
    Skipped(SkipReason),
}

impl From<MergeResult> for Resolution {
    fn from(result: MergeResult) -> Self {
        match result {
            MergeResult::Merged => Self::Merged,
            // Callers only convert handled results.
            MergeResult::AlreadySuppressed | MergeResult::NotADirective => Self::AlreadySuppressed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDiagnostic {
    pub line: usize,
    pub rule_id: String,
    pub reason: SkipReason,
}

/// Outcome of annotating one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub inserted: usize,
    pub merged: usize,
    pub already_suppressed: usize,
    pub skipped: Vec<SkippedDiagnostic>,
}

impl AnnotationSummary {
    /// The tree differs from its source.
    pub fn changed(&self) -> bool {
        self.inserted + self.merged > 0
    }

    fn record(&mut self, line: usize, rule_id: &str, resolution: Resolution) {
        match resolution {
            Resolution::Inserted => self.inserted += 1,
            Resolution::Merged => self.merged += 1,
            Resolution::AlreadySuppressed => self.already_suppressed += 1,
            Resolution::Skipped(reason) => self.skipped.push(SkippedDiagnostic {
                line,
                rule_id: rule_id.to_string(),
                reason,
            }),
        }
    }
}

pub struct Annotator<'a> {
    options: &'a AnnotateOptions,
}

impl<'a> Annotator<'a> {
    pub fn new(options: &'a AnnotateOptions) -> Self {
        Self { options }
    }

    /// Apply every actionable diagnostic to `tree`, in order.
    pub fn annotate(&self, tree: &mut SyntaxTree, diagnostics: &[Diagnostic]) -> AnnotationSummary {
        let mut summary = AnnotationSummary::default();
        for diagnostic in diagnostics {
            let Some(rule_id) = diagnostic.actionable_rule() else {
                continue;
            };
            if !self.options.allows(rule_id) {
                continue;
            }
            let resolution = self.annotate_one(tree, diagnostic.line, rule_id);
            summary.record(diagnostic.line, rule_id, resolution);
        }
        summary
    }

    /// Suppress `rule_id` on `line`.
    pub fn annotate_one(&self, tree: &mut SyntaxTree, line: usize, rule_id: &str) -> Resolution {
        let target = match locate(tree, line) {
            Ok(target) => target,
            Err(LocateError::NoNodeOnLine) => return Resolution::Skipped(SkipReason::NoNodeOnLine),
        };

        match target {
            Target::ConditionalTail { consequent } => {
                self.attach_to_block_tail(tree, consequent, rule_id)
            }
            Target::Node { node, parent } => match (tree.kind(node), parent) {
                (NodeKind::MarkupClosingTag, Some(element)) => {
                    self.attach_before_closing_tag(tree, element, rule_id)
                }
                (NodeKind::MarkupAttribute, _) => self.attach_ordinary(tree, node, rule_id),
                (_, Some(parent)) if *tree.kind(parent) == NodeKind::MarkupExpressionHole => {
                    self.attach_ordinary(tree, node, rule_id)
                }
                (_, Some(parent)) if tree.kind(parent).is_markup() => {
                    self.attach_among_markup_siblings(tree, parent, node, line, rule_id)
                }
                _ => self.attach_ordinary(tree, node, rule_id),
            },
        }
    }

    fn directive_text(&self, form: DirectiveForm, rule_id: &str, kind: CommentKind) -> String {
        SuppressionDirective::new(form, rule_id, Some(self.options.message.clone())).encode(kind)
    }

    /// Merge into the node's leading, then trailing comments, else add a
    /// line comment before it (or after it in inline mode).
    fn attach_ordinary(&self, tree: &mut SyntaxTree, node: NodeId, rule_id: &str) -> Resolution {
        for slot in [CommentSlot::Leading, CommentSlot::Trailing] {
            let result = merge_into_slot(tree, node, slot, rule_id);
            if result.is_handled() {
                return result.into();
            }
        }

        let (slot, placement, form) = if self.options.inline {
            (
                CommentSlot::Trailing,
                Placement::Trailing { own_line: false },
                DirectiveForm::SameLine,
            )
        } else {
            (CommentSlot::Leading, Placement::Leading, DirectiveForm::NextLine)
        };
        let text = self.directive_text(form, rule_id, CommentKind::Line);
        tree.append_comment(node, slot, Comment::new(CommentKind::Line, text, placement));
        Resolution::Inserted
    }

    /// The line starts with `} else`: suppress from the end of the block
    /// before it.
    fn attach_to_block_tail(
        &self,
        tree: &mut SyntaxTree,
        consequent: NodeId,
        rule_id: &str,
    ) -> Resolution {
        if tree.children(consequent).is_empty() {
            let result = merge_into_slot(tree, consequent, CommentSlot::Inner, rule_id);
            if result.is_handled() {
                return result.into();
            }
            tree.insert_placeholder(consequent);
        }

        let Some(&last) = tree.children(consequent).last() else {
            return Resolution::Skipped(SkipReason::NoNodeOnLine);
        };
        let result = merge_into_slot(tree, last, CommentSlot::Trailing, rule_id);
        if result.is_handled() {
            return result.into();
        }

        let text = self.directive_text(DirectiveForm::NextLine, rule_id, CommentKind::Line);
        tree.append_comment(
            last,
            CommentSlot::Trailing,
            Comment::new(
                CommentKind::Line,
                text,
                Placement::Trailing { own_line: true },
            ),
        );
        Resolution::Inserted
    }

    /// The line starts with a closing tag: add a markup comment as the last
    /// child of `element`, on its own line.
    fn attach_before_closing_tag(
        &self,
        tree: &mut SyntaxTree,
        element: NodeId,
        rule_id: &str,
    ) -> Resolution {
        let Some(range) = tree.markup_range(element) else {
            return Resolution::Skipped(SkipReason::NoMarkupChildren);
        };

        let result = merge_into_markup_comment(tree, element, range.end, rule_id);
        if result.is_handled() {
            return result.into();
        }

        // Indentation of the closing tag, if it sits on a line of its own.
        // The text before it may already be split into fragments.
        let mut tail = String::new();
        for &child in tree.children(element)[range.clone()].iter().rev() {
            let Some(text) = tree.text(child) else {
                break;
            };
            tail.insert_str(0, text);
        }
        let closing_indent = trailing_indentation(&tail).map(str::to_string);

        let eol = tree.line_ending();
        let text = self.directive_text(DirectiveForm::NextLine, rule_id, CommentKind::Block);
        let hole = tree.new_markup_comment(text);
        let nodes = match closing_indent {
            Some(indent) => {
                let unit = if indent.contains('\t') { "\t" } else { "  " };
                let before = tree.new_text(unit);
                let after = tree.new_text(format!("{eol}{indent}"));
                vec![before, hole, after]
            }
            None => vec![hole, tree.new_text(eol)],
        };
        tree.insert_children(element, range.end, &nodes);
        Resolution::Inserted
    }

    /// The target is a child of an element: put a markup comment on its own
    /// line in front of the group of siblings sharing the target's line.
    fn attach_among_markup_siblings(
        &self,
        tree: &mut SyntaxTree,
        parent: NodeId,
        target: NodeId,
        line: usize,
        rule_id: &str,
    ) -> Resolution {
        if !tree.kind(parent).has_markup_children() {
            return Resolution::Skipped(SkipReason::NoMarkupChildren);
        }

        // The line holds a `{/* */}` comment of its own, e.g. one added by an
        // earlier run.
        if let Some(slot) = tree.markup_comment_slot(target) {
            let result = merge_into_slot(tree, slot, CommentSlot::Inner, rule_id);
            if result.is_handled() {
                return result.into();
            }
        }

        segment_children(tree, parent, target);
        let Some(range) = tree.markup_range(parent) else {
            return Resolution::Skipped(SkipReason::NoMarkupChildren);
        };
        let children = tree.children(parent).to_vec();
        let Some(target_index) = children.iter().position(|&c| c == target) else {
            return Resolution::Skipped(SkipReason::NoMarkupChildren);
        };
        if !range.contains(&target_index) {
            return Resolution::Skipped(SkipReason::NoMarkupChildren);
        }

        // Widen backwards over siblings on the same line.
        let mut index = target_index;
        for i in (range.start..target_index).rev() {
            let sibling = children[i];
            if let Some(text) = tree.text(sibling) {
                if text.contains('\n') {
                    break;
                }
                index = i;
            } else if let Some(span) = tree.span(sibling) {
                if span.start_line != line {
                    break;
                }
                index = i;
            }
        }

        let result = merge_into_markup_comment(tree, parent, index, rule_id);
        if result.is_handled() {
            return result.into();
        }

        let mut indent = String::new();
        let first_text = tree.text(children[index]);
        let line_start = index == range.start
            || tree
                .text(children[index - 1])
                .is_some_and(|t| t.ends_with('\n'));
        if index < target_index
            && let Some(text) = first_text
            && !text.is_empty()
            && text.trim().is_empty()
            && line_start
        {
            indent = text.to_string();
            index += 1;
        } else if index > range.start
            && let Some(text) = tree.text(children[index - 1])
            && let Some(run) = trailing_indentation(text)
        {
            indent = run.to_string();
            let at = text.len() - run.len();
            if tree.split_text(children[index - 1], at).is_some() {
                index += 1;
            }
        }

        let text = self.directive_text(DirectiveForm::NextLine, rule_id, CommentKind::Block);
        let hole = tree.new_markup_comment(text);
        let newline = tree.new_text(format!("{}{indent}", tree.line_ending()));
        tree.insert_children(parent, index, &[hole, newline]);
        Resolution::Inserted
    }
}

/// Whitespace after the last line break of `text`, if non-empty and
/// nothing but whitespace.
fn trailing_indentation(text: &str) -> Option<&str> {
    let newline = text.rfind('\n')?;
    let run = &text[newline + 1..];
    (!run.is_empty() && run.trim().is_empty()).then_some(run)
}

/// Scan the markup children of `parent` backwards from `before`, skipping
/// whitespace-only text, and merge into the first `{/* */}` directive found.
fn merge_into_markup_comment(
    tree: &mut SyntaxTree,
    parent: NodeId,
    before: usize,
    rule_id: &str,
) -> MergeResult {
    let Some(range) = tree.markup_range(parent) else {
        return MergeResult::NotADirective;
    };
    let children = tree.children(parent).to_vec();

    for i in (range.start..before.min(range.end)).rev() {
        let sibling = children[i];
        if tree.text(sibling).is_some_and(|t| t.trim().is_empty()) {
            continue;
        }
        return match tree.markup_comment_slot(sibling) {
            Some(slot) => merge_into_slot(tree, slot, CommentSlot::Inner, rule_id),
            None => MergeResult::NotADirective,
        };
    }
    MergeResult::NotADirective
}
