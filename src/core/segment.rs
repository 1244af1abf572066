//! Whitespace-preserving segmentation of markup text.
//!
//! A JSX text node such as `"\n      Some text "` mixes indentation, content
//! and line breaks. Splitting it into fragments makes every piece
//! individually addressable without changing what gets printed:
//!
//! ```text
//! "\n      Some text "  ->  ["\n", "      ", "Some text", " "]
//! ```

use std::ops::Range;

use crate::core::tree::{NodeId, SyntaxTree};

/// Byte ranges of the fragments of `text`.
///
/// Each line contributes its leading whitespace, its content and its trailing
/// whitespace as separate fragments (whitespace-only lines stay whole), and
/// every line break (`"\n"` or `"\r\n"`) becomes a fragment of its own. The
/// ranges are contiguous and cover `text` completely.
pub fn segment_text(text: &str) -> Vec<Range<usize>> {
    let mut fragments = Vec::new();
    let mut offset = 0;
    let mut lines = text.split('\n').peekable();

    while let Some(raw) = lines.next() {
        let has_break = lines.peek().is_some();
        let (line, break_len) = match raw.strip_suffix('\r') {
            Some(line) if has_break => (line, 2),
            _ => (raw, 1),
        };
        let without_trailing = line.trim_end();
        let content = without_trailing.trim_start();

        if content.is_empty() {
            if !line.is_empty() {
                fragments.push(offset..offset + line.len());
            }
        } else {
            let content_start = offset + (without_trailing.len() - content.len());
            let content_end = offset + without_trailing.len();
            if content_start > offset {
                fragments.push(offset..content_start);
            }
            fragments.push(content_start..content_end);
            if content_end < offset + line.len() {
                fragments.push(content_end..offset + line.len());
            }
        }
        offset += line.len();

        if has_break {
            fragments.push(offset..offset + break_len);
            offset += break_len;
        }
    }

    fragments
}

/// Segment every text child of the element `parent`, except `keep`.
///
/// Children are scanned in reverse so replacing one never shifts the ones
/// still to visit. Text that starts with a newline and holds nothing but
/// whitespace is pure indentation and stays whole.
pub fn segment_children(tree: &mut SyntaxTree, parent: NodeId, keep: NodeId) {
    let Some(range) = tree.markup_range(parent) else {
        return;
    };
    let children = tree.children(parent)[range].to_vec();

    for &child in children.iter().rev() {
        if child == keep {
            continue;
        }
        let (ranges, len) = match tree.text(child) {
            Some(value) if !(starts_with_break(value) && value.trim().is_empty()) => {
                (segment_text(value), value.len())
            }
            _ => continue,
        };
        if ranges.len() == 1 && ranges[0] == (0..len) {
            continue;
        }

        let fragments: Vec<NodeId> = ranges
            .into_iter()
            .map(|r| tree.text_fragment(child, r.start, r.len()))
            .collect();
        tree.replace_with_fragments(child, &fragments);
    }
}

fn starts_with_break(text: &str) -> bool {
    text.starts_with('\n') || text.starts_with("\r\n")
}
