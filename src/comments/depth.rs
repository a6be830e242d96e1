//! Comment thread depth metrics

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::index::CommentIndex;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthReport {
    pub max_depth: usize,
    pub total_comments: usize,
    /// Comments that declare a parent
    pub total_replies: usize,
    pub average_replies_per_comment: f64,
}

impl DepthReport {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            max_depth: 0,
            total_comments: 0,
            total_replies: 0,
            average_replies_per_comment: 0.0,
        }
    }
}

struct Frame {
    pos: usize,
    next_child: usize,
    deepest_child: usize,
    /// Some reply below was skipped because it sits on the current path
    cut: bool,
}

/// Depth of the subtree under `root` (a leaf has depth 1).
///
/// Iterative post-order walk; a reply that points back onto the current path
/// contributes nothing. With `memo`, depths are shared across roots. A depth
/// that depended on such a cut is not memoized, since another root reaching
/// the same comment along a different path can see further.
fn subtree_depth(
    index: &CommentIndex<'_>,
    root: usize,
    memo: &mut HashMap<usize, usize>,
    on_path: &mut [bool],
) -> usize {
    if let Some(&depth) = memo.get(&root) {
        return depth;
    }

    let mut stack = vec![Frame {
        pos: root,
        next_child: 0,
        deepest_child: 0,
        cut: false,
    }];
    on_path[root] = true;

    while let Some(frame) = stack.last_mut() {
        let children = index.children(frame.pos);
        if let Some(&child) = children.get(frame.next_child) {
            frame.next_child += 1;
            if let Some(&depth) = memo.get(&child) {
                frame.deepest_child = frame.deepest_child.max(depth);
            } else if on_path[child] {
                frame.cut = true;
            } else {
                on_path[child] = true;
                stack.push(Frame {
                    pos: child,
                    next_child: 0,
                    deepest_child: 0,
                    cut: false,
                });
            }
            continue;
        }

        let depth = 1 + frame.deepest_child;
        let (pos, cut) = (frame.pos, frame.cut);
        on_path[pos] = false;
        if !cut {
            memo.insert(pos, depth);
        }
        stack.pop();
        match stack.last_mut() {
            Some(parent) => {
                parent.deepest_child = parent.deepest_child.max(depth);
                parent.cut |= cut;
            }
            None => return depth,
        }
    }

    0
}

/// Compute depth metrics for every thread in `index`.
///
/// With `memoize` off, the depth cache is dropped between roots.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Comment counts per post stay far below 2^52
pub fn analyze(index: &CommentIndex<'_>, memoize: bool) -> DepthReport {
    if index.is_empty() {
        return DepthReport::empty();
    }

    let mut memo = HashMap::new();
    let mut on_path = vec![false; index.len()];
    let mut max_depth = 0;
    for &root in index.roots() {
        if !memoize {
            memo.clear();
        }
        max_depth = max_depth.max(subtree_depth(index, root, &mut memo, &mut on_path));
    }

    let total_comments = index.len();
    let total_replies = index
        .comments()
        .iter()
        .filter(|comment| comment.parent_id.is_some())
        .count();
    let reply_sum: usize = (0..total_comments).map(|pos| index.reply_count(pos)).sum();

    DepthReport {
        max_depth,
        total_comments,
        total_replies,
        average_replies_per_comment: reply_sum as f64 / total_comments as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentNode;

    fn linear_chain(n: i64) -> Vec<CommentNode> {
        (1..=n)
            .map(|id| CommentNode::new(id, (id > 1).then_some(id - 1), 0))
            .collect()
    }

    #[test]
    fn test_empty_list_is_all_zero() {
        let comments: Vec<CommentNode> = Vec::new();
        let report = analyze(&CommentIndex::build(&comments), true);
        assert_eq!(report, DepthReport::empty());
    }

    #[test]
    fn test_linear_chain() {
        let comments = linear_chain(6);
        let report = analyze(&CommentIndex::build(&comments), true);

        assert_eq!(report.max_depth, 6);
        assert_eq!(report.total_comments, 6);
        assert_eq!(report.total_replies, 5);
        assert!((report.average_replies_per_comment - 5.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_star() {
        let mut comments = vec![CommentNode::new(1, None, 0)];
        comments.extend((2..=5).map(|id| CommentNode::new(id, Some(1), 0)));
        let report = analyze(&CommentIndex::build(&comments), true);

        assert_eq!(report.max_depth, 2);
        assert_eq!(report.total_replies, 4);
        assert!((report.average_replies_per_comment - 4.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_memoization_does_not_change_results() {
        let mut comments = linear_chain(4);
        comments.push(CommentNode::new(10, None, 0));
        comments.push(CommentNode::new(11, Some(10), 0));
        comments.push(CommentNode::new(12, Some(2), 0));

        let index = CommentIndex::build(&comments);
        assert_eq!(analyze(&index, true), analyze(&index, false));
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let comments = linear_chain(200_000);
        let report = analyze(&CommentIndex::build(&comments), true);
        assert_eq!(report.max_depth, 200_000);
    }

    #[test]
    fn test_cycles_terminate() {
        let comments = vec![
            CommentNode::new(1, Some(2), 0),
            CommentNode::new(2, Some(1), 0),
            CommentNode::new(3, Some(3), 0),
        ];
        let report = analyze(&CommentIndex::build(&comments), true);

        // 1 and 2 are both roots; each sees the other as its only reply
        assert_eq!(report.max_depth, 2);
        assert_eq!(report.total_comments, 3);
        assert_eq!(report.total_replies, 3);
    }

    #[test]
    fn test_mutual_parents_depth_is_the_same_from_either_root() {
        // 2 -> 1 -> 3 is three deep when walked from root 2
        let comments = vec![
            CommentNode::new(1, Some(2), 0),
            CommentNode::new(2, Some(1), 0),
            CommentNode::new(3, Some(1), 0),
        ];
        let index = CommentIndex::build(&comments);

        assert_eq!(analyze(&index, true).max_depth, 3);
        assert_eq!(analyze(&index, true), analyze(&index, false));
    }
}
