//! Viral chain detection by backtracking through viral replies
//!
//! From every viral root the walk descends into each viral child in turn and,
//! once a node's viral children are exhausted, records the path ending at that
//! node when it holds at least two comments. A single branch of depth N thus
//! yields N-1 chains. Only the count and the first longest path are kept.

use serde::Deserialize;
use serde::Serialize;

use super::index::CommentIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViralCriteria {
    pub min_replies: usize,
    pub min_upvotes: i64,
}

impl ViralCriteria {
    #[must_use]
    pub fn is_viral(&self, index: &CommentIndex<'_>, pos: usize) -> bool {
        index.reply_count(pos) >= self.min_replies || index.comment(pos).upvotes >= self.min_upvotes
    }
}

impl Default for ViralCriteria {
    fn default() -> Self {
        Self {
            min_replies: 3,
            min_upvotes: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViralChainReport {
    pub longest_chain_length: usize,
    /// Comment ids of the longest chain, root first
    pub longest_chain_comments: Vec<i64>,
    pub total_viral_chains: usize,
    pub viral_criteria_met: bool,
}

impl ViralChainReport {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            longest_chain_length: 0,
            longest_chain_comments: Vec::new(),
            total_viral_chains: 0,
            viral_criteria_met: false,
        }
    }
}

#[derive(Default)]
struct ChainTally {
    total: usize,
    longest: Vec<usize>,
}

impl ChainTally {
    fn record(&mut self, path: &[usize]) {
        if path.len() < 2 {
            return;
        }
        self.total += 1;
        if path.len() > self.longest.len() {
            self.longest = path.to_vec();
        }
    }
}

fn walk_from(
    index: &CommentIndex<'_>,
    criteria: &ViralCriteria,
    root: usize,
    on_path: &mut [bool],
    tally: &mut ChainTally,
) {
    let mut path = vec![root];
    let mut cursors = vec![0usize];
    on_path[root] = true;

    while let (Some(&pos), Some(cursor)) = (path.last(), cursors.last_mut()) {
        let children = index.children(pos);
        let next = children[*cursor..]
            .iter()
            .position(|&child| !on_path[child] && criteria.is_viral(index, child));

        if let Some(offset) = next {
            let child = children[*cursor + offset];
            *cursor += offset + 1;
            on_path[child] = true;
            path.push(child);
            cursors.push(0);
            continue;
        }

        tally.record(&path);
        on_path[pos] = false;
        path.pop();
        cursors.pop();
    }
}

/// Enumerate viral chains over every thread in `index`
#[must_use]
pub fn detect(index: &CommentIndex<'_>, criteria: &ViralCriteria) -> ViralChainReport {
    let mut tally = ChainTally::default();
    let mut on_path = vec![false; index.len()];

    for &root in index.roots() {
        if criteria.is_viral(index, root) {
            walk_from(index, criteria, root, &mut on_path, &mut tally);
        }
    }

    let longest_chain_comments: Vec<i64> = tally
        .longest
        .iter()
        .map(|&pos| index.comment(pos).id)
        .collect();

    ViralChainReport {
        longest_chain_length: longest_chain_comments.len(),
        viral_criteria_met: !longest_chain_comments.is_empty(),
        longest_chain_comments,
        total_viral_chains: tally.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CommentNode;

    fn run(comments: &[CommentNode], criteria: ViralCriteria) -> ViralChainReport {
        detect(&CommentIndex::build(comments), &criteria)
    }

    fn low_threshold() -> ViralCriteria {
        ViralCriteria {
            min_replies: 3,
            min_upvotes: 5,
        }
    }

    #[test]
    fn test_upvote_chain_of_three() {
        let comments = vec![
            CommentNode::new(1, None, 10),
            CommentNode::new(2, Some(1), 8),
            CommentNode::new(3, Some(2), 6),
        ];
        let report = run(&comments, low_threshold());

        assert_eq!(report.longest_chain_length, 3);
        assert_eq!(report.longest_chain_comments, vec![1, 2, 3]);
        // [1,2,3] and its prefix [1,2]
        assert_eq!(report.total_viral_chains, 2);
        assert!(report.viral_criteria_met);
    }

    #[test]
    fn test_lone_viral_node_is_not_a_chain() {
        let comments = vec![CommentNode::new(1, None, 50), CommentNode::new(2, Some(1), 0)];
        let report = run(&comments, ViralCriteria::default());

        assert_eq!(report, ViralChainReport::empty());
    }

    #[test]
    fn test_non_viral_root_contributes_nothing() {
        let comments = vec![
            CommentNode::new(1, None, 0),
            CommentNode::new(2, Some(1), 20),
            CommentNode::new(3, Some(2), 20),
        ];
        let report = run(&comments, ViralCriteria::default());

        assert_eq!(report.total_viral_chains, 0);
        assert!(!report.viral_criteria_met);
    }

    #[test]
    fn test_reply_count_makes_a_comment_viral() {
        // 2 has three replies, so it is viral without upvotes
        let comments = vec![
            CommentNode::new(1, None, 10),
            CommentNode::new(2, Some(1), 0),
            CommentNode::new(3, Some(2), 0),
            CommentNode::new(4, Some(2), 0),
            CommentNode::new(5, Some(2), 0),
        ];
        let report = run(&comments, ViralCriteria::default());

        assert_eq!(report.longest_chain_comments, vec![1, 2]);
        assert_eq!(report.total_viral_chains, 1);
    }

    #[test]
    fn test_branches_count_every_prefix_and_keep_first_longest() {
        let comments = vec![
            CommentNode::new(1, None, 10),
            CommentNode::new(2, Some(1), 10),
            CommentNode::new(3, Some(2), 10),
            CommentNode::new(4, Some(1), 10),
            CommentNode::new(5, Some(4), 10),
        ];
        let report = run(&comments, ViralCriteria::default());

        // [1,2,3], [1,2], [1,4,5], [1,4], [1]: the last is too short
        assert_eq!(report.total_viral_chains, 4);
        assert_eq!(report.longest_chain_comments, vec![1, 2, 3]);
    }

    #[test]
    fn test_single_branch_yields_n_minus_one_chains() {
        let comments: Vec<CommentNode> = (1..=6)
            .map(|id| CommentNode::new(id, (id > 1).then_some(id - 1), 15))
            .collect();
        let report = run(&comments, ViralCriteria::default());

        assert_eq!(report.total_viral_chains, 5);
        assert_eq!(report.longest_chain_length, 6);
    }

    #[test]
    fn test_viral_cycle_terminates() {
        let comments = vec![
            CommentNode::new(1, Some(2), 10),
            CommentNode::new(2, Some(1), 10),
        ];
        let report = run(&comments, ViralCriteria::default());

        // Both comments are roots: [1, 2] and [2, 1]
        assert_eq!(report.longest_chain_comments, vec![1, 2]);
        assert_eq!(report.longest_chain_length, 2);
        assert_eq!(report.total_viral_chains, 2);
    }
}
