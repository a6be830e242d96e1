//! Comment analyzer scenarios over realistic threads

use tagpulse::CommentAnalyzer;
use tagpulse::CommentNode;

/// Post thread:
///
/// ```text
/// 1 (25▲)
/// ├── 2 (14▲)
/// │   ├── 4 (11▲)
/// │   │   └── 7 (2▲)
/// │   └── 5 (0▲)
/// └── 3 (1▲)
/// 6 (3▲)
/// ```
fn thread() -> Vec<CommentNode> {
    vec![
        CommentNode::new(1, None, 25),
        CommentNode::new(2, Some(1), 14),
        CommentNode::new(3, Some(1), 1),
        CommentNode::new(4, Some(2), 11),
        CommentNode::new(5, Some(2), 0),
        CommentNode::new(6, None, 3),
        CommentNode::new(7, Some(4), 2),
    ]
}

#[test]
fn test_depth_of_mixed_thread() {
    let report = CommentAnalyzer::default().analyze_depth(&thread());

    assert_eq!(report.max_depth, 4);
    assert_eq!(report.total_comments, 7);
    assert_eq!(report.total_replies, 5);
    assert!((report.average_replies_per_comment - 5.0 / 7.0).abs() < 1e-9);
}

#[test]
fn test_memoization_does_not_change_results() {
    let comments = thread();
    let memo = CommentAnalyzer::default().analyze_depth(&comments);
    let plain = CommentAnalyzer::default()
        .with_memoization(false)
        .analyze_depth(&comments);
    assert_eq!(memo, plain);
}

#[test]
fn test_viral_chain_follows_upvoted_replies() {
    let report = CommentAnalyzer::default().detect_viral_chains(&thread());

    assert!(report.viral_criteria_met);
    assert_eq!(report.longest_chain_comments, vec![1, 2, 4]);
    assert_eq!(report.longest_chain_length, 3);
    // [1, 2, 4] and its prefix [1, 2]
    assert_eq!(report.total_viral_chains, 2);
}

#[test]
fn test_reply_count_alone_can_make_a_comment_viral() {
    let comments = vec![
        CommentNode::new(10, None, 0),
        CommentNode::new(11, Some(10), 0),
        CommentNode::new(12, Some(10), 0),
        CommentNode::new(13, Some(10), 0),
        CommentNode::new(14, Some(11), 0),
        CommentNode::new(15, Some(11), 0),
    ];

    assert!(!CommentAnalyzer::default()
        .detect_viral_chains(&comments)
        .viral_criteria_met);

    let report = CommentAnalyzer::new(2, 100).detect_viral_chains(&comments);
    assert_eq!(report.longest_chain_comments, vec![10, 11]);
    assert_eq!(report.total_viral_chains, 1);
}

#[test]
fn test_orphans_and_cycles_are_analyzed_without_hanging() {
    let comments = vec![
        // Parent 99 is not part of the post
        CommentNode::new(1, Some(99), 50),
        CommentNode::new(2, Some(1), 50),
        // 3 -> 4 -> 3
        CommentNode::new(3, Some(4), 50),
        CommentNode::new(4, Some(3), 50),
        // Self reply
        CommentNode::new(5, Some(5), 50),
    ];
    let analyzer = CommentAnalyzer::default();

    let depth = analyzer.analyze_depth(&comments);
    assert_eq!(depth.total_comments, 5);
    assert_eq!(depth.max_depth, 2);

    let viral = analyzer.detect_viral_chains(&comments);
    assert_eq!(viral.longest_chain_comments, vec![1, 2]);
    // [1, 2], [3, 4] and [4, 3]
    assert_eq!(viral.total_viral_chains, 3);

    let tree = analyzer.build_tree(&comments);
    let ids: Vec<i64> = tree.iter().map(|node| node.id).collect();
    // The mutual pair splits into two roots
    assert_eq!(ids, vec![1, 3, 4, 5]);
    assert_eq!(tree[0].children[0].id, 2);
    assert_eq!(tree[1].children[0].id, 4);
    assert!(tree[1].children[0].children.is_empty());
    assert_eq!(tree[2].children[0].id, 3);
    assert!(tree[3].children.is_empty());
}

#[test]
fn test_tree_preserves_input_order_of_siblings() {
    let tree = CommentAnalyzer::default().build_tree(&thread());

    assert_eq!(tree.len(), 2);
    let root = &tree[0];
    assert_eq!(root.id, 1);
    let child_ids: Vec<i64> = root.children.iter().map(|c| c.id).collect();
    assert_eq!(child_ids, vec![2, 3]);
    assert_eq!(root.children[0].children[0].children[0].id, 7);
}

#[test]
fn test_deep_thread_does_not_overflow_the_stack() {
    let comments: Vec<CommentNode> = (1..=100_000)
        .map(|id| CommentNode::new(id, (id > 1).then_some(id - 1), 20))
        .collect();
    let analyzer = CommentAnalyzer::default();

    assert_eq!(analyzer.analyze_depth(&comments).max_depth, 100_000);
    assert_eq!(
        analyzer.detect_viral_chains(&comments).longest_chain_length,
        100_000
    );
}
