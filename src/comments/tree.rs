//! Nested comment tree for presentation

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::index::CommentIndex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentTreeNode {
    pub id: i64,
    pub body: String,
    pub upvotes: i64,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<i64>,
    pub children: Vec<CommentTreeNode>,
}

struct Frame {
    pos: usize,
    next_child: usize,
    built: Vec<CommentTreeNode>,
}

impl Frame {
    const fn new(pos: usize) -> Self {
        Self {
            pos,
            next_child: 0,
            built: Vec::new(),
        }
    }
}

/// Assemble one nested node per root, children in input order.
///
/// Built bottom-up with an explicit stack; replies that loop back onto the
/// current path are left out.
#[must_use]
pub fn build(index: &CommentIndex<'_>) -> Vec<CommentTreeNode> {
    let mut forest = Vec::with_capacity(index.roots().len());
    let mut on_path = vec![false; index.len()];

    for &root in index.roots() {
        let mut stack = vec![Frame::new(root)];
        on_path[root] = true;

        while let Some(frame) = stack.last_mut() {
            if let Some(&child) = index.children(frame.pos).get(frame.next_child) {
                frame.next_child += 1;
                if !on_path[child] {
                    on_path[child] = true;
                    stack.push(Frame::new(child));
                }
                continue;
            }

            let Some(done) = stack.pop() else { break };
            on_path[done.pos] = false;
            let comment = index.comment(done.pos);
            let node = CommentTreeNode {
                id: comment.id,
                body: comment.body.clone(),
                upvotes: comment.upvotes,
                created_at: comment.created_at,
                user_id: comment.user_id,
                children: done.built,
            };
            match stack.last_mut() {
                Some(parent) => parent.built.push(node),
                None => forest.push(node),
            }
        }
    }

    forest
}
