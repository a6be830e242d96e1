//! Per-call adjacency index over a flat comment list
//!
//! Nodes are addressed by their position in the input slice. A comment is a
//! root when it has no parent, when its parent is not part of the list, or
//! when it names itself as parent. Two comments that name each other as
//! parent are both roots, and each keeps the other as a reply. Comments that
//! no root reaches can only sit on a longer parent cycle; the first such
//! comment (in input order) of every cycle is promoted to a root.

use std::collections::HashMap;

use crate::models::CommentNode;

pub struct CommentIndex<'a> {
    comments: &'a [CommentNode],
    children: HashMap<i64, Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> CommentIndex<'a> {
    #[must_use]
    pub fn build(comments: &'a [CommentNode]) -> Self {
        let parents: HashMap<i64, Option<i64>> = comments
            .iter()
            .map(|comment| (comment.id, comment.parent_id))
            .collect();

        let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (pos, comment) in comments.iter().enumerate() {
            match comment.parent_id {
                Some(parent) if parent != comment.id => match parents.get(&parent) {
                    Some(&grandparent) => {
                        children.entry(parent).or_default().push(pos);
                        if grandparent == Some(comment.id) {
                            roots.push(pos);
                        }
                    }
                    None => roots.push(pos),
                },
                _ => roots.push(pos),
            }
        }

        let mut index = Self {
            comments,
            children,
            roots,
        };
        index.promote_cycle_entries();
        index
    }

    fn promote_cycle_entries(&mut self) {
        let mut reached = vec![false; self.comments.len()];
        for &root in &self.roots {
            mark_reachable(self.comments, &self.children, root, &mut reached);
        }

        let mut promoted = Vec::new();
        for pos in 0..self.comments.len() {
            if !reached[pos] {
                promoted.push(pos);
                mark_reachable(self.comments, &self.children, pos, &mut reached);
            }
        }
        self.roots.extend(promoted);
    }

    #[must_use]
    pub const fn comments(&self) -> &'a [CommentNode] {
        self.comments
    }

    #[must_use]
    pub fn comment(&self, pos: usize) -> &'a CommentNode {
        &self.comments[pos]
    }

    /// Traversal entry points, in input order (promoted cycle entries last)
    #[must_use]
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Direct replies to the comment at `pos`
    #[must_use]
    pub fn children(&self, pos: usize) -> &[usize] {
        self.children
            .get(&self.comments[pos].id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn reply_count(&self, pos: usize) -> usize {
        self.children(pos).len()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.comments.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

fn mark_reachable(
    comments: &[CommentNode],
    children: &HashMap<i64, Vec<usize>>,
    start: usize,
    reached: &mut [bool],
) {
    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        if reached[pos] {
            continue;
        }
        reached[pos] = true;
        if let Some(kids) = children.get(&comments[pos].id) {
            stack.extend(kids.iter().copied().filter(|&kid| !reached[kid]));
        }
    }
}
