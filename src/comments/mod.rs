//! Comment thread analysis: depth metrics, viral chains and nested trees
//!
//! All analyses work on the flat comment list of a single post. Each call
//! builds its own [`CommentIndex`]; nothing is shared between calls.

pub mod depth;
pub mod index;
pub mod tree;
pub mod viral;

pub use depth::DepthReport;
pub use index::CommentIndex;
pub use tree::CommentTreeNode;
pub use viral::ViralChainReport;
pub use viral::ViralCriteria;

use tracing::debug;

use crate::config::CommentsConfig;
use crate::models::CommentNode;

#[derive(Debug, Clone)]
pub struct CommentAnalyzer {
    criteria: ViralCriteria,
    memoize_depth: bool,
}

impl CommentAnalyzer {
    #[must_use]
    pub const fn new(viral_min_replies: usize, viral_min_upvotes: i64) -> Self {
        Self {
            criteria: ViralCriteria {
                min_replies: viral_min_replies,
                min_upvotes: viral_min_upvotes,
            },
            memoize_depth: true,
        }
    }

    #[must_use]
    pub const fn from_config(config: &CommentsConfig) -> Self {
        Self::new(config.viral_min_replies, config.viral_min_upvotes)
            .with_memoization(config.memoize_depth)
    }

    #[must_use]
    pub const fn with_memoization(mut self, enabled: bool) -> Self {
        self.memoize_depth = enabled;
        self
    }

    #[must_use]
    pub const fn criteria(&self) -> ViralCriteria {
        self.criteria
    }

    #[must_use]
    pub fn analyze_depth(&self, comments: &[CommentNode]) -> DepthReport {
        let index = CommentIndex::build(comments);
        let report = depth::analyze(&index, self.memoize_depth);
        debug!(
            "Depth analysis over {} comments: max depth {}",
            report.total_comments, report.max_depth
        );
        report
    }

    #[must_use]
    pub fn detect_viral_chains(&self, comments: &[CommentNode]) -> ViralChainReport {
        let index = CommentIndex::build(comments);
        let report = viral::detect(&index, &self.criteria);
        debug!(
            "Viral detection over {} comments: {} chains, longest {}",
            comments.len(),
            report.total_viral_chains,
            report.longest_chain_length
        );
        report
    }

    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn build_tree(&self, comments: &[CommentNode]) -> Vec<CommentTreeNode> {
        tree::build(&CommentIndex::build(comments))
    }
}

impl Default for CommentAnalyzer {
    fn default() -> Self {
        Self::from_config(&CommentsConfig::default())
    }
}
