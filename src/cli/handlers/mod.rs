//! CLI command handlers
//!
//! Organized by functional domain:
//! - init: schema creation
//! - info: configuration display
//! - serve: API server
//! - trending: counters, sync and recommendations
//! - comments: comment thread analysis
//! - engagements: recording engagements
//! - reports: aggregate engagement reports

pub mod comments;
pub mod engagements;
pub mod info;
pub mod init;
pub mod reports;
pub mod serve;
pub mod trending;

pub use comments::*;
pub use engagements::*;
pub use info::*;
pub use init::*;
pub use reports::*;
pub use serve::*;
pub use trending::*;
