//! Suite storage backends and the pattern-based tree filter.
//!
//! The only backend shipped here is [`FileSystemStorage`], which maps a
//! suite-tree region to a directory subtree. The [`Storage`] trait is the
//! seam for future backends and for transport layers that only need the
//! operation surface.

pub mod filesystem;
pub mod filter;

pub use filesystem::FileSystemStorage;
pub use filter::{filter, names, FilterPass};

use async_trait::async_trait;
use steep_types::{Result, SuiteNode};

/// Contract implemented by every storage backend.
///
/// All suite names are `/`-delimited paths relative to the backend's base
/// and are validated before any access. `scope` derives a sub-storage
/// rooted below the current base; correct scoping during access is the
/// caller's duty.
#[async_trait]
pub trait Storage: Send + Sync + Sized {
    /// True iff the given suite exists.
    async fn valid(&self, suite: &str) -> Result<bool>;

    /// Recursively read the specs and nested suites of a suite.
    async fn fetch(&self, suite: &str) -> Result<SuiteNode>;

    /// Recursively write the specs and nested suites of a suite.
    ///
    /// Storing merges onto existing content: files already present but
    /// absent from `data` survive.
    async fn store(&self, suite: &str, data: &SuiteNode) -> Result<()>;

    /// Read the entire tree rooted at this storage's base.
    async fn export(&self) -> Result<SuiteNode>;

    /// Write `data` into the tree rooted at this storage's base.
    async fn import(&self, data: &SuiteNode) -> Result<()>;

    /// Derive a sub-storage rooted at the given scope segments, creating
    /// the scoped base if necessary.
    async fn scope(&self, segments: &[String]) -> Result<Self>;
}
