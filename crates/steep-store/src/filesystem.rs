//! Filesystem suite storage.
//!
//! A suite-tree region maps to a directory subtree: one `<name>.json` file
//! per leaf specification, one subdirectory per child suite. The directory
//! tree is the index; there is no sidecar manifest. Sibling entries are
//! read and written concurrently with first-error-wins semantics — the
//! failing sibling aborts the rest, though writes already issued are not
//! rolled back.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use async_trait::async_trait;
use tokio::task::JoinSet;

use steep_types::name::{ensure_name, ensure_scope, is_valid_segment};
use steep_types::{Result, SteepError, SuiteNode};

use crate::Storage;

/// Storage handle over a validated, existing base directory.
///
/// Immutable after construction; only the directory's on-disk contents
/// mutate, and only through `store`/`import`.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    base: PathBuf,
}

impl FileSystemStorage {
    /// Wrap an existing base directory.
    ///
    /// Fails with [`SteepError::InvalidBase`] when `base` is missing or is
    /// not a directory. Use [`create`](Self::create) to ensure the base
    /// first.
    pub fn new(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        if !base.is_dir() {
            return Err(SteepError::InvalidBase(base));
        }
        Ok(Self { base })
    }

    /// Ensure the base directory exists, creating missing parents, and
    /// return a handle rooted there.
    pub async fn create(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        tokio::fs::create_dir_all(&base).await?;
        Self::new(base)
    }

    /// Base directory backing this handle.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

#[async_trait]
impl Storage for FileSystemStorage {
    async fn valid(&self, suite: &str) -> Result<bool> {
        ensure_name(suite)?;
        match tokio::fs::metadata(self.base.join(suite)).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn fetch(&self, suite: &str) -> Result<SuiteNode> {
        ensure_name(suite)?;
        let dir = self.base.join(suite);
        match tokio::fs::metadata(&dir).await {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => return Err(SteepError::NotFound(suite.to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(SteepError::NotFound(suite.to_string()))
            }
            Err(err) => return Err(err.into()),
        }
        tracing::debug!(suite, "fetching suite");
        read_tree(dir).await
    }

    async fn store(&self, suite: &str, data: &SuiteNode) -> Result<()> {
        ensure_name(suite)?;
        tracing::debug!(suite, "storing suite");
        write_tree(self.base.join(suite), data.clone()).await
    }

    async fn export(&self) -> Result<SuiteNode> {
        read_tree(self.base.clone()).await
    }

    async fn import(&self, data: &SuiteNode) -> Result<()> {
        write_tree(self.base.clone(), data.clone()).await
    }

    async fn scope(&self, segments: &[String]) -> Result<Self> {
        ensure_scope(segments)?;
        let mut base = self.base.clone();
        for segment in segments {
            base.push(segment);
        }
        tokio::fs::create_dir_all(&base).await?;
        Self::new(base)
    }
}

enum TreeEntry {
    Spec(String, serde_json::Value),
    Suite(String, SuiteNode),
}

type BoxedResult<T> = Pin<Box<dyn Future<Output = Result<T>> + Send>>;

/// Recursively read a directory into a suite node, loading sibling entries
/// concurrently. A regular file becomes a spec named after its basename
/// without extension; a subdirectory becomes a child suite. Empty child
/// directories carry no data and are omitted.
fn read_tree(dir: PathBuf) -> BoxedResult<SuiteNode> {
    Box::pin(async move {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        let mut tasks: JoinSet<Result<Option<TreeEntry>>> = JoinSet::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();
            tasks.spawn(async move {
                let metadata = tokio::fs::metadata(&path).await?;
                if metadata.is_dir() {
                    let nested = read_tree(path).await?;
                    Ok((!nested.is_empty()).then(|| TreeEntry::Suite(name, nested)))
                } else {
                    let spec = Path::new(&name)
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                        .unwrap_or_else(|| name.clone());
                    let raw = tokio::fs::read(&path).await?;
                    let value = serde_json::from_slice(&raw)
                        .map_err(|source| SteepError::InvalidContents { path, source })?;
                    Ok(Some(TreeEntry::Spec(spec, value)))
                }
            });
        }

        // First error wins; dropping the set aborts the remaining siblings.
        let mut node = SuiteNode::new();
        while let Some(joined) = tasks.join_next().await {
            match joined?? {
                Some(TreeEntry::Spec(name, value)) => {
                    node.specs.insert(name, value);
                }
                Some(TreeEntry::Suite(name, nested)) => {
                    node.suites.insert(name, nested);
                }
                None => {}
            }
        }
        Ok(node)
    })
}

/// Recursively write a suite node below `dir`, writing sibling entries
/// concurrently. Existing files are overwritten; files on disk that are
/// absent from the node are left alone.
fn write_tree(dir: PathBuf, node: SuiteNode) -> BoxedResult<()> {
    Box::pin(async move {
        tokio::fs::create_dir_all(&dir).await?;
        let mut tasks: JoinSet<Result<()>> = JoinSet::new();
        for (name, value) in node.specs {
            if !is_valid_segment(&name) {
                return Err(SteepError::InvalidName(name));
            }
            let file = dir.join(format!("{name}.json"));
            tasks.spawn(async move {
                let raw = serde_json::to_vec(&value)?;
                tokio::fs::write(&file, raw).await?;
                Ok(())
            });
        }
        for (name, child) in node.suites {
            if !is_valid_segment(&name) {
                return Err(SteepError::InvalidName(name));
            }
            let sub = dir.join(&name);
            tasks.spawn(write_tree(sub, child));
        }

        while let Some(joined) = tasks.join_next().await {
            joined??;
        }
        Ok(())
    })
}
