//! Pattern-based tree filtering.
//!
//! [`filter`] prunes a suite tree to the subtrees reachable via a glob
//! pattern. A `skip` count ignores a fixed number of hierarchy levels
//! before matching begins, which is what lets a suite pattern match
//! relative to any concrete scope prefix instead of an absolute root path.

use globset::{GlobBuilder, GlobMatcher};

use steep_types::{Result, SteepError, SuiteNode};

/// One filter application: a glob pattern and the number of hierarchy
/// levels to skip before it applies.
#[derive(Debug, Clone)]
pub struct FilterPass {
    pub pattern: String,
    pub skip: usize,
}

/// Compile a case-insensitive glob whose `/` aligns with path segment
/// boundaries, so `*` and `?` never cross levels.
fn compile(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| SteepError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Prune `tree` to the subtrees whose `/`-joined path matches `pattern`,
/// ignoring the first `skip` levels.
///
/// A matched node is kept verbatim, specs included. Intermediate levels on
/// the way to a match keep only their `suites`; branches without a match
/// below them are dropped entirely. Filtering an empty tree returns an
/// empty tree.
pub fn filter(tree: &SuiteNode, pattern: &str, skip: usize) -> Result<SuiteNode> {
    let matcher = compile(pattern)?;
    Ok(filter_level(tree, &matcher, skip, ""))
}

fn filter_level(tree: &SuiteNode, matcher: &GlobMatcher, skip: usize, base: &str) -> SuiteNode {
    let mut out = SuiteNode::new();
    for (name, child) in &tree.suites {
        // Skipped levels restart path accumulation below them.
        if skip > 0 {
            let nested = filter_level(child, matcher, skip - 1, "");
            if !nested.suites.is_empty() {
                out.suites.insert(name.clone(), nested);
            }
            continue;
        }

        let path = if base.is_empty() {
            name.clone()
        } else {
            format!("{base}/{name}")
        };
        if matcher.is_match(&path) {
            out.suites.insert(name.clone(), child.clone());
        } else {
            let nested = filter_level(child, matcher, 0, &path);
            if !nested.suites.is_empty() {
                out.suites.insert(name.clone(), nested);
            }
        }
    }
    out
}

/// Collect the `/`-joined paths of all suites that carry specs, in
/// depth-first order. Specs at the root itself are out of scope and
/// yield no entry.
pub fn names(tree: &SuiteNode) -> Vec<String> {
    let mut out = Vec::new();
    collect_names(tree, "", &mut out);
    out
}

fn collect_names(tree: &SuiteNode, base: &str, out: &mut Vec<String>) {
    if !base.is_empty() && !tree.specs.is_empty() {
        out.push(base.to_string());
    }
    for (name, child) in &tree.suites {
        let path = if base.is_empty() {
            name.clone()
        } else {
            format!("{base}/{name}")
        };
        collect_names(child, &path, out);
    }
}
