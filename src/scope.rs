//! Project membership for source files.

/// Decides whether a file belongs to the traced project.
///
/// Membership is a plain textual prefix test against the configured root, so
/// `src/app` also matches `src/application.rs`. Include a trailing separator in
/// the root to avoid that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    root: String,
}

impl ScopeFilter {
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn in_scope(&self, path: &str) -> bool {
        path.starts_with(&self.root)
    }
}
