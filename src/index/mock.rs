use crate::error::Result;
use crate::index::PackageIndex;
use std::collections::HashSet;
use std::sync::Mutex;

/// In-memory package index that records every query
pub struct MockIndex {
    package: String,
    published: HashSet<String>,
    queries: Mutex<Vec<String>>,
}

impl MockIndex {
    pub fn new(package: impl Into<String>) -> Self {
        MockIndex {
            package: package.into(),
            published: HashSet::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Mark a version as already present in the index
    pub fn publish(&mut self, version: impl Into<String>) {
        self.published.insert(version.into());
    }

    /// Versions queried so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

impl PackageIndex for MockIndex {
    fn package(&self) -> &str {
        &self.package
    }

    fn is_published(&self, version: &str) -> Result<bool> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(version.to_string());
        }
        Ok(self.published.contains(version))
    }
}
