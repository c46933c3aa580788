use crate::error::{GateError, Result};
use crate::git::Repository;
use git2::Oid;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    head: Option<Oid>,
    tags: HashMap<String, Oid>,
    tag_listing_error: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository (unborn HEAD)
    pub fn new() -> Self {
        MockRepository {
            head: None,
            tags: HashMap::new(),
            tag_listing_error: None,
        }
    }

    /// Set the HEAD commit
    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.insert(name.into(), oid);
    }

    /// Make `tags_pointing_at` fail, as a corrupt tag ref would
    pub fn set_tag_listing_error(&mut self, message: impl Into<String>) {
        self.tag_listing_error = Some(message.into());
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head_oid(&self) -> Result<Option<Oid>> {
        Ok(self.head)
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.get(tag_name).copied())
    }

    fn tags_pointing_at(&self, oid: Oid) -> Result<Vec<String>> {
        if let Some(message) = &self.tag_listing_error {
            return Err(GateError::Git(git2::Error::from_str(message)));
        }
        let mut tags: Vec<String> = self
            .tags
            .iter()
            .filter(|(_, target)| **target == oid)
            .map(|(name, _)| name.clone())
            .collect();
        tags.sort();
        Ok(tags)
    }
}
