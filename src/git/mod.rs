//! Git tag state abstraction layer
//!
//! The gate only needs to know whether HEAD is exactly labelled by a release
//! tag. This module hides `git2` behind the [Repository] trait so the gate can
//! be exercised against [MockRepository] in tests.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::TagPattern;
use crate::error::Result;
use git2::Oid;

/// Read-only tag queries needed by the version resolver
pub trait Repository {
    /// Commit at HEAD, or `None` on an unborn branch
    fn head_oid(&self) -> Result<Option<Oid>>;

    /// Commit a tag points at, peeling annotated tags.
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - The tagged commit
    /// * `Ok(None)` - If the tag doesn't exist
    /// * `Err` - If there's a Git error
    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// Names of all tags whose target commit is `oid`, sorted
    fn tags_pointing_at(&self, oid: Oid) -> Result<Vec<String>>;
}

/// Whether HEAD is exactly the commit labelled by the release tag for `version`.
pub fn is_exact_tag_match<R: Repository + ?Sized>(
    repo: &R,
    pattern: &TagPattern,
    version: &str,
) -> Result<bool> {
    let head = match repo.head_oid()? {
        Some(oid) => oid,
        None => return Ok(false),
    };

    let tag_name = pattern.format(version);
    let matched = repo.find_tag_oid(&tag_name)? == Some(head);
    log::debug!("Tag '{}' at HEAD {}: {}", tag_name, head, matched);
    Ok(matched)
}

/// Versions of the release tags found on HEAD, for diagnostics
pub fn head_release_versions<R: Repository + ?Sized>(
    repo: &R,
    pattern: &TagPattern,
) -> Result<Vec<String>> {
    let head = match repo.head_oid()? {
        Some(oid) => oid,
        None => return Ok(Vec::new()),
    };

    Ok(repo
        .tags_pointing_at(head)?
        .iter()
        .filter_map(|tag| pattern.extract(tag))
        .collect())
}
