use crate::error::Result;
use git2::{ErrorCode, ObjectType, Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn head_oid(&self) -> Result<Option<Oid>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };

        let commit = head.peel_to_commit()?;
        Ok(Some(commit.id()))
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        let reference_name = format!("refs/tags/{}", tag_name);

        match self.repo.find_reference(&reference_name) {
            Ok(reference) => {
                let object = reference.peel(ObjectType::Any)?;

                // Tags on trees or blobs never label a commit
                if object.kind() != Some(ObjectType::Commit) {
                    log::debug!("Tag '{}' does not point at a commit", tag_name);
                    return Ok(None);
                }
                Ok(Some(object.id()))
            }
            Err(e) if e.code() == ErrorCode::NotFound || e.code() == ErrorCode::InvalidSpec => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn tags_pointing_at(&self, oid: Oid) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            match self.find_tag_oid(name) {
                Ok(Some(target)) if target == oid => tags.push(name.to_string()),
                Ok(_) => {}
                Err(e) => log::debug!("Skipping tag '{}': {}", name, e),
            }
        }
        tags.sort();
        Ok(tags)
    }
}
