//! Revision and branch lookup for the build banner.

use std::path::Path;

use git2::{ErrorCode, Repository};
use tracing::debug;

/// VCS state of the project at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    /// Full commit id
    pub revision: Option<String>,
    /// Checked-out branch; `None` when HEAD is detached
    pub branch: Option<String>,
}

impl GitInfo {
    /// Locate the repository containing `root` and read its HEAD.
    ///
    /// Linked worktrees resolve refs through their common directory. An
    /// unborn branch has a name but no revision. Returns `None` when no
    /// repository is found or HEAD cannot be read.
    pub fn discover(root: &Path) -> Option<Self> {
        let repo = match Repository::discover(root) {
            Ok(repo) => repo,
            Err(err) => {
                debug!(root = %root.display(), error = %err, "No repository");
                return None;
            }
        };

        match repo.head() {
            Ok(head) => {
                let branch = if repo.head_detached().unwrap_or(false) {
                    None
                } else {
                    head.shorthand().map(str::to_string)
                };
                let revision = head.peel_to_commit().ok().map(|commit| commit.id().to_string());
                Some(Self { revision, branch })
            }
            Err(err) if err.code() == ErrorCode::UnbornBranch => {
                let head = repo.find_reference("HEAD").ok()?;
                let target = head.symbolic_target()?;
                let branch = target.strip_prefix("refs/heads/").unwrap_or(target);
                Some(Self {
                    revision: None,
                    branch: Some(branch.to_string()),
                })
            }
            Err(err) => {
                debug!(root = %root.display(), error = %err, "Unreadable HEAD");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Oid, Signature};
    use std::fs;
    use tempfile::TempDir;

    fn commit(repo: &Repository, message: &str) -> Oid {
        let signature = Signature::now("Jane Doe", "jane@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap()
    }

    fn repo_on(branch: &str) -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        repo.set_head(&format!("refs/heads/{branch}")).unwrap();
        (temp, repo)
    }

    #[test]
    fn reads_branch_and_revision() {
        let (temp, repo) = repo_on("main");
        let id = commit(&repo, "initial");

        let info = GitInfo::discover(temp.path()).unwrap();
        assert_eq!(info.branch.as_deref(), Some("main"));
        assert_eq!(info.revision, Some(id.to_string()));
    }

    #[test]
    fn packed_refs_are_resolved() {
        let (temp, repo) = repo_on("release");
        let id = commit(&repo, "initial");

        // move the loose ref into packed-refs
        let git = temp.path().join(".git");
        fs::remove_file(git.join("refs/heads/release")).unwrap();
        fs::write(
            git.join("packed-refs"),
            format!("# pack-refs with: peeled fully-peeled sorted\n{id} refs/heads/release\n"),
        )
        .unwrap();

        let info = GitInfo::discover(temp.path()).unwrap();
        assert_eq!(info.branch.as_deref(), Some("release"));
        assert_eq!(info.revision, Some(id.to_string()));
    }

    #[test]
    fn detached_head_has_no_branch() {
        let (temp, repo) = repo_on("main");
        let id = commit(&repo, "initial");
        repo.set_head_detached(id).unwrap();

        let info = GitInfo::discover(temp.path()).unwrap();
        assert_eq!(info.branch, None);
        assert_eq!(info.revision, Some(id.to_string()));
    }

    #[test]
    fn unborn_branch_from_subdirectory() {
        let (temp, _repo) = repo_on("main");
        let nested = temp.path().join("site/theme");
        fs::create_dir_all(&nested).unwrap();

        let info = GitInfo::discover(&nested).unwrap();
        assert_eq!(info.branch.as_deref(), Some("main"));
        assert_eq!(info.revision, None);
    }

    #[test]
    fn linked_worktree_resolves_shared_refs() {
        let (_temp, repo) = repo_on("main");
        let id = commit(&repo, "initial");

        let checkout = TempDir::new().unwrap();
        let path = checkout.path().join("feature");
        repo.worktree("feature", &path, None).unwrap();

        let info = GitInfo::discover(&path).unwrap();
        assert_eq!(info.branch.as_deref(), Some("feature"));
        assert_eq!(info.revision, Some(id.to_string()));
    }

    #[test]
    fn missing_repository() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("project");
        fs::create_dir(&project).unwrap();
        // ancestors of a temp dir are not expected to be repositories
        if Repository::discover(&project).is_err() {
            assert_eq!(GitInfo::discover(&project), None);
        }
    }
}
