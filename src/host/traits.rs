use anyhow::Result;

use crate::model::{BranchRef, Comparison, FileContentItem, PullRequest, RepoId, Tag, UserContext};

/// Read-only capabilities consumed from the source-control host.
///
/// Absence ("not found") is `Ok(None)` or an empty collection; `Err` is
/// reserved for transport failures, which the resolution core never catches
/// or retries. Implementations own their own auth and caching.
#[async_trait::async_trait]
pub trait HostClient: Send + Sync {
    /// Fetch a file at an optional ref. `None` when the file does not exist
    /// or the repository is not visible.
    async fn fetch_file_content(
        &self,
        repo: &RepoId,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<Option<FileContentItem>>;

    /// Whether the user can read the repository.
    async fn is_collaborator(&self, repo: &RepoId, user: &UserContext) -> Result<bool>;

    /// The repository's default branch name, if the repository exists.
    async fn get_default_branch(&self, repo: &RepoId) -> Result<Option<String>>;

    /// Branches whose name starts with `name_pattern`. When
    /// `spec_file_path` is given, each returned ref carries that file's
    /// text at the branch head commit (where the file exists there).
    async fn query_branches(
        &self,
        repo: &RepoId,
        name_pattern: &str,
        spec_file_path: Option<&str>,
    ) -> Result<Vec<BranchRef>>;

    /// Tags whose name starts with `name_pattern`; all tags when `None`.
    async fn query_tags(&self, repo: &RepoId, name_pattern: Option<&str>) -> Result<Vec<Tag>>;

    /// Ancestry distance from `base` to `head`.
    async fn compare_refs(&self, repo: &RepoId, base: &str, head: &str) -> Result<Comparison>;

    /// Open pull requests targeting `base_branch`, with their changed files.
    async fn query_open_pull_requests(
        &self,
        repo: &RepoId,
        base_branch: &str,
    ) -> Result<Vec<PullRequest>>;
}
