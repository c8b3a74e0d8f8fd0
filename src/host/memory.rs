use std::collections::{HashMap, HashSet};

use anyhow::Result;

use crate::host::HostClient;
use crate::model::{
    BranchRef, Comparison, FileContentItem, PullRequest, RepoId, Tag, UserContext,
};

/// Seedable in-memory [`HostClient`] used by unit and integration tests.
///
/// Everything is fixed at seed time; queries only read. Repositories are
/// public by default; restrict one with [`InMemoryHost::restrict_repo`] to
/// exercise access-denied paths.
#[derive(Default)]
pub struct InMemoryHost {
    files: HashMap<(String, String), FileContentItem>,
    default_branches: HashMap<String, String>,
    branches: HashMap<String, Vec<BranchRef>>,
    tags: HashMap<String, Vec<Tag>>,
    comparisons: HashMap<(String, String, String), Comparison>,
    pull_requests: HashMap<String, Vec<PullRequest>>,
    restricted: HashMap<String, HashSet<String>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_file(&mut self, repo: &RepoId, path: &str, content: FileContentItem) {
        self.files
            .insert((repo.full_name(), path.to_string()), content);
    }

    /// Convenience seeding for plain-text manifest/spec fixtures.
    pub fn seed_text_file(&mut self, repo: &RepoId, path: &str, text: &str) {
        self.seed_file(
            repo,
            path,
            FileContentItem {
                bytes: text.as_bytes().to_vec(),
                encoding: None,
                html_url: format!("https://host.test/{}/blob/main/{}", repo.full_name(), path),
                last_modified: None,
            },
        );
    }

    pub fn seed_default_branch(&mut self, repo: &RepoId, branch: &str) {
        self.default_branches
            .insert(repo.full_name(), branch.to_string());
    }

    pub fn seed_branch(&mut self, repo: &RepoId, branch: BranchRef) {
        self.branches
            .entry(repo.full_name())
            .or_default()
            .push(branch);
    }

    pub fn seed_tag(&mut self, repo: &RepoId, tag: Tag) {
        self.tags.entry(repo.full_name()).or_default().push(tag);
    }

    pub fn seed_comparison(&mut self, repo: &RepoId, base: &str, head: &str, cmp: Comparison) {
        self.comparisons
            .insert((repo.full_name(), base.to_string(), head.to_string()), cmp);
    }

    pub fn seed_pull_request(&mut self, repo: &RepoId, pull: PullRequest) {
        self.pull_requests
            .entry(repo.full_name())
            .or_default()
            .push(pull);
    }

    /// Make a repository visible only to the named users.
    pub fn restrict_repo(&mut self, repo: &RepoId, allowed_users: &[&str]) {
        self.restricted.insert(
            repo.full_name(),
            allowed_users.iter().map(|u| u.to_string()).collect(),
        );
    }

    fn visible_to(&self, repo: &RepoId, user: &UserContext) -> bool {
        match self.restricted.get(&repo.full_name()) {
            Some(allowed) => allowed.contains(&user.username),
            None => true,
        }
    }
}

#[async_trait::async_trait]
impl HostClient for InMemoryHost {
    async fn fetch_file_content(
        &self,
        repo: &RepoId,
        path: &str,
        _git_ref: Option<&str>,
    ) -> Result<Option<FileContentItem>> {
        Ok(self
            .files
            .get(&(repo.full_name(), path.to_string()))
            .cloned())
    }

    async fn is_collaborator(&self, repo: &RepoId, user: &UserContext) -> Result<bool> {
        Ok(self.visible_to(repo, user))
    }

    async fn get_default_branch(&self, repo: &RepoId) -> Result<Option<String>> {
        Ok(self.default_branches.get(&repo.full_name()).cloned())
    }

    async fn query_branches(
        &self,
        repo: &RepoId,
        name_pattern: &str,
        spec_file_path: Option<&str>,
    ) -> Result<Vec<BranchRef>> {
        let mut refs: Vec<BranchRef> = self
            .branches
            .get(&repo.full_name())
            .map(|all| {
                all.iter()
                    .filter(|b| b.name.starts_with(name_pattern))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if spec_file_path.is_none() {
            for branch in &mut refs {
                branch.spec_content = None;
            }
        }
        Ok(refs)
    }

    async fn query_tags(&self, repo: &RepoId, name_pattern: Option<&str>) -> Result<Vec<Tag>> {
        Ok(self
            .tags
            .get(&repo.full_name())
            .map(|all| {
                all.iter()
                    .filter(|t| name_pattern.map_or(true, |p| t.name.starts_with(p)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn compare_refs(&self, repo: &RepoId, base: &str, head: &str) -> Result<Comparison> {
        self.comparisons
            .get(&(repo.full_name(), base.to_string(), head.to_string()))
            .copied()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no comparison seeded for {} {}...{}",
                    repo.full_name(),
                    base,
                    head
                )
            })
    }

    async fn query_open_pull_requests(
        &self,
        repo: &RepoId,
        base_branch: &str,
    ) -> Result<Vec<PullRequest>> {
        Ok(self
            .pull_requests
            .get(&repo.full_name())
            .map(|all| {
                all.iter()
                    .filter(|p| p.base_branch == base_branch)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
