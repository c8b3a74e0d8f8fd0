use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::host::HostClient;
use crate::model::{
    BranchRef, Comparison, FileContentItem, PullRequest, RepoId, Tag, UserContext,
};

/// GitHub REST v3 implementation of [`HostClient`].
///
/// Pure transport: no business rules, no retry policy beyond the client's
/// defaults. Everything the resolution core needs is mapped into the host
/// value types; everything else in the responses is dropped.
pub struct GithubHost {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubHost {
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Self {
        let api_base: String = api_base.into();
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .get(format!("{}{}", self.api_base, path))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "spec-catalogue-rs");
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// GET returning `Ok(None)` on 404 and an error on any other failure.
    async fn get_optional<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self
            .request(path)
            .send()
            .await
            .with_context(|| format!("GET {}", path))?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(anyhow!("GET {} failed with status {}", path, status)),
        }
    }

    async fn get_required<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_optional(path)
            .await?
            .ok_or_else(|| anyhow!("GET {} returned 404", path))
    }

    async fn fetch_text_at_ref(
        &self,
        repo: &RepoId,
        path: &str,
        git_ref: &str,
    ) -> Result<Option<String>> {
        let content = self.fetch_file_content(repo, path, Some(git_ref)).await?;
        Ok(content.and_then(|item| decode_content_text(&item)))
    }
}

fn decode_content_text(item: &FileContentItem) -> Option<String> {
    let bytes = match item.encoding.as_deref() {
        Some("base64") => {
            let packed: Vec<u8> = item
                .bytes
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            BASE64.decode(&packed).ok()?
        }
        _ => item.bytes.clone(),
    };
    String::from_utf8(bytes).ok()
}

#[derive(Deserialize)]
struct ContentResponse {
    content: Option<String>,
    encoding: Option<String>,
    html_url: String,
}

#[derive(Deserialize)]
struct RepoResponse {
    default_branch: String,
}

#[derive(Deserialize)]
struct BranchResponse {
    name: String,
    commit: CommitPointer,
}

#[derive(Deserialize)]
struct TagResponse {
    name: String,
    commit: CommitPointer,
}

#[derive(Deserialize)]
struct CommitPointer {
    sha: String,
}

#[derive(Deserialize)]
struct CompareResponse {
    ahead_by: u64,
    behind_by: u64,
    total_commits: u64,
}

#[derive(Deserialize)]
struct PullResponse {
    number: u64,
    title: String,
    html_url: String,
    updated_at: DateTime<Utc>,
    head: PullRef,
    base: PullRef,
    labels: Vec<PullLabel>,
}

#[derive(Deserialize)]
struct PullRef {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Deserialize)]
struct PullLabel {
    name: String,
}

#[derive(Deserialize)]
struct PullFileResponse {
    filename: String,
}

#[async_trait::async_trait]
impl HostClient for GithubHost {
    async fn fetch_file_content(
        &self,
        repo: &RepoId,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<Option<FileContentItem>> {
        let mut url = format!("/repos/{}/{}/contents/{}", repo.owner, repo.name, path);
        if let Some(git_ref) = git_ref {
            url.push_str(&format!("?ref={}", git_ref));
        }
        let response: Option<ContentResponse> = self.get_optional(&url).await?;
        Ok(response.map(|c| FileContentItem {
            bytes: c.content.unwrap_or_default().into_bytes(),
            encoding: c.encoding,
            html_url: c.html_url,
            last_modified: None,
        }))
    }

    async fn is_collaborator(&self, repo: &RepoId, user: &UserContext) -> Result<bool> {
        let url = format!(
            "/repos/{}/{}/collaborators/{}",
            repo.owner, repo.name, user.username
        );
        let response = self
            .request(&url)
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(anyhow!("GET {} failed with status {}", url, status)),
        }
    }

    async fn get_default_branch(&self, repo: &RepoId) -> Result<Option<String>> {
        let url = format!("/repos/{}/{}", repo.owner, repo.name);
        let response: Option<RepoResponse> = self.get_optional(&url).await?;
        Ok(response.map(|r| r.default_branch))
    }

    async fn query_branches(
        &self,
        repo: &RepoId,
        name_pattern: &str,
        spec_file_path: Option<&str>,
    ) -> Result<Vec<BranchRef>> {
        let url = format!("/repos/{}/{}/branches?per_page=100", repo.owner, repo.name);
        let branches: Vec<BranchResponse> = self.get_required(&url).await?;

        let mut refs = Vec::new();
        for branch in branches {
            if !branch.name.starts_with(name_pattern) {
                continue;
            }
            let spec_content = match spec_file_path {
                Some(path) => self.fetch_text_at_ref(repo, path, &branch.commit.sha).await?,
                None => None,
            };
            refs.push(BranchRef {
                name: branch.name,
                commit_sha: branch.commit.sha,
                spec_content,
            });
        }
        Ok(refs)
    }

    async fn query_tags(&self, repo: &RepoId, name_pattern: Option<&str>) -> Result<Vec<Tag>> {
        let url = format!("/repos/{}/{}/tags?per_page=100", repo.owner, repo.name);
        let tags: Vec<TagResponse> = self.get_required(&url).await?;
        Ok(tags
            .into_iter()
            .filter(|t| name_pattern.map_or(true, |p| t.name.starts_with(p)))
            .map(|t| Tag {
                name: t.name,
                commit_sha: t.commit.sha,
            })
            .collect())
    }

    async fn compare_refs(&self, repo: &RepoId, base: &str, head: &str) -> Result<Comparison> {
        let url = format!(
            "/repos/{}/{}/compare/{}...{}",
            repo.owner, repo.name, base, head
        );
        let response: CompareResponse = self.get_required(&url).await?;
        Ok(Comparison {
            ahead_by: response.ahead_by,
            behind_by: response.behind_by,
            total_commits: response.total_commits,
        })
    }

    async fn query_open_pull_requests(
        &self,
        repo: &RepoId,
        base_branch: &str,
    ) -> Result<Vec<PullRequest>> {
        let url = format!(
            "/repos/{}/{}/pulls?state=open&base={}&per_page=100",
            repo.owner, repo.name, base_branch
        );
        let pulls: Vec<PullResponse> = self.get_required(&url).await?;

        let mut result = Vec::new();
        for pull in pulls {
            let files_url = format!(
                "/repos/{}/{}/pulls/{}/files?per_page=100",
                repo.owner, repo.name, pull.number
            );
            let files: Vec<PullFileResponse> = self.get_required(&files_url).await?;
            result.push(PullRequest {
                repository: repo.clone(),
                branch_name: pull.head.ref_name,
                base_branch: pull.base.ref_name,
                number: pull.number,
                url: pull.html_url,
                labels: pull.labels.into_iter().map(|l| l.name).collect(),
                changed_files: files.into_iter().map(|f| f.filename).collect(),
                title: pull.title,
                updated_at: pull.updated_at,
            });
        }
        Ok(result)
    }
}
