use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::RepoId;

/// File content as fetched from the host, with its declared transport
/// encoding and the metadata passed through to API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContentItem {
    pub bytes: Vec<u8>,
    /// Transport encoding declared by the host (e.g. `base64`). `None`
    /// means the bytes are the file content as-is.
    pub encoding: Option<String>,
    pub html_url: String,
    pub last_modified: Option<DateTime<Utc>>,
}

/// A release tag: name plus the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit_sha: String,
}

/// A branch head, optionally carrying the tracked spec file's text at that
/// commit when the query asked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
    pub commit_sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec_content: Option<String>,
}

/// An open pull request proposing changes against a tracked branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub repository: RepoId,
    /// Head branch name of the proposal.
    pub branch_name: String,
    /// Base branch the proposal targets.
    pub base_branch: String,
    pub number: u64,
    pub url: String,
    pub labels: Vec<String>,
    pub changed_files: Vec<String>,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

impl PullRequest {
    /// Whether this proposal touches the given spec file.
    pub fn changes_file(&self, file_path: &str) -> bool {
        self.changed_files.iter().any(|f| f == file_path)
    }
}

/// Git ancestry distance between a branch and a tag, the ordering primitive
/// of evolution reconstruction. With the branch as base and the tag as head:
/// `ahead_by` counts commits the tag has that the branch does not (a
/// diverged tag), `behind_by` counts commits the branch has moved past the
/// tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub ahead_by: u64,
    pub behind_by: u64,
    pub total_commits: u64,
}
