use serde::{Deserialize, Serialize};

use crate::model::{PullRequest, Tag};

/// The identifying fields of one spec file revision, extracted from the
/// OpenAPI document's `info` block when the content was available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl SpecItem {
    /// Pull `info.title` / `info.version` out of spec file text. The file
    /// may be YAML or JSON (YAML is a superset); anything unreadable yields
    /// `None` rather than an error; a broken spec file is still a revision.
    pub fn from_spec_content(content: &str) -> Option<SpecItem> {
        #[derive(Deserialize)]
        struct Doc {
            info: Option<Info>,
        }
        #[derive(Deserialize)]
        struct Info {
            title: Option<String>,
            version: Option<String>,
        }

        let doc: Doc = serde_yaml::from_str(content).ok()?;
        let info = doc.info?;
        if info.title.is_none() && info.version.is_none() {
            return None;
        }
        Some(SpecItem {
            title: info.title,
            version: info.version,
        })
    }
}

/// One entry on an evolution timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvolutionItem {
    /// A released version: a tag that is an ancestor of the branch head.
    Tag {
        tag: Tag,
        /// Commits the branch has moved past this tag; the sort key.
        behind_by: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        spec_item: Option<SpecItem>,
    },
    /// The branch head itself: the currently agreed version on that branch.
    BranchHead {
        branch_name: String,
        commit_sha: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        spec_item: Option<SpecItem>,
    },
    /// An open proposal targeting the branch and touching the spec file.
    PullRequest {
        pull_request: PullRequest,
        #[serde(skip_serializing_if = "Option::is_none")]
        spec_item: Option<SpecItem>,
    },
}

impl EvolutionItem {
    pub fn is_branch_head(&self) -> bool {
        matches!(self, EvolutionItem::BranchHead { .. })
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, EvolutionItem::Tag { .. })
    }

    pub fn is_pull_request(&self) -> bool {
        matches!(self, EvolutionItem::PullRequest { .. })
    }

    pub fn spec_item(&self) -> Option<&SpecItem> {
        match self {
            EvolutionItem::Tag { spec_item, .. }
            | EvolutionItem::BranchHead { spec_item, .. }
            | EvolutionItem::PullRequest { spec_item, .. } => spec_item.as_ref(),
        }
    }
}

/// Ordered timeline of one branch: proposals first, then the branch head,
/// then released tags closest-to-head first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionBranch {
    pub branch_name: String,
    pub evolution_items: Vec<EvolutionItem>,
}

/// Evolution config after defaulting, recorded on the result so callers can
/// see which defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEvolutionConfig {
    pub main_branch_name: String,
    /// `None` means release branches are not tracked at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_branch_prefix: Option<String>,
    /// `None` means every tag is a candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_tag_prefix: Option<String>,
}

/// The reconstructed evolution of one interface's spec file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecEvolution {
    pub interface_name: String,
    pub config_used: ResolvedEvolutionConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<EvolutionBranch>,
    pub releases: Vec<EvolutionBranch>,
}

/// Scalar reduction of a [`SpecEvolution`] for list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecEvolutionSummary {
    pub interface_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_agreed: Option<SpecItem>,
    pub upcoming_release_count: usize,
    pub proposed_changes_count: usize,
    pub agreed_version_tag_count: usize,
}
