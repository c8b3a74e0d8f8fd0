use itertools::Itertools;
use log::debug;

use crate::host::HostClient;
use crate::model::{
    BranchRef, Comparison, EvolutionBranch, EvolutionItem, PullRequest, RepoId, ResolveResult,
    SpecItem, Tag,
};

pub struct EvolutionBranchBuilder;

impl EvolutionBranchBuilder {
    /// Build the ordered evolution timeline for one branch.
    ///
    /// Every candidate tag is compared against the branch head. Tags with
    /// `ahead_by > 0` have diverged from the branch and are silently
    /// excluded; that is the documented ordering policy, not an oversight.
    /// Survivors are sorted by `behind_by` ascending (closest to head
    /// first) and removed from the shared candidate pool so a tag can
    /// appear on at most one branch.
    ///
    /// Item order: open proposals targeting the branch first, then the
    /// branch head itself, then the consumed tags.
    pub async fn generate_evolution_items<H: HostClient + ?Sized>(
        host: &H,
        repo: &RepoId,
        branch: &BranchRef,
        tags: &mut Vec<Tag>,
        pull_requests: &[PullRequest],
        spec_file_path: &str,
    ) -> ResolveResult<Vec<EvolutionItem>> {
        let mut ancestors: Vec<(Tag, Comparison)> = Vec::new();
        for tag in tags.iter() {
            let comparison = host.compare_refs(repo, &branch.name, &tag.name).await?;
            if comparison.ahead_by == 0 {
                ancestors.push((tag.clone(), comparison));
            } else {
                debug!(
                    "tag '{}' diverged from branch '{}' (ahead by {}), excluded",
                    tag.name, branch.name, comparison.ahead_by
                );
            }
        }

        // All comparisons are in before ordering is decided.
        let ancestors = ancestors
            .into_iter()
            .sorted_by_key(|(_, comparison)| comparison.behind_by)
            .collect::<Vec<_>>();

        tags.retain(|tag| !ancestors.iter().any(|(consumed, _)| consumed == tag));

        let mut items: Vec<EvolutionItem> = pull_requests
            .iter()
            .filter(|pr| pr.base_branch == branch.name && pr.changes_file(spec_file_path))
            .map(|pr| EvolutionItem::PullRequest {
                pull_request: pr.clone(),
                spec_item: None,
            })
            .collect();

        items.push(EvolutionItem::BranchHead {
            branch_name: branch.name.clone(),
            commit_sha: branch.commit_sha.clone(),
            spec_item: branch
                .spec_content
                .as_deref()
                .and_then(SpecItem::from_spec_content),
        });

        items.extend(ancestors.into_iter().map(|(tag, comparison)| {
            EvolutionItem::Tag {
                tag,
                behind_by: comparison.behind_by,
                spec_item: None,
            }
        }));

        Ok(items)
    }

    /// [`generate_evolution_items`](Self::generate_evolution_items) wrapped
    /// into an [`EvolutionBranch`] record.
    pub async fn build<H: HostClient + ?Sized>(
        host: &H,
        repo: &RepoId,
        branch: &BranchRef,
        tags: &mut Vec<Tag>,
        pull_requests: &[PullRequest],
        spec_file_path: &str,
    ) -> ResolveResult<EvolutionBranch> {
        let evolution_items =
            Self::generate_evolution_items(host, repo, branch, tags, pull_requests, spec_file_path)
                .await?;
        Ok(EvolutionBranch {
            branch_name: branch.name.clone(),
            evolution_items,
        })
    }
}
