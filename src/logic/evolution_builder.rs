use crate::host::HostClient;
use crate::logic::{EvolutionBranchBuilder, EvolutionData, ResolvedInterface};
use crate::model::{EvolutionBranch, ResolvedEvolutionConfig, ResolveResult, SpecEvolution};

pub struct SpecEvolutionBuilder;

impl SpecEvolutionBuilder {
    /// Assemble the full [`SpecEvolution`] for one interface from extracted
    /// host data.
    ///
    /// The main branch is built first, consuming from the full tag pool;
    /// each release branch then consumes from whatever remains, in the
    /// order the host returned them. The resolved config travels on the
    /// result so callers can see which defaults applied.
    pub async fn build<H: HostClient + ?Sized>(
        host: &H,
        interface: &ResolvedInterface,
        config: ResolvedEvolutionConfig,
        data: EvolutionData,
    ) -> ResolveResult<SpecEvolution> {
        let EvolutionData {
            mut tags,
            main_branch,
            release_branches,
            pull_requests,
        } = data;

        let main = match &main_branch {
            Some(branch) => Some(
                EvolutionBranchBuilder::build(
                    host,
                    &interface.spec_repo,
                    branch,
                    &mut tags,
                    &pull_requests,
                    &interface.spec_file_path,
                )
                .await?,
            ),
            None => None,
        };

        let mut releases: Vec<EvolutionBranch> = Vec::with_capacity(release_branches.len());
        for branch in &release_branches {
            releases.push(
                EvolutionBranchBuilder::build(
                    host,
                    &interface.spec_repo,
                    branch,
                    &mut tags,
                    &pull_requests,
                    &interface.spec_file_path,
                )
                .await?,
            );
        }

        Ok(SpecEvolution {
            interface_name: interface.interface_name.clone(),
            config_used: config,
            main,
            releases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryHost;
    use crate::model::{
        BranchRef, CatalogueId, CatalogueManifestId, Comparison, EvolutionItem, RepoId, Tag,
    };

    fn interface() -> ResolvedInterface {
        ResolvedInterface {
            catalogue_id: CatalogueId::new(
                CatalogueManifestId::new(RepoId::new("acme", "specs"), "catalog.yaml"),
                "payments",
            ),
            interface_name: "orders".to_string(),
            spec_repo: RepoId::new("acme", "specs"),
            spec_file_path: "orders.yaml".to_string(),
            evolution_config: None,
        }
    }

    fn config() -> ResolvedEvolutionConfig {
        ResolvedEvolutionConfig {
            main_branch_name: "main".to_string(),
            release_branch_prefix: Some("release/".to_string()),
            release_tag_prefix: None,
        }
    }

    fn branch(name: &str) -> BranchRef {
        BranchRef {
            name: name.to_string(),
            commit_sha: format!("{}-head", name),
            spec_content: None,
        }
    }

    fn tag(name: &str) -> Tag {
        Tag {
            name: name.to_string(),
            commit_sha: format!("{}-sha", name),
        }
    }

    #[tokio::test]
    async fn main_consumes_from_the_full_tag_pool_before_releases() {
        let mut host = InMemoryHost::new();
        let repo = RepoId::new("acme", "specs");
        // v1 is an ancestor of both main and release/1.0.
        host.seed_comparison(&repo, "main", "v1", Comparison { ahead_by: 0, behind_by: 3, total_commits: 3 });
        host.seed_comparison(&repo, "release/1.0", "v1", Comparison { ahead_by: 0, behind_by: 0, total_commits: 0 });

        let data = EvolutionData {
            tags: vec![tag("v1")],
            main_branch: Some(branch("main")),
            release_branches: vec![branch("release/1.0")],
            pull_requests: vec![],
        };

        let evolution = SpecEvolutionBuilder::build(&host, &interface(), config(), data)
            .await
            .unwrap();

        let main = evolution.main.unwrap();
        assert!(main
            .evolution_items
            .iter()
            .any(|item| matches!(item, EvolutionItem::Tag { tag, .. } if tag.name == "v1")));
        // The release branch no longer sees the consumed tag.
        assert_eq!(evolution.releases.len(), 1);
        assert!(evolution.releases[0]
            .evolution_items
            .iter()
            .all(|item| !item.is_tag()));
    }

    #[tokio::test]
    async fn missing_main_branch_yields_an_empty_main() {
        let host = InMemoryHost::new();
        let data = EvolutionData {
            tags: vec![],
            main_branch: None,
            release_branches: vec![],
            pull_requests: vec![],
        };

        let evolution = SpecEvolutionBuilder::build(&host, &interface(), config(), data)
            .await
            .unwrap();
        assert!(evolution.main.is_none());
        assert!(evolution.releases.is_empty());
        assert_eq!(evolution.interface_name, "orders");
        assert_eq!(evolution.config_used, config());
    }
}
