use crate::host::HostClient;
use crate::model::{RepoId, ResolvedEvolutionConfig, ResolveResult, SpecEvolutionConfig};

/// Fallback main branch name when neither the manifest nor the host
/// provides one.
pub const DEFAULT_MAIN_BRANCH: &str = "main";

pub struct SpecEvolutionConfigResolver;

impl SpecEvolutionConfigResolver {
    /// Resolve a partially specified evolution config into a total one.
    ///
    /// The host is consulted for the spec repository's default branch only
    /// when the manifest does not name a main branch; a blank answer falls
    /// back to `"main"`. Absent prefixes stay absent: no release-branch
    /// prefix means release branches are not tracked, no tag prefix means
    /// every tag is a candidate.
    pub async fn resolve<H: HostClient + ?Sized>(
        host: &H,
        raw: Option<&SpecEvolutionConfig>,
        spec_repo: &RepoId,
    ) -> ResolveResult<ResolvedEvolutionConfig> {
        let configured_main = raw
            .and_then(|c| c.main_branch.as_ref())
            .and_then(|m| m.branch_name.as_deref())
            .filter(|name| !name.trim().is_empty());

        let main_branch_name = match configured_main {
            Some(name) => name.to_string(),
            None => host
                .get_default_branch(spec_repo)
                .await?
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MAIN_BRANCH.to_string()),
        };

        Ok(ResolvedEvolutionConfig {
            main_branch_name,
            release_branch_prefix: raw
                .and_then(|c| c.release_branches.as_ref())
                .and_then(|r| r.branch_prefix.clone()),
            release_tag_prefix: raw
                .and_then(|c| c.release_tags.as_ref())
                .and_then(|r| r.tag_prefix.clone()),
        })
    }
}
