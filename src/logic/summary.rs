use crate::model::{EvolutionItem, SpecEvolution, SpecEvolutionSummary, SpecItem};

pub struct SpecEvolutionSummaryMapper;

impl SpecEvolutionSummaryMapper {
    /// Reduce a [`SpecEvolution`] to the scalar counts used by list views.
    ///
    /// Pure fold, no host access:
    /// the latest agreed spec item is the first main-branch item that is
    /// the branch head itself (not a tag); the agreed version count is the
    /// number of tag-carrying main-branch items; upcoming releases are the
    /// distinct release branches; proposed changes are the open-PR items
    /// across every branch.
    pub fn summarize(evolution: &SpecEvolution) -> SpecEvolutionSummary {
        let main_items: &[EvolutionItem] = evolution
            .main
            .as_ref()
            .map(|branch| branch.evolution_items.as_slice())
            .unwrap_or_default();

        let latest_agreed: Option<SpecItem> = main_items
            .iter()
            .find(|item| item.is_branch_head())
            .and_then(|item| item.spec_item().cloned());

        let agreed_version_tag_count = main_items.iter().filter(|item| item.is_tag()).count();

        let proposed_changes_count = main_items
            .iter()
            .chain(
                evolution
                    .releases
                    .iter()
                    .flat_map(|branch| branch.evolution_items.iter()),
            )
            .filter(|item| item.is_pull_request())
            .count();

        SpecEvolutionSummary {
            interface_name: evolution.interface_name.clone(),
            latest_agreed,
            upcoming_release_count: evolution.releases.len(),
            proposed_changes_count,
            agreed_version_tag_count,
        }
    }
}
