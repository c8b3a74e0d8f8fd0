use log::info;

use crate::host::HostClient;
use crate::logic::{
    CatalogueEntryResolver, InterfaceEntryResolver, ResolvedCatalogue, SpecEvolutionBuilder,
    SpecEvolutionConfigResolver, SpecEvolutionDataExtractor, SpecEvolutionSummaryMapper,
};
use crate::model::{
    CatalogueId, ResolveResult, SpecEvolution, SpecEvolutionSummary, UserContext,
};

/// End-to-end resolution: catalogue entry, interface entry, evolution
/// config, host data, evolution assembly. Every stage operates on values
/// passed to it; nothing is cached across calls.
pub struct SpecEvolutionPipeline;

impl SpecEvolutionPipeline {
    pub async fn resolve_catalogue<H: HostClient + ?Sized>(
        host: &H,
        catalogue_id: &CatalogueId,
        user: &UserContext,
    ) -> ResolveResult<ResolvedCatalogue> {
        CatalogueEntryResolver::resolve(host, catalogue_id, user).await
    }

    pub async fn resolve_evolution<H: HostClient + ?Sized>(
        host: &H,
        catalogue_id: &CatalogueId,
        interface_name: &str,
        user: &UserContext,
    ) -> ResolveResult<SpecEvolution> {
        let catalogue = CatalogueEntryResolver::resolve(host, catalogue_id, user).await?;
        let interface = InterfaceEntryResolver::resolve(&catalogue, interface_name)?;
        let config = SpecEvolutionConfigResolver::resolve(
            host,
            interface.evolution_config.as_ref(),
            &interface.spec_repo,
        )
        .await?;
        let data = SpecEvolutionDataExtractor::extract(
            host,
            &config,
            &interface.spec_repo,
            &interface.spec_file_path,
        )
        .await?;

        info!(
            "resolved evolution for interface '{}' in catalogue '{}' (main branch '{}')",
            interface_name,
            catalogue_id.combined(),
            config.main_branch_name
        );

        SpecEvolutionBuilder::build(host, &interface, config, data).await
    }

    pub async fn resolve_summary<H: HostClient + ?Sized>(
        host: &H,
        catalogue_id: &CatalogueId,
        interface_name: &str,
        user: &UserContext,
    ) -> ResolveResult<SpecEvolutionSummary> {
        let evolution = Self::resolve_evolution(host, catalogue_id, interface_name, user).await?;
        Ok(SpecEvolutionSummaryMapper::summarize(&evolution))
    }
}
