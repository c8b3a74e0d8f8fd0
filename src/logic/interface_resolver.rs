use crate::logic::ResolvedCatalogue;
use crate::model::{
    CatalogueId, RepoId, ResolveError, ResolveResult, SpecEvolutionConfig,
};

/// An interface entry with its spec file location fully resolved. This is
/// a new value derived from the parsed manifest, never a mutated view of
/// it, so one manifest can be resolved for several interfaces without
/// cross-contamination.
#[derive(Debug, Clone)]
pub struct ResolvedInterface {
    pub catalogue_id: CatalogueId,
    pub interface_name: String,
    /// Repository holding the spec file. Defaulted to the manifest's own
    /// repository when the entry does not name one; always set here.
    pub spec_repo: RepoId,
    pub spec_file_path: String,
    pub evolution_config: Option<SpecEvolutionConfig>,
}

pub struct InterfaceEntryResolver;

impl InterfaceEntryResolver {
    /// Locate `interface_name` inside a resolved catalogue entry and apply
    /// the spec-file-repository defaulting rule, exactly once.
    pub fn resolve(
        catalogue: &ResolvedCatalogue,
        interface_name: &str,
    ) -> ResolveResult<ResolvedInterface> {
        let interface = catalogue
            .catalogue
            .interfaces
            .as_ref()
            .and_then(|interfaces| interfaces.get(interface_name))
            .ok_or_else(|| {
                ResolveError::not_found(format!(
                    "interface entry not found: {}/{}",
                    catalogue.catalogue_id.combined(),
                    interface_name
                ))
            })?;

        let spec_file = interface.spec_file.as_ref().ok_or_else(|| {
            ResolveError::config(format!(
                "no spec file location set for interface '{}' in catalogue '{}'",
                interface_name,
                catalogue.catalogue_id.combined()
            ))
        })?;

        let spec_repo = match &spec_file.repo {
            Some(full_name) => RepoId::parse(full_name)?,
            None => catalogue.catalogue_id.manifest().repository().clone(),
        };

        Ok(ResolvedInterface {
            catalogue_id: catalogue.catalogue_id.clone(),
            interface_name: interface_name.to_string(),
            spec_repo,
            spec_file_path: spec_file.file_path.clone(),
            evolution_config: interface.spec_evolution.clone(),
        })
    }
}
