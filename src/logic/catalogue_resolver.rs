use log::debug;

use crate::host::HostClient;
use crate::model::{Catalogue, CatalogueId, ResolveError, ResolveResult, UserContext};
use crate::parser::ManifestParser;

/// A catalogue entry located inside its manifest, with the manifest's web
/// URL for UI deep-links and the id threaded through unchanged.
#[derive(Debug, Clone)]
pub struct ResolvedCatalogue {
    pub catalogue_id: CatalogueId,
    pub catalogue: Catalogue,
    pub manifest_url: String,
}

pub struct CatalogueEntryResolver;

impl CatalogueEntryResolver {
    /// Fetch the manifest file named by `catalogue_id`, scoped to the
    /// requesting user, and locate the catalogue entry inside it.
    ///
    /// An inaccessible repository and a missing file report the same
    /// not-found message. The requested entry is looked up before it is
    /// validated, so broken sibling entries in the same manifest do not
    /// block resolution. Failures are reported, never retried here.
    pub async fn resolve<H: HostClient + ?Sized>(
        host: &H,
        catalogue_id: &CatalogueId,
        user: &UserContext,
    ) -> ResolveResult<ResolvedCatalogue> {
        let manifest_id = catalogue_id.manifest();
        let manifest_not_found = || {
            ResolveError::not_found(format!(
                "manifest file not found: {}",
                manifest_id.full_path()
            ))
        };

        if !host.is_collaborator(manifest_id.repository(), user).await? {
            return Err(manifest_not_found());
        }

        let content = host
            .fetch_file_content(manifest_id.repository(), manifest_id.path(), None)
            .await?
            .ok_or_else(manifest_not_found)?;

        debug!(
            "parsing manifest {} for catalogue '{}'",
            manifest_id.full_path(),
            catalogue_id.catalogue_name()
        );

        let manifest = ManifestParser::parse(&content).map_err(|e| {
            ResolveError::config(format!("catalogue '{}': {}", catalogue_id.combined(), e))
        })?;

        let catalogue = manifest
            .catalogues
            .get(catalogue_id.catalogue_name())
            .cloned()
            .ok_or_else(|| {
                ResolveError::not_found(format!(
                    "catalogue entry not found: {}",
                    catalogue_id.combined()
                ))
            })?;

        ManifestParser::validate_catalogue(&catalogue, catalogue_id.catalogue_name()).map_err(
            |e| ResolveError::config(format!("catalogue '{}': {}", catalogue_id.combined(), e)),
        )?;

        Ok(ResolvedCatalogue {
            catalogue_id: catalogue_id.clone(),
            catalogue,
            manifest_url: content.html_url,
        })
    }
}
