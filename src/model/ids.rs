use base64::engine::general_purpose::URL_SAFE as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::model::ResolveError;

/// `owner/name` pair identifying one repository on the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse an `owner/name` string. The name part must not itself contain
    /// a slash; repository names on the host never do.
    pub fn parse(full_name: &str) -> Result<Self, ResolveError> {
        match full_name.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(ResolveError::config(format!(
                "invalid repository name: '{}'",
                full_name
            ))),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Identifies one catalogue manifest file: a repository plus a path inside it.
///
/// The full path is derived once at construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueManifestId {
    repository: RepoId,
    path: String,
    full_path: String,
}

impl CatalogueManifestId {
    pub fn new(repository: RepoId, path: impl Into<String>) -> Self {
        let path = path.into();
        let full_path = format!("{}/{}", repository.full_name(), path);
        Self {
            repository,
            path,
            full_path,
        }
    }

    pub fn repository(&self) -> &RepoId {
        &self.repository
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }
}

/// Identifies one catalogue entry inside a manifest file.
///
/// The combined form `owner/name/<manifest-path>/<catalogue-name>` is the
/// opaque identifier shared with clients, transported base64-encoded. Both
/// the manifest path and the catalogue name may contain slashes; decoding
/// relies on the manifest file extension (`.yml` or `.yaml`) to find the
/// boundary between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueId {
    manifest: CatalogueManifestId,
    catalogue_name: String,
    combined: String,
}

const EXTENSION_MARKERS: [&str; 2] = [".yml/", ".yaml/"];

impl CatalogueId {
    pub fn new(manifest: CatalogueManifestId, catalogue_name: impl Into<String>) -> Self {
        let catalogue_name = catalogue_name.into();
        let combined = format!("{}/{}", manifest.full_path(), catalogue_name);
        Self {
            manifest,
            catalogue_name,
            combined,
        }
    }

    pub fn manifest(&self) -> &CatalogueManifestId {
        &self.manifest
    }

    pub fn catalogue_name(&self) -> &str {
        &self.catalogue_name
    }

    pub fn combined(&self) -> &str {
        &self.combined
    }

    /// Opaque form exchanged with API clients. URL-safe base64 so the id
    /// can travel as a single path segment.
    pub fn encode(&self) -> String {
        BASE64.encode(self.combined.as_bytes())
    }

    /// Decode the opaque client form back into a structured id.
    ///
    /// The combined string is split at the last `.yml/` or `.yaml/` marker:
    /// everything up to and including the extension is `owner/name/path`,
    /// the remainder is the catalogue name. Any malformed input is reported
    /// as not-found, matching how an id for a nonexistent catalogue behaves.
    pub fn decode(encoded: &str) -> Result<Self, ResolveError> {
        let not_found = || ResolveError::not_found(format!("invalid catalogue id: '{}'", encoded));

        let bytes = BASE64.decode(encoded.trim()).map_err(|_| not_found())?;
        let combined = String::from_utf8(bytes).map_err(|_| not_found())?;

        let marker_at = EXTENSION_MARKERS
            .iter()
            .filter_map(|marker| combined.rfind(marker).map(|at| at + marker.len() - 1))
            .max()
            .ok_or_else(not_found)?;

        let (repo_and_path, rest) = combined.split_at(marker_at);
        let catalogue_name = rest.trim_start_matches('/');
        if catalogue_name.is_empty() {
            return Err(not_found());
        }

        let mut segments = repo_and_path.splitn(3, '/');
        let (owner, name, path) = match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(name), Some(path))
                if !owner.is_empty() && !name.is_empty() && !path.is_empty() =>
            {
                (owner, name, path)
            }
            _ => return Err(not_found()),
        };

        let manifest = CatalogueManifestId::new(RepoId::new(owner, name), path);
        Ok(Self::new(manifest, catalogue_name))
    }
}

impl std::fmt::Display for CatalogueId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.combined)
    }
}
