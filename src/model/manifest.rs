use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parsed shape of one catalogue manifest file.
///
/// Manifests are YAML documents with kebab-case keys:
///
/// ```yaml
/// catalogues:
///   payments:
///     title: Payment interfaces
///     interfaces:
///       orders:
///         spec-file:
///           file-path: orders.yaml
/// ```
///
/// The `catalogues` and `interfaces` sections are open-ended maps keyed by
/// name; iteration order is not observable anywhere downstream, so plain
/// unordered maps are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogueManifest {
    #[serde(default)]
    pub catalogues: HashMap<String, Catalogue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Catalogue {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<HashMap<String, Interface>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Interface {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_file: Option<SpecFileLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_evolution: Option<SpecEvolutionConfig>,
}

/// Where an interface's spec file lives. `repo` is optional in the manifest;
/// when absent the file is in the manifest's own repository. The defaulting
/// is applied by the interface resolver, exactly once, on a returned copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpecFileLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(default)]
    pub file_path: String,
}

/// User-supplied, partially specified evolution tracking configuration.
/// Fully resolved by the config resolver before any host query is issued.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpecEvolutionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_branch: Option<MainBranchConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_branches: Option<ReleaseBranchConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_tags: Option<ReleaseTagConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MainBranchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseBranchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseTagConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_prefix: Option<String>,
}

impl CatalogueManifest {
    /// Field-by-field validation of the whole document, aggregating every
    /// violation found rather than stopping at the first.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        if self.catalogues.is_empty() {
            violations.push("catalogues: must contain at least one entry".to_string());
        }
        for (name, catalogue) in &self.catalogues {
            catalogue.collect_violations(&format!("catalogues.{}", name), &mut violations);
        }
        violations
    }
}

impl Catalogue {
    /// Validate a single catalogue entry. Used on its own by the catalogue
    /// resolver so that broken sibling entries in the same manifest do not
    /// block resolution of the requested one.
    pub fn validate(&self, name: &str) -> Vec<String> {
        let mut violations = Vec::new();
        self.collect_violations(&format!("catalogues.{}", name), &mut violations);
        violations
    }

    fn collect_violations(&self, path: &str, violations: &mut Vec<String>) {
        if self.title.trim().is_empty() {
            violations.push(format!("{}.title: must not be empty", path));
        }
        if let Some(interfaces) = &self.interfaces {
            for (name, interface) in interfaces {
                let interface_path = format!("{}.interfaces.{}", path, name);
                if let Some(spec_file) = &interface.spec_file {
                    if spec_file.file_path.trim().is_empty() {
                        violations.push(format!(
                            "{}.spec-file.file-path: must not be empty",
                            interface_path
                        ));
                    }
                }
            }
        }
    }
}
