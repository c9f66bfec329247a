//! Simulation specification model and version alias resolution.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use simgate_params::ParameterSpec;

use crate::error::CatalogError;

/// Version label used when a request names no version.
pub const DEFAULT_VERSION: &str = "latest";

/// Backstop on alias-chain length; the visited set catches every true cycle,
/// this bounds pathological (non-cyclic) chains.
const MAX_ALIAS_HOPS: usize = 32;

/// One entry in a simulation's version map: either a pointer to another
/// label or a concrete definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionEntry {
    Alias(String),
    Definition(Definition),
}

/// A concrete, runnable template for one simulation version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    pub command: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<u32>,

    /// Older spec files use `properties` for the parameter list.
    #[serde(default, alias = "properties")]
    pub parameters: Vec<ParameterSpec>,
}

/// A named simulation and its full version map, as loaded from the backing
/// store. Read-only once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSpec {
    name: String,
    versions: BTreeMap<String, VersionEntry>,
}

/// A definition annotated with the simulation name and the concrete version
/// label it resolved to.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSimulation {
    pub name: String,
    pub version: String,
    #[serde(flatten)]
    pub definition: Definition,
}

impl SimulationSpec {
    pub fn new(name: impl Into<String>, versions: BTreeMap<String, VersionEntry>) -> Self {
        Self {
            name: name.into(),
            versions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All version labels, sorted.
    pub fn versions(&self) -> Vec<&str> {
        self.versions.keys().map(String::as_str).collect()
    }

    pub fn entry(&self, label: &str) -> Option<&VersionEntry> {
        self.versions.get(label)
    }

    /// Resolve a requested label (or the `latest` default) to the label of a
    /// concrete definition, following alias chains.
    ///
    /// An unknown starting label is the caller's mistake; a cycle or an alias
    /// pointing at a missing label is broken server configuration.
    pub fn resolve_label<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, CatalogError> {
        self.resolve_entry(requested).map(|(label, _)| label)
    }

    fn resolve_entry<'a>(
        &'a self,
        requested: Option<&'a str>,
    ) -> Result<(&'a str, &'a Definition), CatalogError> {
        let start = match requested {
            Some(label) if !label.is_empty() => label,
            _ => DEFAULT_VERSION,
        };

        let (mut label, mut entry) =
            self.versions
                .get_key_value(start)
                .ok_or_else(|| CatalogError::VersionNotFound {
                    name: self.name.clone(),
                    version: start.to_string(),
                })?;

        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(label);

        loop {
            match entry {
                VersionEntry::Definition(definition) => return Ok((label, definition)),
                VersionEntry::Alias(next) => {
                    if !visited.insert(next.as_str()) {
                        return Err(CatalogError::CircularAlias {
                            name: self.name.clone(),
                            label: next.clone(),
                        });
                    }
                    if visited.len() > MAX_ALIAS_HOPS {
                        return Err(CatalogError::MalformedConfig {
                            name: self.name.clone(),
                            reason: format!("alias chain longer than {} hops", MAX_ALIAS_HOPS),
                        });
                    }
                    (label, entry) = self
                        .versions
                        .get_key_value(next.as_str())
                        .ok_or_else(|| CatalogError::DanglingAlias {
                            name: self.name.clone(),
                            label: next.clone(),
                        })?;
                }
            }
        }
    }

    /// Resolution plus definition lookup, annotated for the caller.
    pub fn resolve(&self, requested: Option<&str>) -> Result<ResolvedSimulation, CatalogError> {
        let (label, definition) = self.resolve_entry(requested)?;
        Ok(ResolvedSimulation {
            name: self.name.clone(),
            version: label.to_string(),
            definition: definition.clone(),
        })
    }
}
