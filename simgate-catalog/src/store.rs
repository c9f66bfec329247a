//! Directory-backed simulation store with a best-effort minified cache.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::spec::{SimulationSpec, VersionEntry};

const SOURCE_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];
const CACHE_SUFFIX: &str = ".min.json";

type VersionMap = BTreeMap<String, VersionEntry>;

/// Catalog of simulation spec files under one directory.
///
/// `load` is an independent, idempotent read per call; nothing is shared
/// between requests, so a store can be used from any number of threads. The
/// only write is the optional minified JSON cache, regenerated whenever it is
/// missing or older than its source and never trusted over the source.
#[derive(Debug, Clone)]
pub struct SimulationStore {
    root: PathBuf,
    write_cache: bool,
}

impl SimulationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_cache: true,
        }
    }

    /// Disable or enable writing `<name>.min.json` caches.
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.write_cache = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load the full version map for `name`.
    pub fn load(&self, name: &str) -> Result<SimulationSpec, CatalogError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(CatalogError::MalformedName(name.to_string()));
        }

        let cache_path = self.root.join(format!("{}{}", name, CACHE_SUFFIX));
        let source_path = SOURCE_EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", name, ext)))
            .find(|p| p.exists());

        if cache_path.exists() {
            let fresh = match &source_path {
                Some(source) => cache_is_fresh(&cache_path, source),
                // A lone minified file is a valid backing definition.
                None => true,
            };
            if fresh {
                match read_versions(name, &cache_path) {
                    Ok(versions) => {
                        debug!(simulation = name, "loaded simulation from minified cache");
                        return Ok(SimulationSpec::new(name, versions));
                    }
                    // An unreadable cache with no source behind it is a
                    // configuration error; otherwise fall back to the source.
                    Err(err) if source_path.is_none() => return Err(err),
                    Err(_) => debug!(simulation = name, "minified cache unreadable, regenerating"),
                }
            }
        }

        let source = source_path.ok_or_else(|| CatalogError::SimulationNotFound(name.to_string()))?;
        let versions = read_versions(name, &source)?;
        debug!(simulation = name, path = %source.display(), "loaded simulation spec");

        if self.write_cache {
            self.write_minified(name, &cache_path, &versions);
        }
        Ok(SimulationSpec::new(name, versions))
    }

    /// Names of every simulation in the directory, sorted, cache files
    /// excluded.
    pub fn list(&self) -> Result<Vec<String>, CatalogError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name.ends_with(CACHE_SUFFIX) {
                continue;
            }
            let has_spec_ext = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
            if !has_spec_ext {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Best-effort cache write; failure is logged and swallowed.
    fn write_minified(&self, name: &str, cache_path: &Path, versions: &VersionMap) {
        let result = serde_json::to_string(versions)
            .map_err(|e| std::io::Error::other(e.to_string()))
            .and_then(|minified| fs::write(cache_path, minified));
        match result {
            Ok(()) => debug!(simulation = name, "wrote minified cache"),
            Err(err) => warn!(simulation = name, error = %err, "minified cache write failed"),
        }
    }
}

/// A cache newer than (or as new as) its source may be used in its place.
fn cache_is_fresh(cache: &Path, source: &Path) -> bool {
    let modified = |p: &Path| fs::metadata(p).and_then(|m| m.modified()).ok();
    match (modified(cache), modified(source)) {
        (Some(cache_mtime), Some(source_mtime)) => cache_mtime >= source_mtime,
        _ => false,
    }
}

fn read_versions(name: &str, path: &Path) -> Result<VersionMap, CatalogError> {
    let contents = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let parsed = if is_yaml {
        serde_yaml::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| CatalogError::MalformedConfig {
        name: name.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, contents: &str) {
        fs::write(dir.path().join(file), contents).unwrap();
    }

    const SPEC: &str = r#"{
        "latest": "stable",
        "stable": "1.0",
        "1.0": {
            "command": "echo",
            "parameters": [
                {"name": "arg", "type": "choice", "dtype": "str", "choices": ["hi", "bye"]}
            ]
        }
    }"#;

    #[test]
    fn loads_json_spec() {
        let dir = TempDir::new().unwrap();
        write(&dir, "test.json", SPEC);

        let spec = SimulationStore::new(dir.path()).load("test").unwrap();
        assert_eq!(spec.name(), "test");
        assert_eq!(spec.resolve_label(None).unwrap(), "1.0");
    }

    #[test]
    fn loads_yaml_spec() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "wave.yaml",
            "latest: \"1.0\"\n\"1.0\":\n  command: run\n  parameters: []\n",
        );

        let spec = SimulationStore::new(dir.path()).load("wave").unwrap();
        assert_eq!(spec.resolve_label(None).unwrap(), "1.0");
    }

    #[test]
    fn rejects_malformed_names() {
        let dir = TempDir::new().unwrap();
        let store = SimulationStore::new(dir.path());
        for name in ["../escape", "a/b", "a\\b", ""] {
            let err = store.load(name).unwrap_err();
            assert!(matches!(err, CatalogError::MalformedName(_)), "{name}");
            assert_eq!(err.status(), 400);
        }
    }

    #[test]
    fn missing_simulation_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = SimulationStore::new(dir.path()).load("ghost").unwrap_err();
        assert!(matches!(err, CatalogError::SimulationNotFound(_)));
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn unparsable_spec_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.json", "{not json");

        let err = SimulationStore::new(dir.path()).load("bad").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedConfig { .. }));
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn broken_parameter_spec_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "broken.json",
            r#"{"1.0": {"command": "x", "parameters": [
                {"name": "p", "type": "interval", "min": 10, "max": 0}
            ]}}"#,
        );

        let err = SimulationStore::new(dir.path()).load("broken").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedConfig { .. }));
    }

    #[test]
    fn load_writes_minified_cache() {
        let dir = TempDir::new().unwrap();
        write(&dir, "test.json", SPEC);

        SimulationStore::new(dir.path()).load("test").unwrap();

        let cached = fs::read_to_string(dir.path().join("test.min.json")).unwrap();
        assert!(cached.len() < SPEC.len());
        // The cache is itself loadable if the source goes away.
        fs::remove_file(dir.path().join("test.json")).unwrap();
        let spec = SimulationStore::new(dir.path()).load("test").unwrap();
        assert_eq!(spec.resolve_label(None).unwrap(), "1.0");
    }

    #[test]
    fn cache_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        write(&dir, "test.json", SPEC);

        SimulationStore::new(dir.path())
            .with_cache(false)
            .load("test")
            .unwrap();
        assert!(!dir.path().join("test.min.json").exists());
    }

    #[test]
    fn stale_cache_is_regenerated() {
        let dir = TempDir::new().unwrap();
        // Cache written before the source: must not shadow it.
        write(&dir, "test.min.json", r#"{"latest": "0.1", "0.1": {"command": "old"}}"#);
        std::thread::sleep(std::time::Duration::from_millis(20));
        write(&dir, "test.json", SPEC);

        let spec = SimulationStore::new(dir.path()).load("test").unwrap();
        assert_eq!(spec.resolve_label(None).unwrap(), "1.0");
    }

    #[test]
    fn listing_skips_cache_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.json", "{}");
        write(&dir, "a.yaml", "{}");
        write(&dir, "b.min.json", "{}");
        write(&dir, "notes.txt", "ignore me");

        let names = SimulationStore::new(dir.path()).list().unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }
}
