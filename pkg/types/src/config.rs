use crate::cluster::Cluster;
use serde::{Deserialize, Serialize};

/// Catalog configuration file (YAML) backing the repository, cluster and
/// signature-key listers.
///
/// Example `catalog.yaml`:
/// ```yaml
/// repositories:
///   - https://github.com/example/apps.git
/// clusters:
///   - server: https://kubernetes.default.svc
///     name: in-cluster
/// signature-keys:
///   - 4AEE18F83AFDEB23
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfigFile {
    #[serde(default, alias = "repos")]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub clusters: Vec<Cluster>,
    #[serde(default, alias = "signature-keys", alias = "gpg-keys")]
    pub signature_keys: Vec<String>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}
