use anyhow::Result;
use async_trait::async_trait;
use pkg_types::cluster::Cluster;
use pkg_types::config::CatalogConfigFile;

/// Lists repositories that applications may source manifests from.
#[async_trait]
pub trait RepositoryLister: Send + Sync {
    async fn list_repositories(&self) -> Result<Vec<String>>;
}

/// Lists clusters applications may be deployed to.
#[async_trait]
pub trait ClusterLister: Send + Sync {
    async fn list_clusters(&self) -> Result<Vec<Cluster>>;
}

/// Lists known GnuPG signature key IDs.
#[async_trait]
pub trait SignatureKeyLister: Send + Sync {
    async fn list_signature_keys(&self) -> Result<Vec<String>>;
}

/// Fixed listings, typically loaded from a catalog config file.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    repositories: Vec<String>,
    clusters: Vec<Cluster>,
    signature_keys: Vec<String>,
}

impl StaticCatalog {
    pub fn new(repositories: Vec<String>, clusters: Vec<Cluster>, signature_keys: Vec<String>) -> Self {
        Self {
            repositories,
            clusters,
            signature_keys,
        }
    }
}

impl From<CatalogConfigFile> for StaticCatalog {
    fn from(cfg: CatalogConfigFile) -> Self {
        Self::new(cfg.repositories, cfg.clusters, cfg.signature_keys)
    }
}

#[async_trait]
impl RepositoryLister for StaticCatalog {
    async fn list_repositories(&self) -> Result<Vec<String>> {
        Ok(self.repositories.clone())
    }
}

#[async_trait]
impl ClusterLister for StaticCatalog {
    async fn list_clusters(&self) -> Result<Vec<Cluster>> {
        Ok(self.clusters.clone())
    }
}

#[async_trait]
impl SignatureKeyLister for StaticCatalog {
    async fn list_signature_keys(&self) -> Result<Vec<String>> {
        Ok(self.signature_keys.clone())
    }
}
