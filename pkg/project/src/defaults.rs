use crate::catalog::{ClusterLister, RepositoryLister, SignatureKeyLister};
use crate::edit::{ListEntry, PolicyList};
use anyhow::Result;
use pkg_constants::project::{DEFAULT_NAMESPACE, WILDCARD};
use pkg_types::cluster::{Cluster, cluster_title};
use pkg_types::project::{Destination, GroupKind, OrphanedResourceKey, SignatureKey};
use serde::Serialize;
use tracing::debug;

/// A selectable destination server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterOption {
    pub value: String,
    pub title: String,
}

/// Repository choices offered for a source row: the listed repositories
/// followed by the `*` wildcard.
pub fn repository_options(repositories: &[String]) -> Vec<String> {
    let mut options = repositories.to_vec();
    options.push(WILDCARD.to_string());
    options
}

/// Server choices offered for a destination row, ending with `*`.
pub fn cluster_options(clusters: &[Cluster]) -> Vec<ClusterOption> {
    clusters
        .iter()
        .map(|c| ClusterOption {
            value: c.server.clone(),
            title: cluster_title(c),
        })
        .chain(std::iter::once(ClusterOption {
            value: WILDCARD.to_string(),
            title: WILDCARD.to_string(),
        }))
        .collect()
}

/// Entry appended when the user adds a row to each list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDefaults {
    pub source_repo: String,
    pub destination: Destination,
    pub signature_key: SignatureKey,
}

impl Default for EntryDefaults {
    fn default() -> Self {
        Self::from_listings(&[], &[], &[])
    }
}

impl EntryDefaults {
    pub fn from_listings(repositories: &[String], clusters: &[Cluster], signature_keys: &[String]) -> Self {
        let source_repo = repository_options(repositories)
            .into_iter()
            .next()
            .unwrap_or_else(|| WILDCARD.to_string());
        let server = clusters
            .first()
            .map(|c| c.server.clone())
            .unwrap_or_else(|| WILDCARD.to_string());
        let signature_key = signature_keys.first().cloned().unwrap_or_default();
        Self {
            source_repo,
            destination: Destination::new(server, DEFAULT_NAMESPACE),
            signature_key: SignatureKey::new(signature_key),
        }
    }

    /// Query the listers once at session start.
    pub async fn load(
        repos: &dyn RepositoryLister,
        clusters: &dyn ClusterLister,
        keys: &dyn SignatureKeyLister,
    ) -> Result<Self> {
        let repositories = repos.list_repositories().await?;
        let clusters = clusters.list_clusters().await?;
        let signature_keys = keys.list_signature_keys().await?;
        debug!(
            "Entry defaults from {} repos, {} clusters, {} signature keys",
            repositories.len(),
            clusters.len(),
            signature_keys.len()
        );
        Ok(Self::from_listings(&repositories, &clusters, &signature_keys))
    }

    pub fn entry_for(&self, list: PolicyList) -> ListEntry {
        match list {
            PolicyList::SourceRepos => ListEntry::SourceRepo(self.source_repo.clone()),
            PolicyList::Destinations => ListEntry::Destination(self.destination.clone()),
            PolicyList::ClusterResourceAllowlist
            | PolicyList::ClusterResourceBlocklist
            | PolicyList::NamespaceResourceBlocklist
            | PolicyList::NamespaceResourceAllowlist => ListEntry::GroupKind(GroupKind::default()),
            PolicyList::SignatureKeys => ListEntry::SignatureKey(self.signature_key.clone()),
            PolicyList::OrphanedResourceIgnoreList => {
                ListEntry::OrphanedResource(OrphanedResourceKey::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;

    #[test]
    fn empty_listings_fall_back_to_wildcards() {
        let d = EntryDefaults::default();
        assert_eq!(d.source_repo, "*");
        assert_eq!(d.destination, Destination::new("*", "default"));
        assert_eq!(d.signature_key, SignatureKey::new(""));
    }

    #[test]
    fn options_end_with_wildcard() {
        let repos = vec!["https://github.com/example/apps.git".to_string()];
        assert_eq!(repository_options(&repos), vec!["https://github.com/example/apps.git", "*"]);

        let options = cluster_options(&[Cluster::new("https://10.0.0.1:6443", "prod")]);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].title, "prod (https://10.0.0.1:6443)");
        assert_eq!(options[1], ClusterOption { value: "*".into(), title: "*".into() });
    }

    #[tokio::test]
    async fn load_takes_first_of_each_listing() {
        let catalog = StaticCatalog::new(
            vec!["https://a.example/repo.git".into(), "https://b.example/repo.git".into()],
            vec![Cluster::new("https://c1:6443", "c1"), Cluster::new("https://c2:6443", "c2")],
            vec!["AAAA".into(), "BBBB".into()],
        );
        let d = EntryDefaults::load(&catalog, &catalog, &catalog).await.unwrap();
        assert_eq!(d.source_repo, "https://a.example/repo.git");
        assert_eq!(d.destination, Destination::new("https://c1:6443", "default"));
        assert_eq!(d.signature_key, SignatureKey::new("AAAA"));
        assert_eq!(
            d.entry_for(PolicyList::OrphanedResourceIgnoreList),
            ListEntry::OrphanedResource(OrphanedResourceKey::new("", "", ""))
        );
    }
}
