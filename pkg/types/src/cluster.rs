use serde::{Deserialize, Serialize};

/// A deployment target as reported by the cluster lister.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// API server URL, used as the destination server identifier.
    pub server: String,
    #[serde(default)]
    pub name: String,
}

impl Cluster {
    pub fn new(server: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            name: name.into(),
        }
    }
}

/// Display title for a cluster: `name (server)`, or just the server when the
/// cluster has no distinct name.
pub fn cluster_title(cluster: &Cluster) -> String {
    if cluster.name.is_empty() || cluster.name == cluster.server {
        cluster.server.clone()
    } else {
        format!("{} ({})", cluster.name, cluster.server)
    }
}
