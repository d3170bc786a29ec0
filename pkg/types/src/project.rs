use pkg_constants::project::DEFAULT_NAMESPACE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- List entries ---

/// Kubernetes API group and kind identifying a class of objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupKind {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub kind: String,
}

impl GroupKind {
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }

    /// Copy with surrounding whitespace removed from group and kind.
    pub fn trimmed(&self) -> Self {
        Self {
            group: self.group.trim().to_string(),
            kind: self.kind.trim().to_string(),
        }
    }
}

/// Cluster and namespace an application may be deployed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Cluster server identifier, or `*` for any cluster.
    pub server: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Destination {
    pub fn new(server: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            namespace: namespace.into(),
        }
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// GnuPG key ID that commits must be signed with before they are synced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureKey {
    #[serde(rename = "keyID")]
    pub key_id: String,
}

impl SignatureKey {
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
        }
    }
}

/// Resource that must not be reported as orphaned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanedResourceKey {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

impl OrphanedResourceKey {
    pub fn new(
        group: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// Orphaned-resource monitoring settings. Only exists while monitoring is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanedResourcesMonitor {
    pub warn: bool,
    pub ignore: Vec<OrphanedResourceKey>,
}

/// Project fields the access-policy editor carries but never edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Passthrough {
    pub roles: Vec<Value>,
    pub sync_windows: Vec<Value>,
    /// Monitor settings saved while monitoring is switched off. Restored
    /// when monitoring is re-enabled and written back unchanged otherwise.
    pub disabled_orphaned: OrphanedResourcesMonitor,
}

// --- Policy ---

/// Editable access-control configuration of one project.
///
/// Serializes in the flat wire form ([`ProjectParams`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProjectParams", into = "ProjectParams")]
pub struct ProjectAccessPolicy {
    pub name: String,
    pub description: String,
    /// Repository URLs (or `*`) manifests may be fetched from, in display order.
    pub source_repos: Vec<String>,
    pub destinations: Vec<Destination>,
    pub cluster_resource_allowlist: Vec<GroupKind>,
    pub cluster_resource_blocklist: Vec<GroupKind>,
    pub namespace_resource_blocklist: Vec<GroupKind>,
    pub namespace_resource_allowlist: Vec<GroupKind>,
    pub signature_keys: Vec<SignatureKey>,
    /// `None` means orphaned-resource monitoring is disabled.
    pub orphaned_resources: Option<OrphanedResourcesMonitor>,
    pub passthrough: Passthrough,
}

impl ProjectAccessPolicy {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn orphaned_resources_enabled(&self) -> bool {
        self.orphaned_resources.is_some()
    }
}

// --- Wire form ---

/// Flat project parameters as exchanged with the project API and stored in
/// project files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_repos: Vec<String>,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub roles: Vec<Value>,
    #[serde(default)]
    pub sync_windows: Vec<Value>,
    #[serde(default)]
    pub cluster_resource_allowlist: Vec<GroupKind>,
    #[serde(default)]
    pub cluster_resource_blocklist: Vec<GroupKind>,
    #[serde(default)]
    pub namespace_resource_blocklist: Vec<GroupKind>,
    #[serde(default)]
    pub namespace_resource_allowlist: Vec<GroupKind>,
    #[serde(default)]
    pub signature_keys: Vec<SignatureKey>,
    #[serde(default)]
    pub orphaned_resources_enabled: bool,
    #[serde(default)]
    pub orphaned_resources_warn: bool,
    #[serde(default)]
    pub orphaned_resource_ignore_list: Vec<OrphanedResourceKey>,
}

impl From<ProjectParams> for ProjectAccessPolicy {
    fn from(p: ProjectParams) -> Self {
        let monitor = OrphanedResourcesMonitor {
            warn: p.orphaned_resources_warn,
            ignore: p.orphaned_resource_ignore_list,
        };
        let (orphaned_resources, disabled_orphaned) = if p.orphaned_resources_enabled {
            (Some(monitor), OrphanedResourcesMonitor::default())
        } else {
            (None, monitor)
        };
        Self {
            name: p.name,
            description: p.description,
            source_repos: p.source_repos,
            destinations: p.destinations,
            cluster_resource_allowlist: p.cluster_resource_allowlist,
            cluster_resource_blocklist: p.cluster_resource_blocklist,
            namespace_resource_blocklist: p.namespace_resource_blocklist,
            namespace_resource_allowlist: p.namespace_resource_allowlist,
            signature_keys: p.signature_keys,
            orphaned_resources,
            passthrough: Passthrough {
                roles: p.roles,
                sync_windows: p.sync_windows,
                disabled_orphaned,
            },
        }
    }
}

impl From<ProjectAccessPolicy> for ProjectParams {
    fn from(p: ProjectAccessPolicy) -> Self {
        let enabled = p.orphaned_resources.is_some();
        let monitor = p
            .orphaned_resources
            .unwrap_or(p.passthrough.disabled_orphaned);
        Self {
            name: p.name,
            description: p.description,
            source_repos: p.source_repos,
            destinations: p.destinations,
            roles: p.passthrough.roles,
            sync_windows: p.passthrough.sync_windows,
            cluster_resource_allowlist: p.cluster_resource_allowlist,
            cluster_resource_blocklist: p.cluster_resource_blocklist,
            namespace_resource_blocklist: p.namespace_resource_blocklist,
            namespace_resource_allowlist: p.namespace_resource_allowlist,
            signature_keys: p.signature_keys,
            orphaned_resources_enabled: enabled,
            orphaned_resources_warn: monitor.warn,
            orphaned_resource_ignore_list: monitor.ignore,
        }
    }
}
