//! Project access-policy constants.

/// Matches any repository or any destination server.
pub const WILDCARD: &str = "*";

/// Namespace used for freshly added destinations.
pub const DEFAULT_NAMESPACE: &str = "default";

/// The only validation message the policy editor reports.
pub const NAME_REQUIRED: &str = "Project name is required";

// ─── Field names (wire form, camelCase) ──────────────────────────────────

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_SOURCE_REPOS: &str = "sourceRepos";
pub const FIELD_DESTINATIONS: &str = "destinations";
pub const FIELD_CLUSTER_RESOURCE_ALLOWLIST: &str = "clusterResourceAllowlist";
pub const FIELD_CLUSTER_RESOURCE_BLOCKLIST: &str = "clusterResourceBlocklist";
pub const FIELD_NAMESPACE_RESOURCE_BLOCKLIST: &str = "namespaceResourceBlocklist";
pub const FIELD_NAMESPACE_RESOURCE_ALLOWLIST: &str = "namespaceResourceAllowlist";
pub const FIELD_SIGNATURE_KEYS: &str = "signatureKeys";
pub const FIELD_ORPHANED_RESOURCES_ENABLED: &str = "orphanedResourcesEnabled";
pub const FIELD_ORPHANED_RESOURCES_WARN: &str = "orphanedResourcesWarn";
pub const FIELD_ORPHANED_RESOURCE_IGNORE_LIST: &str = "orphanedResourceIgnoreList";
