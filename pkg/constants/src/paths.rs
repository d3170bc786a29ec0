//! Filesystem path constants.

// ─── projctl ──────────────────────────────────────────────────────────────

/// Default catalog file (known repositories, clusters, signature keys).
pub const DEFAULT_CATALOG_CONFIG: &str = "/etc/projctl/catalog.yaml";

/// Environment variable that overrides the catalog file location.
pub const CATALOG_CONFIG_ENV: &str = "PROJCTL_CATALOG";
