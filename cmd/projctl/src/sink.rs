use anyhow::Context;
use async_trait::async_trait;
use pkg_project::SubmitSink;
use pkg_types::project::ProjectAccessPolicy;
use std::path::PathBuf;
use tracing::info;

/// Writes the submitted policy to a YAML project file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SubmitSink for FileSink {
    async fn submit(&self, policy: ProjectAccessPolicy) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(&policy)?;
        // Write a sibling temp file and rename it into place.
        let tmp = self.path.with_extension("yaml.tmp");
        tokio::fs::write(&tmp, yaml)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;
        info!("Wrote project '{}' to {}", policy.name, self.path.display());
        Ok(())
    }
}

/// Prints the submitted policy instead of saving it (`--dry-run`).
pub struct StdoutSink;

#[async_trait]
impl SubmitSink for StdoutSink {
    async fn submit(&self, policy: ProjectAccessPolicy) -> anyhow::Result<()> {
        print!("{}", serde_yaml::to_string(&policy)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::config::load_config_file;
    use pkg_project::defaults::EntryDefaults;
    use pkg_project::{EditSession, PolicyEdit};
    use pkg_types::project::{GroupKind, OrphanedResourceKey, ProjectParams};

    #[tokio::test]
    async fn file_sink_writes_wire_form() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.yaml");
        let mut policy = ProjectAccessPolicy::named("apps");
        policy.cluster_resource_allowlist.push(GroupKind::new("", "Namespace"));

        FileSink::new(&path).submit(policy.clone()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("clusterResourceAllowlist"));
        let loaded: ProjectAccessPolicy = load_config_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, policy);
    }

    #[tokio::test]
    async fn file_sink_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("apps.yaml");
        let err = FileSink::new(&path)
            .submit(ProjectAccessPolicy::named("apps"))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("writing"));
    }

    #[tokio::test]
    async fn disabled_monitor_settings_kept_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.yaml");
        std::fs::write(
            &path,
            "name: apps\norphanedResourcesEnabled: false\norphanedResourcesWarn: true\norphanedResourceIgnoreList:\n  - kind: ConfigMap\n    name: kube-root-ca.crt\n",
        )
        .unwrap();

        let loaded: ProjectAccessPolicy = load_config_file(path.to_str().unwrap()).unwrap();
        let mut session = EditSession::for_existing(loaded, EntryDefaults::default());
        session
            .apply(PolicyEdit::SetDescription("team apps".into()))
            .unwrap();
        session.submit(&FileSink::new(&path)).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let params: ProjectParams = serde_yaml::from_str(&text).unwrap();
        assert_eq!(params.description, "team apps");
        assert!(!params.orphaned_resources_enabled);
        assert!(params.orphaned_resources_warn);
        assert_eq!(
            params.orphaned_resource_ignore_list,
            vec![OrphanedResourceKey::new("", "ConfigMap", "kube-root-ca.crt")]
        );
    }
}

