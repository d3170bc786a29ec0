use anyhow::{Result, bail};
use pkg_project::{ListEntry, PolicyList};
use pkg_types::project::{Destination, GroupKind, OrphanedResourceKey, SignatureKey};

/// Parse a list row given on the command line.
///
/// Multi-field rows are comma-separated: `server,namespace`, `group,kind`,
/// `group,kind,name`. An empty group (`,Namespace`) means the core API group.
pub fn parse_entry(list: PolicyList, value: &str) -> Result<ListEntry> {
    let fields: Vec<&str> = value.split(',').collect();
    let entry = match list {
        PolicyList::SourceRepos => ListEntry::SourceRepo(value.to_string()),
        PolicyList::SignatureKeys => ListEntry::SignatureKey(SignatureKey::new(value)),
        PolicyList::Destinations => match fields.as_slice() {
            [server, namespace] if !namespace.is_empty() => {
                ListEntry::Destination(Destination::new(*server, *namespace))
            }
            _ => bail!("destination must be 'server,namespace', got '{}'", value),
        },
        PolicyList::ClusterResourceAllowlist
        | PolicyList::ClusterResourceBlocklist
        | PolicyList::NamespaceResourceBlocklist
        | PolicyList::NamespaceResourceAllowlist => match fields.as_slice() {
            [group, kind] => ListEntry::GroupKind(GroupKind::new(*group, *kind)),
            _ => bail!("{} entry must be 'group,kind', got '{}'", list, value),
        },
        PolicyList::OrphanedResourceIgnoreList => match fields.as_slice() {
            [group, kind, name] => {
                ListEntry::OrphanedResource(OrphanedResourceKey::new(*group, *kind, *name))
            }
            _ => bail!("orphaned resource must be 'group,kind,name', got '{}'", value),
        },
    };
    Ok(entry)
}
