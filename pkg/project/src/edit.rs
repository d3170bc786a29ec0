use crate::defaults::EntryDefaults;
use crate::error::EditError;
use crate::ops::{append_entry, remove_entry_at, update_entry_at};
use pkg_constants::project::*;
use pkg_types::project::{
    Destination, GroupKind, OrphanedResourceKey, ProjectAccessPolicy, SignatureKey,
};
use std::fmt;
use std::str::FromStr;

/// The editable ordered lists of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyList {
    SourceRepos,
    Destinations,
    ClusterResourceAllowlist,
    ClusterResourceBlocklist,
    NamespaceResourceBlocklist,
    NamespaceResourceAllowlist,
    SignatureKeys,
    OrphanedResourceIgnoreList,
}

impl PolicyList {
    pub const ALL: [PolicyList; 8] = [
        PolicyList::SourceRepos,
        PolicyList::Destinations,
        PolicyList::ClusterResourceAllowlist,
        PolicyList::ClusterResourceBlocklist,
        PolicyList::NamespaceResourceBlocklist,
        PolicyList::NamespaceResourceAllowlist,
        PolicyList::SignatureKeys,
        PolicyList::OrphanedResourceIgnoreList,
    ];

    /// Wire-form field name.
    pub fn field_name(self) -> &'static str {
        match self {
            PolicyList::SourceRepos => FIELD_SOURCE_REPOS,
            PolicyList::Destinations => FIELD_DESTINATIONS,
            PolicyList::ClusterResourceAllowlist => FIELD_CLUSTER_RESOURCE_ALLOWLIST,
            PolicyList::ClusterResourceBlocklist => FIELD_CLUSTER_RESOURCE_BLOCKLIST,
            PolicyList::NamespaceResourceBlocklist => FIELD_NAMESPACE_RESOURCE_BLOCKLIST,
            PolicyList::NamespaceResourceAllowlist => FIELD_NAMESPACE_RESOURCE_ALLOWLIST,
            PolicyList::SignatureKeys => FIELD_SIGNATURE_KEYS,
            PolicyList::OrphanedResourceIgnoreList => FIELD_ORPHANED_RESOURCE_IGNORE_LIST,
        }
    }

    /// Number of entries the list currently holds in `policy`.
    pub fn len(self, policy: &ProjectAccessPolicy) -> usize {
        match self {
            PolicyList::SourceRepos => policy.source_repos.len(),
            PolicyList::Destinations => policy.destinations.len(),
            PolicyList::ClusterResourceAllowlist => policy.cluster_resource_allowlist.len(),
            PolicyList::ClusterResourceBlocklist => policy.cluster_resource_blocklist.len(),
            PolicyList::NamespaceResourceBlocklist => policy.namespace_resource_blocklist.len(),
            PolicyList::NamespaceResourceAllowlist => policy.namespace_resource_allowlist.len(),
            PolicyList::SignatureKeys => policy.signature_keys.len(),
            PolicyList::OrphanedResourceIgnoreList => policy
                .orphaned_resources
                .as_ref()
                .map_or(0, |m| m.ignore.len()),
        }
    }
}

impl fmt::Display for PolicyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for PolicyList {
    type Err = EditError;

    /// Accepts the wire name (`sourceRepos`) or its kebab-case form (`source-repos`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        PolicyList::ALL
            .into_iter()
            .find(|l| l.field_name().to_ascii_lowercase() == folded)
            .ok_or_else(|| EditError::UnknownList(s.to_string()))
    }
}

/// One row of any policy list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    SourceRepo(String),
    Destination(Destination),
    GroupKind(GroupKind),
    SignatureKey(SignatureKey),
    OrphanedResource(OrphanedResourceKey),
}

impl ListEntry {
    pub fn kind(&self) -> &'static str {
        match self {
            ListEntry::SourceRepo(_) => "source repository",
            ListEntry::Destination(_) => "destination",
            ListEntry::GroupKind(_) => "group/kind",
            ListEntry::SignatureKey(_) => "signature key",
            ListEntry::OrphanedResource(_) => "orphaned resource",
        }
    }

    fn into_source_repo(self) -> Option<String> {
        match self {
            ListEntry::SourceRepo(r) => Some(r),
            _ => None,
        }
    }

    fn into_destination(self) -> Option<Destination> {
        match self {
            ListEntry::Destination(d) => Some(d),
            _ => None,
        }
    }

    fn into_group_kind(self) -> Option<GroupKind> {
        match self {
            ListEntry::GroupKind(gk) => Some(gk),
            _ => None,
        }
    }

    fn into_signature_key(self) -> Option<SignatureKey> {
        match self {
            ListEntry::SignatureKey(k) => Some(k),
            _ => None,
        }
    }

    fn into_orphaned_resource(self) -> Option<OrphanedResourceKey> {
        match self {
            ListEntry::OrphanedResource(o) => Some(o),
            _ => None,
        }
    }
}

/// A single user action against a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyEdit {
    SetName(String),
    SetDescription(String),
    /// Append the list's default entry.
    Append(PolicyList),
    /// Append a specific entry.
    AppendEntry(PolicyList, ListEntry),
    Remove(PolicyList, usize),
    Update(PolicyList, usize, ListEntry),
    SetOrphanedResourcesEnabled(bool),
    SetOrphanedResourcesWarn(bool),
}

enum ListOp {
    Append(ListEntry),
    Remove(usize),
    Update(usize, ListEntry),
}

/// Apply `edit` to `policy`, returning the updated copy. On error the input
/// is untouched.
pub fn apply_edit(
    policy: &ProjectAccessPolicy,
    edit: PolicyEdit,
    defaults: &EntryDefaults,
) -> Result<ProjectAccessPolicy, EditError> {
    let mut next = policy.clone();
    match edit {
        PolicyEdit::SetName(name) => next.name = name,
        PolicyEdit::SetDescription(description) => next.description = description,
        PolicyEdit::Append(list) => {
            let entry = defaults.entry_for(list);
            edit_list(&mut next, list, ListOp::Append(entry))?;
        }
        PolicyEdit::AppendEntry(list, entry) => edit_list(&mut next, list, ListOp::Append(entry))?,
        PolicyEdit::Remove(list, index) => edit_list(&mut next, list, ListOp::Remove(index))?,
        PolicyEdit::Update(list, index, entry) => {
            edit_list(&mut next, list, ListOp::Update(index, entry))?
        }
        PolicyEdit::SetOrphanedResourcesEnabled(enabled) => {
            // Switching off keeps the settings so switching back on restores them.
            let stash = &mut next.passthrough.disabled_orphaned;
            match (enabled, next.orphaned_resources.take()) {
                (true, Some(monitor)) => next.orphaned_resources = Some(monitor),
                (true, None) => next.orphaned_resources = Some(std::mem::take(stash)),
                (false, Some(monitor)) => *stash = monitor,
                (false, None) => {}
            }
        }
        PolicyEdit::SetOrphanedResourcesWarn(warn) => {
            next.orphaned_resources
                .as_mut()
                .ok_or(EditError::OrphanedMonitoringDisabled)?
                .warn = warn;
        }
    }
    Ok(next)
}

fn edit_list(
    policy: &mut ProjectAccessPolicy,
    list: PolicyList,
    op: ListOp,
) -> Result<(), EditError> {
    match list {
        PolicyList::SourceRepos => {
            policy.source_repos = run(&policy.source_repos, list, op, ListEntry::into_source_repo)?
        }
        PolicyList::Destinations => {
            policy.destinations = run(&policy.destinations, list, op, ListEntry::into_destination)?
        }
        PolicyList::ClusterResourceAllowlist => {
            policy.cluster_resource_allowlist = run(
                &policy.cluster_resource_allowlist,
                list,
                op,
                ListEntry::into_group_kind,
            )?
        }
        PolicyList::ClusterResourceBlocklist => {
            policy.cluster_resource_blocklist = run(
                &policy.cluster_resource_blocklist,
                list,
                op,
                ListEntry::into_group_kind,
            )?
        }
        PolicyList::NamespaceResourceBlocklist => {
            policy.namespace_resource_blocklist = run(
                &policy.namespace_resource_blocklist,
                list,
                op,
                ListEntry::into_group_kind,
            )?
        }
        PolicyList::NamespaceResourceAllowlist => {
            policy.namespace_resource_allowlist = run(
                &policy.namespace_resource_allowlist,
                list,
                op,
                ListEntry::into_group_kind,
            )?
        }
        PolicyList::SignatureKeys => {
            policy.signature_keys =
                run(&policy.signature_keys, list, op, ListEntry::into_signature_key)?
        }
        PolicyList::OrphanedResourceIgnoreList => {
            let monitor = policy
                .orphaned_resources
                .as_mut()
                .ok_or(EditError::OrphanedMonitoringDisabled)?;
            monitor.ignore = run(&monitor.ignore, list, op, ListEntry::into_orphaned_resource)?;
        }
    }
    Ok(())
}

fn run<T: Clone>(
    items: &[T],
    list: PolicyList,
    op: ListOp,
    unwrap: fn(ListEntry) -> Option<T>,
) -> Result<Vec<T>, EditError> {
    let typed = |entry: ListEntry| {
        let kind = entry.kind();
        unwrap(entry).ok_or(EditError::EntryMismatch { list, entry: kind })
    };
    match op {
        ListOp::Append(entry) => Ok(append_entry(items, typed(entry)?)),
        ListOp::Remove(index) => remove_entry_at(items, index),
        ListOp::Update(index, entry) => update_entry_at(items, index, typed(entry)?),
    }
}
