use crate::error::EditError;
use pkg_constants::project::{FIELD_NAME, NAME_REQUIRED};
use pkg_types::project::{GroupKind, ProjectAccessPolicy};
use std::collections::BTreeMap;

/// Field name (wire form) → validation message.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Check a policy before submission.
///
/// The only rule is that the project must be named; every other field is
/// accepted as-is. Does not touch the policy and can be called any number
/// of times.
pub fn validate(policy: &ProjectAccessPolicy) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if policy.name.is_empty() {
        errors.insert(FIELD_NAME, NAME_REQUIRED.to_string());
    }
    errors
}

/// Pre-submit hook: trims group and kind on the cluster-scoped allow and
/// block lists.
///
/// Namespace-scoped lists are deliberately left untouched, as is every
/// other field.
pub fn normalize(mut policy: ProjectAccessPolicy) -> ProjectAccessPolicy {
    trim_group_kinds(&mut policy.cluster_resource_allowlist);
    trim_group_kinds(&mut policy.cluster_resource_blocklist);
    policy
}

fn trim_group_kinds(list: &mut [GroupKind]) {
    for gk in list.iter_mut() {
        *gk = gk.trimmed();
    }
}

/// New list with `entry` appended at the end.
pub fn append_entry<T: Clone>(list: &[T], entry: T) -> Vec<T> {
    let mut next = Vec::with_capacity(list.len() + 1);
    next.extend_from_slice(list);
    next.push(entry);
    next
}

/// New list without the element at `index`; the others keep their order.
pub fn remove_entry_at<T: Clone>(list: &[T], index: usize) -> Result<Vec<T>, EditError> {
    check_index(list, index)?;
    let mut next = list.to_vec();
    next.remove(index);
    Ok(next)
}

/// New list with the element at `index` replaced by `entry`.
pub fn update_entry_at<T: Clone>(list: &[T], index: usize, entry: T) -> Result<Vec<T>, EditError> {
    check_index(list, index)?;
    let mut next = list.to_vec();
    next[index] = entry;
    Ok(next)
}

fn check_index<T>(list: &[T], index: usize) -> Result<(), EditError> {
    if index >= list.len() {
        return Err(EditError::IndexOutOfBounds {
            index,
            len: list.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_constants::project::WILDCARD;
    use pkg_types::project::{
        Destination, OrphanedResourceKey, OrphanedResourcesMonitor, SignatureKey,
    };
    use proptest::prelude::*;

    fn padded_policy() -> ProjectAccessPolicy {
        ProjectAccessPolicy {
            name: "apps".to_string(),
            description: " team apps ".to_string(),
            source_repos: vec![" https://github.com/example/apps.git ".to_string()],
            destinations: vec![Destination::new(" * ", " default ")],
            cluster_resource_allowlist: vec![GroupKind::new(" apps ", " Deployment ")],
            cluster_resource_blocklist: vec![GroupKind::new("\trbac.authorization.k8s.io", "ClusterRole ")],
            namespace_resource_blocklist: vec![GroupKind::new(" ", " ResourceQuota ")],
            namespace_resource_allowlist: vec![GroupKind::new(" apps ", " StatefulSet")],
            signature_keys: vec![SignatureKey::new(" 4AEE18F83AFDEB23 ")],
            orphaned_resources: Some(OrphanedResourcesMonitor {
                warn: true,
                ignore: vec![OrphanedResourceKey::new(" ", " ConfigMap ", " kube-root-ca.crt ")],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let errors = validate(&ProjectAccessPolicy::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name").map(String::as_str), Some("Project name is required"));
    }

    #[test]
    fn named_policy_has_no_errors() {
        assert!(validate(&padded_policy()).is_empty());
        // Only emptiness is checked.
        assert!(validate(&ProjectAccessPolicy::named(" ")).is_empty());
    }

    #[test]
    fn validate_does_not_mutate() {
        let policy = padded_policy();
        let before = policy.clone();
        let _ = validate(&policy);
        let _ = validate(&policy);
        assert_eq!(policy, before);
    }

    #[test]
    fn normalize_trims_cluster_allowlist() {
        let mut policy = ProjectAccessPolicy::named("apps");
        policy.cluster_resource_allowlist = vec![GroupKind::new(" apps ", " Deployment ")];
        let normalized = normalize(policy);
        assert_eq!(
            normalized.cluster_resource_allowlist,
            vec![GroupKind::new("apps", "Deployment")]
        );
    }

    #[test]
    fn normalize_leaves_namespace_lists_alone() {
        let policy = padded_policy();
        let normalized = normalize(policy.clone());

        assert_eq!(
            normalized.cluster_resource_blocklist,
            vec![GroupKind::new("rbac.authorization.k8s.io", "ClusterRole")]
        );
        assert_eq!(normalized.namespace_resource_blocklist, policy.namespace_resource_blocklist);
        assert_eq!(normalized.namespace_resource_allowlist, policy.namespace_resource_allowlist);
        assert_eq!(normalized.source_repos, policy.source_repos);
        assert_eq!(normalized.destinations, policy.destinations);
        assert_eq!(normalized.signature_keys, policy.signature_keys);
        assert_eq!(normalized.orphaned_resources, policy.orphaned_resources);
        assert_eq!(normalized.description, policy.description);
    }

    #[test]
    fn append_then_remove_source_repo() {
        let repos: Vec<String> = vec![];
        let added = append_entry(&repos, WILDCARD.to_string());
        assert_eq!(added, vec!["*".to_string()]);
        let removed = remove_entry_at(&added, 0).unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn remove_out_of_bounds_fails() {
        let list = vec![1, 2, 3];
        match remove_entry_at(&list, 3) {
            Err(EditError::IndexOutOfBounds { index, len }) => {
                assert_eq!(index, 3);
                assert_eq!(len, 3);
            }
            other => panic!("expected IndexOutOfBounds, got {:?}", other),
        }
        assert!(remove_entry_at::<u8>(&[], 0).is_err());
    }

    #[test]
    fn update_replaces_single_entry() {
        let list = vec!["a".to_string(), "b".to_string()];
        let next = update_entry_at(&list, 1, "c".to_string()).unwrap();
        assert_eq!(next, vec!["a".to_string(), "c".to_string()]);
        assert_eq!(list, vec!["a".to_string(), "b".to_string()]);
        assert!(update_entry_at(&list, 2, "d".to_string()).is_err());
    }

    fn group_kind() -> impl Strategy<Value = GroupKind> {
        ("[ \\ta-z.]{0,10}", "[ \\tA-Za-z]{0,10}").prop_map(|(g, k)| GroupKind::new(g, k))
    }

    fn policy() -> impl Strategy<Value = ProjectAccessPolicy> {
        (
            "[ a-z-]{0,8}",
            prop::collection::vec("[ a-z*:/.]{0,12}", 0..4),
            prop::collection::vec(group_kind(), 0..4),
            prop::collection::vec(group_kind(), 0..4),
            prop::collection::vec(group_kind(), 0..4),
            prop::collection::vec(group_kind(), 0..4),
            any::<Option<bool>>(),
        )
            .prop_map(|(name, repos, ca, cb, nb, na, orphaned)| ProjectAccessPolicy {
                name,
                source_repos: repos,
                cluster_resource_allowlist: ca,
                cluster_resource_blocklist: cb,
                namespace_resource_blocklist: nb,
                namespace_resource_allowlist: na,
                orphaned_resources: orphaned.map(|warn| OrphanedResourcesMonitor {
                    warn,
                    ignore: vec![],
                }),
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn name_error_iff_empty(p in policy()) {
            let errors = validate(&p);
            prop_assert_eq!(errors.contains_key("name"), p.name.is_empty());
            prop_assert!(errors.len() <= 1);
        }

        #[test]
        fn normalize_is_idempotent(p in policy()) {
            let once = normalize(p);
            let twice = normalize(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalize_touches_only_cluster_lists(p in policy()) {
            let n = normalize(p.clone());
            prop_assert_eq!(&n.name, &p.name);
            prop_assert_eq!(&n.source_repos, &p.source_repos);
            prop_assert_eq!(&n.namespace_resource_blocklist, &p.namespace_resource_blocklist);
            prop_assert_eq!(&n.namespace_resource_allowlist, &p.namespace_resource_allowlist);
            prop_assert_eq!(&n.orphaned_resources, &p.orphaned_resources);
            prop_assert_eq!(n.cluster_resource_allowlist.len(), p.cluster_resource_allowlist.len());
            for (after, before) in n.cluster_resource_allowlist.iter().zip(&p.cluster_resource_allowlist) {
                prop_assert_eq!(after, &before.trimmed());
            }
            for (after, before) in n.cluster_resource_blocklist.iter().zip(&p.cluster_resource_blocklist) {
                prop_assert_eq!(after, &before.trimmed());
            }
        }

        #[test]
        fn append_remove_round_trip(list in prop::collection::vec(any::<u16>(), 0..16), entry in any::<u16>()) {
            let added = append_entry(&list, entry);
            prop_assert_eq!(added.len(), list.len() + 1);
            let removed = remove_entry_at(&added, list.len()).unwrap();
            prop_assert_eq!(removed, list);
        }

        #[test]
        fn remove_preserves_relative_order(list in prop::collection::vec(any::<u16>(), 1..16), seed in any::<prop::sample::Index>()) {
            let i = seed.index(list.len());
            let removed = remove_entry_at(&list, i).unwrap();
            prop_assert_eq!(removed.len(), list.len() - 1);
            let mut expected = list[..i].to_vec();
            expected.extend_from_slice(&list[i + 1..]);
            prop_assert_eq!(removed, expected);
        }
    }
}
