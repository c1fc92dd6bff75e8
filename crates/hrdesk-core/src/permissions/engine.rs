//! Permission queries and mutations shared by the role and user editors.
//!
//! All functions are pure: they read their inputs and return new values.
//! Scopes are independent grants; `all` does not imply `team` or `self`.

use tracing::trace;

use super::scope::PermissionScope;
use super::set::PermissionSet;
use super::token::PermissionToken;

/// Whether `permissions` grants `module:action` at `scope`.
///
/// The super-user flag and the `*:*:*` token each grant everything. Unknown
/// modules and actions are simply not granted.
pub fn has_permission(
    module: &str,
    action: &str,
    scope: PermissionScope,
    is_super_user: bool,
    permissions: &PermissionSet,
) -> bool {
    if is_super_user || permissions.is_super_user() {
        return true;
    }

    permissions.contains(&PermissionToken::encode(module, action, scope))
}

/// Adds the token for `module:action` at `scope` when absent, removes it when
/// present. Super-user permissions are not editable and come back unchanged.
pub fn toggle_permission(
    module: &str,
    action: &str,
    scope: PermissionScope,
    is_super_user: bool,
    permissions: &PermissionSet,
) -> PermissionSet {
    if is_super_user {
        return permissions.clone();
    }

    let token = PermissionToken::encode(module, action, scope);
    let mut next = permissions.clone();
    if !next.remove(&token) {
        next.insert(token.clone());
        trace!(token = %token, "Permission granted");
    } else {
        trace!(token = %token, "Permission revoked");
    }
    next
}

/// Layers a role's grants over a user's own set without losing any of the
/// user's tokens. Deselecting the role (`None`) returns the original set.
///
/// Returns the merged set and whether it makes the user a super-user.
pub fn apply_role_to_user(
    selected_role: Option<&PermissionSet>,
    original: &PermissionSet,
) -> (PermissionSet, bool) {
    let merged = match selected_role {
        Some(role_permissions) => original.union(role_permissions),
        None => original.clone(),
    };
    let is_super_user = merged.is_super_user();
    (merged, is_super_user)
}

/// Order-independent comparison of two sets.
pub fn has_changes(current: &PermissionSet, baseline: &PermissionSet) -> bool {
    current != baseline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::scope::Scope;
    use crate::permissions::token::SUPER_USER_TOKEN;

    const OWN: PermissionScope = PermissionScope::Scoped(Scope::Own);
    const TEAM: PermissionScope = PermissionScope::Scoped(Scope::Team);
    const ALL: PermissionScope = PermissionScope::Scoped(Scope::All);

    fn set(tokens: &[&str]) -> PermissionSet {
        tokens.iter().copied().collect()
    }

    #[test]
    fn test_super_user_flag_grants_with_empty_set() {
        assert!(has_permission("Leave", "apply", OWN, true, &PermissionSet::new()));
    }

    #[test]
    fn test_super_user_token_grants_everything() {
        let permissions = set(&[SUPER_USER_TOKEN]);
        assert!(has_permission("Salary", "manage", ALL, false, &permissions));
        assert!(has_permission("Payroll", "anything", PermissionScope::Global, false, &permissions));
    }

    #[test]
    fn test_exact_scoped_match() {
        let permissions = set(&["Leave:approve:team"]);
        assert!(has_permission("Leave", "approve", TEAM, false, &permissions));
        assert!(!has_permission("Leave", "approve", OWN, false, &permissions));
        assert!(!has_permission("Leave", "approve", PermissionScope::Global, false, &permissions));
    }

    #[test]
    fn test_all_does_not_imply_narrower_scopes() {
        let permissions = set(&["Attendance:view:all"]);
        assert!(has_permission("Attendance", "view", ALL, false, &permissions));
        assert!(!has_permission("Attendance", "view", TEAM, false, &permissions));
        assert!(!has_permission("Attendance", "view", OWN, false, &permissions));
    }

    #[test]
    fn test_global_uses_two_segments() {
        let permissions = set(&["HRActivities:create"]);
        assert!(has_permission("HRActivities", "create", PermissionScope::Global, false, &permissions));

        let three_segments = set(&["HRActivities:create:-"]);
        assert!(!has_permission(
            "HRActivities",
            "create",
            PermissionScope::Global,
            false,
            &three_segments
        ));
    }

    #[test]
    fn test_unknown_module_is_not_granted() {
        let permissions = set(&["Leave:apply:self"]);
        assert!(!has_permission("Payroll", "apply", OWN, false, &permissions));
    }

    #[test]
    fn test_toggle_leave_apply_scenario() {
        let granted = toggle_permission("Leave", "apply", OWN, false, &PermissionSet::new());
        assert_eq!(granted.to_vec(), vec!["Leave:apply:self"]);

        let revoked = toggle_permission("Leave", "apply", OWN, false, &granted);
        assert!(revoked.is_empty());
    }

    #[test]
    fn test_toggle_global_scenario() {
        let granted = toggle_permission(
            "HRActivities",
            "create",
            PermissionScope::Global,
            false,
            &PermissionSet::new(),
        );
        assert_eq!(granted.to_vec(), vec!["HRActivities:create"]);
        assert_eq!(granted.iter().next().unwrap().split(':').count(), 2);
    }

    #[test]
    fn test_toggle_removes_only_that_scope() {
        let permissions = set(&["Leave:view:self", "Leave:view:team", "Leave:view:all"]);
        let next = toggle_permission("Leave", "view", TEAM, false, &permissions);
        assert_eq!(next.to_vec(), vec!["Leave:view:all", "Leave:view:self"]);
    }

    #[test]
    fn test_toggle_is_noop_for_super_user() {
        let permissions = set(&["Leave:view:self"]);
        let next = toggle_permission("Leave", "apply", OWN, true, &permissions);
        assert_eq!(next, permissions);
    }

    #[test]
    fn test_toggle_does_not_mutate_input() {
        let permissions = set(&["Leave:view:self"]);
        let _ = toggle_permission("Leave", "view", OWN, false, &permissions);
        assert!(permissions.contains("Leave:view:self"));
    }

    #[test]
    fn test_apply_role_merges() {
        let original = set(&["Leave:apply:self", "KYC:update:self"]);
        let role = set(&["Leave:apply:self", "Leave:approve:team"]);

        let (merged, is_super_user) = apply_role_to_user(Some(&role), &original);
        assert!(!is_super_user);
        assert_eq!(
            merged.to_vec(),
            vec!["KYC:update:self", "Leave:apply:self", "Leave:approve:team"]
        );
        assert!(original.is_subset(&merged));
    }

    #[test]
    fn test_apply_role_with_super_user_token() {
        let (merged, is_super_user) =
            apply_role_to_user(Some(&set(&[SUPER_USER_TOKEN])), &set(&["Leave:apply:self"]));
        assert!(is_super_user);
        assert!(merged.contains("Leave:apply:self"));
    }

    #[test]
    fn test_deselect_role_reverts_to_original() {
        let original = set(&["Leave:apply:self"]);
        let (merged, _) = apply_role_to_user(Some(&set(&["Salary:view:all"])), &original);
        assert_ne!(merged, original);

        let (reverted, is_super_user) = apply_role_to_user(None, &original);
        assert_eq!(reverted, original);
        assert!(!is_super_user);
    }

    #[test]
    fn test_deselect_keeps_original_super_user() {
        let original = set(&[SUPER_USER_TOKEN]);
        let (_, is_super_user) = apply_role_to_user(None, &original);
        assert!(is_super_user);
    }

    #[test]
    fn test_has_changes_ignores_order() {
        let current: PermissionSet = vec!["a:b:c".to_string(), "d:e".to_string()].into();
        let baseline: PermissionSet = vec!["d:e".to_string(), "a:b:c".to_string()].into();
        assert!(!has_changes(&current, &baseline));
    }

    #[test]
    fn test_has_changes_detects_difference() {
        assert!(has_changes(&set(&["a:b:c"]), &set(&["a:b:c", "d:e"])));
        assert!(has_changes(&set(&["a:b:all"]), &set(&["a:b:team"])));
        assert!(!has_changes(&PermissionSet::new(), &PermissionSet::new()));
    }
}
