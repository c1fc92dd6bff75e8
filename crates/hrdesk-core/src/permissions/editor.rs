//! Staged editing of one role's or user's permission set.
//!
//! Edits stay local until saved. The editor tracks the last-saved baseline so
//! callers can tell whether there is anything to save; after a successful
//! save call [`PermissionEditor::mark_saved`].

use tracing::debug;

use super::engine::{apply_role_to_user, has_changes, toggle_permission};
use super::scope::PermissionScope;
use super::set::PermissionSet;
use super::token::PermissionToken;

#[derive(Debug, Clone)]
pub struct PermissionEditor {
    baseline: PermissionSet,
    baseline_super_user: bool,
    /// The user's own tokens, the base for role merges.
    original: PermissionSet,
    current: PermissionSet,
    is_super_user: bool,
    selected_role: Option<String>,
}

impl PermissionEditor {
    pub fn new(baseline: PermissionSet, is_super_user: bool) -> Self {
        let is_super_user = is_super_user || baseline.is_super_user();
        Self {
            original: baseline.clone(),
            current: baseline.clone(),
            baseline,
            baseline_super_user: is_super_user,
            is_super_user,
            selected_role: None,
        }
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.current
    }

    pub fn baseline(&self) -> &PermissionSet {
        &self.baseline
    }

    pub fn is_super_user(&self) -> bool {
        self.is_super_user
    }

    pub fn selected_role(&self) -> Option<&str> {
        self.selected_role.as_deref()
    }

    /// Replaces the own set with unsaved edits made elsewhere. Any selected
    /// role is dropped.
    pub fn stage(&mut self, permissions: PermissionSet) {
        self.original = permissions.clone();
        self.current = permissions;
        self.is_super_user = self.baseline_super_user || self.current.is_super_user();
        self.selected_role = None;
    }

    /// Toggles one grant. Returns whether the set changed, which is never
    /// the case for a super-user.
    pub fn toggle(&mut self, module: &str, action: &str, scope: PermissionScope) -> bool {
        let next = toggle_permission(module, action, scope, self.is_super_user, &self.current);
        if next == self.current {
            return false;
        }

        // Toggles are the user's own edits and survive a role switch.
        let token = PermissionToken::encode(module, action, scope);
        if next.contains(&token) {
            self.original.insert(token);
        } else {
            self.original.remove(&token);
        }
        self.current = next;
        debug!(
            module,
            action,
            scope = %scope,
            has_changes = self.has_changes(),
            "Permission toggled"
        );
        true
    }

    /// Merges a role's grants over the user's own set, or reverts to the own
    /// set when `role` is `None`.
    pub fn select_role(&mut self, role: Option<(&str, &PermissionSet)>) {
        let (merged, is_super_user) =
            apply_role_to_user(role.map(|(_, permissions)| permissions), &self.original);
        self.current = merged;
        self.is_super_user = is_super_user || self.baseline_super_user;
        self.selected_role = role.map(|(key, _)| key.to_string());
    }

    /// Whether the staged set differs from the last-saved one.
    pub fn has_changes(&self) -> bool {
        has_changes(&self.current, &self.baseline)
    }

    /// Records the staged set as saved.
    pub fn mark_saved(&mut self) {
        self.baseline = self.current.clone();
        self.original = self.current.clone();
        self.baseline_super_user = self.is_super_user;
    }

    /// Drops staged edits and any selected role.
    pub fn reset(&mut self) {
        self.current = self.baseline.clone();
        self.original = self.baseline.clone();
        self.is_super_user = self.baseline_super_user;
        self.selected_role = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::scope::Scope;
    use crate::permissions::token::SUPER_USER_TOKEN;

    const OWN: PermissionScope = PermissionScope::Scoped(Scope::Own);

    fn set(tokens: &[&str]) -> PermissionSet {
        tokens.iter().copied().collect()
    }

    #[test]
    fn test_new_editor_has_no_changes() {
        let editor = PermissionEditor::new(set(&["Leave:apply:self"]), false);
        assert!(!editor.has_changes());
        assert!(!editor.is_super_user());
    }

    #[test]
    fn test_toggle_tracks_changes() {
        let mut editor = PermissionEditor::new(PermissionSet::new(), false);

        assert!(editor.toggle("Leave", "apply", OWN));
        assert!(editor.has_changes());

        assert!(editor.toggle("Leave", "apply", OWN));
        assert!(!editor.has_changes());
    }

    #[test]
    fn test_super_user_editor_ignores_toggles() {
        let mut editor = PermissionEditor::new(set(&[SUPER_USER_TOKEN]), false);
        assert!(editor.is_super_user());
        assert!(!editor.toggle("Leave", "apply", OWN));
        assert!(!editor.has_changes());
    }

    #[test]
    fn test_select_and_deselect_role() {
        let mut editor = PermissionEditor::new(set(&["Leave:apply:self"]), false);
        let manager = set(&["Leave:apply:self", "Leave:approve:team"]);

        editor.select_role(Some(("manager", &manager)));
        assert_eq!(editor.selected_role(), Some("manager"));
        assert!(editor.permissions().contains("Leave:approve:team"));
        assert!(editor.has_changes());

        editor.select_role(None);
        assert_eq!(editor.selected_role(), None);
        assert_eq!(editor.permissions(), &set(&["Leave:apply:self"]));
        assert!(!editor.has_changes());
    }

    #[test]
    fn test_switching_roles_does_not_accumulate() {
        let mut editor = PermissionEditor::new(set(&["KYC:update:self"]), false);
        editor.select_role(Some(("a", &set(&["Salary:view:all"]))));
        editor.select_role(Some(("b", &set(&["Leave:approve:all"]))));

        assert_eq!(
            editor.permissions().to_vec(),
            vec!["KYC:update:self", "Leave:approve:all"]
        );
    }

    #[test]
    fn test_toggle_survives_role_switch() {
        let mut editor = PermissionEditor::new(PermissionSet::new(), false);
        let manager = set(&["Leave:approve:team"]);

        editor.select_role(Some(("manager", &manager)));
        editor.toggle("Leave", "apply", OWN);
        editor.select_role(None);

        assert_eq!(editor.permissions().to_vec(), vec!["Leave:apply:self"]);
    }

    #[test]
    fn test_role_with_super_user_token() {
        let mut editor = PermissionEditor::new(PermissionSet::new(), false);
        editor.select_role(Some(("root", &set(&[SUPER_USER_TOKEN]))));
        assert!(editor.is_super_user());

        editor.select_role(None);
        assert!(!editor.is_super_user());
    }

    #[test]
    fn test_stage_then_select_role() {
        let mut editor = PermissionEditor::new(set(&["Leave:apply:self"]), false);
        editor.stage(set(&["KYC:update:self"]));
        assert!(editor.has_changes());

        editor.select_role(Some(("manager", &set(&["Leave:approve:team"]))));
        assert_eq!(
            editor.permissions().to_vec(),
            vec!["KYC:update:self", "Leave:approve:team"]
        );

        editor.select_role(None);
        assert_eq!(editor.permissions(), &set(&["KYC:update:self"]));
    }

    #[test]
    fn test_mark_saved_resets_baseline() {
        let mut editor = PermissionEditor::new(PermissionSet::new(), false);
        editor.toggle("HRActivities", "create", PermissionScope::Global);
        editor.mark_saved();

        assert!(!editor.has_changes());
        assert_eq!(editor.baseline().to_vec(), vec!["HRActivities:create"]);
    }

    #[test]
    fn test_reset_discards_edits() {
        let mut editor = PermissionEditor::new(set(&["Leave:apply:self"]), false);
        editor.toggle("Leave", "apply", OWN);
        editor.select_role(Some(("x", &set(&["Salary:view:all"]))));
        editor.reset();

        assert!(!editor.has_changes());
        assert_eq!(editor.selected_role(), None);
        assert_eq!(editor.permissions(), &set(&["Leave:apply:self"]));
    }
}
