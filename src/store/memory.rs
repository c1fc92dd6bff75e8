//! In-memory [`PermissionStore`].
//!
//! Not durable: all state is lost on restart. Roles and users live in maps
//! guarded by `tokio::sync::RwLock`; writes are last-write-wins like the
//! HR API. [`MemoryPermissionStore::seeded`] starts with three roles and two
//! users so a local run has something to edit.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use hrdesk_core::permissions::{PermissionSet, SUPER_USER_TOKEN};
use hrdesk_models::{FetchedPermissions, Role, RoleId, UpstreamUserSave};

use super::{PermissionStore, StoreError, StoreResult};

#[derive(Debug, Clone, Default)]
struct UserRecord {
    permissions: PermissionSet,
    is_super_user: bool,
    selected_role: Option<RoleId>,
}

/// Ids are a counter, so keying by it lists roles in creation order.
#[derive(Debug, Default)]
struct Roles {
    next_id: u64,
    by_id: BTreeMap<u64, Role>,
}

impl Roles {
    fn insert(&mut self, name: &str, permissions: PermissionSet) -> Role {
        self.next_id += 1;
        let role = Role {
            id: RoleId::new(self.next_id.to_string()),
            name: name.to_string(),
            permissions,
        };
        self.by_id.insert(self.next_id, role.clone());
        role
    }

    fn key(id: &RoleId) -> StoreResult<u64> {
        id.as_str()
            .parse()
            .map_err(|_| StoreError::NotFound(format!("role {id}")))
    }
}

#[derive(Debug, Default)]
pub struct MemoryPermissionStore {
    roles: RwLock<Roles>,
    users: RwLock<HashMap<String, UserRecord>>,
}

fn set(tokens: &[&str]) -> PermissionSet {
    tokens.iter().copied().collect()
}

impl MemoryPermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roles `1` Employee, `2` Manager and `3` HR Admin; users `jdoe`
    /// (employee grants) and `admin` (super-user).
    pub fn seeded() -> Self {
        let employee = set(&[
            "Attendance:mark:self",
            "Attendance:view:self",
            "KYC:update:self",
            "KYC:view:self",
            "Leave:apply:self",
            "Leave:cancel:self",
            "Leave:view:self",
            "Salary:view:self",
        ]);
        let manager = employee.union(&set(&[
            "Appraisals:review:team",
            "Attendance:regularize:team",
            "Attendance:view:team",
            "Leave:approve:team",
            "Leave:view:team",
            "Resignations:approve:team",
        ]));
        let hr_admin = set(&[
            "AuditLogs:view",
            "HRActivities:create",
            "HRActivities:update",
            "JobOpenings:create",
            "Permissions:edit",
            "Permissions:view",
            "Roles:view",
        ]);

        Self::new()
            .with_role("Employee", employee.clone())
            .with_role("Manager", manager)
            .with_role("HR Admin", hr_admin)
            .with_user("jdoe", employee, false)
            .with_user("admin", set(&[SUPER_USER_TOKEN]), true)
    }

    pub fn with_role(mut self, name: &str, permissions: PermissionSet) -> Self {
        self.roles.get_mut().insert(name, permissions);
        self
    }

    pub fn with_user(mut self, username: &str, permissions: PermissionSet, is_super_user: bool) -> Self {
        self.users.get_mut().insert(
            username.to_string(),
            UserRecord {
                permissions,
                is_super_user,
                selected_role: None,
            },
        );
        self
    }

    /// Role last saved alongside the user's permissions.
    pub async fn selected_role(&self, username: &str) -> Option<RoleId> {
        self.users
            .read()
            .await
            .get(username)
            .and_then(|user| user.selected_role.clone())
    }
}

#[async_trait]
impl PermissionStore for MemoryPermissionStore {
    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        Ok(self.roles.read().await.by_id.values().cloned().collect())
    }

    #[instrument(skip(self, permissions))]
    async fn create_role(&self, name: &str, permissions: &PermissionSet) -> StoreResult<Role> {
        let mut roles = self.roles.write().await;
        if roles
            .by_id
            .values()
            .any(|role| role.name.eq_ignore_ascii_case(name))
        {
            return Err(StoreError::Conflict(format!("role `{name}` already exists")));
        }

        let role = roles.insert(name, permissions.clone());
        debug!(role_id = %role.id, "Role created");
        Ok(role)
    }

    async fn delete_role(&self, id: &RoleId) -> StoreResult<()> {
        // Users keep any tokens merged from this role.
        let key = Roles::key(id)?;
        self.roles
            .write()
            .await
            .by_id
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("role {id}")))
    }

    async fn role_permissions(&self, id: &RoleId) -> StoreResult<FetchedPermissions> {
        let key = Roles::key(id)?;
        self.roles
            .read()
            .await
            .by_id
            .get(&key)
            .map(|role| FetchedPermissions::new(role.permissions.clone(), false))
            .ok_or_else(|| StoreError::NotFound(format!("role {id}")))
    }

    async fn save_role_permissions(
        &self,
        id: &RoleId,
        permissions: &PermissionSet,
    ) -> StoreResult<()> {
        let key = Roles::key(id)?;
        let mut roles = self.roles.write().await;
        let role = roles
            .by_id
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound(format!("role {id}")))?;
        role.permissions = permissions.clone();
        Ok(())
    }

    async fn user_permissions(&self, username: &str) -> StoreResult<FetchedPermissions> {
        // Users the store has never seen start with nothing.
        let users = self.users.read().await;
        let user = users.get(username).cloned().unwrap_or_default();
        Ok(FetchedPermissions::new(user.permissions, user.is_super_user))
    }

    async fn save_user_permissions(&self, save: &UpstreamUserSave) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let user = users.entry(save.selected_user.clone()).or_default();
        user.permissions = save.permissions.iter().cloned().collect();
        user.selected_role = save.selected_role.clone();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_roles() {
        let store = MemoryPermissionStore::seeded();
        let roles = store.list_roles().await.unwrap();
        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Employee", "Manager", "HR Admin"]);
    }

    #[tokio::test]
    async fn test_create_and_delete_role() {
        let store = MemoryPermissionStore::new();
        let role = store
            .create_role("Auditor", &set(&["AuditLogs:view"]))
            .await
            .unwrap();
        assert_eq!(role.id.as_str(), "1");

        let fetched = store.role_permissions(&role.id).await.unwrap();
        assert!(fetched.permissions.contains("AuditLogs:view"));

        store.delete_role(&role.id).await.unwrap();
        assert!(matches!(
            store.delete_role(&role.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_roles_list_in_creation_order() {
        let store = (1..=11).fold(MemoryPermissionStore::new(), |store, n| {
            store.with_role(&format!("Role {n}"), PermissionSet::new())
        });
        let ids: Vec<String> = store
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .map(|role| role.id.to_string())
            .collect();
        let expected: Vec<String> = (1..=11).map(|n| n.to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_non_numeric_role_id_not_found() {
        let store = MemoryPermissionStore::seeded();
        assert!(matches!(
            store.role_permissions(&RoleId::new("manager")).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_role_name_conflicts() {
        let store = MemoryPermissionStore::new().with_role("Manager", PermissionSet::new());
        assert!(matches!(
            store.create_role("manager", &PermissionSet::new()).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_role_permissions_not_found() {
        let store = MemoryPermissionStore::new();
        assert!(matches!(
            store.role_permissions(&RoleId::new("404")).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_user_save_keeps_super_user_flag() {
        let store = MemoryPermissionStore::new().with_user("root", PermissionSet::new(), true);
        let save = UpstreamUserSave::new("root", &set(&["Leave:apply:self"]), None);
        store.save_user_permissions(&save).await.unwrap();

        let fetched = store.user_permissions("root").await.unwrap();
        assert!(fetched.is_super_user);
        assert_eq!(fetched.permissions.to_vec(), vec!["Leave:apply:self"]);
    }

    #[tokio::test]
    async fn test_unknown_user_is_empty() {
        let store = MemoryPermissionStore::new();
        let fetched = store.user_permissions("ghost").await.unwrap();
        assert!(fetched.permissions.is_empty());
        assert!(!fetched.is_super_user);
    }

    #[tokio::test]
    async fn test_user_save_records_selected_role() {
        let store = MemoryPermissionStore::new();
        let save = UpstreamUserSave::new("jdoe", &PermissionSet::new(), Some(RoleId::new("2")));
        store.save_user_permissions(&save).await.unwrap();
        assert_eq!(store.selected_role("jdoe").await, Some(RoleId::new("2")));
    }
}
