//! Permission sets attached to roles and users.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

use super::token::{PermissionToken, SUPER_USER_TOKEN, TokenError};

/// Unordered, deduplicated set of permission tokens.
///
/// Tokens are kept in their wire form. Strings that do not decode are still
/// kept so a fetch-then-save cycle never drops data the upstream API owns;
/// use [`PermissionSet::decode`] where structure must be enforced.
/// Iteration and serialization are in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Vec<String>)]
pub struct PermissionSet(BTreeSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn contains_token(&self, token: &PermissionToken) -> bool {
        self.0.contains(&token.to_string())
    }

    /// Returns `true` when the token was not present before.
    pub fn insert(&mut self, token: impl Into<String>) -> bool {
        self.0.insert(token.into())
    }

    /// Returns `true` when the token was present.
    pub fn remove(&mut self, token: &str) -> bool {
        self.0.remove(token)
    }

    /// Whether the set carries the super-user token.
    pub fn is_super_user(&self) -> bool {
        self.0.contains(SUPER_USER_TOKEN)
    }

    pub fn union(&self, other: &PermissionSet) -> PermissionSet {
        PermissionSet(self.0.union(&other.0).cloned().collect())
    }

    /// Tokens in `self` that are not in `other`, sorted.
    pub fn difference(&self, other: &PermissionSet) -> Vec<String> {
        self.0.difference(&other.0).cloned().collect()
    }

    pub fn is_subset(&self, other: &PermissionSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Sorted token array, as sent to the upstream API.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Decodes every token, failing on the first malformed one.
    pub fn decode(&self) -> Result<Vec<PermissionToken>, TokenError> {
        self.0.iter().map(|token| token.parse()).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        PermissionSet(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for PermissionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(tokens: Vec<String>) -> Self {
        tokens.into_iter().collect()
    }
}

impl IntoIterator for PermissionSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse() {
        let set: PermissionSet = ["Leave:apply:self", "Leave:apply:self", "AuditLogs:view"]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_to_vec_is_sorted() {
        let set: PermissionSet = ["Salary:view:self", "AuditLogs:view", "Leave:apply:self"]
            .into_iter()
            .collect();
        assert_eq!(
            set.to_vec(),
            vec!["AuditLogs:view", "Leave:apply:self", "Salary:view:self"]
        );
    }

    #[test]
    fn test_super_user_detection() {
        let mut set = PermissionSet::new();
        assert!(!set.is_super_user());
        set.insert(SUPER_USER_TOKEN);
        assert!(set.is_super_user());
    }

    #[test]
    fn test_serde_is_plain_array() {
        let set: PermissionSet = ["b:x", "a:y:all"].into_iter().collect();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["a:y:all","b:x"]"#);

        let parsed: PermissionSet = serde_json::from_str(r#"["a:y:all","a:y:all"]"#).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_unknown_strings_are_kept() {
        let set: PermissionSet = ["legacy-flag", "Leave:apply:self"].into_iter().collect();
        assert!(set.contains("legacy-flag"));
        assert!(set.decode().is_err());
    }

    #[test]
    fn test_openapi_schema_is_string_array() {
        use utoipa::PartialSchema;

        let schema = serde_json::to_value(PermissionSet::schema()).unwrap();
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["type"], "string");
    }

    #[test]
    fn test_union_and_difference() {
        let a: PermissionSet = ["x:a", "x:b"].into_iter().collect();
        let b: PermissionSet = ["x:b", "x:c"].into_iter().collect();

        let union = a.union(&b);
        assert_eq!(union.to_vec(), vec!["x:a", "x:b", "x:c"]);
        assert!(a.is_subset(&union));
        assert_eq!(union.difference(&a), vec!["x:c"]);
    }
}
