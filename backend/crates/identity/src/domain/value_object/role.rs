use serde::{Deserialize, Serialize};
use std::fmt;

/// Named role tag attached to user accounts.
///
/// Roles are open-ended tags, many-to-many with accounts via the store.
/// Every account receives [`RoleName::user`] at registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleName(String);

impl RoleName {
    /// Name of the default role assigned at registration
    pub const DEFAULT_ROLE: &'static str = "User";

    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The default role every account starts with
    #[inline]
    pub fn user() -> Self {
        Self(Self::DEFAULT_ROLE.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoleName {
    fn default() -> Self {
        Self::user()
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role() {
        assert_eq!(RoleName::user().as_str(), "User");
        assert_eq!(RoleName::default(), RoleName::user());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(RoleName::new("Admin").to_string(), "Admin");
    }

    #[test]
    fn test_role_equality() {
        assert_eq!(RoleName::new("User"), RoleName::user());
        assert_ne!(RoleName::new("Admin"), RoleName::user());
    }
}
