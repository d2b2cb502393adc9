//! Role-based authorization

use super::Invocation;

/// Role names treated as admin-equivalent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationList {
    roles: Vec<String>,
}

impl AuthorizationList {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for role in roles {
            let role = role.into();
            if !list.contains(&role) {
                list.push(role);
            }
        }
        Self { roles: list }
    }

    /// True if any of `held` is on the list. Matching is exact and case-sensitive.
    pub fn permits<S: AsRef<str>>(&self, held: &[S]) -> bool {
        held.iter()
            .any(|role| self.roles.iter().any(|allowed| allowed == role.as_ref()))
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }
}

/// Guard run before any gated command body
pub fn authorize(invocation: &Invocation, allowed_roles: &AuthorizationList) -> bool {
    allowed_roles.permits(&invocation.roles)
}
