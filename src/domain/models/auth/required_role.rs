/// 스코프 진입에 필요한 역할
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRole(pub String);

impl RequiredRole {
    pub fn is_satisfied(&self, user_roles: &[String]) -> bool {
        user_roles.contains(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_must_be_present() {
        let required = RequiredRole("admin".to_string());
        assert!(required.is_satisfied(&["user".to_string(), "admin".to_string()]));
        assert!(!required.is_satisfied(&["user".to_string()]));
        assert!(!required.is_satisfied(&[]));
    }
}
