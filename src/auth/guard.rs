use super::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const ADMIN_PATH: &str = "/admin";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Any signed-in user.
    Authenticated,
    /// Administrators only.
    AdminOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Redirect(&'static str),
}

pub fn guard(state: &AuthState, access: Access) -> GuardOutcome {
    match (state, access) {
        (AuthState::Anonymous, _) => GuardOutcome::Redirect(LOGIN_PATH),
        (AuthState::Student { .. }, Access::AdminOnly) => GuardOutcome::Redirect(HOME_PATH),
        _ => GuardOutcome::Render,
    }
}

/// Where a freshly signed-in user lands.
pub fn landing_path(state: &AuthState) -> &'static str {
    match state {
        AuthState::Admin { .. } => ADMIN_PATH,
        _ => HOME_PATH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_sent_to_login() {
        for access in [Access::Authenticated, Access::AdminOnly] {
            assert_eq!(
                guard(&AuthState::Anonymous, access),
                GuardOutcome::Redirect("/login")
            );
        }
    }

    #[test]
    fn test_students_cannot_open_admin() {
        let student = AuthState::Student {
            username: "s1".into(),
        };
        assert_eq!(guard(&student, Access::Authenticated), GuardOutcome::Render);
        assert_eq!(guard(&student, Access::AdminOnly), GuardOutcome::Redirect("/"));
        assert_eq!(landing_path(&student), "/");
    }

    #[test]
    fn test_admin_passes_everything() {
        let admin = AuthState::Admin {
            username: "root".into(),
        };
        assert_eq!(guard(&admin, Access::AdminOnly), GuardOutcome::Render);
        assert_eq!(landing_path(&admin), "/admin");
    }
}
