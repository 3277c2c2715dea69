use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "student" => Ok(Role::Student),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown user type `{other}`")),
        }
    }
}

/// An account as listed to administrators. Any password material the backend
/// sends alongside is never decoded.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "user_type", default)]
    pub role: Role,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

fn active_by_default() -> bool {
    true
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn joined_on(&self) -> String {
        self.date_joined.format("%Y-%m-%d").to_string()
    }
}

/// Form mirror for creating or editing an account. On edit `password` is the
/// optional replacement password and is left out of the request when empty.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserForm {
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(rename = "user_type")]
    pub role: Role,
    pub student_id: String,
    pub is_active: bool,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            role: Role::Student,
            student_id: String::new(),
            is_active: true,
        }
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: String::new(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            student_id: user.student_id.clone().unwrap_or_default(),
            is_active: user.is_active,
        }
    }
}

impl UserForm {
    /// Presence checks only; new accounts also need a password.
    pub fn validate(&self, creating: bool) -> Result<(), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::Required("username"));
        }
        if creating && self.password.trim().is_empty() {
            return Err(ValidationError::Required("password"));
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Tokens from a login or refresh. The refresh endpoint only returns a new
/// `access`, so `refresh` is empty there.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UserStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default, alias = "student_users")]
    pub student_count: u64,
    #[serde(default, alias = "admin_users")]
    pub admin_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_json() -> serde_json::Value {
        json!({
            "id": 11,
            "username": "s2023001",
            "first_name": "Ming",
            "last_name": "Li",
            "email": "ming@example.edu",
            "user_type": "student",
            "student_id": "2023001",
            "is_active": true,
            "date_joined": "2024-09-01T08:30:00+08:00",
            "plain_password": "hunter2"
        })
    }

    #[test]
    fn test_user_decodes_without_password() {
        let user: User = serde_json::from_value(user_json()).unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.full_name(), "Ming Li");
        assert_eq!(user.joined_on(), "2024-09-01");
        assert!(!format!("{user:?}").contains("hunter2"));
    }

    #[test]
    fn test_edit_form_omits_blank_password() {
        let user: User = serde_json::from_value(user_json()).unwrap();
        let form = UserForm::from(&user);
        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["user_type"], json!("student"));
    }

    #[test]
    fn test_required_fields() {
        let mut form = UserForm::default();
        assert_eq!(form.validate(true), Err(ValidationError::Required("username")));
        form.username = "admin2".into();
        assert_eq!(form.validate(true), Err(ValidationError::Required("password")));
        assert_eq!(form.validate(false), Ok(()));
    }

    #[test]
    fn test_token_replies_ignore_the_embedded_user() {
        let login: TokenResponse = serde_json::from_value(json!({
            "access": "a",
            "refresh": "r",
            "user": {"id": 1, "username": "root", "date_joined": "2024-09-01 08:30:00"}
        }))
        .unwrap();
        assert_eq!(login.refresh, "r");

        let refreshed: TokenResponse = serde_json::from_value(json!({"access": "fresh"})).unwrap();
        assert_eq!(refreshed.access, "fresh");
        assert_eq!(refreshed.refresh, "");
    }

    #[test]
    fn test_stats_accept_backend_role_counts() {
        let stats: UserStats = serde_json::from_value(json!({
            "total_users": 12,
            "active_users": 10,
            "student_users": 9,
            "admin_users": 3
        }))
        .unwrap();
        assert_eq!(stats.student_count, 9);
        assert_eq!(stats.admin_count, 3);
    }

    #[test]
    fn test_role_round_trips_through_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert!("teacher".parse::<Role>().is_err());
    }
}
