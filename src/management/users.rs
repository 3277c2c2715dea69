use std::rc::Rc;

use leptos::logging::{error, warn};
use leptos::*;

use super::Confirm;
use crate::api::query::non_empty;
use crate::api::{ApiClient, Transport, UserQuery};
use crate::config::AppConfig;
use crate::error::{decode_error, ValidationError, UNKNOWN_ERROR};
use crate::models::{Role, User, UserForm, UserStats};
use crate::notify::Notifier;

const USER_ERROR_FIELDS: [&str; 2] = ["username", "email"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub role: Option<Role>,
    pub search: String,
}

impl UserFilters {
    pub fn to_query(&self, page_size: u32) -> UserQuery {
        UserQuery {
            page_size: Some(page_size),
            user_type: self.role,
            search: non_empty(&self.search),
            ..UserQuery::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UserEditor {
    pub editing: Option<User>,
    pub form: UserForm,
}

impl UserEditor {
    pub fn is_new(&self) -> bool {
        self.editing.is_none()
    }
}

pub struct UserManager<T> {
    api: ApiClient<T>,
    notifier: Notifier,
    confirm: Rc<dyn Confirm>,
    page_size: u32,
    users: RwSignal<Vec<User>>,
    loading: RwSignal<bool>,
    stats: RwSignal<Option<UserStats>>,
    filters: RwSignal<UserFilters>,
    editor: RwSignal<Option<UserEditor>>,
}

impl<T> Clone for UserManager<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: self.notifier,
            confirm: Rc::clone(&self.confirm),
            page_size: self.page_size,
            users: self.users,
            loading: self.loading,
            stats: self.stats,
            filters: self.filters,
            editor: self.editor,
        }
    }
}

impl<T: Transport> UserManager<T> {
    pub fn new(
        api: ApiClient<T>,
        notifier: Notifier,
        confirm: Rc<dyn Confirm>,
        config: &AppConfig,
    ) -> Self {
        Self {
            api,
            notifier,
            confirm,
            page_size: config.page_size_ceiling,
            users: create_rw_signal(Vec::new()),
            loading: create_rw_signal(true),
            stats: create_rw_signal(None),
            filters: create_rw_signal(UserFilters::default()),
            editor: create_rw_signal(None),
        }
    }

    pub fn users(&self) -> ReadSignal<Vec<User>> {
        self.users.read_only()
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.loading.read_only()
    }

    pub fn stats(&self) -> ReadSignal<Option<UserStats>> {
        self.stats.read_only()
    }

    pub fn filters(&self) -> ReadSignal<UserFilters> {
        self.filters.read_only()
    }

    pub fn editor(&self) -> ReadSignal<Option<UserEditor>> {
        self.editor.read_only()
    }

    pub async fn load(&self) {
        self.loading.set(true);
        let query = self
            .filters
            .with_untracked(|filters| filters.to_query(self.page_size));
        match self.api.list_users(&query).await {
            Ok(page) => self.users.set(page.results),
            Err(err) => {
                error!("[USERS] loading the list failed: {}", err);
                self.notifier.error("Failed to load users");
            }
        }
        self.loading.set(false);
    }

    /// Stats are decoration; a failure is only logged.
    pub async fn load_stats(&self) {
        match self.api.user_stats().await {
            Ok(stats) => self.stats.set(Some(stats)),
            Err(err) => error!("[USERS] loading stats failed: {}", err),
        }
    }

    async fn reload(&self) {
        self.load().await;
        self.load_stats().await;
    }

    pub async fn open_editor(&self, user: Option<User>) {
        let editor = match user {
            None => UserEditor {
                editing: None,
                form: UserForm::default(),
            },
            Some(listed) => {
                let user = match self.api.user(listed.id).await {
                    Ok(full) => full,
                    Err(err) => {
                        warn!("[USERS] fetching user {} failed: {}", listed.id, err);
                        self.notifier
                            .warning("Could not load full account details; showing list data");
                        listed
                    }
                };
                UserEditor {
                    form: UserForm::from(&user),
                    editing: Some(user),
                }
            }
        };
        self.editor.set(Some(editor));
    }

    pub fn close_editor(&self) {
        self.editor.set(None);
    }

    pub fn edit_form(&self, change: impl FnOnce(&mut UserForm)) {
        self.editor.update(|editor| {
            if let Some(editor) = editor {
                change(&mut editor.form);
            }
        });
    }

    pub fn set_role_filter(&self, role: Option<Role>) {
        self.filters.update(|filters| filters.role = role);
    }

    pub fn set_search(&self, search: String) {
        self.filters.update(|filters| filters.search = search);
    }

    pub async fn apply_filters(&self) {
        self.load().await;
    }

    pub async fn submit(&self) -> bool {
        let Some(editor) = self.editor.get_untracked() else {
            return false;
        };
        if let Err(err) = editor.form.validate(editor.is_new()) {
            self.notifier.error(err.to_string());
            return false;
        }

        let saved = match &editor.editing {
            Some(user) => self
                .api
                .update_user(user.id, &editor.form)
                .await
                .map(|()| "User updated"),
            None => self
                .api
                .create_user(&editor.form)
                .await
                .map(|()| "User created"),
        };

        match saved {
            Ok(message) => {
                self.notifier.success(message);
                self.close_editor();
                self.reload().await;
                true
            }
            Err(err) => {
                error!("[USERS] saving failed: {}", err);
                let report = decode_error(&err, &USER_ERROR_FIELDS, UNKNOWN_ERROR);
                self.notifier.error(report.to_string());
                false
            }
        }
    }

    /// Sets a new password for `user`, keeping every other field as listed.
    /// Passwords are never shown; this is the only way to act on one.
    pub async fn reset_password(&self, user: &User, new_password: &str) -> bool {
        if new_password.trim().is_empty() {
            self.notifier
                .error(ValidationError::Required("password").to_string());
            return false;
        }

        let form = UserForm {
            password: new_password.to_string(),
            ..UserForm::from(user)
        };
        match self.api.update_user(user.id, &form).await {
            Ok(()) => {
                self.notifier
                    .success(format!("Password reset for {}", user.username));
                true
            }
            Err(err) => {
                error!("[USERS] resetting password for {} failed: {}", user.id, err);
                let report = decode_error(&err, &["password"], UNKNOWN_ERROR);
                self.notifier.error(report.to_string());
                false
            }
        }
    }

    pub async fn delete(&self, user: &User) -> bool {
        let prompt = format!(
            "Delete user \"{}\"? This cannot be undone.",
            user.username
        );
        if !self.confirm.confirm(&prompt) {
            return false;
        }

        match self.api.delete_user(user.id).await {
            Ok(()) => {
                self.notifier.success("User deleted");
                self.reload().await;
                true
            }
            Err(err) => {
                error!("[USERS] deleting user {} failed: {}", user.id, err);
                self.notifier
                    .error(decode_error(&err, &[], "Delete failed").to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_build_query() {
        let filters = UserFilters {
            role: Some(Role::Admin),
            search: "  li ".into(),
        };
        let query = filters.to_query(100);
        assert_eq!(query.user_type, Some(Role::Admin));
        assert_eq!(query.search.as_deref(), Some("li"));

        let empty = UserFilters::default().to_query(100);
        assert_eq!(empty.user_type, None);
        assert_eq!(empty.search, None);
    }
}
