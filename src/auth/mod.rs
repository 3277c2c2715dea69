//! Session state. [`AuthStore`] is the only writer of the persisted session
//! keys; everything else reads the reactive [`AuthState`] it exposes.

pub mod guard;
pub mod storage;

use std::rc::Rc;

use leptos::logging::{log, warn};
use leptos::*;

use crate::models::{Role, TokenResponse};
use storage::{KeyValueStore, LocalStorage, MemoryStore, StatusEvents, WindowEvents};

pub const USER_TYPE_KEY: &str = "userType";
pub const USERNAME_KEY: &str = "username";
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const SESSION_KEYS: [&str; 4] = [USER_TYPE_KEY, USERNAME_KEY, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY];

pub const USER_STATUS_EVENT: &str = "userStatusChange";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Student { username: String },
    Admin { username: String },
}

impl AuthState {
    pub fn signed_in(role: Role, username: impl Into<String>) -> Self {
        let username = username.into();
        match role {
            Role::Student => AuthState::Student { username },
            Role::Admin => AuthState::Admin { username },
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Student { .. } => Some(Role::Student),
            AuthState::Admin { .. } => Some(Role::Admin),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Student { username } | AuthState::Admin { username } => Some(username),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, AuthState::Admin { .. })
    }
}

#[derive(Clone)]
pub struct AuthStore {
    store: Rc<dyn KeyValueStore>,
    events: Rc<dyn StatusEvents>,
    state: RwSignal<AuthState>,
}

impl AuthStore {
    /// Rebuilds the session from persisted keys. A session needs both a user
    /// type and an access token; anything less is anonymous.
    pub fn restore(store: Rc<dyn KeyValueStore>, events: Rc<dyn StatusEvents>) -> Self {
        let state = Self::read_state(store.as_ref());
        Self {
            store,
            events,
            state: create_rw_signal(state),
        }
    }

    /// Store backed by `localStorage`, falling back to memory.
    pub fn browser() -> Self {
        let store: Rc<dyn KeyValueStore> = match LocalStorage::open() {
            Some(local) => Rc::new(local),
            None => {
                warn!("[AUTH] using in-memory session; it will not survive a reload");
                Rc::new(MemoryStore::default())
            }
        };
        Self::restore(store, Rc::new(WindowEvents))
    }

    fn read_state(store: &dyn KeyValueStore) -> AuthState {
        let token = store.get(ACCESS_TOKEN_KEY).filter(|token| !token.is_empty());
        let role = store
            .get(USER_TYPE_KEY)
            .and_then(|value| value.parse::<Role>().ok());
        match (role, token) {
            (Some(role), Some(_)) => {
                AuthState::signed_in(role, store.get(USERNAME_KEY).unwrap_or_default())
            }
            _ => AuthState::Anonymous,
        }
    }

    /// Tracked read, for views and effects.
    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn state_untracked(&self) -> AuthState {
        self.state.get_untracked()
    }

    pub fn signal(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    pub fn access_token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store
            .get(REFRESH_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn login(&self, role: Role, username: &str, tokens: &TokenResponse) {
        self.store.set(USER_TYPE_KEY, role.as_str());
        self.store.set(USERNAME_KEY, username);
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access);
        self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh);
        log!("[AUTH] {} signed in as {}", username, role);
        self.state.set(AuthState::signed_in(role, username));
        self.events.dispatch();
    }

    /// Swaps in a refreshed access token without touching the signed-in user.
    pub fn replace_tokens(&self, tokens: &TokenResponse) {
        self.store.set(ACCESS_TOKEN_KEY, &tokens.access);
        if !tokens.refresh.is_empty() {
            self.store.set(REFRESH_TOKEN_KEY, &tokens.refresh);
        }
    }

    pub fn logout(&self) {
        for key in SESSION_KEYS {
            self.store.remove(key);
        }
        log!("[AUTH] signed out");
        self.state.set(AuthState::Anonymous);
        self.events.dispatch();
    }
}
