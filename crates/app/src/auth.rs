use std::sync::Arc;

use admin_client::{AdminService, SessionListener};
use dioxus::prelude::*;
use shared_types::{AuthUser, Session, StoredSession};

const SESSION_KEY: &str = "admin.session";
const USER_KEY: &str = "admin.user";

/// Signed-in administrator, shared with every route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub current_user: Signal<Option<AuthUser>>,
}

impl AuthState {
    pub fn new(user: Option<AuthUser>) -> Self {
        Self {
            current_user: Signal::new(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.read().is_some()
    }

    /// Role code of the signed-in admin, empty when signed out.
    pub fn role(&self) -> String {
        self.current_user
            .read()
            .as_ref()
            .map(|u| u.role_code.clone())
            .unwrap_or_default()
    }

    pub fn set_user(&mut self, user: AuthUser) {
        storage::write_json(USER_KEY, &user);
        self.current_user.set(Some(user));
    }

    pub fn clear(&mut self) {
        storage::remove(USER_KEY);
        self.current_user.set(None);
    }
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

pub fn use_api() -> AdminService {
    use_context::<AdminService>()
}

/// Drop the session on both the client and the page.
pub fn sign_out(api: &AdminService, auth: &mut AuthState) {
    api.logout();
    auth.clear();
    tracing::info!("Signed out");
}

/// Session and user saved by a previous visit. Both halves must be present.
pub fn load_stored_session() -> Option<StoredSession> {
    let session: Session = storage::read_json(SESSION_KEY)?;
    let user: AuthUser = storage::read_json(USER_KEY)?;
    Some(StoredSession { session, user })
}

/// Keeps browser storage in step with the client's session, including
/// tokens rotated by a background refresh.
pub fn session_persister() -> SessionListener {
    Arc::new(|session: Option<&Session>| match session {
        Some(session) => storage::write_json(SESSION_KEY, session),
        None => {
            storage::remove(SESSION_KEY);
            storage::remove(USER_KEY);
        }
    })
}

/// Hostname of the page serving the console, used to pick the API origin.
#[cfg(feature = "web")]
pub fn page_host() -> Option<String> {
    web_sys::window()?.location().hostname().ok()
}

#[cfg(not(feature = "web"))]
pub fn page_host() -> Option<String> {
    None
}

#[cfg(feature = "web")]
mod storage {
    use serde::{de::DeserializeOwned, Serialize};

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn read_json<T: DeserializeOwned>(key: &str) -> Option<T> {
        let raw = local_storage()?.get_item(key).ok()??;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable stored value");
                remove(key);
                None
            }
        }
    }

    pub fn write_json<T: Serialize>(key: &str, value: &T) {
        let Some(store) = local_storage() else {
            return;
        };
        match serde_json::to_string(value) {
            Ok(raw) => {
                if store.set_item(key, &raw).is_err() {
                    tracing::warn!(key, "localStorage write rejected");
                }
            }
            Err(e) => tracing::warn!(key, error = %e, "Failed to serialize stored value"),
        }
    }

    pub fn remove(key: &str) {
        if let Some(store) = local_storage() {
            let _ = store.remove_item(key);
        }
    }
}

// Desktop keeps the session in memory only.
#[cfg(not(feature = "web"))]
mod storage {
    use serde::{de::DeserializeOwned, Serialize};

    pub fn read_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
        None
    }

    pub fn write_json<T: Serialize>(_key: &str, _value: &T) {}

    pub fn remove(_key: &str) {}
}
