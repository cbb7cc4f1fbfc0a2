use serde::{Deserialize, Serialize};

use crate::user::is_admin_tier;

/// Access/refresh token pair attached to admin API requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// The signed-in administrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role_code: String,
}

impl AuthUser {
    pub fn can_use_console(&self) -> bool {
        is_admin_tier(&self.role_code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

impl LoginResponse {
    pub fn session(&self) -> Session {
        Session {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// What the app keeps in browser storage between visits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub session: Session,
    pub user: AuthUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_builds_session() {
        let json = r#"{"access_token":"a1","refresh_token":"r1",
            "user":{"id":"u1","full_name":"Root","email":"root@example.com","role_code":"super_admin"}}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.session(),
            Session {
                access_token: "a1".into(),
                refresh_token: Some("r1".into())
            }
        );
        assert!(resp.user.can_use_console());
    }

    #[test]
    fn non_admin_cannot_use_console() {
        let user = AuthUser {
            id: "u2".into(),
            full_name: "Pat".into(),
            email: "pat@example.com".into(),
            role_code: "GC".into(),
        };
        assert!(!user.can_use_console());
    }
}
