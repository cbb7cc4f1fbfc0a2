use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{matches_search, push_selected, QueryParams};
use crate::error::AppError;
use crate::filters::{UserFilterKey, UserFilters};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const USER_FILTER_ROLES: &[(&str, &str)] = &[
    ("PM", "Project Manager"),
    ("GC", "General Contractor"),
    ("SUB", "Subcontractor"),
    ("TS", "Trade Specialist"),
    ("VIEWER", "Viewer"),
    ("ADMIN", "Admin"),
    ("SUPER", "Super Admin"),
];
pub const USER_STATUSES: &[&str] = &["active", "inactive", "suspended", "locked", "deleted"];
pub const VERIFICATION_STATUSES: &[&str] = &["verified", "pending", "unverified"];

/// Roles an admin may assign from the user table.
pub const ASSIGNABLE_ROLES: &[(&str, &str)] = &[
    ("homeowner", "Homeowner"),
    ("contractor", "Contractor"),
    ("admin", "Admin"),
    ("support", "Support"),
];

/// Roles that move a user onto the admin roster.
pub const ADMIN_TIER_ROLES: &[&str] =
    &["super_admin", "admin", "moderator", "finance_manager", "support_agent"];

/// Human label for a role code; unknown codes display as-is.
pub fn role_label(code: &str) -> &str {
    match code {
        "homeowner" => "Homeowner",
        "contractor" => "Contractor",
        "admin" | "ADMIN" => "Admin",
        "support" => "Support",
        "super_admin" | "SUPER" => "Super Admin",
        "PM" => "Project Manager",
        "GC" => "General Contractor",
        "SUB" => "Subcontractor",
        "TS" => "Trade Specialist",
        "VIEWER" => "Viewer",
        other => other,
    }
}

pub fn is_admin_tier(role: &str) -> bool {
    ADMIN_TIER_ROLES.contains(&role.to_lowercase().as_str())
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role_code: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub verification_status: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub trust_score: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl AdminUser {
    pub fn role_label(&self) -> &str {
        role_label(&self.role_code)
    }

    pub fn is_suspended(&self) -> bool {
        !self.is_active || self.status == "suspended"
    }

    pub fn is_pending_verification(&self) -> bool {
        matches!(self.verification_status.as_str(), "pending" | "unverified")
    }
}

/// One server page of users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<AdminUser>,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
}

fn default_pages() -> u32 {
    1
}

impl Default for UserPage {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            pages: default_pages(),
            total: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub suspended: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
}

/// Headline counts for the overview page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub users: UserCounts,
    #[serde(default)]
    pub projects: ActivityCounts,
    #[serde(default)]
    pub jobs: ActivityCounts,
    #[serde(default)]
    pub disputes: ActivityCounts,
    #[serde(default)]
    pub total_revenue: f64,
}

// ---------------------------------------------------------------------------
// Server query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub role: String,
    pub status: String,
    pub verification_status: String,
}

impl UserQuery {
    pub fn from_filters(filters: &UserFilters, page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            search: filters.text(UserFilterKey::Search).unwrap_or_default().to_string(),
            role: filters.text(UserFilterKey::Role).unwrap_or_default().to_string(),
            status: filters.text(UserFilterKey::Status).unwrap_or_default().to_string(),
            verification_status: filters
                .text(UserFilterKey::VerificationStatus)
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn to_query(&self) -> QueryParams {
        let mut params = vec![
            ("page", self.page.max(1).to_string()),
            ("limit", self.limit.max(1).to_string()),
        ];
        push_selected(&mut params, "search", &self.search);
        push_selected(&mut params, "role", &self.role);
        push_selected(&mut params, "status", &self.status);
        push_selected(&mut params, "verification_status", &self.verification_status);
        params
    }
}

// ---------------------------------------------------------------------------
// Client-side narrowing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserTab {
    #[default]
    All,
    Pending,
    Suspended,
}

impl UserTab {
    pub const ALL: [UserTab; 3] = [UserTab::All, UserTab::Pending, UserTab::Suspended];

    pub fn label(&self) -> &'static str {
        match self {
            UserTab::All => "All",
            UserTab::Pending => "Pending",
            UserTab::Suspended => "Suspended",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserTab::All => "all",
            UserTab::Pending => "pending",
            UserTab::Suspended => "suspended",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => UserTab::Pending,
            "suspended" => UserTab::Suspended,
            _ => UserTab::All,
        }
    }

    pub fn includes(&self, user: &AdminUser) -> bool {
        match self {
            UserTab::All => true,
            UserTab::Pending => user.is_pending_verification(),
            UserTab::Suspended => user.is_suspended(),
        }
    }
}

/// Whether `user` passes every applied filter.
///
/// `date_to` covers the whole named day.
pub fn user_matches(filters: &UserFilters, user: &AdminUser) -> bool {
    if let Some(q) = filters.text(UserFilterKey::Search) {
        let hit = matches_search(
            q,
            [
                Some(user.full_name.as_str()),
                Some(user.email.as_str()),
                Some(user.role_label()),
            ],
        );
        if !hit {
            return false;
        }
    }
    if let Some(role) = filters.text(UserFilterKey::Role) {
        if !user.role_code.eq_ignore_ascii_case(role) {
            return false;
        }
    }
    if let Some(status) = filters.text(UserFilterKey::Status) {
        if user.status != status {
            return false;
        }
    }
    if let Some(v) = filters.text(UserFilterKey::VerificationStatus) {
        if user.verification_status != v {
            return false;
        }
    }
    if let Some(from) = filters.text(UserFilterKey::DateFrom).and_then(parse_day) {
        match user.created_at {
            Some(created) if created.date_naive() >= from => {}
            _ => return false,
        }
    }
    if let Some(to) = filters.text(UserFilterKey::DateTo).and_then(parse_day) {
        match user.created_at {
            Some(created) if created.date_naive() <= to => {}
            _ => return false,
        }
    }
    if let Some(min) = filters.number(UserFilterKey::TrustScoreMin) {
        if user.trust_score.unwrap_or(0.0) < min {
            return false;
        }
    }
    if let Some(max) = filters.number(UserFilterKey::TrustScoreMax) {
        if user.trust_score.unwrap_or(0.0) > max {
            return false;
        }
    }
    if let Some(loc) = filters.text(UserFilterKey::Location) {
        if !matches_search(loc, [user.location.as_deref()]) {
            return false;
        }
    }
    true
}

/// Users visible on `tab` after applying `filters`, in fetch order.
pub fn visible_users<'a>(users: &'a [AdminUser], filters: &UserFilters, tab: UserTab) -> Vec<&'a AdminUser> {
    users
        .iter()
        .filter(|u| tab.includes(u) && user_matches(filters, u))
        .collect()
}

impl UserFilters {
    pub fn matches(&self, user: &AdminUser) -> bool {
        user_matches(self, user)
    }
}

fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok()
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleChangeRequest {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerifyUserRequest {
    pub user_id: String,
}

/// Body of `POST /admin/users/bulk-action`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BulkActionRequest {
    pub action: String,
    pub user_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Role changes
// ---------------------------------------------------------------------------

/// Check whether an admin holding `actor_role` may move a user from
/// `target_role` to `new_role`. Role codes compare case-insensitively.
pub fn check_role_change(actor_role: &str, target_role: &str, new_role: &str) -> Result<(), AppError> {
    let actor = actor_role.to_lowercase();
    let target = target_role.to_lowercase();
    let new = new_role.to_lowercase();

    if actor == "super_admin" {
        if new == "super_admin" {
            return Err(AppError::forbidden("You cannot assign Super Admin role to anyone."));
        }
        if target == "super_admin" {
            return Err(AppError::forbidden("You cannot change Super Admin roles."));
        }
    }
    if actor == "admin" {
        if new == "admin" || new == "super_admin" {
            return Err(AppError::forbidden("You cannot assign Admin or Super Admin roles."));
        }
        if target == "admin" || target == "super_admin" {
            return Err(AppError::forbidden("You cannot change Admin or Super Admin roles."));
        }
    }
    Ok(())
}

/// Toast shown after a successful role change.
pub fn role_change_message(new_role: &str) -> String {
    if is_admin_tier(new_role) {
        format!(
            "User promoted to {}. They now have admin console access.",
            role_label(new_role)
        )
    } else {
        "User role updated successfully".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterValue;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn user(id: &str, name: &str, role: &str) -> AdminUser {
        AdminUser {
            id: id.into(),
            full_name: name.into(),
            email: format!("{id}@example.com"),
            role_code: role.into(),
            status: "active".into(),
            verification_status: "verified".into(),
            is_active: true,
            email_verified: true,
            trust_score: Some(70.0),
            location: Some("Austin, TX".into()),
            created_at: Some(Utc.with_ymd_and_hms(2026, 2, 10, 18, 30, 0).unwrap()),
            last_login_at: None,
        }
    }

    #[test]
    fn search_covers_name_email_and_role_label() {
        let u = user("u1", "Priya Raman", "GC");
        let by = |q: &str| user_matches(&UserFilters::new().with(UserFilterKey::Search, FilterValue::text(q)), &u);
        assert!(by("priya"));
        assert!(by("U1@EXAMPLE"));
        assert!(by("general contractor"));
        assert!(!by("plumber"));
    }

    #[test]
    fn date_to_includes_the_whole_day() {
        let u = user("u1", "A", "GC");
        let on_day = UserFilters::new().with(UserFilterKey::DateTo, FilterValue::text("2026-02-10"));
        assert!(user_matches(&on_day, &u));
        let before = UserFilters::new().with(UserFilterKey::DateTo, FilterValue::text("2026-02-09"));
        assert!(!user_matches(&before, &u));
        let from = UserFilters::new().with(UserFilterKey::DateFrom, FilterValue::text("2026-02-10"));
        assert!(user_matches(&from, &u));
    }

    #[test]
    fn role_and_trust_score_filters() {
        let u = user("u1", "A", "sub");
        let filters = UserFilters::new()
            .with(UserFilterKey::Role, FilterValue::text("SUB"))
            .with(UserFilterKey::TrustScoreMin, FilterValue::Number(50.0))
            .with(UserFilterKey::TrustScoreMax, FilterValue::Number(80.0));
        assert!(user_matches(&filters, &u));

        let strict = filters.with(UserFilterKey::TrustScoreMin, FilterValue::Number(75.0));
        assert!(!user_matches(&strict, &u));
    }

    #[test]
    fn tabs_select_pending_and_suspended() {
        let mut pending = user("p", "P", "GC");
        pending.verification_status = "unverified".into();
        let mut suspended = user("s", "S", "GC");
        suspended.is_active = false;
        let mut flagged = user("f", "F", "GC");
        flagged.status = "suspended".into();
        let all = vec![user("a", "A", "GC"), pending, suspended, flagged];

        let ids = |tab| {
            visible_users(&all, &UserFilters::new(), tab)
                .iter()
                .map(|u| u.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(UserTab::All).len(), 4);
        assert_eq!(ids(UserTab::Pending), vec!["p"]);
        assert_eq!(ids(UserTab::Suspended), vec!["s", "f"]);
    }

    #[test]
    fn user_query_omits_unset_filters() {
        let filters = UserFilters::new().with(UserFilterKey::Role, FilterValue::text("PM"));
        let query = UserQuery::from_filters(&filters, 2, 50);
        assert_eq!(
            query.to_query(),
            vec![
                ("page", "2".to_string()),
                ("limit", "50".to_string()),
                ("role", "PM".to_string()),
            ]
        );
    }

    #[test]
    fn super_admin_role_rules() {
        assert!(check_role_change("SUPER_ADMIN", "contractor", "super_admin").is_err());
        assert!(check_role_change("super_admin", "super_admin", "admin").is_err());
        assert!(check_role_change("super_admin", "contractor", "admin").is_ok());
    }

    #[test]
    fn admin_role_rules() {
        let err = check_role_change("admin", "homeowner", "admin").unwrap_err();
        assert_eq!(err.message, "You cannot assign Admin or Super Admin roles.");
        assert!(check_role_change("admin", "admin", "support").is_err());
        assert!(check_role_change("admin", "homeowner", "contractor").is_ok());
    }

    #[test]
    fn promotion_message_names_new_role() {
        assert_eq!(
            role_change_message("admin"),
            format!("User promoted to {}. They now have admin console access.", role_label("admin"))
        );
        assert!(!role_change_message("super_admin").contains("page"));
        assert_eq!(role_change_message("contractor"), "User role updated successfully");
    }

    #[test]
    fn user_page_defaults() {
        let page: UserPage = serde_json::from_str(r#"{"users":[{"id":"x"}]}"#).unwrap();
        assert_eq!(page.pages, 1);
        assert!(page.users[0].is_active);
        assert_eq!(page.users[0].role_label(), "");
    }
}
