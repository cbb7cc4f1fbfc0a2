use std::sync::{Arc, RwLock};

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::{
    list_from_data, AdjustRequest, ApiEnvelope, AppError, Bid, BidFilters, BulkActionRequest,
    DashboardPayload, DashboardStats, Dispute, DisputeQuery, DisputesDashboard, EscrowAccount,
    ExtendDeadlineRequest, FeatureJobRequest, FinancialMetrics, Job, JobFilters, JobStatusRequest,
    LoginRequest, LoginResponse, MarketingDashboard, ModerationAction, ModerationItem,
    ModerationQuery, NotificationSettings, NotificationTemplate, NotifyUserRequest, Period,
    PlatformMetrics, Project, ProjectQuery, ProjectsSummary, ReasonRequest, RefreshRequest,
    RefreshResponse, ReferralProgram, ReferralProgramPayload, ReferralRecord, ReferralSettings,
    RefundRequest, ReleaseRequest, ResolveRequest, RoleChangeRequest, SecurityDashboard,
    SeoSettings, SeoSettingsPayload, Session, SupportDashboard, SupportTicket, TemplateInput,
    TestNotificationRequest, TicketQuery, Transaction, TransactionQuery, UserPage, UserQuery,
    VerifyUserRequest,
};

use crate::config;

const LOGIN_PATH: &str = "/auth/login";
const REFRESH_PATH: &str = "/auth/refresh-token";
const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Called whenever the stored session changes, including token refreshes
/// and sign-out. `None` means signed out.
pub type SessionListener = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

/// Typed client for the marketplace admin REST API.
///
/// Clones share one session, so a token refreshed by any clone is seen by
/// every other.
#[derive(Clone)]
pub struct AdminService {
    http: reqwest::Client,
    base_url: String,
    session: Arc<RwLock<Option<Session>>>,
    refresh_lock: Arc<futures::lock::Mutex<()>>,
    listener: Option<SessionListener>,
}

impl AdminService {
    /// `base_url` must already include the `/api/v1` prefix.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(futures::lock::Mutex::new(())),
            listener: None,
        }
    }

    /// Build a client pointed at the configured API for a page served from
    /// `page_host`.
    pub fn from_config(page_host: Option<&str>) -> Self {
        let base_url = config::api_base_url(page_host);
        tracing::info!(base_url = %base_url, "Admin API client configured");
        Self::new(base_url)
    }

    pub fn with_session_listener(mut self, listener: SessionListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    pub fn session(&self) -> Option<Session> {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Replace the stored session without notifying the listener. Used when
    /// restoring a session the caller already persisted.
    pub fn restore_session(&self, session: Option<Session>) {
        self.write_session(session);
    }

    pub fn set_session(&self, session: Option<Session>) {
        self.write_session(session.clone());
        if let Some(listener) = &self.listener {
            listener(session.as_ref());
        }
    }

    pub fn logout(&self) {
        tracing::info!("Admin signed out");
        self.set_session(None);
    }

    fn write_session(&self, session: Option<Session>) {
        match self.session.write() {
            Ok(mut guard) => *guard = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .fetch(Method::POST, LOGIN_PATH, &[], Some(serde_json::to_value(&body)?))
            .await?
            .ok_or_else(|| AppError::decode("login response carried no data"))?;
        self.set_session(Some(response.session()));
        tracing::info!(user_id = %response.user.id, "Admin signed in");
        Ok(response)
    }

    /// Exchange the refresh token for a new pair. Any failure clears the
    /// session and reports `Unauthorized`.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_session(&self) -> Result<Session, AppError> {
        let Some(refresh_token) = self.session().and_then(|s| s.refresh_token) else {
            tracing::warn!("No refresh token available, signing out");
            self.set_session(None);
            return Err(AppError::unauthorized(SESSION_EXPIRED));
        };

        match self.request_refresh(&refresh_token).await {
            Ok(tokens) => {
                let session = Session {
                    access_token: tokens.access_token,
                    refresh_token: tokens.refresh_token.or(Some(refresh_token)),
                };
                self.set_session(Some(session.clone()));
                tracing::info!("Session refreshed");
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session refresh failed, signing out");
                self.set_session(None);
                Err(AppError::unauthorized(SESSION_EXPIRED))
            }
        }
    }

    /// Refresh after `stale` was rejected. Only one refresh runs at a time;
    /// a caller that waited on another refresh reuses its tokens.
    async fn renew_session(&self, stale: Option<&str>) -> Result<Session, AppError> {
        let _guard = self.refresh_lock.lock().await;
        match self.session() {
            Some(current) if Some(current.access_token.as_str()) != stale => {
                tracing::debug!("Session already refreshed by a concurrent request");
                Ok(current)
            }
            _ => self.refresh_session().await,
        }
    }

    // -----------------------------------------------------------------------
    // Transport
    // -----------------------------------------------------------------------

    async fn request_refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AppError> {
        let body = serde_json::to_value(RefreshRequest {
            refresh_token: refresh_token.to_string(),
        })?;
        let url = self.endpoint(REFRESH_PATH);
        let response = self.dispatch(&Method::POST, &url, &[], Some(&body), None).await?;
        let status = response.status();
        let text = read_text(response).await?;
        if !status.is_success() {
            return Err(AppError::from_status(status.as_u16(), &text));
        }
        decode_envelope::<RefreshResponse>(&text)?
            .ok_or_else(|| AppError::decode("refresh response carried no tokens"))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
        token: Option<String>,
    ) -> Result<reqwest::Response, AppError> {
        let mut request = self.http.request(method.clone(), url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.map_err(|e| {
            tracing::error!(error = %e, url, "Admin API unreachable");
            AppError::network(e.to_string())
        })
    }

    /// Send a request, refreshing the session and retrying once on a 401.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> Result<reqwest::Response, AppError> {
        let url = self.endpoint(path);
        let token = self.session().map(|s| s.access_token);
        let mut response = self
            .dispatch(&method, &url, query, body.as_ref(), token.clone())
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED && !is_auth_path(path) {
            tracing::info!(path, "Access token rejected, refreshing session");
            let session = self.renew_session(token.as_deref()).await?;
            response = self
                .dispatch(&method, &url, query, body.as_ref(), Some(session.access_token))
                .await?;
        }

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = read_text(response).await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), path, %method, "Admin API request failed");
        Err(AppError::from_status(status.as_u16(), &text))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
    ) -> Result<Option<T>, AppError> {
        let response = self.send(method, path, query, body).await?;
        let text = read_text(response).await?;
        decode_envelope(&text).inspect_err(|e| {
            tracing::warn!(error = %e, path, "Admin API response could not be decoded");
        })
    }

    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Option<T>, AppError> {
        self.fetch(Method::GET, path, query, None).await
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        key: &str,
    ) -> Result<Vec<T>, AppError> {
        let data: Option<Value> = self.get_data(path, query).await?;
        list_from_data(data, key)
    }

    async fn get_dashboard<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Option<T>, AppError> {
        let payload: Option<DashboardPayload<T>> = self.get_data(path, query).await?;
        Ok(payload.map(DashboardPayload::into_inner))
    }

    async fn send_json<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<(), AppError> {
        let body = serde_json::to_value(body)?;
        self.fetch::<Value>(method, path, &[], Some(body)).await.map(|_| ())
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<(), AppError> {
        self.fetch::<Value>(method, path, &[], None).await.map(|_| ())
    }

    async fn get_blob(&self, path: &str, query: &[(&'static str, String)]) -> Result<Vec<u8>, AppError> {
        let response = self.send(Method::GET, path, query, None).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    // -----------------------------------------------------------------------
    // Overview
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<Option<DashboardStats>, AppError> {
        self.get_dashboard("/admin/dashboard/stats", &[]).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn platform_analytics(&self, period: Period) -> Result<Option<PlatformMetrics>, AppError> {
        self.get_dashboard("/admin/analytics", &[("period", period.as_str().to_string())])
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn marketing_dashboard(&self) -> Result<Option<MarketingDashboard>, AppError> {
        self.get_dashboard("/admin/marketing/dashboard", &[]).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn security_dashboard(&self) -> Result<Option<SecurityDashboard>, AppError> {
        self.get_dashboard("/admin/security/dashboard", &[]).await
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn list_users(&self, query: &UserQuery) -> Result<UserPage, AppError> {
        let data: Option<Value> = self.get_data("/admin/users", &query.to_query()).await?;
        match data {
            Some(Value::Array(_)) => Ok(UserPage {
                users: list_from_data(data, "users")?,
                ..UserPage::default()
            }),
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(UserPage::default()),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn change_user_role(&self, user_id: &str, role: &str) -> Result<(), AppError> {
        let body = RoleChangeRequest {
            role: role.to_string(),
        };
        self.send_json(Method::PUT, &format!("/admin/users/{user_id}/role"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn verify_user(&self, user_id: &str) -> Result<(), AppError> {
        let body = VerifyUserRequest {
            user_id: user_id.to_string(),
        };
        self.send_json(Method::POST, "/admin/verify-user", &body).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn suspend_user(&self, user_id: &str, reason: Option<&str>) -> Result<(), AppError> {
        let path = format!("/admin/users/{user_id}/suspend");
        match reason.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reason) => {
                let body = ReasonRequest {
                    reason: reason.to_string(),
                };
                self.send_json(Method::POST, &path, &body).await
            }
            None => self.send_empty(Method::POST, &path).await,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn unsuspend_user(&self, user_id: &str) -> Result<(), AppError> {
        self.send_empty(Method::POST, &format!("/admin/users/{user_id}/unsuspend"))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> Result<(), AppError> {
        self.send_empty(Method::DELETE, &format!("/admin/users/{user_id}"))
            .await
    }

    #[tracing::instrument(skip(self, request), fields(action = %request.action, count = request.user_ids.len()))]
    pub async fn bulk_action(&self, request: &BulkActionRequest) -> Result<(), AppError> {
        self.send_json(Method::POST, "/admin/users/bulk-action", request).await
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn notify_user(&self, user_id: &str, request: &NotifyUserRequest) -> Result<(), AppError> {
        self.send_json(Method::POST, &format!("/admin/users/{user_id}/notify"), request)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn export_users(&self) -> Result<Vec<u8>, AppError> {
        self.get_blob("/admin/users/export", &[("format", "csv".to_string())])
            .await
    }

    // -----------------------------------------------------------------------
    // Jobs
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn list_jobs(&self, filters: &JobFilters) -> Result<Vec<Job>, AppError> {
        self.get_list("/admin/jobs", &filters.to_query(), "jobs").await
    }

    #[tracing::instrument(skip(self, reason))]
    pub async fn flag_job(&self, job_id: &str, reason: &str) -> Result<(), AppError> {
        let body = ReasonRequest::from_input(reason)?;
        self.send_json(Method::POST, &format!("/admin/jobs/{job_id}/flag"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_job_status(&self, job_id: &str, status: &str) -> Result<(), AppError> {
        let body = JobStatusRequest {
            status: status.to_string(),
        };
        self.send_json(Method::PUT, &format!("/admin/jobs/{job_id}/status"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn feature_job(&self, job_id: &str, featured: bool) -> Result<(), AppError> {
        let body = FeatureJobRequest { featured };
        self.send_json(Method::POST, &format!("/admin/jobs/{job_id}/feature"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_job(&self, job_id: &str) -> Result<(), AppError> {
        self.send_empty(Method::DELETE, &format!("/admin/jobs/{job_id}"))
            .await
    }

    // -----------------------------------------------------------------------
    // Bids
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn list_bids(&self, filters: &BidFilters) -> Result<Vec<Bid>, AppError> {
        self.get_list("/admin/bids", &filters.to_query(), "bids").await
    }

    #[tracing::instrument(skip(self))]
    pub async fn close_bid(&self, bid_id: &str) -> Result<(), AppError> {
        self.send_empty(Method::POST, &format!("/admin/bids/{bid_id}/close"))
            .await
    }

    #[tracing::instrument(skip(self, reason))]
    pub async fn cancel_bid(&self, bid_id: &str, reason: &str) -> Result<(), AppError> {
        let body = ReasonRequest::from_input(reason)?;
        self.send_json(Method::POST, &format!("/admin/bids/{bid_id}/cancel"), &body)
            .await
    }

    #[tracing::instrument(skip(self, reason))]
    pub async fn flag_bid(&self, bid_id: &str, reason: &str) -> Result<(), AppError> {
        let body = ReasonRequest::from_input(reason)?;
        self.send_json(Method::POST, &format!("/admin/bids/{bid_id}/flag"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn extend_bid_deadline(&self, bid_id: &str, request: &ExtendDeadlineRequest) -> Result<(), AppError> {
        self.send_json(Method::PUT, &format!("/admin/bids/{bid_id}/deadline"), request)
            .await
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn list_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, AppError> {
        self.get_list("/admin/projects", &query.to_query(), "projects")
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn projects_summary(&self) -> Result<Option<ProjectsSummary>, AppError> {
        self.get_dashboard("/admin/projects/dashboard", &[]).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn export_projects(&self, query: &ProjectQuery) -> Result<Vec<u8>, AppError> {
        let mut params = query.to_query();
        params.push(("format", "csv".to_string()));
        self.get_blob("/admin/projects/export", &params).await
    }

    // -----------------------------------------------------------------------
    // Disputes
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn list_disputes(&self, query: &DisputeQuery) -> Result<Vec<Dispute>, AppError> {
        self.get_list("/admin/disputes", &query.to_query(), "disputes")
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn disputes_dashboard(&self) -> Result<Option<DisputesDashboard>, AppError> {
        self.get_dashboard("/admin/disputes/dashboard", &[]).await
    }

    // -----------------------------------------------------------------------
    // Payments and escrow
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn financial_metrics(&self, period: Period) -> Result<Option<FinancialMetrics>, AppError> {
        self.get_dashboard("/admin/financial/metrics", &[("period", period.as_str().to_string())])
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_escrow_accounts(&self) -> Result<Vec<EscrowAccount>, AppError> {
        self.get_list("/admin/financial/escrow", &[], "accounts").await
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn release_escrow(&self, account_id: &str, request: &ReleaseRequest) -> Result<(), AppError> {
        self.send_json(Method::POST, &format!("/admin/escrow/{account_id}/release"), request)
            .await
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn freeze_escrow(&self, account_id: &str, request: &ReasonRequest) -> Result<(), AppError> {
        self.send_json(Method::POST, &format!("/admin/escrow/{account_id}/freeze"), request)
            .await
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn unfreeze_escrow(&self, account_id: &str, request: &ReasonRequest) -> Result<(), AppError> {
        self.send_json(Method::POST, &format!("/admin/escrow/{account_id}/unfreeze"), request)
            .await
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn refund_escrow(&self, account_id: &str, request: &RefundRequest) -> Result<(), AppError> {
        self.send_json(Method::POST, &format!("/admin/escrow/{account_id}/refund"), request)
            .await
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn adjust_escrow(&self, account_id: &str, request: &AdjustRequest) -> Result<(), AppError> {
        self.send_json(Method::POST, &format!("/admin/escrow/{account_id}/adjust"), request)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn escrow_report(&self, account_id: &str) -> Result<Vec<u8>, AppError> {
        self.get_blob(
            &format!("/admin/escrow/{account_id}/report"),
            &[("format", "pdf".to_string())],
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, AppError> {
        self.get_list("/admin/transactions", &query.to_query(), "transactions")
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn export_transactions(&self, query: &TransactionQuery) -> Result<Vec<u8>, AppError> {
        self.get_blob("/admin/transactions/export", &query.export_query())
            .await
    }

    // -----------------------------------------------------------------------
    // Moderation and support
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn moderation_queue(&self, query: &ModerationQuery) -> Result<Vec<ModerationItem>, AppError> {
        self.get_list("/admin/moderation/queue", &query.to_query(), "items")
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve_moderation(&self, item_id: &str, action: ModerationAction) -> Result<(), AppError> {
        let body = ResolveRequest { action };
        self.send_json(Method::POST, &format!("/admin/moderation/{item_id}/resolve"), &body)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn support_dashboard(&self) -> Result<Option<SupportDashboard>, AppError> {
        self.get_dashboard("/admin/support/dashboard", &[]).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn support_tickets(&self, query: &TicketQuery) -> Result<Vec<SupportTicket>, AppError> {
        self.get_list("/admin/support/tickets", &query.to_query(), "tickets")
            .await
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn notification_templates(&self) -> Result<Vec<NotificationTemplate>, AppError> {
        self.get_list("/admin/notifications/templates", &[], "templates")
            .await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn create_template(&self, input: &TemplateInput) -> Result<(), AppError> {
        self.send_json(Method::POST, "/admin/notifications/templates", input)
            .await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update_template(&self, template_id: &str, input: &TemplateInput) -> Result<(), AppError> {
        self.send_json(
            Method::PUT,
            &format!("/admin/notifications/templates/{template_id}"),
            input,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_template(&self, template_id: &str) -> Result<(), AppError> {
        self.send_empty(
            Method::DELETE,
            &format!("/admin/notifications/templates/{template_id}"),
        )
        .await
    }

    #[tracing::instrument(skip(self, email))]
    pub async fn send_test_notification(&self, template_id: &str, email: &str) -> Result<(), AppError> {
        let body = TestNotificationRequest {
            email: shared_types::require_text(email, "Please enter an email address")?,
        };
        self.send_json(
            Method::POST,
            &format!("/admin/notifications/templates/{template_id}/test"),
            &body,
        )
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn notification_settings(&self) -> Result<Option<NotificationSettings>, AppError> {
        self.get_data("/admin/notifications/settings", &[]).await
    }

    // -----------------------------------------------------------------------
    // Referrals and SEO
    // -----------------------------------------------------------------------

    #[tracing::instrument(skip(self))]
    pub async fn referral_program(&self) -> Result<Option<ReferralProgram>, AppError> {
        let payload: Option<ReferralProgramPayload> = self.get_data("/admin/referrals/program", &[]).await?;
        Ok(payload.map(ReferralProgramPayload::into_program))
    }

    #[tracing::instrument(skip(self))]
    pub async fn referral_tracking(&self) -> Result<Vec<ReferralRecord>, AppError> {
        self.get_list("/admin/referrals/tracking", &[], "referrals").await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_referral_settings(&self, settings: &ReferralSettings) -> Result<(), AppError> {
        let body = settings.clone().validated()?;
        self.send_json(Method::PUT, "/admin/referrals/settings", &body).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn seo_settings(&self) -> Result<Option<SeoSettings>, AppError> {
        let payload: Option<SeoSettingsPayload> = self.get_data("/admin/seo/settings", &[]).await?;
        Ok(payload.map(SeoSettingsPayload::into_settings))
    }

    #[tracing::instrument(skip(self, settings))]
    pub async fn update_seo_settings(&self, settings: &SeoSettings) -> Result<(), AppError> {
        self.send_json(Method::PUT, "/admin/seo/settings", settings).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn regenerate_sitemap(&self) -> Result<(), AppError> {
        self.send_empty(Method::POST, "/admin/seo/sitemap").await
    }
}

fn is_auth_path(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    path == LOGIN_PATH || path == REFRESH_PATH
}

async fn read_text(response: reqwest::Response) -> Result<String, AppError> {
    response
        .text()
        .await
        .map_err(|e| AppError::network(e.to_string()))
}

/// Decode a `{success, data, message}` body. An empty body is a success
/// without data.
pub(crate) fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<Option<T>, AppError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let envelope: ApiEnvelope<T> = serde_json::from_str(text)?;
    envelope.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let svc = AdminService::new("http://localhost:5000/api/v1/");
        assert_eq!(svc.endpoint("/admin/disputes"), "http://localhost:5000/api/v1/admin/disputes");
        assert_eq!(svc.endpoint("admin/users"), "http://localhost:5000/api/v1/admin/users");
    }

    #[test]
    fn auth_paths_are_not_refreshed() {
        assert!(is_auth_path("/auth/login"));
        assert!(is_auth_path("/auth/refresh-token"));
        assert!(!is_auth_path("/admin/users"));
    }

    #[test]
    fn empty_body_decodes_to_none() {
        let data: Option<Value> = decode_envelope("  ").unwrap();
        assert!(data.is_none());
    }

    #[test]
    fn failed_envelope_is_bad_request() {
        let err = decode_envelope::<Value>(r#"{"success":false,"message":"Nope"}"#).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message_or("fallback"), "Nope");
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode_envelope::<Value>("<html>").unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Decode);
        assert_eq!(err.message_or("Failed to load"), "Failed to load");
    }

    #[test]
    fn clones_share_session() {
        let svc = AdminService::new("http://localhost:5000/api/v1");
        let clone = svc.clone();
        svc.set_session(Some(Session {
            access_token: "a".into(),
            refresh_token: None,
        }));
        assert!(clone.is_authenticated());
        clone.logout();
        assert!(!svc.is_authenticated());
    }

    #[test]
    fn listener_sees_session_changes() {
        let seen = Arc::new(RwLock::new(Vec::new()));
        let sink = seen.clone();
        let svc = AdminService::new("http://x/api/v1").with_session_listener(Arc::new(move |s: Option<&Session>| {
            sink.write().unwrap().push(s.map(|s| s.access_token.clone()));
        }));
        svc.set_session(Some(Session {
            access_token: "t1".into(),
            refresh_token: Some("r1".into()),
        }));
        svc.logout();
        svc.restore_session(None);
        assert_eq!(*seen.read().unwrap(), vec![Some("t1".to_string()), None]);
    }
}
