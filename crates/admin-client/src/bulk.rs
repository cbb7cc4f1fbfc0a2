use chrono::NaiveDate;
use futures::future::join_all;
use shared_types::{require_text, AppError, AppErrorKind, BulkActionRequest, NotifyUserRequest};

use crate::api::AdminApi;
use crate::export::ExportFile;

pub const SUSPEND_REASON_REQUIRED: &str = "Please provide a reason for suspension";
pub const NOTIFY_MESSAGE_REQUIRED: &str = "Please enter a notification message";
pub const NO_USERS_SELECTED: &str = "Select at least one user";

/// Actions offered for a selection of users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Export,
    Suspend,
    Notify,
}

impl BulkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkAction::Export => "export",
            BulkAction::Suspend => "suspend",
            BulkAction::Notify => "notify",
        }
    }

    pub fn success_message(&self, count: usize) -> String {
        match self {
            BulkAction::Export => "Users exported successfully".to_string(),
            BulkAction::Suspend => format!("{count} users suspended"),
            BulkAction::Notify => format!("Notification sent to {count} users"),
        }
    }

    fn fallback(&self) -> &'static str {
        match self {
            BulkAction::Export => "Failed to export users",
            BulkAction::Suspend => "Failed to suspend users",
            BulkAction::Notify => "Failed to send notifications",
        }
    }

    /// Toast text for a failed action. Validation messages pass through;
    /// a failed notify batch never reports per-recipient detail.
    pub fn failure_message(&self, err: &AppError) -> String {
        if err.kind == AppErrorKind::ValidationError {
            return err.message.clone();
        }
        match self {
            BulkAction::Notify => self.fallback().to_string(),
            _ => err.message_or(self.fallback()),
        }
    }
}

fn require_selection(user_ids: &[String]) -> Result<(), AppError> {
    if user_ids.is_empty() {
        return Err(AppError::validation(NO_USERS_SELECTED));
    }
    Ok(())
}

/// Download the user CSV, named for `today`.
#[tracing::instrument(skip(api))]
pub async fn export_users<A: AdminApi>(api: &A, today: NaiveDate) -> Result<ExportFile, AppError> {
    let bytes = api.export_users().await?;
    Ok(ExportFile::csv("users", today, bytes))
}

/// Suspend every selected user with one batched call. Returns the number of
/// users suspended.
#[tracing::instrument(skip(api, user_ids, reason), fields(count = user_ids.len()))]
pub async fn suspend_users<A: AdminApi>(api: &A, user_ids: &[String], reason: &str) -> Result<usize, AppError> {
    let reason = require_text(reason, SUSPEND_REASON_REQUIRED)?;
    require_selection(user_ids)?;

    let request = BulkActionRequest {
        action: BulkAction::Suspend.as_str().to_string(),
        user_ids: user_ids.to_vec(),
        reason: Some(reason),
    };
    api.bulk_action(&request).await?;
    tracing::info!(count = user_ids.len(), "Users suspended");
    Ok(user_ids.len())
}

/// Notify each selected user with its own request, all in flight at once.
///
/// Every request runs to completion. If any fails the batch fails as a
/// whole with the first error.
#[tracing::instrument(skip(api, user_ids, message), fields(count = user_ids.len()))]
pub async fn notify_users<A: AdminApi>(api: &A, user_ids: &[String], message: &str) -> Result<usize, AppError> {
    let message = require_text(message, NOTIFY_MESSAGE_REQUIRED)?;
    require_selection(user_ids)?;

    let request = NotifyUserRequest { message };
    let results = join_all(user_ids.iter().map(|id| api.notify_user(id, &request))).await;

    let failed = results.iter().filter(|r| r.is_err()).count();
    if let Some(err) = results.into_iter().find_map(Result::err) {
        tracing::warn!(failed, total = user_ids.len(), error = %err, "Bulk notification failed");
        return Err(err);
    }
    tracing::info!(count = user_ids.len(), "Notifications sent");
    Ok(user_ids.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use shared_types::{Dispute, DisputeQuery};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        bulk_calls: Mutex<Vec<BulkActionRequest>>,
        notified: Mutex<Vec<String>>,
        failing_user: Option<String>,
    }

    impl AdminApi for FakeApi {
        async fn list_disputes(&self, _query: &DisputeQuery) -> Result<Vec<Dispute>, AppError> {
            Ok(Vec::new())
        }

        async fn bulk_action(&self, request: &BulkActionRequest) -> Result<(), AppError> {
            self.bulk_calls.lock().unwrap().push(request.clone());
            Ok(())
        }

        async fn notify_user(&self, user_id: &str, _request: &NotifyUserRequest) -> Result<(), AppError> {
            self.notified.lock().unwrap().push(user_id.to_string());
            if self.failing_user.as_deref() == Some(user_id) {
                return Err(AppError::from_status(500, r#"{"message":"mailer down"}"#));
            }
            Ok(())
        }

        async fn export_users(&self) -> Result<Vec<u8>, AppError> {
            Ok(b"id,email\n".to_vec())
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn suspend_without_reason_makes_no_call() {
        let api = FakeApi::default();
        let err = block_on(suspend_users(&api, &ids(&["u1", "u2"]), "   ")).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(BulkAction::Suspend.failure_message(&err), SUSPEND_REASON_REQUIRED);
        assert!(api.bulk_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn suspend_is_one_batched_call() {
        let api = FakeApi::default();
        let count = block_on(suspend_users(&api, &ids(&["u1", "u2", "u3"]), " spam ")).unwrap();
        assert_eq!(count, 3);
        let calls = api.bulk_calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![BulkActionRequest {
                action: "suspend".into(),
                user_ids: ids(&["u1", "u2", "u3"]),
                reason: Some("spam".into()),
            }]
        );
        assert_eq!(BulkAction::Suspend.success_message(count), "3 users suspended");
    }

    #[test]
    fn notify_without_message_makes_no_call() {
        let api = FakeApi::default();
        let err = block_on(notify_users(&api, &ids(&["u1"]), "")).unwrap_err();
        assert_eq!(BulkAction::Notify.failure_message(&err), NOTIFY_MESSAGE_REQUIRED);
        assert!(api.notified.lock().unwrap().is_empty());
    }

    #[test]
    fn notify_with_one_failure_fails_whole_batch() {
        let api = FakeApi {
            failing_user: Some("u2".into()),
            ..FakeApi::default()
        };
        let err = block_on(notify_users(&api, &ids(&["u1", "u2", "u3"]), "Hello")).unwrap_err();
        // every recipient was still attempted
        assert_eq!(api.notified.lock().unwrap().len(), 3);
        assert_eq!(BulkAction::Notify.failure_message(&err), "Failed to send notifications");
    }

    #[test]
    fn notify_success_counts_recipients() {
        let api = FakeApi::default();
        let count = block_on(notify_users(&api, &ids(&["u1", "u2"]), "Hello")).unwrap();
        assert_eq!(BulkAction::Notify.success_message(count), "Notification sent to 2 users");
    }

    #[test]
    fn empty_selection_is_rejected() {
        let api = FakeApi::default();
        let err = block_on(suspend_users(&api, &[], "reason")).unwrap_err();
        assert_eq!(err.message, NO_USERS_SELECTED);
    }

    #[test]
    fn export_names_file_for_today() {
        let api = FakeApi::default();
        let day = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let file = block_on(export_users(&api, day)).unwrap();
        assert_eq!(file.filename, "users-export-2026-10-15.csv");
        assert_eq!(file.bytes, b"id,email\n".to_vec());
    }

    #[test]
    fn failure_messages_prefer_server_text() {
        let server = AppError::from_status(409, r#"{"message":"Already suspended"}"#);
        assert_eq!(BulkAction::Suspend.failure_message(&server), "Already suspended");
        let network = AppError::network("connection refused");
        assert_eq!(BulkAction::Export.failure_message(&network), "Failed to export users");
    }
}
