use std::future::Future;

use shared_types::{AppError, BulkActionRequest, Dispute, DisputeQuery, NotifyUserRequest};

use crate::client::AdminService;

/// The calls the dispute queue and bulk action dispatcher depend on.
///
/// Futures are not `Send`: in the browser the HTTP client runs on the
/// single-threaded JS event loop.
pub trait AdminApi {
    fn list_disputes(
        &self,
        query: &DisputeQuery,
    ) -> impl Future<Output = Result<Vec<Dispute>, AppError>>;

    fn bulk_action(
        &self,
        request: &BulkActionRequest,
    ) -> impl Future<Output = Result<(), AppError>>;

    fn notify_user(
        &self,
        user_id: &str,
        request: &NotifyUserRequest,
    ) -> impl Future<Output = Result<(), AppError>>;

    fn export_users(&self) -> impl Future<Output = Result<Vec<u8>, AppError>>;
}

impl AdminApi for AdminService {
    async fn list_disputes(&self, query: &DisputeQuery) -> Result<Vec<Dispute>, AppError> {
        AdminService::list_disputes(self, query).await
    }

    async fn bulk_action(&self, request: &BulkActionRequest) -> Result<(), AppError> {
        AdminService::bulk_action(self, request).await
    }

    async fn notify_user(&self, user_id: &str, request: &NotifyUserRequest) -> Result<(), AppError> {
        AdminService::notify_user(self, user_id, request).await
    }

    async fn export_users(&self) -> Result<Vec<u8>, AppError> {
        AdminService::export_users(self).await
    }
}
