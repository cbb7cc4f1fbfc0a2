use shared_types::{sort_disputes, AppError, Dispute, DisputeQuery, DisputeSort};

use crate::api::AdminApi;

/// Toast shown whenever the queue cannot be fetched.
pub const LOAD_FAILED: &str = "Failed to load disputes";

/// Fetch the disputes matching `query` and order them by `sort`.
///
/// Only server-side filters travel with the request. Free-text search is
/// applied afterwards over the returned page and never triggers a fetch.
#[tracing::instrument(skip(api))]
pub async fn load_disputes<A: AdminApi>(
    api: &A,
    query: &DisputeQuery,
    sort: DisputeSort,
) -> Result<Vec<Dispute>, AppError> {
    let mut disputes = api.list_disputes(query).await.inspect_err(|e| {
        tracing::warn!(error = %e, "Dispute queue fetch failed");
    })?;
    sort_disputes(&mut disputes, sort);
    tracing::debug!(count = disputes.len(), sort = sort.as_str(), "Dispute queue loaded");
    Ok(disputes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use shared_types::{BulkActionRequest, ListState, NotifyUserRequest};
    use std::sync::Mutex;

    struct QueueApi {
        response: Mutex<Option<Result<Vec<Dispute>, AppError>>>,
        queries: Mutex<Vec<DisputeQuery>>,
    }

    impl QueueApi {
        fn returning(result: Result<Vec<Dispute>, AppError>) -> Self {
            Self {
                response: Mutex::new(Some(result)),
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    impl AdminApi for QueueApi {
        async fn list_disputes(&self, query: &DisputeQuery) -> Result<Vec<Dispute>, AppError> {
            self.queries.lock().unwrap().push(query.clone());
            self.response.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn bulk_action(&self, _request: &BulkActionRequest) -> Result<(), AppError> {
            Ok(())
        }

        async fn notify_user(&self, _user_id: &str, _request: &NotifyUserRequest) -> Result<(), AppError> {
            Ok(())
        }

        async fn export_users(&self) -> Result<Vec<u8>, AppError> {
            Ok(Vec::new())
        }
    }

    fn dispute(id: &str, priority: &str) -> Dispute {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "type": "payment",
            "status": "filed",
            "priority": priority,
        }))
        .unwrap()
    }

    #[test]
    fn loaded_disputes_are_sorted_by_priority() {
        let api = QueueApi::returning(Ok(vec![
            dispute("a", "low"),
            dispute("b", "mystery"),
            dispute("c", "urgent"),
            dispute("d", "low"),
        ]));
        let list = block_on(load_disputes(&api, &DisputeQuery::default(), DisputeSort::Priority)).unwrap();
        let order: Vec<&str> = list.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn failed_load_keeps_previous_list() {
        let mut state = ListState::default();
        state.finish(Ok(vec![dispute("keep", "high")]));

        let api = QueueApi::returning(Err(AppError::network("offline")));
        state.begin();
        let result = block_on(load_disputes(&api, &DisputeQuery::default(), DisputeSort::Date));
        let err = state.finish(result).unwrap();

        assert_eq!(err.message_or(LOAD_FAILED), LOAD_FAILED);
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].id, "keep");
    }
}
