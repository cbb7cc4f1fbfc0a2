use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::AppError;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The `{success, data, message}` wrapper every admin endpoint responds with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Unwrap the payload. `success: false` becomes a `BadRequest` carrying
    /// the envelope's message (empty when the server sent none).
    pub fn into_result(self) -> Result<Option<T>, AppError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(AppError::bad_request(self.message.unwrap_or_default()))
        }
    }
}

/// Decode a list payload that is either a bare array or an object holding the
/// array under `key`. A missing list decodes to empty.
pub fn list_from_data<T: DeserializeOwned>(
    data: Option<serde_json::Value>,
    key: &str,
) -> Result<Vec<T>, AppError> {
    match data {
        Some(serde_json::Value::Array(items)) => {
            Ok(serde_json::from_value(serde_json::Value::Array(items))?)
        }
        Some(serde_json::Value::Object(mut map)) => match map.remove(key) {
            Some(serde_json::Value::Null) | None => Ok(Vec::new()),
            Some(list) => Ok(serde_json::from_value(list)?),
        },
        _ => Ok(Vec::new()),
    }
}

// ---------------------------------------------------------------------------
// Shared references
// ---------------------------------------------------------------------------

/// A person nested inside another record (filer, owner, contractor, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserRef {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("Unknown")
    }
}

/// A project nested inside another record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// Query helpers
// ---------------------------------------------------------------------------

/// Select value meaning "no filter". Never sent to the server.
pub const ALL: &str = "all";

/// Query parameters in the order they are added.
pub type QueryParams = Vec<(&'static str, String)>;

/// Push `value` unless it is empty or the `"all"` sentinel.
pub fn push_selected(params: &mut QueryParams, key: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() && value != ALL {
        params.push((key, value.to_string()));
    }
}

/// Push an optional numeric parameter, formatting whole numbers without a fraction.
pub fn push_number(params: &mut QueryParams, key: &'static str, value: Option<f64>) {
    if let Some(v) = value {
        params.push((key, format_query_number(v)));
    }
}

pub fn format_query_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Trim `value` and reject it with `message` when nothing is left.
pub fn require_text(value: &str, message: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AppError::validation(message))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Body of every action that only carries a free-text reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonRequest {
    pub reason: String,
}

impl ReasonRequest {
    pub fn from_input(reason: &str) -> Result<Self, AppError> {
        Ok(Self {
            reason: require_text(reason, "Please provide a reason")?,
        })
    }
}

/// Case-insensitive substring test against any of `fields`.
pub fn matches_search<'a>(query: &str, fields: impl IntoIterator<Item = Option<&'a str>>) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    fields
        .into_iter()
        .flatten()
        .any(|f| f.to_lowercase().contains(&query))
}

/// Reporting window for metric endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Period {
    pub const ALL: [Period; 4] = [Period::Daily, Period::Weekly, Period::Monthly, Period::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
            Period::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Yearly => "Yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// A fetched list plus its loading flag.
///
/// A failed fetch leaves the previous items in place and hands the error back
/// to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    loaded: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            loaded: false,
        }
    }
}

impl<T> ListState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    pub fn finish(&mut self, result: Result<Vec<T>, AppError>) -> Option<AppError> {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.loaded = true;
                None
            }
            Err(err) => Some(err),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True until the first fetch settles, used to show skeleton rows.
    pub fn is_initial_load(&self) -> bool {
        self.loading && !self.loaded
    }
}

/// Render state of a metrics dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Empty,
    Loaded(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    /// Start a fetch. Loaded data stays on screen until the new result lands.
    pub fn begin(&mut self) {
        if !matches!(self, ViewState::Loaded(_)) {
            *self = ViewState::Loading;
        }
    }

    /// Apply a fetch result. A failure returns the error and only replaces a
    /// pending `Loading` state, never previously loaded data.
    pub fn finish(&mut self, result: Result<Option<T>, AppError>) -> Option<AppError> {
        match result {
            Ok(Some(data)) => {
                *self = ViewState::Loaded(data);
                None
            }
            Ok(None) => {
                *self = ViewState::Empty;
                None
            }
            Err(err) => {
                if matches!(self, ViewState::Loading) {
                    *self = ViewState::Empty;
                }
                Some(err)
            }
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn envelope_success_unwraps_data() {
        let env: ApiEnvelope<Row> =
            serde_json::from_value(json!({"success": true, "data": {"id": "a"}})).unwrap();
        assert_eq!(env.into_result().unwrap(), Some(Row { id: "a".into() }));
    }

    #[test]
    fn envelope_failure_carries_message() {
        let env: ApiEnvelope<Row> =
            serde_json::from_value(json!({"success": false, "message": "Not allowed"})).unwrap();
        let err = env.into_result().unwrap_err();
        assert_eq!(err.kind, crate::AppErrorKind::BadRequest);
        assert_eq!(err.message, "Not allowed");
    }

    #[test]
    fn envelope_with_null_data_is_none() {
        let env: ApiEnvelope<Row> =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert_eq!(env.into_result().unwrap(), None);
    }

    #[test]
    fn envelope_without_data_field_decodes_for_any_payload() {
        // Row has no Default impl.
        let env: ApiEnvelope<Row> = serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(env.data, None);
        assert_eq!(env.into_result().unwrap(), None);
    }

    #[test]
    fn list_from_bare_array() {
        let rows: Vec<Row> = list_from_data(Some(json!([{"id": "a"}, {"id": "b"}])), "disputes").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn list_from_keyed_object() {
        let rows: Vec<Row> =
            list_from_data(Some(json!({"disputes": [{"id": "a"}], "total": 1})), "disputes").unwrap();
        assert_eq!(rows, vec![Row { id: "a".into() }]);
    }

    #[test]
    fn list_from_missing_key_or_null_is_empty() {
        let rows: Vec<Row> = list_from_data(Some(json!({"total": 0})), "disputes").unwrap();
        assert!(rows.is_empty());
        let rows: Vec<Row> = list_from_data(None, "disputes").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn list_with_wrong_shape_is_decode_error() {
        let err = list_from_data::<Row>(Some(json!([{"name": "x"}])), "items").unwrap_err();
        assert_eq!(err.kind, crate::AppErrorKind::Decode);
    }

    #[test]
    fn push_selected_skips_all_and_empty() {
        let mut params = QueryParams::new();
        push_selected(&mut params, "status", "all");
        push_selected(&mut params, "type", "");
        push_selected(&mut params, "priority", "high");
        assert_eq!(params, vec![("priority", "high".to_string())]);
    }

    #[test]
    fn query_numbers_drop_whole_fraction() {
        assert_eq!(format_query_number(500.0), "500");
        assert_eq!(format_query_number(12.5), "12.5");
    }

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("  spam  ", "Please provide a reason").unwrap(), "spam");
        let err = require_text(" \t ", "Please provide a reason").unwrap_err();
        assert_eq!(err.kind, crate::AppErrorKind::ValidationError);
        assert_eq!(err.message, "Please provide a reason");
    }

    #[test]
    fn matches_search_is_case_insensitive() {
        assert!(matches_search("ROOF", [Some("Roof repair"), None]));
        assert!(!matches_search("plumb", [Some("Roof repair"), None]));
        assert!(matches_search("  ", [None]));
    }

    #[test]
    fn list_state_failure_keeps_previous_items() {
        let mut state = ListState::default();
        assert!(state.is_initial_load());
        assert!(state.finish(Ok(vec![1, 2, 3])).is_none());

        state.begin();
        let err = state.finish(Err(AppError::network("offline")));
        assert!(err.is_some());
        assert_eq!(state.items(), &[1, 2, 3]);
        assert!(!state.is_loading());
    }

    #[test]
    fn view_state_transitions() {
        let mut state: ViewState<u32> = ViewState::default();
        assert_eq!(state.finish(Ok(None)), None);
        assert_eq!(state, ViewState::Empty);

        state.begin();
        assert_eq!(state, ViewState::Loading);
        state.finish(Ok(Some(7)));
        assert_eq!(state.loaded(), Some(&7));

        state.begin();
        assert_eq!(state.loaded(), Some(&7));
        assert!(state.finish(Err(AppError::internal("boom"))).is_some());
        assert_eq!(state.loaded(), Some(&7));
    }

    #[test]
    fn failed_first_load_shows_empty() {
        let mut state: ViewState<u32> = ViewState::default();
        assert!(state.finish(Err(AppError::network("offline"))).is_some());
        assert_eq!(state, ViewState::Empty);
    }

    #[test]
    fn period_parse_and_serialize() {
        assert_eq!(Period::parse("weekly"), Some(Period::Weekly));
        assert_eq!(Period::parse("hourly"), None);
        assert_eq!(serde_json::to_string(&Period::Yearly).unwrap(), "\"yearly\"");
    }
}
