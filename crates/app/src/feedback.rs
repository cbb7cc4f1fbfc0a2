//! Toast helpers shared by every view.

use dioxus::prelude::*;
use shared_types::AppError;
use shared_ui::{ToastOptions, Toasts};

use crate::auth::AuthState;
use crate::routes::Route;

pub fn success(toast: Toasts, message: impl Into<String>) {
    toast.success(message.into(), ToastOptions::new());
}

/// Show a failure. Validation errors keep their own text, server errors
/// show the server's message when it sent one, everything else shows
/// `fallback`. An expired session sends the user back to sign in.
pub fn failure(toast: Toasts, err: &AppError, fallback: &str) {
    if err.is_unauthorized() {
        return session_expired(toast, err, fallback);
    }
    let message = match err.kind {
        shared_types::AppErrorKind::ValidationError => err.message.clone(),
        _ => err.message_or(fallback),
    };
    tracing::warn!(error = %err, "{fallback}");
    toast.error(message, ToastOptions::new());
}

/// Show `message` whatever the server said. Only an expired session is
/// handled differently.
pub fn fixed_failure(toast: Toasts, err: &AppError, message: &str) {
    if err.is_unauthorized() {
        return session_expired(toast, err, message);
    }
    tracing::warn!(error = %err, "{message}");
    toast.error(message.to_string(), ToastOptions::new());
}

fn session_expired(toast: Toasts, err: &AppError, fallback: &str) {
    if let Some(mut auth) = try_consume_context::<AuthState>() {
        auth.clear();
    }
    toast.error(err.message_or(fallback), ToastOptions::new());
    navigator().replace(Route::Login {});
}
