use dioxus::prelude::*;
use shared_types::AppErrorKind;
use shared_ui::{Button, Card, CardContent, CardHeader, Input};

use crate::auth::{use_api, use_auth};
use crate::routes::Route;

const CONSOLE_DENIED: &str = "This account does not have access to the admin console.";

/// Email and password sign-in. Only admin-tier accounts get past it.
#[component]
pub fn Login() -> Element {
    let api = use_api();
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    let signed_in = auth.is_authenticated() && api.is_authenticated();
    use_effect(move || {
        if signed_in {
            navigator().replace(Route::Overview {});
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        async move {
            loading.set(true);
            error_msg.set(None);

            match api.login(email().trim(), &password()).await {
                Ok(resp) if resp.user.can_use_console() => {
                    tracing::info!(user = %resp.user.id, role = %resp.user.role_code, "Admin signed in");
                    auth.set_user(resp.user);
                    navigator().replace(Route::Overview {});
                }
                Ok(resp) => {
                    tracing::warn!(user = %resp.user.id, "Sign-in refused for non-admin role");
                    api.logout();
                    error_msg.set(Some(CONSOLE_DENIED.to_string()));
                }
                Err(e) => {
                    let message = match e.kind {
                        AppErrorKind::Unauthorized => e.message_or("Invalid email or password"),
                        _ => e.message_or("Unable to sign in. Please try again."),
                    };
                    error_msg.set(Some(message));
                }
            }
            loading.set(false);
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    title: "Sign in",
                    description: "Administrator access to the marketplace console",
                }
                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", "{err}" }
                    }
                    form { class: "auth-form", onsubmit: handle_login,
                        Input {
                            label: "Email",
                            input_type: "email",
                            required: true,
                            value: email(),
                            on_input: move |e: FormEvent| email.set(e.value()),
                        }
                        Input {
                            label: "Password",
                            input_type: "password",
                            required: true,
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                        }
                        Button {
                            submit: true,
                            loading: loading(),
                            loading_text: "Signing in...",
                            "Sign in"
                        }
                    }
                }
            }
        }
    }
}
