use admin_client::AdminService;
use dioxus::prelude::*;

mod auth;
mod components;
mod download;
mod feedback;
mod format_helpers;
mod routes;

use auth::AuthState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("failed to install logger: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| admin_client::config::feature_flags().clone());

    // Restore whatever a previous visit left in storage before any route renders.
    let stored = use_hook(auth::load_stored_session);
    let restored_user = stored.as_ref().map(|s| s.user.clone());
    use_context_provider(move || AuthState::new(restored_user));

    use_context_provider(move || {
        let host = auth::page_host();
        let api = AdminService::from_config(host.as_deref())
            .with_session_listener(auth::session_persister());
        api.restore_session(stored.map(|s| s.session));
        tracing::info!(base_url = api.base_url(), "Admin API client ready");
        api
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        shared_ui::ToastProvider {
            Router::<Route> {}
        }
    }
}
