//! Landing spot for a session whose backend profile could not be loaded.
//! Offers a retry and a way out; once a profile arrives the user moves on
//! to their role's landing page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notice_tray::notify_error;
use crate::state::auth::AuthState;
use crate::state::auth_store::AuthStore;
use crate::state::notice::NoticeState;

#[component]
pub fn ProfileUnavailablePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<AuthStore>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let retrying = RwSignal::new(false);

    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(role) = auth.with(AuthState::role) {
            navigate(role.landing_path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let retry_store = store.clone();
    let on_retry = move |_: leptos::ev::MouseEvent| {
        let store = retry_store.clone();
        retrying.set(true);
        leptos::task::spawn_local(async move {
            if store.refresh_profile().await.is_none() {
                notify_error(notices, "Perfil indisponível", "Não foi possível carregar seu perfil. Tente novamente.");
            }
            retrying.set(false);
        });
    };

    let on_sign_out = move |_: leptos::ev::MouseEvent| {
        let store = store.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = store.sign_out().await {
                notify_error(notices, "Erro ao fazer logout", e.to_string());
            }
        });
    };

    view! {
        <main class="not-found">
            <h1>"Perfil indisponível"</h1>
            <p>"Não conseguimos carregar os dados da sua conta."</p>
            <div class="not-found__actions">
                <button class="button button--primary" on:click=on_retry disabled=move || retrying.get()>
                    "Tentar novamente"
                </button>
                <button class="button button--ghost" on:click=on_sign_out>"Sair"</button>
            </div>
        </main>
    }
}
