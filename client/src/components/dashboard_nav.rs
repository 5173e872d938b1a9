//! Top navigation for signed-in pages with the account menu.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::notice_tray::{notify_error, notify_success};
use crate::net::types::{Role, SUPERVISOR_LANDING, USER_LANDING};
use crate::state::auth::AuthState;
use crate::state::auth_store::AuthStore;
use crate::state::notice::NoticeState;

#[component]
pub fn DashboardNav() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<AuthStore>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let menu_open = RwSignal::new(false);

    let user_name = move || auth.with(|s| s.display_name()).unwrap_or_else(|| "Usuário".to_owned());
    let is_supervisor = move || auth.with(|s| s.role() == Some(Role::Supervisor));
    let home = move || if is_supervisor() { SUPERVISOR_LANDING.to_owned() } else { USER_LANDING.to_owned() };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        menu_open.set(false);
        let store = store.clone();
        // Guarded pages redirect to /login once the session is cleared.
        leptos::task::spawn_local(async move {
            match store.sign_out().await {
                Ok(()) => notify_success(notices, "Logout realizado!", Some("Até logo!".to_owned())),
                Err(e) => notify_error(notices, "Erro ao fazer logout", e.to_string()),
            }
        });
    };

    view! {
        <header class="dashboard-nav">
            <nav class="dashboard-nav__inner">
                <A href=home attr:class="dashboard-nav__brand">"Opty"</A>
                <button
                    class="dashboard-nav__user"
                    aria-label="Abrir menu"
                    on:click=move |_| menu_open.update(|open| *open = !*open)
                >
                    {user_name}
                </button>
                <Show when=move || menu_open.get()>
                    <div class="dashboard-nav__menu">
                        <Show when=move || !is_supervisor()>
                            <A href="/perfil">"Meu Perfil"</A>
                            <A href="/chat/cliente">"Chat Suporte"</A>
                        </Show>
                        <A href="/configuracoes">"Configurações"</A>
                        <button class="dashboard-nav__logout" on:click=on_logout.clone()>"Sair"</button>
                    </div>
                </Show>
            </nav>
        </header>
    }
}
