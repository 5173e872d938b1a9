//! New-password page reached from the recovery e-mail link.
//!
//! The identity client turns the link's URL fragment into a recovery
//! session on first use, so this page only has to call `update_password`.

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notice_tray::{notify_error, notify_success};
use crate::state::auth_store::AuthStore;
use crate::state::notice::NoticeState;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Returns `(title, description)` for the first failed rule.
fn validate_new_password(password: &str, confirmation: &str) -> Result<(), (&'static str, &'static str)> {
    if password != confirmation {
        return Err(("Erro", "As senhas não coincidem."));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(("Senha muito curta", "Mínimo de 6 caracteres."));
    }
    Ok(())
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let store = expect_context::<AuthStore>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let new_password = password.get();
        if let Err((title, description)) = validate_new_password(&new_password, &confirmation.get()) {
            notify_error(notices, title, description);
            return;
        }
        busy.set(true);

        let store = store.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match store.update_password(&new_password).await {
                Ok(()) => {
                    notify_success(notices, "Senha atualizada!", Some("Faça login com sua nova senha.".to_owned()));
                    if let Err(e) = store.sign_out().await {
                        log::warn!("sign-out after password reset failed: {e}");
                    }
                    navigate("/login", NavigateOptions::default());
                }
                Err(e) => notify_error(notices, "Erro", e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <main class="auth-page">
            <div class="auth-card">
                <h1>"Redefinir Senha"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <label for="password">"Nova senha"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label for="confirmation">"Confirmar senha"</label>
                    <input
                        id="confirmation"
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || confirmation.get()
                        on:input=move |ev| confirmation.set(event_target_value(&ev))
                    />
                    <button class="button button--primary" type="submit" disabled=move || busy.get()>
                        "Salvar nova senha"
                    </button>
                </form>
            </div>
        </main>
    }
}
