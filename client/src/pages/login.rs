//! Login page: e-mail + password through the backend, or Google OAuth.
//!
//! Successful sign-in needs no explicit navigation; the surrounding
//! `GuestRoute` sends the visitor to their role's landing page as soon as
//! the profile lands in the auth state.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::notice_tray::{notify_error, notify_success};
use crate::components::site_footer::SiteFooter;
use crate::net::types::{OAuthProvider, USER_LANDING};
use crate::state::auth_store::AuthStore;
use crate::state::notice::NoticeState;
use crate::util::browser;

fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Preencha e-mail e senha.");
    }
    if !email.contains('@') {
        return Err("Informe um e-mail válido.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<AuthStore>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let login_store = store.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        info.set(String::new());
        busy.set(true);

        let store = login_store.clone();
        leptos::task::spawn_local(async move {
            match store.sign_in(&email_value, &password_value).await {
                Ok(_) => notify_success(notices, "Login realizado com sucesso!", None),
                Err(e) => notify_error(notices, "Erro ao fazer login", e.to_string()),
            }
            busy.set(false);
        });
    };

    let on_google = move |_: leptos::ev::MouseEvent| {
        let store = store.clone();
        leptos::task::spawn_local(async move {
            let redirect_to = format!("{}{USER_LANDING}", browser::origin());
            if let Err(e) = store.sign_in_with_provider(OAuthProvider::Google, &redirect_to).await {
                notify_error(notices, "Erro ao entrar com Google", e.to_string());
            }
        });
    };

    view! {
        <main class="auth-page">
            <div class="auth-card">
                <h1>"Entrar"</h1>
                <p class="auth-card__subtitle">"Acesse sua conta Opty"</p>
                <form class="auth-form" on:submit=on_submit>
                    <label for="email">"E-mail"</label>
                    <input
                        id="email"
                        class="auth-input"
                        type="email"
                        autocomplete="email"
                        placeholder="voce@exemplo.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="password">"Senha"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <A href="/forgot-password" attr:class="auth-form__link">"Esqueceu a senha?"</A>
                    <button class="button button--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <div class="auth-divider">"ou"</div>
                <button class="button button--outline" on:click=on_google>"Continuar com Google"</button>
                <p class="auth-card__footer">
                    "Não tem uma conta? "
                    <A href="/register">"Cadastre-se"</A>
                </p>
            </div>
        </main>
        <SiteFooter/>
    }
}
