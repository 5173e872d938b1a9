//! Password recovery request page.

#[cfg(test)]
#[path = "forgot_password_test.rs"]
mod forgot_password_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::notice_tray::notify_error;
use crate::components::site_footer::SiteFooter;
use crate::state::auth_store::AuthStore;
use crate::state::notice::NoticeState;

fn validate_recovery_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Informe seu e-mail.");
    }
    if !email.contains('@') {
        return Err("Informe um e-mail válido.");
    }
    Ok(email.to_owned())
}

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let store = expect_context::<AuthStore>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let email = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let sent = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match validate_recovery_email(&email.get()) {
            Ok(value) => value,
            Err(msg) => {
                notify_error(notices, "Erro", msg);
                return;
            }
        };
        busy.set(true);

        let store = store.clone();
        leptos::task::spawn_local(async move {
            match store.forgot_password(&email_value).await {
                Ok(message) => sent.set(Some(message)),
                Err(e) => notify_error(notices, "Erro ao enviar", e.to_string()),
            }
            busy.set(false);
        });
    };

    view! {
        <main class="auth-page">
            <div class="auth-card">
                <h1>"Recuperar Senha"</h1>
                <p class="auth-card__subtitle">"Informe seu e-mail para receber instruções de recuperação"</p>
                <Show
                    when=move || sent.get().is_none()
                    fallback=move || view! {
                        <p class="auth-message auth-message--success">{move || sent.get().unwrap_or_default()}</p>
                        <A href="/login">"Voltar para o login"</A>
                    }
                >
                    <form class="auth-form" on:submit=on_submit.clone()>
                        <label for="email">"E-mail"</label>
                        <input
                            id="email"
                            class="auth-input"
                            type="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <button class="button button--primary" type="submit" disabled=move || busy.get()>
                            "Enviar"
                        </button>
                    </form>
                </Show>
            </div>
        </main>
        <SiteFooter/>
    }
}
