//! Account creation page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::components::notice_tray::{notify_error, notify_success};
use crate::components::site_footer::SiteFooter;
use crate::net::types::RegisterRequest;
use crate::state::auth_store::AuthStore;
use crate::state::notice::NoticeState;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct RegisterForm {
    name: String,
    email: String,
    phone: String,
    birthday: String,
    password: String,
    confirm_password: String,
    accept_terms: bool,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

impl RegisterForm {
    fn validate(&self) -> Result<RegisterRequest, &'static str> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err("Preencha nome, e-mail e senha.");
        }
        if self.password != self.confirm_password {
            return Err("As senhas não coincidem.");
        }
        if !self.accept_terms {
            return Err("Você deve aceitar os termos de uso.");
        }
        Ok(RegisterRequest {
            email: email.to_owned(),
            password: self.password.clone(),
            name: name.to_owned(),
            phone: non_blank(&self.phone),
            birthday: non_blank(&self.birthday),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    fn label(self) -> &'static str {
        match self {
            Self::Weak => "Fraca",
            Self::Medium => "Média",
            Self::Strong => "Forte",
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            Self::Weak => "strength strength--weak",
            Self::Medium => "strength strength--medium",
            Self::Strong => "strength strength--strong",
        }
    }
}

/// One point each for length >= 8, mixed case, a digit and a symbol.
fn password_strength(password: &str) -> Option<PasswordStrength> {
    if password.is_empty() {
        return None;
    }
    let has = |pred: fn(char) -> bool| password.chars().any(pred);
    let score = [
        password.chars().count() >= 8,
        has(char::is_lowercase) && has(char::is_uppercase),
        has(|c| c.is_ascii_digit()),
        has(|c| !c.is_alphanumeric()),
    ]
    .into_iter()
    .filter(|hit| *hit)
    .count();
    Some(match score {
        0 | 1 => PasswordStrength::Weak,
        2 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = expect_context::<AuthStore>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();
    let form = RwSignal::new(RegisterForm::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let req = match form.with(RegisterForm::validate) {
            Ok(req) => req,
            Err(msg) => {
                notify_error(notices, "Erro", msg);
                return;
            }
        };
        busy.set(true);

        let store = store.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match store.sign_up(&req).await {
                Ok(_) => {
                    notify_success(
                        notices,
                        "Conta criada com sucesso!",
                        Some("Bem-vindo ao Opty. Verifique seu e-mail para confirmar sua conta.".to_owned()),
                    );
                    navigate("/login", NavigateOptions::default());
                }
                Err(e) => notify_error(notices, "Erro ao criar conta", e.to_string()),
            }
            busy.set(false);
        });
    };

    let strength = Memo::new(move |_| form.with(|f| password_strength(&f.password)));

    view! {
        <main class="auth-page">
            <div class="auth-card">
                <h1>"Criar conta"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <label for="name">"Nome completo"</label>
                    <input
                        id="name"
                        class="auth-input"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <label for="email">"E-mail"</label>
                    <input
                        id="email"
                        class="auth-input"
                        type="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <label for="phone">"Telefone (opcional)"</label>
                    <input
                        id="phone"
                        class="auth-input"
                        type="tel"
                        prop:value=move || form.with(|f| f.phone.clone())
                        on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                    />
                    <label for="birthday">"Data de nascimento (opcional)"</label>
                    <input
                        id="birthday"
                        class="auth-input"
                        type="date"
                        prop:value=move || form.with(|f| f.birthday.clone())
                        on:input=move |ev| form.update(|f| f.birthday = event_target_value(&ev))
                    />
                    <label for="password">"Senha"</label>
                    <input
                        id="password"
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    {move || strength.get().map(|s| view! { <span class=s.css_class()>"Força: " {s.label()}</span> })}
                    <label for="confirm-password">"Confirmar senha"</label>
                    <input
                        id="confirm-password"
                        class="auth-input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || form.with(|f| f.confirm_password.clone())
                        on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                    />
                    <label class="auth-form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.accept_terms)
                            on:change=move |ev| form.update(|f| f.accept_terms = event_target_checked(&ev))
                        />
                        "Li e aceito os "
                        <A href="/termos">"termos de uso"</A>
                    </label>
                    <button class="button button--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Criando conta..." } else { "Criar conta" }}
                    </button>
                </form>
                <p class="auth-card__footer">
                    "Já tem uma conta? "
                    <A href="/login">"Entrar"</A>
                </p>
            </div>
        </main>
        <SiteFooter/>
    }
}
