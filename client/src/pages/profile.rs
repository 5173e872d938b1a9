//! Profile editing and account deletion.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;

use crate::components::dashboard_nav::DashboardNav;
use crate::components::notice_tray::{notify_error, notify_success};
use crate::net::types::{ProfileUpdate, UserProfile};
use crate::state::auth::AuthState;
use crate::state::auth_store::AuthStore;
use crate::state::notice::NoticeState;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct ProfileForm {
    name: String,
    phone: String,
    birthday: String,
}

impl ProfileForm {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            birthday: profile.birthday.clone().unwrap_or_default(),
        }
    }

    /// Only fields that differ from `current` are sent.
    fn changes(&self, current: &UserProfile) -> Result<ProfileUpdate, &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("O nome não pode ficar vazio.");
        }
        let changed = |value: &str, existing: Option<&str>| {
            let value = value.trim();
            (value != existing.unwrap_or_default()).then(|| value.to_owned())
        };
        let update = ProfileUpdate {
            name: changed(name, Some(current.name.as_str())),
            phone: changed(&self.phone, current.phone.as_deref()),
            birthday: changed(&self.birthday, current.birthday.as_deref()),
            avatar_url: None,
        };
        if update.is_empty() {
            return Err("Nenhuma alteração para salvar.");
        }
        Ok(update)
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<AuthStore>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let form = RwSignal::new(ProfileForm::default());
    let confirm_delete = RwSignal::new(false);

    // Seed the form whenever a (new) profile arrives.
    Effect::new(move || {
        if let Some(profile) = auth.with(|s| s.profile.clone()) {
            form.set(ProfileForm::from_profile(&profile));
        }
    });

    let save_store = store.clone();
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = auth.with_untracked(|s| s.profile.clone()) else {
            return;
        };
        let update = match form.with_untracked(|f| f.changes(&current)) {
            Ok(update) => update,
            Err(msg) => {
                notify_error(notices, "Perfil", msg);
                return;
            }
        };
        let store = save_store.clone();
        leptos::task::spawn_local(async move {
            match store.update_profile(&update).await {
                Ok(_) => notify_success(notices, "Perfil atualizado!", None),
                Err(e) => notify_error(notices, "Erro ao atualizar perfil", e.to_string()),
            }
        });
    };

    let on_delete = move |_: leptos::ev::MouseEvent| {
        if !confirm_delete.get() {
            confirm_delete.set(true);
            return;
        }
        let store = store.clone();
        leptos::task::spawn_local(async move {
            match store.delete_account().await {
                Ok(()) => notify_success(notices, "Conta excluída", None),
                Err(e) => notify_error(notices, "Erro ao excluir conta", e.to_string()),
            }
        });
    };

    let email = move || auth.with(|s| s.profile.as_ref().map(|p| p.email.clone()).unwrap_or_default());

    view! {
        <DashboardNav/>
        <main class="profile">
            <h1>"Meu Perfil"</h1>
            <form class="profile__form" on:submit=on_save>
                <label>"E-mail"</label>
                <input class="auth-input" type="email" disabled=true prop:value=email/>
                <label for="name">"Nome"</label>
                <input
                    id="name"
                    class="auth-input"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
                <label for="phone">"Telefone"</label>
                <input
                    id="phone"
                    class="auth-input"
                    type="tel"
                    prop:value=move || form.with(|f| f.phone.clone())
                    on:input=move |ev| form.update(|f| f.phone = event_target_value(&ev))
                />
                <label for="birthday">"Data de nascimento"</label>
                <input
                    id="birthday"
                    class="auth-input"
                    type="date"
                    prop:value=move || form.with(|f| f.birthday.clone())
                    on:input=move |ev| form.update(|f| f.birthday = event_target_value(&ev))
                />
                <button class="button button--primary" type="submit" disabled=move || auth.with(|s| s.loading)>
                    "Salvar"
                </button>
            </form>
            <section class="profile__danger">
                <h2>"Excluir conta"</h2>
                <p>"Esta ação é permanente."</p>
                <button class="button button--danger" on:click=on_delete>
                    {move || if confirm_delete.get() { "Confirmar exclusão" } else { "Excluir minha conta" }}
                </button>
            </section>
        </main>
    }
}
