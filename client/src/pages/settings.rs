//! Settings page: theme preference.

use leptos::prelude::*;

use crate::components::dashboard_nav::DashboardNav;
use crate::util::theme::{self, Theme};

#[component]
pub fn SettingsPage() -> impl IntoView {
    let current = RwSignal::new(Theme::Auto);
    // Read after hydration so the server render stays deterministic.
    Effect::new(move || current.set(theme::read_preference()));

    let on_change = move |ev: leptos::ev::Event| {
        let selected = Theme::parse(&event_target_value(&ev));
        theme::set(selected);
        current.set(selected);
    };

    view! {
        <DashboardNav/>
        <main class="settings">
            <h1>"Configurações"</h1>
            <section class="settings__section">
                <label for="theme">"Tema"</label>
                <select id="theme" class="auth-input" on:change=on_change prop:value=move || current.get().as_str()>
                    {Theme::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </section>
        </main>
    }
}
