//! First-visit cookie consent banner.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::util::cookie_consent::{self, Consent};

#[component]
pub fn CookieBanner() -> impl IntoView {
    // Hidden until hydrated so SSR output never depends on localStorage.
    let visible = RwSignal::new(false);
    Effect::new(move || visible.set(cookie_consent::banner_visible(cookie_consent::read_consent())));

    let on_accept = move |_| {
        cookie_consent::accept_all();
        visible.set(false);
    };
    let on_dismiss = move |_| {
        cookie_consent::record_consent(Consent::Dismissed);
        visible.set(false);
    };

    view! {
        <Show when=move || visible.get()>
            <div class="cookie-banner" role="dialog" aria-label="Consentimento de cookies">
                <p>
                    "Usamos cookies para melhorar sua experiência. Saiba mais na nossa "
                    <A href="/cookies">"política de cookies"</A>
                    "."
                </p>
                <div class="cookie-banner__actions">
                    <button class="button button--ghost" on:click=on_dismiss>"Fechar"</button>
                    <button class="button button--primary" on:click=on_accept>"Aceitar todos"</button>
                </div>
            </div>
        </Show>
    }
}
