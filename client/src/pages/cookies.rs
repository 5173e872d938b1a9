//! Cookie policy with per-category preferences.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::notice_tray::notify_success;
use crate::components::site_footer::SiteFooter;
use crate::state::notice::NoticeState;
use crate::util::cookie_consent::{self, Consent, CookiePrefs};

#[component]
pub fn CookiesPage() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();
    let prefs = RwSignal::new(CookiePrefs::default());
    Effect::new(move || prefs.set(cookie_consent::read_prefs()));

    let on_save = move |_: leptos::ev::MouseEvent| {
        cookie_consent::save_prefs(&prefs.get_untracked());
        cookie_consent::record_consent(Consent::Accepted);
        notify_success(notices, "Preferências salvas", None);
    };

    view! {
        <header class="site-header">
            <A href="/" attr:class="site-header__brand">"Opty"</A>
        </header>
        <main class="info-page">
            <h1>"Política de Cookies"</h1>
            <p>"Cookies essenciais são necessários para o funcionamento do site e estão sempre ativos."</p>
            <ul class="cookie-prefs">
                <li>
                    <label>
                        <input type="checkbox" checked=true disabled=true/>
                        "Essenciais"
                    </label>
                </li>
                <li>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || prefs.with(|p| p.functional)
                            on:change=move |ev| prefs.update(|p| p.functional = event_target_checked(&ev))
                        />
                        "Funcionais"
                    </label>
                </li>
                <li>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || prefs.with(|p| p.analytics)
                            on:change=move |ev| prefs.update(|p| p.analytics = event_target_checked(&ev))
                        />
                        "Analíticos"
                    </label>
                </li>
                <li>
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || prefs.with(|p| p.marketing)
                            on:change=move |ev| prefs.update(|p| p.marketing = event_target_checked(&ev))
                        />
                        "Marketing"
                    </label>
                </li>
            </ul>
            <button class="button button--primary" on:click=on_save>"Salvar preferências"</button>
        </main>
        <SiteFooter/>
    }
}
