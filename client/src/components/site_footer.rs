//! Public footer with legal links.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn SiteFooter() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <nav class="site-footer__links">
                <A href="/sobre">"Sobre"</A>
                <A href="/termos">"Termos de Uso"</A>
                <A href="/privacidade">"Privacidade"</A>
                <A href="/cookies">"Cookies"</A>
            </nav>
            <p class="site-footer__copy">"© Opty"</p>
        </footer>
    }
}
