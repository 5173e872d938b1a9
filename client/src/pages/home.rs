//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::site_footer::SiteFooter;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <header class="site-header">
            <A href="/" attr:class="site-header__brand">"Opty"</A>
            <nav class="site-header__actions">
                <A href="/login" attr:class="button button--ghost">"Entrar"</A>
                <A href="/register" attr:class="button button--primary">"Criar conta"</A>
            </nav>
        </header>
        <main class="hero">
            <h1 class="hero__title">"Compare preços e economize com o Opty"</h1>
            <p class="hero__subtitle">
                "Encontre as melhores ofertas e fale com nossa equipe sempre que precisar."
            </p>
            <A href="/register" attr:class="button button--primary button--lg">"Começar agora"</A>
        </main>
        <SiteFooter/>
    }
}
