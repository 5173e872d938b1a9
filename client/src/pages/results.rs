//! Saved comparison results for the current user.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::dashboard_nav::DashboardNav;

#[component]
pub fn ResultsPage() -> impl IntoView {
    view! {
        <DashboardNav/>
        <main class="results">
            <h1>"Resultados"</h1>
            <div class="results__empty">
                <p>"Você ainda não tem resultados salvos."</p>
                <A href="/dashboard" attr:class="button button--outline">"Voltar ao painel"</A>
            </div>
        </main>
    }
}
