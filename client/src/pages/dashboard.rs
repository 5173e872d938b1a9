//! Signed-in home for regular users.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::dashboard_nav::DashboardNav;
use crate::state::auth::AuthState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let greeting = move || {
        auth.with(|s| s.display_name())
            .map_or_else(|| "Olá!".to_owned(), |name| format!("Olá, {name}!"))
    };

    view! {
        <DashboardNav/>
        <main class="dashboard">
            <h1 class="dashboard__title">{greeting}</h1>
            <p class="dashboard__subtitle">"O que você quer fazer hoje?"</p>
            <div class="dashboard__cards">
                <A href="/resultados" attr:class="dashboard-card">
                    <h2>"Resultados"</h2>
                    <p>"Veja suas comparações e ofertas salvas."</p>
                </A>
                <A href="/chat/cliente" attr:class="dashboard-card">
                    <h2>"Suporte"</h2>
                    <p>"Converse com nossa equipe."</p>
                </A>
                <A href="/perfil" attr:class="dashboard-card">
                    <h2>"Meu Perfil"</h2>
                    <p>"Atualize seus dados pessoais."</p>
                </A>
            </div>
        </main>
    }
}
