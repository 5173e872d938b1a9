//! First-run walkthrough for new users.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::dashboard_nav::DashboardNav;

const STEPS: [(&str, &str); 3] = [
    ("Complete seu perfil", "Adicione telefone e data de nascimento para recomendações melhores."),
    ("Faça sua primeira busca", "Compare preços e encontre as melhores ofertas."),
    ("Fale com o suporte", "Nossa equipe está disponível pelo chat sempre que precisar."),
];

#[component]
pub fn OnboardingPage() -> impl IntoView {
    view! {
        <DashboardNav/>
        <main class="onboarding">
            <h1>"Bem-vindo ao Opty"</h1>
            <ol class="onboarding__steps">
                {STEPS
                    .iter()
                    .map(|(title, body)| view! {
                        <li class="onboarding__step">
                            <h2>{*title}</h2>
                            <p>{*body}</p>
                        </li>
                    })
                    .collect_view()}
            </ol>
            <A href="/dashboard" attr:class="button button--primary">"Começar"</A>
        </main>
    }
}
