//! Static legal and informational pages.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::site_footer::SiteFooter;

#[component]
fn InfoPage(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <header class="site-header">
            <A href="/" attr:class="site-header__brand">"Opty"</A>
        </header>
        <main class="info-page">
            <h1>{title}</h1>
            {children()}
        </main>
        <SiteFooter/>
    }
}

#[component]
pub fn TermsPage() -> impl IntoView {
    view! {
        <InfoPage title="Termos de Uso">
            <p>"Ao usar o Opty você concorda com estes termos."</p>
            <h2>"Uso da plataforma"</h2>
            <p>"A conta é pessoal e intransferível. Você é responsável pelas informações fornecidas."</p>
            <h2>"Cancelamento"</h2>
            <p>"Você pode excluir sua conta a qualquer momento na página de perfil."</p>
        </InfoPage>
    }
}

#[component]
pub fn PrivacyPage() -> impl IntoView {
    view! {
        <InfoPage title="Política de Privacidade">
            <p>"Coletamos apenas os dados necessários para oferecer o serviço: nome, e-mail e, opcionalmente, telefone e data de nascimento."</p>
            <p>"Seus dados não são vendidos a terceiros. Você pode solicitar a exclusão a qualquer momento."</p>
        </InfoPage>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <InfoPage title="Sobre o Opty">
            <p>"O Opty ajuda você a comparar preços e encontrar as melhores ofertas, com suporte humano quando precisar."</p>
        </InfoPage>
    }
}
