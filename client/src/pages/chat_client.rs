//! End-user support chat.

use leptos::prelude::*;

use crate::components::chat_log::{ChatComposer, ChatLog};
use crate::components::dashboard_nav::DashboardNav;
use crate::components::notice_tray::notify_error;
use crate::state::auth::AuthState;
use crate::state::chat::{ChatState, MessageKind};
use crate::state::notice::NoticeState;
use crate::util::browser::clock_label;

#[component]
pub fn ChatClientPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let start = move |_: leptos::ev::MouseEvent| {
        chat.update(|c| {
            c.connected = true;
            c.push(MessageKind::System, "Chat iniciado. Um supervisor entrará em breve.", clock_label(), None);
        });
    };

    let send = move |text: String| {
        if !chat.with_untracked(ChatState::has_supervisor) {
            notify_error(
                notices,
                "Supervisor não conectado",
                "Sua mensagem será enviada, mas o supervisor ainda não se conectou. Aguarde um momento.",
            );
        }
        let sender = auth.with_untracked(AuthState::display_name);
        chat.update(|c| {
            c.push(MessageKind::Client, &text, clock_label(), sender);
        });
    };

    let end = move |_: leptos::ev::MouseEvent| chat.update(ChatState::disconnect);

    view! {
        <DashboardNav/>
        <main class="chat chat--client">
            <Show
                when=move || chat.with(ChatState::is_active)
                fallback=move || {
                    view! {
                        <section class="chat__start">
                            <h1>"Bem-vindo ao Suporte Opty"</h1>
                            <p>"Converse com nossa equipe. Um supervisor responderá assim que possível."</p>
                            <button class="button button--primary" on:click=start>"Iniciar Chat"</button>
                        </section>
                    }
                }
            >
                <header class="chat__header">
                    <span class="chat__ticket">{move || chat.with(ChatState::session_label)}</span>
                    <span class="chat__status">
                        {move || if chat.with(ChatState::has_supervisor) { "Supervisor conectado" } else { "Aguardando supervisor" }}
                    </span>
                    <button class="button button--ghost" on:click=end>"Encerrar"</button>
                </header>
                <ChatLog chat=chat/>
                <ChatComposer placeholder="Digite sua mensagem..." on_send=send/>
            </Show>
        </main>
    }
}
