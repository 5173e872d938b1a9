//! Supervisor side of the support chat. An optional `:session_id` route
//! parameter attaches the view to an existing conversation.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::chat_log::{ChatComposer, ChatLog};
use crate::components::dashboard_nav::DashboardNav;
use crate::state::auth::AuthState;
use crate::state::chat::{ChatState, MessageKind};
use crate::util::browser::clock_label;

#[component]
pub fn ChatSupervisorPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let params = use_params_map();

    Effect::new(move || {
        let Some(id) = params.with(|p| p.get("session_id")).filter(|id| !id.is_empty()) else {
            return;
        };
        if chat.with_untracked(|c| c.session_id.as_deref() == Some(id.as_str())) {
            return;
        }
        chat.update(|c| {
            c.attach(id);
            c.push(MessageKind::System, "Supervisor entrou na conversa.", clock_label(), None);
        });
    });

    let send = move |text: String| {
        let sender = auth.with_untracked(AuthState::display_name);
        chat.update(|c| {
            c.push(MessageKind::Supervisor, &text, clock_label(), sender);
        });
    };

    view! {
        <DashboardNav/>
        <main class="chat chat--supervisor">
            <header class="chat__header">
                <h1>"Atendimento"</h1>
                <span class="chat__ticket">{move || chat.with(ChatState::session_label)}</span>
            </header>
            <Show
                when=move || chat.with(|c| c.session_id.is_some())
                fallback=|| view! { <p class="chat__empty">"Nenhuma conversa selecionada."</p> }
            >
                <ChatLog chat=chat/>
                <ChatComposer placeholder="Responder ao cliente..." on_send=send/>
            </Show>
        </main>
    }
}
