//! Message list shared by the client and supervisor chat pages.

use leptos::prelude::*;

use crate::state::chat::ChatState;

#[component]
pub fn ChatLog(chat: RwSignal<ChatState>) -> impl IntoView {
    view! {
        <div class="chat-log">
            <For
                each=move || chat.get().messages
                key=|m| m.id
                children=move |m| {
                    view! {
                        <div class=m.kind.css_class()>
                            {m.sender_name.clone().map(|s| view! { <span class="chat-message__sender">{s}</span> })}
                            <p class="chat-message__text">{m.message.clone()}</p>
                            <span class="chat-message__time">{m.time.clone()}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Text box with a send button; `on_send` receives the trimmed draft.
#[component]
pub fn ChatComposer(
    #[prop(into)] placeholder: String,
    on_send: impl Fn(String) + Clone + Send + Sync + 'static,
) -> impl IntoView {
    let draft = RwSignal::new(String::new());
    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = draft.get_untracked().trim().to_owned();
        if text.is_empty() {
            return;
        }
        on_send(text);
        draft.set(String::new());
    };

    view! {
        <form class="chat-composer" on:submit=submit>
            <input
                class="chat-composer__input"
                placeholder=placeholder
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button class="button button--primary" type="submit" disabled=move || draft.with(|d| d.trim().is_empty())>
                "Enviar"
            </button>
        </form>
    }
}
