//! Toast stack for `NoticeState`.

use leptos::prelude::*;

use crate::state::notice::NoticeState;

/// Visible time before a notice dismisses itself.
#[cfg(feature = "hydrate")]
const AUTO_DISMISS_MS: u32 = 5_000;

#[component]
pub fn NoticeTray() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-tray" aria-live="assertive">
            <For
                each=move || notices.get().notices
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;

                    #[cfg(feature = "hydrate")]
                    leptos::task::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
                        notices.update(|n| n.dismiss(id));
                    });

                    view! {
                        <div class=notice.level.css_class() role="alert">
                            <div class="notice__body">
                                <strong class="notice__title">{notice.title.clone()}</strong>
                                {notice.description.clone().map(|d| view! { <p class="notice__description">{d}</p> })}
                            </div>
                            <button
                                class="notice__close"
                                aria-label="Fechar"
                                on:click=move |_| notices.update(|n| n.dismiss(id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

/// Push an error notice from any page.
pub fn notify_error(notices: RwSignal<NoticeState>, title: &str, description: impl Into<String>) {
    let description = description.into();
    notices.update(|n| {
        n.error(title, Some(description));
    });
}

/// Push a success notice from any page.
pub fn notify_success(notices: RwSignal<NoticeState>, title: &str, description: Option<String>) {
    notices.update(|n| {
        n.success(title, description);
    });
}
