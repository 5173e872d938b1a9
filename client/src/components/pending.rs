//! Neutral full-screen spinner shown while a guard is unresolved.

use leptos::prelude::*;

#[component]
pub fn PendingSpinner() -> impl IntoView {
    view! {
        <div class="pending" role="status" aria-live="polite">
            <div class="pending__spinner"></div>
            <span class="visually-hidden">"Carregando..."</span>
        </div>
    }
}
