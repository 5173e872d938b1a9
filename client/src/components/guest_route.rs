//! Guard for pages only anonymous visitors should see.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::pending::PendingSpinner;
use crate::state::auth::AuthState;
use crate::util::guard::{GuardDecision, guest_decision, install_guard_redirect};

/// Render `children` for visitors without a session; send signed-in users
/// to their role's landing page.
#[component]
pub fn GuestRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let decision = Memo::new(move |_| guest_decision(&auth.get()));
    install_guard_redirect(decision, use_navigate());

    move || match decision.get() {
        GuardDecision::Allow => children(),
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! { <PendingSpinner/> }.into_any(),
    }
}
