//! Guard for pages that need any authenticated session.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::pending::PendingSpinner;
use crate::state::auth::AuthState;
use crate::util::guard::{GuardDecision, install_guard_redirect, protected_decision};

/// Render `children` once a session exists; otherwise go to `/login`.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let decision = Memo::new(move |_| protected_decision(&auth.get()));
    install_guard_redirect(decision, use_navigate());

    move || match decision.get() {
        GuardDecision::Allow => children(),
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! { <PendingSpinner/> }.into_any(),
    }
}
