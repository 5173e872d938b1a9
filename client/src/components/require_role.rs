//! Guard for pages restricted to one role.
//!
//! DESIGN
//! ======
//! The denial latch lives in a `StoredValue` owned by this component
//! instance, so the "access denied" notice fires at most once per mount and
//! fires again only after the guard is mounted anew.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::pending::PendingSpinner;
use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::state::notice::NoticeState;
use crate::util::guard::{
    ACCESS_DENIED, ACCESS_DENIED_DETAIL, DEFAULT_ROLE_REDIRECT, DenialLatch, GuardDecision, install_guard_redirect,
    role_decision,
};

#[component]
pub fn RequireRole(
    role: Role,
    #[prop(default = DEFAULT_ROLE_REDIRECT)] redirect_to: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let latch = StoredValue::new(DenialLatch::default());

    Effect::new(move || {
        let state = auth.get();
        let notify = latch.try_update_value(|l| l.should_notify(&state, role)).unwrap_or(false);
        if notify {
            notices.update(|n| {
                n.error(ACCESS_DENIED, Some(ACCESS_DENIED_DETAIL.to_owned()));
            });
        }
    });

    let decision = Memo::new(move |_| role_decision(&auth.get(), role, redirect_to));
    install_guard_redirect(decision, use_navigate());

    move || match decision.get() {
        GuardDecision::Allow => children(),
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! { <PendingSpinner/> }.into_any(),
    }
}
