//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` wires the identity provider and the profile backend into one
//! `AuthStore`, mirrors its state into an `RwSignal<AuthState>` for the
//! guards, and lays out the route table. The store's event loop only runs
//! in the browser; server renders see the initial loading state.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    OptionalParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::cookie_banner::CookieBanner;
use crate::components::guest_route::GuestRoute;
use crate::components::notice_tray::NoticeTray;
use crate::components::protected_route::ProtectedRoute;
use crate::components::require_role::RequireRole;
use crate::config::AppConfig;
use crate::net::api::HttpProfileClient;
use crate::net::identity::{IdentityProvider, SupabaseAuth};
use crate::net::types::Role;
use crate::pages::{
    chat_client::ChatClientPage,
    chat_supervisor::ChatSupervisorPage,
    cookies::CookiesPage,
    dashboard::DashboardPage,
    forgot_password::ForgotPasswordPage,
    home::HomePage,
    legal::{AboutPage, PrivacyPage, TermsPage},
    login::LoginPage,
    not_found::NotFoundPage,
    onboarding::OnboardingPage,
    profile::ProfilePage,
    profile_unavailable::ProfileUnavailablePage,
    register::RegisterPage,
    reset_password::ResetPasswordPage,
    results::ResultsPage,
    settings::SettingsPage,
};
use crate::state::{auth::AuthState, auth_store::AuthStore, chat::ChatState, notice::NoticeState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

fn build_store(config: &AppConfig) -> AuthStore {
    let provider: Arc<dyn IdentityProvider> = Arc::new(SupabaseAuth::new(&config.supabase_url, &config.supabase_anon_key));
    let backend = Arc::new(HttpProfileClient::new(&config.api_url, Arc::clone(&provider)));
    AuthStore::new(provider, backend)
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::from_build_env();
    let store = build_store(&config);

    let auth = RwSignal::new(AuthState::loading());
    store.set_observer(Arc::new(move |state: &AuthState| auth.set(state.clone())));

    provide_context(auth);
    provide_context(store.clone());
    provide_context(RwSignal::new(NoticeState::default()));
    provide_context(RwSignal::new(ChatState::default()));

    #[cfg(feature = "hydrate")]
    {
        crate::util::theme::apply(crate::util::theme::read_preference());

        let events = store.start();
        let runner = store.clone();
        leptos::task::spawn_local(async move {
            runner.initialize().await;
            runner.pump(events).await;
        });
        let stopper = store.clone();
        on_cleanup(move || stopper.stop());
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = store;
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/opty-web.css"/>
        <Title text="Opty"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=|| view! { <GuestRoute><HomePage/></GuestRoute> }/>
                <Route path=StaticSegment("login") view=|| view! { <GuestRoute><LoginPage/></GuestRoute> }/>
                <Route path=StaticSegment("register") view=|| view! { <GuestRoute><RegisterPage/></GuestRoute> }/>
                <Route
                    path=StaticSegment("forgot-password")
                    view=|| view! { <GuestRoute><ForgotPasswordPage/></GuestRoute> }
                />
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>

                <Route path=StaticSegment("termos") view=TermsPage/>
                <Route path=StaticSegment("privacidade") view=PrivacyPage/>
                <Route path=StaticSegment("cookies") view=CookiesPage/>
                <Route path=StaticSegment("sobre") view=AboutPage/>

                <Route
                    path=StaticSegment("configuracoes")
                    view=|| view! { <ProtectedRoute><SettingsPage/></ProtectedRoute> }
                />

                <Route
                    path=StaticSegment("perfil-indisponivel")
                    view=|| view! { <ProtectedRoute><ProfileUnavailablePage/></ProtectedRoute> }
                />

                <Route path=StaticSegment("onboarding") view=|| view! { <UserOnly><OnboardingPage/></UserOnly> }/>
                <Route path=StaticSegment("dashboard") view=|| view! { <UserOnly><DashboardPage/></UserOnly> }/>
                <Route path=StaticSegment("resultados") view=|| view! { <UserOnly><ResultsPage/></UserOnly> }/>
                <Route path=StaticSegment("perfil") view=|| view! { <UserOnly><ProfilePage/></UserOnly> }/>
                <Route
                    path=(StaticSegment("chat"), StaticSegment("cliente"))
                    view=|| view! { <UserOnly><ChatClientPage/></UserOnly> }
                />
                <Route
                    path=(StaticSegment("chat"), StaticSegment("supervisor"), OptionalParamSegment("session_id"))
                    view=|| {
                        view! {
                            <ProtectedRoute>
                                <RequireRole role=Role::Supervisor redirect_to=Role::User.landing_path()>
                                    <ChatSupervisorPage/>
                                </RequireRole>
                            </ProtectedRoute>
                        }
                    }
                />
            </Routes>
            <NoticeTray/>
            <CookieBanner/>
        </Router>
    }
}

/// Session plus end-user role; supervisors are sent to their own landing page.
#[component]
fn UserOnly(children: ChildrenFn) -> impl IntoView {
    let children = StoredValue::new(children);
    view! {
        <ProtectedRoute>
            <RequireRole role=Role::User redirect_to=Role::Supervisor.landing_path()>
                {children.with_value(|c| c())}
            </RequireRole>
        </ProtectedRoute>
    }
}
