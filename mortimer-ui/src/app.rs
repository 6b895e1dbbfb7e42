//! App Root Component
//!
//! Main application component with routing and global providers. Routing
//! goes through the shared route table so the browser resolves locations
//! exactly as the native shell does.

use leptos::*;
use leptos_router::*;
use mortimer::{routes, RouteTable, View};

use crate::api;
use crate::components::{Loading, Nav, Toast};
use crate::pages::{GridView, Home, SessionView};
use crate::state::global::{bootstrap_sessions, provide_global_state, GlobalState};

/// History base the app is served under
pub const BASE_URL: &str = match option_env!("MORTIMER_BASE_URL") {
    Some(base) => base,
    None => "/mortimer",
};

/// Route table for [`BASE_URL`]. A base that fails validation falls back
/// to serving from the root.
pub fn route_table() -> RouteTable<View> {
    routes(BASE_URL)
        .or_else(|e| {
            web_sys::console::error_1(&format!("Invalid router base {BASE_URL:?}: {e}").into());
            routes("/")
        })
        .unwrap_or_else(|_| RouteTable::new("/"))
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    let set_sessions = provide_global_state(route_table());

    // Fire the session request; mounting continues without it
    bootstrap_sessions(api::client(), set_sessions);

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/*any" view=RouteOutlet />
                    </Routes>
                </main>

                // Footer with session load status
                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Resolves the current location against the route table and renders the
/// matching view
#[component]
fn RouteOutlet() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let location = use_location();

    let resolved = create_memo(move |_| {
        let path = location.pathname.get();
        let search = location.search.get();
        let target = if search.is_empty() {
            path
        } else {
            format!("{path}?{}", search.trim_start_matches('?'))
        };
        state.routes.resolve(&target)
    });

    move || match resolved.get() {
        Some(route) => match route.view {
            View::Home => view! { <Home /> }.into_view(),
            View::Session => {
                let name = route.params.get("session").unwrap_or_default().to_string();
                view! { <SessionView name=name /> }.into_view()
            }
            View::Grid => {
                let session = route.params.get("session").unwrap_or_default().to_string();
                let grid = route.params.get("grid").unwrap_or_default().to_string();
                view! { <GridView session=session grid=grid /> }.into_view()
            }
            View::NotFound => view! { <NotFound path=route.path /> }.into_view(),
        },
        None => view! { <NotFound path=location.pathname.get() /> }.into_view(),
    }
}

/// Footer component showing session load status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || state.sessions.with(|sessions| {
                        if sessions.is_loaded() {
                            view! {
                                <span class="flex items-center space-x-1 text-green-400">
                                    <span class="w-2 h-2 bg-green-400 rounded-full" />
                                    <span>{format!("{} sessions", sessions.session_names().len())}</span>
                                </span>
                            }.into_view()
                        } else if let Some(error) = sessions.error() {
                            view! {
                                <span class="flex items-center space-x-1 text-red-400">
                                    <span class="w-2 h-2 bg-red-400 rounded-full" />
                                    <span>{format!("Sessions unavailable: {error}")}</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <div class="flex items-center space-x-2 text-primary-400">
                                    <div class="loading-spinner w-4 h-4" />
                                    <span>"Loading sessions..."</span>
                                </div>
                            }.into_view()
                        }
                    })}
                </div>

                <div class="text-gray-400">
                    {move || state.sessions.with(|sessions| match sessions {
                        mortimer::SessionsState::Loaded { loaded_at, .. } => {
                            format!("Loaded: {}", loaded_at.format("%H:%M:%S"))
                        }
                        _ => "Not loaded".to_string(),
                    })}
                </div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound(#[prop(into)] path: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let home = state.home_href();

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">{format!("Nothing lives at {path}.")}</p>
            <A
                href=home
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Back to Sessions"
            </A>
        </div>
    }
}

/// Placeholder while a page waits on the session list
#[component]
pub fn AwaitSessions(children: ChildrenFn) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    move || {
        let settled = state.sessions.with(|s| s.is_settled());
        if settled {
            children().into_view()
        } else {
            view! { <Loading /> }.into_view()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_table_base() {
        let table = route_table();
        if option_env!("MORTIMER_BASE_URL").is_none() {
            assert_eq!(table.base(), "/mortimer");
        }
        assert_eq!(table.entries().len(), 4);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_mounts_without_sessions() {
        mount_to_body(|| view! { <App /> });

        let text = document()
            .body()
            .and_then(|body| body.text_content())
            .unwrap_or_default();
        assert!(text.contains("Mortimer"));
        assert!(text.contains("Loading sessions..."));
    }
}
