//! Global Application State
//!
//! Reactive state shared by every page. The session list is a read-only
//! signal for components; the single write handle goes to the startup
//! request and nowhere else.

use std::rc::Rc;

use leptos::*;
use mortimer::router::{grid_href, session_href, HOME};
use mortimer::{ApiClient, RouteParams, RouteTable, SessionsState, Transport, View};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Session list as loaded at startup
    pub sessions: ReadSignal<SessionsState>,
    /// Route table resolved against the router base
    pub routes: Rc<RouteTable<View>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide global state to the component tree.
///
/// Returns the only write handle for the session list.
pub fn provide_global_state(routes: RouteTable<View>) -> WriteSignal<SessionsState> {
    let (state, set_sessions) = GlobalState::new(routes);
    provide_context(state);
    set_sessions
}

/// Request the session list once and store whatever comes back.
///
/// Mounting does not wait on this; a failed request leaves the list in
/// the failed state and the pages render their own fallback.
pub fn bootstrap_sessions<T>(client: ApiClient<T>, set_sessions: WriteSignal<SessionsState>)
where
    T: Transport + 'static,
{
    set_sessions.set(SessionsState::loading());

    spawn_local(async move {
        let result = client.get_sessions().await;
        if let Err(e) = &result {
            web_sys::console::error_1(&format!("Failed to fetch sessions: {}", e).into());
        }
        set_sessions.set(SessionsState::from_result(result));
    });
}

impl GlobalState {
    /// Fresh state plus the write handle for the session list
    pub fn new(routes: RouteTable<View>) -> (Self, WriteSignal<SessionsState>) {
        let (sessions, set_sessions) = create_signal(SessionsState::Unloaded);

        let state = Self {
            sessions,
            routes: Rc::new(routes),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
        };

        (state, set_sessions)
    }

    /// Names of the loaded sessions, empty until the list arrives
    pub fn session_names(&self) -> Vec<String> {
        self.sessions.with(|s| s.session_names())
    }

    /// Link to the session list
    pub fn home_href(&self) -> String {
        self.routes
            .href(HOME, &RouteParams::new())
            .unwrap_or_else(|_| "/".to_string())
    }

    /// Link to one session's grids
    pub fn session_href(&self, session: &str) -> String {
        session_href(&self.routes, session).unwrap_or_else(|_| self.home_href())
    }

    /// Link to one grid of a session
    pub fn grid_href(&self, session: &str, grid: &str) -> String {
        grid_href(&self.routes, session, grid).unwrap_or_else(|_| self.home_href())
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }
}
