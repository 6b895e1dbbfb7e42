//! Home Page
//!
//! Lists every session the backend reported at startup.

use leptos::*;
use leptos_router::*;

use crate::app::AwaitSessions;
use crate::state::global::GlobalState;

#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Sessions"</h1>
                <p class="text-gray-400 mt-1">"Screening sessions available for review"</p>
            </div>

            <AwaitSessions>
                <SessionList state=state.clone() />
            </AwaitSessions>
        </div>
    }
}

#[component]
fn SessionList(state: GlobalState) -> impl IntoView {
    let names = state.session_names();

    if let Some(error) = state.sessions.with_untracked(|s| s.error().map(str::to_string)) {
        return view! {
            <div class="bg-gray-800 rounded-xl p-6 text-red-400">
                {format!("Could not load sessions: {error}")}
            </div>
        }
        .into_view();
    }

    if names.is_empty() {
        return view! {
            <div class="bg-gray-800 rounded-xl p-6 text-gray-400">"No sessions yet."</div>
        }
        .into_view();
    }

    view! {
        <ul class="grid grid-cols-1 md:grid-cols-3 gap-4">
            {names
                .into_iter()
                .map(|name| {
                    let href = state.session_href(&name);
                    view! {
                        <li>
                            <A
                                href=href
                                class="block bg-gray-800 hover:bg-gray-700 rounded-lg p-4 transition-colors"
                            >
                                {name}
                            </A>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
    .into_view()
}
