//! Navigation Component
//!
//! Header bar with the brand link and a quick jump to each session.

use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let home = state.home_href();

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href=home class="flex items-center space-x-3">
                        <span class="text-2xl">"🔬"</span>
                        <span class="text-xl font-bold text-white">"Mortimer"</span>
                    </A>

                    // One link per loaded session
                    <div class="flex items-center space-x-1 overflow-x-auto">
                        {move || {
                            state
                                .session_names()
                                .into_iter()
                                .map(|name| {
                                    let href = state.session_href(&name);
                                    view! { <NavLink href=href label=name /> }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(#[prop(into)] href: String, #[prop(into)] label: String) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors whitespace-nowrap"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
