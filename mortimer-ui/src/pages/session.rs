//! Session Page
//!
//! One session's grids with their recorded state.

use leptos::*;
use leptos_router::*;
use mortimer::state::{grid_info, grid_names, session_path};

use crate::app::AwaitSessions;
use crate::state::global::GlobalState;

#[component]
pub fn SessionView(#[prop(into)] name: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let title = name.clone();
    let home = state.home_href();

    view! {
        <div class="space-y-8">
            <div>
                <A href=home class="text-sm text-gray-400 hover:text-white">
                    "← Sessions"
                </A>
                <h1 class="text-3xl font-bold mt-2">{title}</h1>
            </div>

            <AwaitSessions>
                <GridTable state=state.clone() session=name.clone() />
            </AwaitSessions>
        </div>
    }
}

#[component]
fn GridTable(state: GlobalState, session: String) -> impl IntoView {
    let rows = state.sessions.with_untracked(|sessions| {
        sessions.session(&session).map(|record| {
            let path = session_path(record).map(str::to_string);
            let grids: Vec<_> = grid_names(record)
                .into_iter()
                .map(|grid| {
                    let info = grid_info(record, &grid).unwrap_or_default();
                    (grid, info)
                })
                .collect();
            (path, grids)
        })
    });

    let Some((path, grids)) = rows else {
        return view! {
            <div class="bg-gray-800 rounded-xl p-6 text-gray-400">
                {format!("Session {session} is not on record.")}
            </div>
        }
        .into_view();
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            {path.map(|p| view! { <p class="text-sm text-gray-400 font-mono">{p}</p> })}
            <table class="w-full text-left">
                <thead class="text-gray-400 text-sm">
                    <tr>
                        <th class="py-2">"Grid"</th>
                        <th class="py-2">"State"</th>
                        <th class="py-2">"Moved To"</th>
                    </tr>
                </thead>
                <tbody>
                    {grids
                        .into_iter()
                        .map(|(grid, info)| {
                            let href = state.grid_href(&session, &grid);
                            view! {
                                <tr class="border-t border-gray-700">
                                    <td class="py-2">
                                        <A href=href class="text-primary-400 hover:underline">{grid}</A>
                                    </td>
                                    <td class="py-2">{info.state.unwrap_or_else(|| "-".to_string())}</td>
                                    <td class="py-2">{info.moved_to.unwrap_or_else(|| "-".to_string())}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </section>
    }
    .into_view()
}
