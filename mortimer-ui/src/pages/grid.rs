//! Grid Page
//!
//! Aligned preview images for one grid plus the mark and move actions.

use leptos::*;
use leptos_router::*;
use mortimer::state::{grid_info, session_path};

use crate::api;
use crate::components::Loading;
use crate::state::global::GlobalState;

/// States a grid can be marked with
const GRID_STATES: [&str; 3] = ["Good", "Bad", "Screened"];

#[component]
pub fn GridView(#[prop(into)] session: String, #[prop(into)] grid: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let back = state.session_href(&session);

    let session_dir = {
        let state = state.clone();
        let session = session.clone();
        create_memo(move |_| {
            state.sessions.with(|sessions| {
                sessions
                    .session(&session)
                    .and_then(session_path)
                    .map(str::to_string)
            })
        })
    };

    let images = {
        let grid = grid.clone();
        create_local_resource(
            move || session_dir.get(),
            move |dir| {
                let grid = grid.clone();
                async move {
                    match dir {
                        Some(dir) => api::client().check_images(&dir, &grid).await,
                        None => Ok(Vec::new()),
                    }
                }
            },
        )
    };

    let current_state = {
        let state = state.clone();
        let session = session.clone();
        let grid = grid.clone();
        move || {
            state.sessions.with(|sessions| {
                sessions
                    .session(&session)
                    .and_then(|record| grid_info(record, &grid))
                    .unwrap_or_default()
            })
        }
    };

    view! {
        <div class="space-y-8">
            <div>
                <A href=back class="text-sm text-gray-400 hover:text-white">
                    {format!("← {session}")}
                </A>
                <h1 class="text-3xl font-bold mt-2">{format!("Grid {grid}")}</h1>
                <p class="text-gray-400 mt-1">
                    {move || {
                        let info = current_state();
                        format!(
                            "State: {}{}",
                            info.state.unwrap_or_else(|| "-".to_string()),
                            info.moved_to.map(|to| format!(", moved to {to}")).unwrap_or_default()
                        )
                    }}
                </p>
            </div>

            <GridActions session=session.clone() grid=grid.clone() />

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Aligned Images"</h2>
                <Suspense fallback=move || view! { <Loading /> }>
                    {move || images.get().map(|result| match result {
                        Ok(paths) if paths.is_empty() => view! {
                            <p class="text-gray-400">"No aligned images for this grid yet."</p>
                        }.into_view(),
                        Ok(paths) => view! {
                            <ul class="space-y-1 font-mono text-sm">
                                {paths.into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                            </ul>
                        }.into_view(),
                        Err(e) => view! {
                            <p class="text-red-400">{format!("Could not list images: {e}")}</p>
                        }.into_view(),
                    })}
                </Suspense>
            </section>
        </div>
    }
}

/// Mark and move controls for one grid
#[component]
fn GridActions(session: String, grid: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (destination, set_destination) = create_signal(String::new());

    let mark = create_action({
        let state = state.clone();
        let session = session.clone();
        let grid = grid.clone();
        move |mark: &&'static str| {
            let state = state.clone();
            let session = session.clone();
            let grid = grid.clone();
            let mark = *mark;
            async move {
                match api::client().mark_grid(&session, &grid, mark).await {
                    Ok(()) => state.show_success(&format!("Grid {grid} marked {mark}")),
                    Err(e) => state.show_error(&format!("Failed to mark grid: {e}")),
                }
            }
        }
    });

    let move_grid = create_action({
        let state = state.clone();
        move |location: &String| {
            let state = state.clone();
            let session = session.clone();
            let grid = grid.clone();
            let location = location.clone();
            async move {
                match api::client().move_grid(&session, &grid, &location).await {
                    Ok(()) => state.show_success(&format!("Grid {grid} moved to {location}")),
                    Err(e) => state.show_error(&format!("Failed to move grid: {e}")),
                }
            }
        }
    });

    let on_move = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let location = destination.get_untracked();
        if location.trim().is_empty() {
            return;
        }
        move_grid.dispatch(location);
        set_destination.set(String::new());
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 flex flex-wrap items-center gap-4">
            <div class="flex items-center space-x-2">
                {GRID_STATES
                    .into_iter()
                    .map(|label| view! {
                        <button
                            class="px-4 py-2 rounded-lg bg-gray-700 hover:bg-gray-600 disabled:opacity-50"
                            disabled=move || mark.pending().get()
                            on:click=move |_| mark.dispatch(label)
                        >
                            {label}
                        </button>
                    })
                    .collect_view()}
            </div>

            <form class="flex items-center space-x-2" on:submit=on_move>
                <input
                    type="text"
                    placeholder="Move to..."
                    class="px-3 py-2 rounded-lg bg-gray-900 border border-gray-700"
                    prop:value=destination
                    on:input=move |ev| set_destination.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class="px-4 py-2 rounded-lg bg-primary-600 hover:bg-primary-700 disabled:opacity-50"
                    disabled=move || move_grid.pending().get()
                >
                    "Move"
                </button>
            </form>
        </section>
    }
}
