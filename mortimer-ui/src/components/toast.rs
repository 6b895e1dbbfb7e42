//! Toast Notifications
//!
//! Outcome of mark and move requests. Errors stay until dismissed or timed
//! out; clicking one clears it.

use leptos::*;

use crate::state::global::GlobalState;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Error,
}

impl Tone {
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Tone::Success => ("✓", "bg-green-600"),
            Tone::Error => ("✕", "bg-red-600"),
        }
    }
}

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let success = state.success;
    let error = state.error;

    view! {
        <div class="fixed bottom-20 right-4 z-50 space-y-2">
            {move || success.get().map(|message| view! {
                <ToastMessage message=message tone=Tone::Success on_dismiss=move || success.set(None) />
            })}
            {move || {
                let state = state.clone();
                error.get().map(|message| view! {
                    <ToastMessage message=message tone=Tone::Error on_dismiss=move || state.clear_error() />
                })
            }}
        </div>
    }
}

#[component]
fn ToastMessage<F>(#[prop(into)] message: String, tone: Tone, on_dismiss: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    let (icon, bg_class) = tone.style();

    view! {
        <div
            class=format!(
                "flex items-center space-x-3 {bg_class} text-white px-4 py-3 rounded-lg shadow-lg cursor-pointer animate-slide-in"
            )
            on:click=move |_| on_dismiss()
        >
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
