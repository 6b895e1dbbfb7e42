//! Mortimer Browser
//!
//! Client-side rendered Leptos frontend for reviewing screening sessions.
//! Routes resolve through the shared `mortimer` route table; the session
//! list is requested once at startup and shared through context.

use leptos::*;
use wasm_bindgen::JsCast;

mod api;
mod app;
mod components;
mod pages;
mod state;

/// Element id the app mounts on
const MOUNT_ID: &str = "app";

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let mount = document()
        .get_element_by_id(MOUNT_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match mount {
        Some(el) => mount_to(el, || view! { <app::App /> }),
        None => {
            web_sys::console::warn_1(&format!("#{MOUNT_ID} not found, mounting to body").into());
            mount_to_body(|| view! { <app::App /> });
        }
    }
}
