use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Modal frame: full-screen overlay plus a centered surface.
///
/// Dismissal here is click-away only; the content decides what else closes
/// it. The frame renders no header or buttons of its own.
#[component]
pub fn ModalFrame(
    /// Called when the user clicks away from the surface.
    on_close: Callback<()>,
    /// Extra class for the surface.
    #[prop(optional, into)]
    modal_class: String,
    /// Extra style for the surface (sizing usually).
    #[prop(optional, into)]
    modal_style: String,
    children: Children,
) -> impl IntoView {
    // Close only when both press and release land on the overlay itself.
    // A text selection started inside the surface and released outside
    // must not dismiss the dialog.
    let pressed_on_overlay = RwSignal::new(false);

    let is_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(target), Some(current)) => target == current,
            _ => false,
        }
    };

    let handle_mouse_down = move |ev: ev::MouseEvent| {
        pressed_on_overlay.set(is_overlay_event(&ev));
    };

    let handle_click = move |ev: ev::MouseEvent| {
        let dismiss = pressed_on_overlay.get() && is_overlay_event(&ev);
        pressed_on_overlay.set(false);
        if dismiss {
            // Defer one tick so the overlay is not torn down inside its own
            // click dispatch.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let surface_class = if modal_class.is_empty() {
        "modal".to_string()
    } else {
        format!("modal {modal_class}")
    };
    let surface_style = format!("position: relative; {modal_style}");

    view! {
        <div
            class="modal-overlay"
            style="z-index: 1000;"
            on:mousedown=handle_mouse_down
            on:click=handle_click
        >
            <div
                class=surface_class
                style=surface_style
                on:click=move |ev: ev::MouseEvent| ev.stop_propagation()
            >
                {children()}
            </div>
        </div>
    }
}
