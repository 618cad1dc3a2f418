use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Runs `on_close` on the next tick.
///
/// The overlay is usually removed by the close itself; running it synchronously
/// would drop the handler that is still being dispatched.
pub fn close_deferred(on_close: Callback<()>) {
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        on_close.run(());
    });
}

/// Whether a click closes the modal.
///
/// Both press and release must land on the overlay itself: selecting text in
/// the panel and releasing outside must not close. Clicks inside the panel
/// never get here, the panel stops their propagation.
pub fn overlay_should_close(pressed_on_overlay: bool, released_on_overlay: bool) -> bool {
    pressed_on_overlay && released_on_overlay
}

/// Dimmed overlay with a centered panel.
///
/// Clicking the overlay closes; clicks inside the panel never reach the overlay.
#[component]
pub fn ModalFrame(
    on_close: Callback<()>,
    /// Extra class for the panel (`div.modal-panel`).
    #[prop(optional, into)]
    panel_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            overlay_should_close(overlay_mouse_down.get_untracked(), is_direct_overlay_event(&ev));
        overlay_mouse_down.set(false);
        if should_close {
            close_deferred(on_close);
        }
    };

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    let panel_class = match panel_class {
        Some(cls) => format!("modal-panel {cls}"),
        None => "modal-panel".to_string(),
    };

    view! {
        <div class="modal-backdrop" aria-hidden="true"></div>
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div class=panel_class role="dialog" aria-modal="true" on:click=stop_propagation>
                {children()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_click_closes() {
        assert!(overlay_should_close(true, true));
    }

    #[test]
    fn test_panel_click_does_not_close() {
        // pressed and released inside the panel
        assert!(!overlay_should_close(false, false));
        // pressed in the panel, released on the overlay
        assert!(!overlay_should_close(false, true));
        // pressed on the overlay, released in the panel
        assert!(!overlay_should_close(true, false));
    }

    #[test]
    fn test_overlay_press_is_consumed_by_one_click() {
        // the handler resets the press flag after every click
        let mut pressed = true;
        let mut closes = 0;
        for _ in 0..2 {
            if overlay_should_close(pressed, true) {
                closes += 1;
            }
            pressed = false;
        }
        assert_eq!(closes, 1);
    }
}
