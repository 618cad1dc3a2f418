use crate::shared::guard::Resource;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

pub const ESCAPE_KEY: &str = "Escape";

/// Whether a key press should dismiss an overlay that is currently `visible`.
pub fn is_dismiss_key(key: &str, visible: bool) -> bool {
    visible && key == ESCAPE_KEY
}

/// `keydown` listener on the document.
///
/// The JS closure is created once and kept alive for as long as the listener
/// exists, so it can be added and removed any number of times.
pub struct KeydownListener {
    closure: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeydownListener {
    pub fn new(mut on_key: impl FnMut(String) + 'static) -> Self {
        let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            on_key(event.key());
        }) as Box<dyn FnMut(_)>);

        Self { closure }
    }
}

impl Resource for KeydownListener {
    fn acquire(&mut self) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document
                .add_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref());
        }
    }

    fn release(&mut self) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let _ = document.remove_event_listener_with_callback(
                "keydown",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dismiss_key() {
        assert!(is_dismiss_key("Escape", true));
        assert!(!is_dismiss_key("Escape", false));
        assert!(!is_dismiss_key("Enter", true));
        assert!(!is_dismiss_key("Esc", true));
    }
}
