//! Access to the page a third-party tag lives on.

use contracts::shared::tracking::EventParameters;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

/// One argument of a call into a tag's global function.
#[derive(Debug, Clone, PartialEq)]
pub enum TagArg {
    Text(String),
    Params(EventParameters),
    /// `new Date()` at call time
    Now,
}

impl TagArg {
    pub fn text(value: impl Into<String>) -> Self {
        TagArg::Text(value.into())
    }
}

pub trait TagHost {
    /// Whether `window[name]` is a callable function right now.
    fn has_function(&self, name: &str) -> bool;
    /// Adds an inline `<script id=..>` unless one with that id already exists.
    fn inject_inline(&self, id: &str, source: &str);
    /// Adds an async `<script src=..>`; nothing waits for it to load.
    fn inject_script(&self, src: &str);
    /// Calls `window[function](...args)`. Does nothing if it is not defined.
    fn call(&self, function: &str, args: &[TagArg]);
    fn page_path(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowTagHost;

impl WindowTagHost {
    fn global_function(name: &str) -> Option<js_sys::Function> {
        let window = web_sys::window()?;
        js_sys::Reflect::get(&window, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<js_sys::Function>()
            .ok()
    }

    fn append_to_head(script: &web_sys::Element) -> Result<(), JsValue> {
        let head = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.head())
            .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
        head.append_child(script)?;
        Ok(())
    }

    fn create_script() -> Result<web_sys::Element, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?
            .create_element("script")
    }

    fn to_js(arg: &TagArg) -> JsValue {
        match arg {
            TagArg::Text(s) => JsValue::from_str(s),
            TagArg::Params(params) => params
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .unwrap_or(JsValue::UNDEFINED),
            TagArg::Now => js_sys::Date::new_0().into(),
        }
    }
}

impl TagHost for WindowTagHost {
    fn has_function(&self, name: &str) -> bool {
        Self::global_function(name).is_some()
    }

    fn inject_inline(&self, id: &str, source: &str) {
        let exists = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .is_some();
        if exists {
            return;
        }

        let result = Self::create_script().and_then(|script| {
            script.set_attribute("id", id)?;
            script.set_text_content(Some(source));
            Self::append_to_head(&script)
        });
        if let Err(e) = result {
            log::warn!("failed to inject script #{}: {:?}", id, e);
        }
    }

    fn inject_script(&self, src: &str) {
        let result = Self::create_script().and_then(|script| {
            script.set_attribute("async", "")?;
            script.set_attribute("src", src)?;
            Self::append_to_head(&script)
        });
        if let Err(e) = result {
            log::warn!("failed to load script {}: {:?}", src, e);
        }
    }

    fn call(&self, function: &str, args: &[TagArg]) {
        let Some(func) = Self::global_function(function) else {
            return;
        };

        let js_args = args.iter().map(Self::to_js).collect::<js_sys::Array>();
        if let Err(e) = func.apply(&JsValue::NULL, &js_args) {
            log::debug!("{}() threw: {:?}", function, e);
        }
    }

    fn page_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }
}
