use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::job::{JobRequest, ModelChoice};
use crate::subscription::ListenerSlot;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"], catch)]
    pub async fn listen(
        event: &str,
        handler: &Closure<dyn FnMut(JsValue)>,
    ) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct PickAudioFileArgs<'a> {
    extensions: &'a [&'a str],
}

#[derive(Serialize)]
struct SetModelChoiceArgs {
    model: ModelChoice,
}

async fn invoke_no_args(cmd: &str) -> Result<JsValue, String> {
    invoke(cmd, JsValue::NULL).await.map_err(extract_error)
}

async fn invoke_with<T: Serialize>(cmd: &str, args: &T) -> Result<JsValue, String> {
    let args = serde_wasm_bindgen::to_value(args).map_err(|err| err.to_string())?;
    invoke(cmd, args).await.map_err(extract_error)
}

/// Opens the native picker; `Ok(None)` means the user cancelled.
pub async fn pick_audio_file(extensions: &[&str]) -> Result<Option<String>, String> {
    let value = invoke_with("pick_audio_file", &PickAudioFileArgs { extensions }).await?;
    Ok(value.as_string())
}

pub async fn generate_lrc(request: &JobRequest) -> Result<String, String> {
    let value = invoke_with("generate_lrc_next_to_audio", request).await?;
    value
        .as_string()
        .ok_or_else(|| "Invalid response format".to_string())
}

pub async fn fetch_model_choice() -> Result<ModelChoice, String> {
    let value = invoke_no_args("get_model_choice").await?;
    value
        .as_string()
        .ok_or_else(|| "Invalid response format".to_string())?
        .parse()
}

pub async fn save_model_choice(model: ModelChoice) -> Result<(), String> {
    invoke_with("set_model_choice", &SetModelChoiceArgs { model })
        .await
        .map(|_| ())
}

/// Registers `handler` for `event` and hands the release handle to `slot`.
///
/// The JS callback is owned by the release handle, so it is dropped right
/// after the listener is removed.
pub async fn subscribe<T, F>(event: &'static str, slot: ListenerSlot, handler: F)
where
    T: DeserializeOwned + 'static,
    F: Fn(T) + 'static,
{
    let callback = Closure::wrap(Box::new(move |event_value: JsValue| {
        let payload = match js_sys::Reflect::get(&event_value, &"payload".into()) {
            Ok(payload) => payload,
            Err(_) => {
                leptos::logging::warn!("{event} received without payload: {:?}", event_value);
                return;
            }
        };
        match serde_wasm_bindgen::from_value::<T>(payload) {
            Ok(parsed) => handler(parsed),
            Err(err) => leptos::logging::error!("Failed to parse {event} payload: {:?}", err),
        }
    }) as Box<dyn FnMut(JsValue)>);

    match listen(event, &callback).await {
        Ok(unlisten) => {
            leptos::logging::log!("Listening for {event}");
            slot.attach(move || {
                if let Some(unlisten) = unlisten.dyn_ref::<js_sys::Function>() {
                    if let Err(err) = unlisten.call0(&JsValue::NULL) {
                        leptos::logging::warn!("Failed to unlisten {event}: {:?}", err);
                    }
                }
                drop(callback);
            });
        }
        Err(err) => {
            leptos::logging::error!("Failed to listen for {event}: {:?}", extract_error(err));
        }
    }
}

pub fn extract_error(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &"message".into())
                .ok()
                .and_then(|v| v.as_string())
        })
        .unwrap_or_else(|| "Unknown error".to_string())
}
