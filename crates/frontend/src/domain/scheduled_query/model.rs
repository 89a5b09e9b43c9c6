//! HTTP client for the scheduling backend.
//!
//! The panel itself never calls these directly; the app shell wires them
//! into the panel's callback props.

use contracts::domain::scheduled_query::{MutationResponse, ScheduledQuery, ScheduledQueryPayload};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::shared::api_utils::api_url;

/// Current session as reported by the backend. A missing `requestor` means
/// nobody is logged in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub requestor: Option<String>,
    #[serde(default)]
    pub dialect: Option<String>,
}

pub async fn fetch_scheduled_queries() -> Result<Vec<ScheduledQuery>, String> {
    let text = send("GET", &api_url("/api/scheduled-queries"), None).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

pub async fn fetch_session() -> Result<SessionInfo, String> {
    let text = send("GET", &api_url("/api/session"), None).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

pub async fn create_scheduled_query(
    payload: &ScheduledQueryPayload,
) -> Result<MutationResponse, String> {
    let body = serde_json::to_string(payload).map_err(|e| format!("{e}"))?;
    let text = send("POST", &api_url("/api/scheduled-queries"), Some(body)).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

pub async fn update_scheduled_query(
    payload: &ScheduledQueryPayload,
) -> Result<MutationResponse, String> {
    let fid = payload
        .fid
        .as_deref()
        .ok_or_else(|| "update requires a fid".to_string())?;
    let url = api_url(&format!(
        "/api/scheduled-queries/{}",
        urlencoding::encode(fid)
    ));
    let body = serde_json::to_string(payload).map_err(|e| format!("{e}"))?;
    let text = send("PATCH", &url, Some(body)).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

pub async fn delete_scheduled_query(fid: &str) -> Result<(), String> {
    let url = api_url(&format!(
        "/api/scheduled-queries/{}",
        urlencoding::encode(fid)
    ));
    send("DELETE", &url, None).await?;
    Ok(())
}

/// Issue a same-origin JSON request and return the response body.
///
/// Non-2xx responses become `Err("HTTP {status}")`, matching how the rest
/// of the frontend reports transport failures.
async fn send(method: &str, url: &str, body: Option<String>) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        opts.set_body(&wasm_bindgen::JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{e:?}"))?;
    let headers = request.headers();
    headers
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;
    if !resp.ok() {
        log::warn!("{method} {url} failed: HTTP {}", resp.status());
        return Err(format!("HTTP {}", resp.status()));
    }

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string().ok_or_else(|| "bad text".to_string())
}
