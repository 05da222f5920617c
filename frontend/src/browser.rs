//! Browser adapters: `gloo-net` transport and `localStorage` session store.

use gloo_net::http::Request;
use web_sys::Storage;

use crate::api::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::StorageError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Patch => Request::patch(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let built = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| e.to_string())?;

        let resp = built.send().await.map_err(|e| e.to_string())?;
        let status = resp.status();
        let content_type = resp.headers().get("content-type");
        let body = resp
            .text()
            .await
            .map_err(|e| format!("could not read response body: {e}"))?;
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Session record kept in `window.localStorage`.
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Result<Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| unavailable("no window"))?
            .local_storage()
            .map_err(|_| unavailable("localStorage access denied"))?
            .ok_or_else(|| unavailable("localStorage missing"))
    }
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|_| unavailable("read failed"))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| unavailable("write failed"))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| unavailable("remove failed"))
    }
}

fn unavailable(reason: &str) -> StorageError {
    StorageError {
        reason: reason.to_string(),
    }
}
