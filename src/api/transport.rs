//! The HTTP seam. Everything above this module speaks in [`ApiRequest`] and
//! [`ApiResponse`]; [`GlooTransport`] turns them into browser `fetch` calls.

use std::future::Future;

use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use http::{Method, StatusCode};
use leptos::logging::{error, log};
use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, FormData};

use crate::config::AppConfig;
use crate::error::ApiError;

/// A teacher portrait picked in a file input.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    file: web_sys::File,
}

impl ImageUpload {
    pub fn new(file: web_sys::File) -> Self {
        Self { file }
    }

    pub fn file_name(&self) -> String {
        self.file.name()
    }

    pub fn content_type(&self) -> String {
        self.file.type_()
    }

    pub fn size(&self) -> u64 {
        self.file.size() as u64
    }
}

#[derive(Clone, Debug)]
pub enum FormField {
    Text { name: String, value: String },
    File { name: String, upload: ImageUpload },
}

impl FormField {
    pub fn text(name: &str, value: &str) -> Self {
        FormField::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Vec<FormField>),
}

#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base, e.g. `/teachers/7/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one request and hands back the raw response. Non-2xx statuses are
/// returned as responses, not errors; only transport failures are `Err`.
pub trait Transport: 'static {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// `fetch`-backed transport with the client-wide timeout.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    config: AppConfig,
}

impl GlooTransport {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn builder(&self, method: &Method, url: &str) -> Result<RequestBuilder, ApiError> {
        let builder = match *method {
            Method::GET => Request::get(url),
            Method::POST => Request::post(url),
            Method::PUT => Request::put(url),
            Method::PATCH => Request::patch(url),
            Method::DELETE => Request::delete(url),
            ref other => {
                return Err(ApiError::Network(format!("unsupported method {other}")));
            }
        };
        Ok(builder)
    }
}

impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.config.endpoint(&request.path);
        log!("[API] {} {}", request.method, url);

        let controller = AbortController::new().map_err(js_error)?;
        let signal = controller.signal();

        let mut builder = self
            .builder(&request.method, &url)?
            .query(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
            .abort_signal(Some(&signal));
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let prepared = match request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(fields) => builder.body(form_data(&fields)?),
        }
        .map_err(|err| ApiError::Network(err.to_string()))?;

        let timeout_ms = u32::try_from(self.config.request_timeout.as_millis()).unwrap_or(u32::MAX);
        let timer = Timeout::new(timeout_ms, move || controller.abort());

        let result = prepared.send().await;
        drop(timer);

        let response = match result {
            Ok(response) => response,
            Err(_) if signal.aborted() => {
                error!("[API] {} {} timed out", request.method, url);
                return Err(ApiError::Timeout);
            }
            Err(err) => {
                error!("[API] {} {} failed: {}", request.method, url, err);
                return Err(ApiError::Network(err.to_string()));
            }
        };

        let status = StatusCode::from_u16(response.status())
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}

fn form_data(fields: &[FormField]) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for field in fields {
        match field {
            FormField::Text { name, value } => form.append_with_str(name, value),
            FormField::File { name, upload } => {
                form.append_with_blob_and_filename(name, &upload.file, &upload.file_name())
            }
        }
        .map_err(js_error)?;
    }
    Ok(form)
}

fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(format!("{err:?}"))
}
