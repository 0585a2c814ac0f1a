// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote API client for the trip server.
//!
//! Provides a trait-based client so the sync engine can run against:
//! - the real HTTP server in production
//! - in-memory fakes in unit tests
//!
//! Any transport failure or non-2xx status is an [`ApiError`]. Callers do
//! not distinguish 4xx from 5xx.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tj_core::{trip_endpoint, HttpMethod, Trip, TripInput, TRIPS_ENDPOINT};

/// Path of the upload endpoint.
pub const UPLOADS_ENDPOINT: &str = "/uploads";

/// Error type for remote calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A local file could not be read for upload.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for remote calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Boxed future returned by [`RemoteApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send + 'a>>;

/// Client trait for the trip server.
pub trait RemoteApi: Send + Sync {
    /// `GET /trips`.
    fn list_trips(&self) -> ApiFuture<'_, Vec<Trip>>;

    /// `POST /trips`. The server assigns the id.
    fn create_trip<'a>(&'a self, trip: &'a TripInput) -> ApiFuture<'a, Trip>;

    /// `DELETE /trips/{id}`.
    fn delete_trip<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()>;

    /// `POST /uploads` with the file as multipart field `file`. Returns its URL.
    fn upload<'a>(&'a self, path: &'a Path) -> ApiFuture<'a, String>;

    /// Issue `method endpoint` with a JSON `payload` (omitted when null).
    ///
    /// Returns the decoded response body, or `None` if it was empty or not JSON.
    fn send<'a>(
        &'a self,
        method: HttpMethod,
        endpoint: &'a str,
        payload: &'a Value,
    ) -> ApiFuture<'a, Option<Value>>;
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

/// HTTP client for the trip server.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:4000`.
    pub fn new(base_url: &str, request_timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        HttpApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    // ---- private helpers ----

    /// Return the response unchanged on 2xx, or an [`ApiError::Status`]
    /// carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> ApiResult<T> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Guess an image MIME type from the file extension, defaulting to JPEG.
fn image_mime(file_name: &str) -> String {
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("image/{}", ext.to_lowercase()),
        _ => "image/jpeg".to_string(),
    }
}

impl RemoteApi for HttpApi {
    fn list_trips(&self) -> ApiFuture<'_, Vec<Trip>> {
        Box::pin(async move {
            let response = self.client.get(self.url(TRIPS_ENDPOINT)).send().await?;
            Self::parse_response(response).await
        })
    }

    fn create_trip<'a>(&'a self, trip: &'a TripInput) -> ApiFuture<'a, Trip> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.url(TRIPS_ENDPOINT))
                .json(trip)
                .send()
                .await?;
            Self::parse_response(response).await
        })
    }

    fn delete_trip<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let response = self.client.delete(self.url(&trip_endpoint(id))).send().await?;
            Self::ensure_success(response).await?;
            Ok(())
        })
    }

    fn upload<'a>(&'a self, path: &'a Path) -> ApiFuture<'a, String> {
        Box::pin(async move {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("photo.jpg")
                .to_string();
            let mime = image_mime(&file_name);

            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(&mime)?;
            let form = reqwest::multipart::Form::new().part("file", part);

            let response = self
                .client
                .post(self.url(UPLOADS_ENDPOINT))
                .multipart(form)
                .send()
                .await?;
            let uploaded: UploadResponse = Self::parse_response(response).await?;
            Ok(uploaded.url)
        })
    }

    fn send<'a>(
        &'a self,
        method: HttpMethod,
        endpoint: &'a str,
        payload: &'a Value,
    ) -> ApiFuture<'a, Option<Value>> {
        Box::pin(async move {
            let mut request = self.client.request(to_reqwest(method), self.url(endpoint));
            if !payload.is_null() {
                request = request.json(payload);
            }

            tracing::debug!(%method, endpoint, "sending request");
            let response = Self::ensure_success(request.send().await?).await?;
            let body = response.text().await?;
            if body.trim().is_empty() {
                return Ok(None);
            }
            Ok(serde_json::from_str(&body).ok())
        })
    }
}
