// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for sync module tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path as UrlPath, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tj_core::{Edit, HttpMethod, KvStore, MemoryKv, Trip, TripInput};
use tokio::sync::Notify;

use super::api::{ApiError, ApiFuture, RemoteApi};
use super::engine::SyncEngine;
use super::probe::FixedProbe;

/// Create a trip input with the given title.
pub fn make_input(title: &str) -> TripInput {
    TripInput {
        title: title.to_string(),
        destination: format!("{} region", title),
        start_date: "2024-05-01".to_string(),
        end_date: "2024-05-08".to_string(),
        description: format!("Trip to {}", title),
        ..TripInput::default()
    }
}

/// Create a server-side trip with the given id and title.
pub fn make_trip(id: &str, title: &str) -> Trip {
    Trip::from_input(id.to_string(), make_input(title))
}

fn status(code: u16) -> ApiError {
    ApiError::Status {
        status: code,
        body: "{\"error\":\"fake\"}".to_string(),
    }
}

/// A request observed by [`FakeApi`].
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: String,
    pub endpoint: String,
    pub payload: Value,
}

#[derive(Default)]
struct FakeState {
    trips: Vec<Trip>,
    calls: Vec<Call>,
    fail_list: bool,
    fail_create: bool,
    fail_titles: HashSet<String>,
    next_id: u32,
}

impl FakeState {
    fn record(&mut self, method: &str, endpoint: &str, payload: Value) {
        self.calls.push(Call {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            payload,
        });
    }

    fn insert(&mut self, input: TripInput) -> Trip {
        self.next_id += 1;
        let trip = Trip::from_input(format!("srv-{}", self.next_id), input);
        self.trips.push(trip.clone());
        trip
    }

    fn remove(&mut self, id: &str) -> bool {
        let before = self.trips.len();
        self.trips.retain(|t| t.id != id);
        self.trips.len() != before
    }
}

/// In-memory stand-in for the trip server.
///
/// Clones share state so a test can inspect calls after handing a clone
/// to the engine.
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
    /// When set, `send` waits for a notification before answering.
    gate: Option<Arc<Notify>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the server with trips.
    ///
    /// Ids minted afterwards continue past the highest seeded `srv-N`.
    pub fn with_trips(trips: Vec<Trip>) -> Self {
        let api = Self::new();
        {
            let mut state = api.state.lock().unwrap();
            state.next_id = trips
                .iter()
                .filter_map(|t| t.id.strip_prefix("srv-")?.parse::<u32>().ok())
                .max()
                .unwrap_or(0);
            state.trips = trips;
        }
        api
    }

    /// Hold every `send` until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.state.lock().unwrap().fail_list = fail;
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    /// Make any replayed action whose payload has this title fail.
    pub fn fail_title(&self, title: &str) {
        self.state.lock().unwrap().fail_titles.insert(title.to_string());
    }

    pub fn clear_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_list = false;
        state.fail_create = false;
        state.fail_titles.clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn trips(&self) -> Vec<Trip> {
        self.state.lock().unwrap().trips.clone()
    }

    /// Titles of every replayed (`send`) request, in order.
    pub fn sent_titles(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| c.payload.get("title").and_then(|t| t.as_str()).map(String::from))
            .collect()
    }
}

impl RemoteApi for FakeApi {
    fn list_trips(&self) -> ApiFuture<'_, Vec<Trip>> {
        let result = {
            let mut state = self.state.lock().unwrap();
            state.record("GET", "/trips", Value::Null);
            if state.fail_list {
                Err(status(500))
            } else {
                Ok(state.trips.clone())
            }
        };
        Box::pin(async move { result })
    }

    fn create_trip<'a>(&'a self, trip: &'a TripInput) -> ApiFuture<'a, Trip> {
        let result = {
            let mut state = self.state.lock().unwrap();
            state.record("POST", "/trips", serde_json::to_value(trip).unwrap());
            if state.fail_create {
                Err(status(500))
            } else {
                Ok(state.insert(trip.clone()))
            }
        };
        Box::pin(async move { result })
    }

    fn delete_trip<'a>(&'a self, id: &'a str) -> ApiFuture<'a, ()> {
        let result = {
            let mut state = self.state.lock().unwrap();
            state.record("DELETE", &format!("/trips/{}", id), Value::Null);
            if state.remove(id) {
                Ok(())
            } else {
                Err(status(404))
            }
        };
        Box::pin(async move { result })
    }

    fn upload<'a>(&'a self, path: &'a Path) -> ApiFuture<'a, String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo.jpg")
            .to_string();
        self.state
            .lock()
            .unwrap()
            .record("POST", "/uploads", json!({ "file": name }));
        Box::pin(async move { Ok(format!("http://fake/uploads/{}", name)) })
    }

    fn send<'a>(
        &'a self,
        method: HttpMethod,
        endpoint: &'a str,
        payload: &'a Value,
    ) -> ApiFuture<'a, Option<Value>> {
        let gate = self.gate.clone();
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }

            let mut state = state.lock().unwrap();
            state.record(method.as_str(), endpoint, payload.clone());

            let title = payload.get("title").and_then(|t| t.as_str()).unwrap_or("");
            if state.fail_titles.contains(title) {
                return Err(status(503));
            }

            match (method, endpoint) {
                (HttpMethod::Post, "/trips") => {
                    let input: TripInput = serde_json::from_value(payload.clone()).unwrap();
                    let trip = state.insert(input);
                    Ok(Some(serde_json::to_value(trip).unwrap()))
                }
                (HttpMethod::Delete, _) => {
                    let id = endpoint.trim_start_matches("/trips/");
                    if state.remove(id) {
                        Ok(Some(json!({ "ok": true })))
                    } else {
                        Err(status(404))
                    }
                }
                _ => Ok(Some(payload.clone())),
            }
        })
    }
}

/// A store whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyKv {
    inner: MemoryKv,
    fail_writes: AtomicBool,
}

impl FlakyKv {
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> tj_core::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(tj_core::Error::Io(std::io::Error::other("disk full")))
        } else {
            Ok(())
        }
    }
}

impl KvStore for FlakyKv {
    fn get(&self, key: &str) -> tj_core::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> tj_core::Result<()> {
        self.check()?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> tj_core::Result<()> {
        self.check()?;
        self.inner.remove(key)
    }

    fn update(&self, key: &str, edit: Edit<'_>) -> tj_core::Result<()> {
        self.inner.update(
            key,
            Box::new(|current: Option<String>| {
                let next = edit(current)?;
                if next.is_some() {
                    self.check()?;
                }
                Ok(next)
            }),
        )
    }
}

/// Engine wired to a fake server, a switchable probe and an in-memory store.
pub fn make_engine(api: &FakeApi, probe: &FixedProbe) -> SyncEngine<FakeApi, FixedProbe> {
    SyncEngine::new(api.clone(), probe.clone(), Arc::new(MemoryKv::new()))
}

// ---- in-process HTTP trip server ----

/// Shared state of the test trip server.
#[derive(Clone, Default)]
pub struct TestServer {
    trips: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<Mutex<u32>>,
    fail_titles: Arc<Mutex<HashSet<String>>>,
    healthy: Arc<AtomicBool>,
}

impl TestServer {
    pub fn trips(&self) -> Vec<Value> {
        self.trips.lock().unwrap().clone()
    }

    pub fn fail_title(&self, title: &str) {
        self.fail_titles.lock().unwrap().insert(title.to_string());
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }
}

async fn health(State(server): State<TestServer>) -> (StatusCode, Json<Value>) {
    if server.healthy.load(Ordering::SeqCst) {
        (StatusCode::OK, Json(json!({ "ok": true })))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "ok": false })))
    }
}

async fn list_trips(State(server): State<TestServer>) -> Json<Value> {
    Json(Value::Array(server.trips()))
}

async fn create_trip(
    State(server): State<TestServer>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let title = payload
        .get("title")
        .and_then(|t| t.as_str())
        .unwrap_or("Sans titre")
        .to_string();
    if server.fail_titles.lock().unwrap().contains(&title) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "boom" })),
        );
    }

    let id = {
        let mut next = server.next_id.lock().unwrap();
        *next += 1;
        format!("srv-{}", *next)
    };
    let field = |name: &str| payload.get(name).cloned().unwrap_or(json!(""));
    let trip = json!({
        "id": id,
        "title": title,
        "destination": field("destination"),
        "startDate": field("startDate"),
        "endDate": field("endDate"),
        "image": field("image"),
        "description": field("description"),
        "photos": payload.get("photos").cloned().unwrap_or(json!([])),
        "location": { "lat": 0, "lng": 0 }
    });
    server.trips.lock().unwrap().push(trip.clone());
    (StatusCode::CREATED, Json(trip))
}

async fn delete_trip(
    State(server): State<TestServer>,
    UrlPath(id): UrlPath<String>,
) -> (StatusCode, Json<Value>) {
    let mut trips = server.trips.lock().unwrap();
    let before = trips.len();
    trips.retain(|t| t["id"] != id.as_str());
    if trips.len() == before {
        (StatusCode::NOT_FOUND, Json(json!({ "error": "Trip not found" })))
    } else {
        (StatusCode::OK, Json(json!({ "ok": true })))
    }
}

async fn upload(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("file").to_string();
            let mime = field.content_type().unwrap_or("").to_string();
            let len = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            return (
                StatusCode::CREATED,
                Json(json!({ "url": format!("http://test/uploads/{}?mime={}&len={}", name, mime, len) })),
            );
        }
    }
    (StatusCode::BAD_REQUEST, Json(json!({ "error": "No file uploaded" })))
}

/// Start the trip server on an ephemeral port. Returns its base URL.
pub async fn spawn_trip_server() -> (String, TestServer) {
    let server = TestServer::default();
    server.set_healthy(true);

    let app = Router::new()
        .route("/health", get(health))
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/{id}", delete(delete_trip))
        .route("/uploads", post(upload))
        .with_state(server.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), server)
}
