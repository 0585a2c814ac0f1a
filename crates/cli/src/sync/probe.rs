// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity probes.
//!
//! A probe answers "is the trip server reachable right now?" at call time.
//! Results are never cached between calls. A probe that cannot decide
//! answers `false`, so callers fall back to queuing.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Path probed by [`HealthProbe`].
pub const HEALTH_ENDPOINT: &str = "/health";

/// Probe trait for connectivity checks.
pub trait ConnectivityProbe: Send + Sync {
    /// Returns true if the remote is reachable.
    fn is_online(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>>;
}

impl ConnectivityProbe for Box<dyn ConnectivityProbe> {
    fn is_online(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        (**self).is_online()
    }
}

/// Probes the server's health endpoint with a short timeout.
pub struct HealthProbe {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HealthProbe {
    /// Create a probe for the server at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        HealthProbe {
            client: reqwest::Client::new(),
            url: format!("{}{}", base_url.trim_end_matches('/'), HEALTH_ENDPOINT),
            timeout,
        }
    }
}

impl ConnectivityProbe for HealthProbe {
    fn is_online(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        Box::pin(async move {
            match self.client.get(&self.url).timeout(self.timeout).send().await {
                Ok(response) if response.status().is_success() => true,
                Ok(response) => {
                    tracing::debug!(status = %response.status(), "health check not ok");
                    false
                }
                Err(e) => {
                    tracing::debug!(error = %e, "health check failed");
                    false
                }
            }
        })
    }
}

/// Probe with a fixed, switchable answer.
///
/// Clones share state, so a test (or the `--offline` flag) can flip
/// connectivity for an engine that owns another clone.
#[derive(Clone, Debug)]
pub struct FixedProbe {
    online: Arc<AtomicBool>,
}

impl FixedProbe {
    pub fn online() -> Self {
        Self::with_state(true)
    }

    pub fn offline() -> Self {
        Self::with_state(false)
    }

    fn with_state(online: bool) -> Self {
        FixedProbe {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Switch the reported state.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

impl ConnectivityProbe for FixedProbe {
    fn is_online(&self) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        let online = self.online.load(Ordering::SeqCst);
        Box::pin(async move { online })
    }
}
