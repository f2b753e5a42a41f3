//! Async plumbing between the UI thread and the API client
//!
//! The frame loop never blocks: each request is spawned onto the app-owned
//! tokio runtime and writes its result into a [`Slot`], which the owning
//! page polls with `try_lock` once per frame. Superseded requests are not
//! cancelled; callers that care (search boxes) debounce before spawning.

use std::future::Future;
use std::sync::{Arc, Mutex};

use cmdb_client::{ApiClient, ApiError};

/// One-shot result slot for a spawned request.
pub struct Slot<T>(Arc<Mutex<Option<Result<T, ApiError>>>>);

impl<T> Slot<T> {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(None)))
    }

    /// Non-blocking poll; returns the result at most once.
    pub fn take(&self) -> Option<Result<T, ApiError>> {
        self.0.try_lock().ok().and_then(|mut guard| guard.take())
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Shared network handle: the API client plus the runtime requests run on.
#[derive(Clone)]
pub struct Net {
    pub api: ApiClient,
    runtime: Arc<tokio::runtime::Runtime>,
}

impl Net {
    pub fn new(api: ApiClient) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        Ok(Self {
            api,
            runtime: Arc::new(runtime),
        })
    }

    pub fn spawn<T, F>(&self, fut: F) -> Slot<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let slot = Slot::new();
        let out = slot.clone();
        self.runtime.spawn(async move {
            let result = fut.await;
            if let Ok(mut guard) = out.0.lock() {
                *guard = Some(result);
            }
        });
        slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmdb_client::Config;

    #[test]
    fn slot_yields_result_exactly_once() {
        let net = Net::new(ApiClient::new(&Config::default())).unwrap();
        let slot = net.spawn(async { Ok::<_, ApiError>(5u32) });
        // Spin until the spawned future lands.
        let mut result = None;
        for _ in 0..1000 {
            if let Some(r) = slot.take() {
                result = Some(r);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        assert_eq!(result.unwrap().unwrap(), 5);
        assert!(slot.take().is_none());
    }
}
