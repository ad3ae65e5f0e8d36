//! One-shot background worker for header reading.
//!
//! Each worker owns one OS thread that handles exactly one request, posts
//! one [`HeaderResponse`] and exits.

use std::thread::{self, JoinHandle};

use tokio::sync::oneshot;

use crate::error::HeadersResult;
use crate::message::{HeaderRequest, HeaderResponse};
use crate::options::HeaderReadOptions;
use crate::reader::read_headers;

const TERMINATED: &str = "worker terminated without a response";

/// A running header-reading job
#[derive(Debug)]
pub struct HeaderWorker {
    rx: oneshot::Receiver<HeaderResponse>,
    thread: JoinHandle<()>,
}

impl HeaderWorker {
    /// Start a worker with default read options
    pub fn spawn(request: HeaderRequest) -> HeadersResult<Self> {
        Self::spawn_with(request, HeaderReadOptions::default())
    }

    /// Start a worker for `request`
    pub fn spawn_with(request: HeaderRequest, options: HeaderReadOptions) -> HeadersResult<Self> {
        let (tx, rx) = oneshot::channel();

        let thread = thread::Builder::new()
            .name("vitrine-header-worker".into())
            .spawn(move || {
                let response = match read_headers(&request, &options) {
                    Ok(headers) => HeaderResponse::Headers { headers },
                    Err(e) => {
                        log::warn!("header worker failed: {e}");
                        HeaderResponse::error(e.to_string())
                    }
                };
                if tx.send(response).is_err() {
                    log::debug!("header worker response dropped, receiver gone");
                }
            })?;

        Ok(Self { rx, thread })
    }

    /// Check whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the single response.
    pub async fn response(self) -> HeaderResponse {
        self.rx
            .await
            .unwrap_or_else(|_| HeaderResponse::error(TERMINATED))
    }

    /// Block the current thread until the response arrives, then reap the
    /// worker thread.
    ///
    /// Must not be called from inside an async runtime.
    pub fn blocking_response(self) -> HeaderResponse {
        let response = self
            .rx
            .blocking_recv()
            .unwrap_or_else(|_| HeaderResponse::error(TERMINATED));
        if self.thread.join().is_err() {
            log::warn!("header worker thread panicked");
        }
        response
    }
}

/// Run `request` on a fresh worker and wait for its response
pub async fn read_headers_in_background(request: HeaderRequest) -> HeaderResponse {
    match HeaderWorker::spawn(request) {
        Ok(worker) => worker.response().await,
        Err(e) => HeaderResponse::error(e.to_string()),
    }
}
