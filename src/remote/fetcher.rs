use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use log::{debug, error, warn};
use parking_lot::Mutex;
use reqwest::Url;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crate::error::{PreviewError, Result};
use crate::params::ParameterInputs;
use crate::remote::endpoint::PatternEndpoint;
use crate::scene::PatternRequester;

const RESULT_CAPACITY: usize = 4;

pub enum FetchCommand {
    Fetch { url: Url, generation: u64 },
    Stop,
}

/// Decoded RGBA8 pattern image.
pub struct PatternImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

pub enum FetchResult {
    Image(PatternImage),
    Failed(String),
}

/// Background worker that downloads pattern images. Requests are
/// fire-and-forget; results are polled once per frame. Only the newest
/// queued request is fetched, older ones are superseded.
pub struct PatternFetcher {
    endpoint: PatternEndpoint,
    tx_cmd: Sender<FetchCommand>,
    rx_result: Receiver<FetchResult>,
    last_error: Arc<Mutex<Option<String>>>,
    /// Generation of the last request handed out.
    requested: u64,
    /// Generation of the last request the worker finished or skipped past.
    completed: Arc<AtomicU64>,
    thread_handle: Option<JoinHandle<()>>,
}

impl PatternFetcher {
    pub fn new(endpoint: PatternEndpoint) -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<FetchCommand>();
        let (tx_result, rx_result) = channel::bounded::<FetchResult>(RESULT_CAPACITY);
        let last_error = Arc::new(Mutex::new(None));
        let last_error_clone = Arc::clone(&last_error);
        let completed = Arc::new(AtomicU64::new(0));
        let completed_clone = Arc::clone(&completed);

        let thread_handle = thread::Builder::new()
            .name("pattern-fetch".into())
            .spawn(move || fetch_thread(rx_cmd, tx_result, last_error_clone, completed_clone))
            .map_err(|e| {
                error!("pattern fetcher could not start: {e}");
                *last_error.lock() = Some(e.to_string());
                completed.store(u64::MAX, Ordering::Release);
            })
            .ok();

        Self {
            endpoint,
            tx_cmd,
            rx_result,
            last_error,
            requested: 0,
            completed,
            thread_handle,
        }
    }

    pub fn try_recv_result(&self) -> Option<FetchResult> {
        self.rx_result.try_recv().ok()
    }

    /// True while the newest request has not been answered yet.
    pub fn is_waiting(&self) -> bool {
        self.completed.load(Ordering::Acquire) < self.requested
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(FetchCommand::Stop);
    }
}

impl PatternRequester for PatternFetcher {
    fn request_pattern(&mut self, inputs: &ParameterInputs) {
        let url = self.endpoint.url_for(inputs);
        debug!("requesting pattern {url}");
        self.requested += 1;
        let _ = self.tx_cmd.send(FetchCommand::Fetch {
            url,
            generation: self.requested,
        });
    }
}

impl Drop for PatternFetcher {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(FetchCommand::Stop);
        while self.rx_result.try_recv().is_ok() {}
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn fetch_thread(
    rx_cmd: Receiver<FetchCommand>,
    tx_result: Sender<FetchResult>,
    last_error: Arc<Mutex<Option<String>>>,
    completed: Arc<AtomicU64>,
) {
    let client = match reqwest::blocking::Client::builder()
        .user_agent(concat!("fold-preview/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            error!("pattern http client unavailable: {e}");
            *last_error.lock() = Some(e.to_string());
            completed.store(u64::MAX, Ordering::Release);
            return;
        }
    };

    while let Ok(cmd) = rx_cmd.recv() {
        let Some((url, generation)) = newest_fetch(cmd, &rx_cmd) else {
            return;
        };
        *last_error.lock() = None;

        let result = match fetch_pattern(&client, &url) {
            Ok(image) => {
                debug!("pattern {}x{} received", image.width, image.height);
                FetchResult::Image(image)
            }
            Err(e) => {
                warn!("{e}");
                let message = e.to_string();
                *last_error.lock() = Some(message.clone());
                FetchResult::Failed(message)
            }
        };

        let sent = tx_result.try_send(result);
        completed.store(generation, Ordering::Release);
        match sent {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => debug!("result queue full, pattern {generation} dropped"),
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}

/// Collapses everything queued behind `first` to the newest fetch.
/// `None` once a stop is seen.
fn newest_fetch(first: FetchCommand, rx_cmd: &Receiver<FetchCommand>) -> Option<(Url, u64)> {
    let mut newest = None;
    for cmd in std::iter::once(first).chain(rx_cmd.try_iter()) {
        match cmd {
            FetchCommand::Fetch { url, generation } => newest = Some((url, generation)),
            FetchCommand::Stop => return None,
        }
    }
    newest
}

fn fetch_pattern(client: &reqwest::blocking::Client, url: &Url) -> Result<PatternImage> {
    let response = client.get(url.clone()).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(PreviewError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.bytes()?;
    decode_pattern(&body)
}

pub fn decode_pattern(bytes: &[u8]) -> Result<PatternImage> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(PatternImage {
        width: width as usize,
        height: height as usize,
        pixels: rgba.into_raw(),
    })
}
