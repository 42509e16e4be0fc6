//! Bounded worker pool: N threads pull URLs from a shared queue and send each
//! outcome back over a channel as soon as it is ready.

use crate::fetch::{fetch_and_normalize, FetchFailure, FetchOutcome};
use crate::http::Client;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

/// Runs one worker per URL with at most `max_workers` in flight.
/// Results come back in completion order.
pub(super) fn dispatch(
    urls: Vec<String>,
    client: Arc<Client>,
    max_workers: usize,
) -> Vec<(String, FetchOutcome)> {
    let count = urls.len();
    if count == 0 {
        return Vec::new();
    }

    let work: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(urls.into_iter().collect()));
    let (tx, rx) = mpsc::channel();
    let num_workers = max_workers.max(1).min(count);
    tracing::debug!(urls = count, workers = num_workers, "dispatching");

    let mut handles = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let client = Arc::clone(&client);
        handles.push(thread::spawn(move || loop {
            let next = work
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();
            let url = match next {
                Some(u) => u,
                None => break,
            };
            let outcome = run_guarded(&client, &url);
            if tx.send((url, outcome)).is_err() {
                break;
            }
        }));
    }
    drop(tx);

    let results: Vec<(String, FetchOutcome)> = rx.iter().collect();
    for h in handles {
        if h.join().is_err() {
            tracing::error!("fetch worker thread panicked");
        }
    }
    results
}

/// Turns a panic inside the worker into an ordinary failure for that URL.
fn run_guarded(client: &Client, url: &str) -> FetchOutcome {
    panic::catch_unwind(AssertUnwindSafe(|| fetch_and_normalize(client, url))).unwrap_or_else(|_| {
        let f = FetchFailure::Other {
            url: url.to_string(),
            message: "worker panicked".to_string(),
        };
        tracing::error!("{}", f);
        FetchOutcome::Failed(f)
    })
}
