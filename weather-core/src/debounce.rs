//! Keystroke debouncing for city suggestions.
//!
//! Each [`SuggestionDebouncer::submit`] restarts the quiet-period timer. When
//! the timer fires the lookup runs on its own task, so a later submit cancels
//! only timers, never requests already on the wire. Results carry the sequence
//! number of the submit that produced them and are published only while that
//! number is still the latest one issued.

use std::{
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{runtime::Handle, sync::watch, task::JoinHandle};

use crate::{City, WeatherProvider, suggest::lookup_suggestions};

/// Suggestions published for one submitted query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionBatch {
    /// Zero until the first lookup completes.
    pub seq: u64,
    pub query: String,
    pub cities: Vec<City>,
}

#[derive(Debug)]
pub struct SuggestionDebouncer {
    provider: Arc<dyn WeatherProvider>,
    delay: Duration,
    runtime: Handle,
    issued: Arc<AtomicU64>,
    timer: Mutex<Option<JoinHandle<()>>>,
    published: Arc<watch::Sender<SuggestionBatch>>,
}

impl SuggestionDebouncer {
    /// Must be called from within a Tokio runtime.
    pub fn new(provider: Arc<dyn WeatherProvider>, delay: Duration) -> Self {
        Self::with_handle(provider, delay, Handle::current())
    }

    /// For callers living on a blocking thread (interactive prompts).
    pub fn with_handle(provider: Arc<dyn WeatherProvider>, delay: Duration, runtime: Handle) -> Self {
        let (published, _) = watch::channel(SuggestionBatch::default());

        Self {
            provider,
            delay,
            runtime,
            issued: Arc::new(AtomicU64::new(0)),
            timer: Mutex::new(None),
            published: Arc::new(published),
        }
    }

    /// Record a new input value and restart the quiet period.
    ///
    /// Returns the sequence number assigned to `query`.
    pub fn submit(&self, query: impl Into<String>) -> u64 {
        let query = query.into();
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = timer.take() {
            pending.abort();
        }

        let provider = Arc::clone(&self.provider);
        let issued = Arc::clone(&self.issued);
        let published = Arc::clone(&self.published);
        let delay = self.delay;

        *timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            tokio::spawn(async move {
                let cities = lookup_suggestions(provider.as_ref(), &query).await;
                let batch = SuggestionBatch { seq, query, cities };

                let applied = published.send_if_modified(|current| {
                    if issued.load(Ordering::SeqCst) != seq || current.seq >= seq {
                        return false;
                    }
                    *current = batch;
                    true
                });

                if !applied {
                    tracing::debug!(seq, "discarding superseded suggestions");
                }
            });
        }));

        seq
    }

    /// The most recently published batch.
    pub fn latest(&self) -> SuggestionBatch {
        self.published.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionBatch> {
        self.published.subscribe()
    }

    /// Highest sequence number handed out by [`submit`](Self::submit).
    pub fn last_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Wait until the batch for `seq`, or a newer one, has been published.
    ///
    /// A superseded `seq` whose own lookup was discarded resolves once the
    /// newer submission publishes.
    pub async fn settled(&self, seq: u64) -> SuggestionBatch {
        let mut rx = self.subscribe();
        match rx.wait_for(|batch| batch.seq >= seq).await {
            Ok(batch) => batch.clone(),
            // The sender lives in `self`, so this only happens mid-drop.
            Err(_) => self.latest(),
        }
    }
}

impl Drop for SuggestionDebouncer {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = timer.take() {
            pending.abort();
        }
    }
}
