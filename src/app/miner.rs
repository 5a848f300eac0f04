//! The miner's forward handler.
//!
//! One [`Miner`] serves inbound synapses for the lifetime of the process.
//! The surrounding peer-to-peer machinery (identity, transport, scoring) is
//! host-provided; the host invokes [`Miner::forward`] once per request and
//! polls [`Miner::should_exit`] between requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{FallbackPhrases, Synapse, Usage, UsageAccumulator};
use crate::error::Result;
use crate::port::{ChatRequest, EventSink, ForwardEvent, Llm};

/// Case-insensitive marker that flags a completion as a refusal.
const REFUSAL_MARKER: &str = "i'm sorry";

/// Serves chat synapses by forwarding them to an LLM backend.
///
/// The accumulator and RNG sit behind mutexes so a host that serves
/// requests concurrently cannot lose usage increments; neither lock is held
/// across an API await.
pub struct Miner {
    llm: Arc<dyn Llm>,
    sink: Option<Arc<dyn EventSink>>,
    system_prompt: String,
    fallbacks: FallbackPhrases,
    usage: Mutex<UsageAccumulator>,
    rng: Mutex<StdRng>,
    stop_on_forward_exception: bool,
    should_exit: AtomicBool,
}

impl Miner {
    /// Create a miner from configuration and an LLM backend.
    #[must_use]
    pub fn new(llm: Arc<dyn Llm>, config: &Config) -> Self {
        Self {
            llm,
            sink: None,
            system_prompt: config.miner.system_prompt.clone(),
            fallbacks: FallbackPhrases::default(),
            usage: Mutex::new(UsageAccumulator::default()),
            rng: Mutex::new(StdRng::from_entropy()),
            stop_on_forward_exception: config.miner.stop_on_forward_exception,
            should_exit: AtomicBool::new(false),
        }
    }

    /// Attach a telemetry sink. Without one, no events are emitted.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace the random source for fallback selection.
    #[must_use]
    pub fn with_rng(self, rng: StdRng) -> Self {
        *self.rng.lock() = rng;
        self
    }

    /// Replace the fallback phrase set.
    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: FallbackPhrases) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Serve one synapse.
    ///
    /// Always returns a synapse with `completion` populated: a model answer,
    /// a fallback phrase, or an `"Error: …"` diagnostic. Never fails from
    /// the transport's perspective.
    pub async fn forward(&self, mut synapse: Synapse) -> Synapse {
        let started = Instant::now();
        let request_id = Uuid::new_v4();

        if let Err(e) = self.try_forward(&mut synapse, started, request_id).await {
            error!(%request_id, error = %e, "error in forward");
            synapse.completion = Some(format!("Error: {e}"));
        }

        // Read unconditionally after every request, success or failure.
        if self.stop_on_forward_exception {
            self.should_exit.store(true, Ordering::SeqCst);
        }

        synapse
    }

    /// Whether the host's serving loop has been asked to stop.
    pub fn should_exit(&self) -> bool {
        self.should_exit.load(Ordering::SeqCst)
    }

    /// Accumulated usage totals since this miner was created.
    pub fn usage_totals(&self) -> Usage {
        self.usage.lock().totals()
    }

    async fn try_forward(
        &self,
        synapse: &mut Synapse,
        started: Instant,
        request_id: Uuid,
    ) -> Result<()> {
        let (role, message) = synapse.last_turn()?;
        let role = role.to_string();
        let message = message.to_string();
        debug!(%request_id, role = %role, backend = self.llm.name(), "message received");

        let request = ChatRequest::new(self.system_prompt.as_str(), message.as_str());
        let completion = self.llm.complete(&request).await?;
        // Only the primary call's usage is accounted; a fallback retry below
        // does not touch the counters.
        let usage = completion.usage;
        synapse.completion = Some(completion.text.clone());

        if completion.text.to_lowercase().contains(REFUSAL_MARKER) {
            let phrase = {
                let mut rng = self.rng.lock();
                self.fallbacks.choose(&mut *rng).to_string()
            };
            debug!(%request_id, "refusal detected, substituting fallback phrase");
            let retry = ChatRequest::new(self.system_prompt.as_str(), phrase.as_str());
            // The caller receives the phrase itself; the second answer is
            // discarded.
            let _ = self.llm.complete(&retry).await?;
            synapse.completion = Some(phrase);
        }

        let elapsed = started.elapsed();
        let report = self.usage.lock().record(&usage);

        if let Some(sink) = &self.sink {
            let event = ForwardEvent {
                request_id,
                elapsed,
                prompt: message,
                completion: synapse.completion.clone().unwrap_or_default(),
                system_prompt: self.system_prompt.clone(),
                usage: report,
            };
            sink.record(&event).await;
        }

        debug!(
            %request_id,
            elapsed_ms = elapsed.as_millis() as u64,
            "served response"
        );
        Ok(())
    }
}
