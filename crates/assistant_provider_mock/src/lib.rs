//! Deterministic mock implementation of the shared `assistant_provider` contract.
//!
//! This crate contains no transport/protocol logic and is intended for local
//! development and contract-level integration testing.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use assistant_provider::{
    AssistantProvider, ProbeKind, ProviderProfile, TurnKind, TurnReply, TurnRequest,
};

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

/// Scripted outcome for one turn.
pub type ScriptedTurn = Result<TurnReply, String>;

/// Blocks `MockProvider::send` until released, so callers can observe the pending window.
#[derive(Debug, Clone, Default)]
pub struct MockGate {
    inner: Arc<(Mutex<usize>, Condvar)>,
}

impl MockGate {
    /// Lets one blocked (or future) turn proceed.
    pub fn release(&self) {
        let (permits, ready) = &*self.inner;
        *lock_unpoisoned(permits) += 1;
        ready.notify_all();
    }

    fn wait(&self) {
        let (permits, ready) = &*self.inner;
        let mut available = lock_unpoisoned(permits);
        while *available == 0 {
            available = match ready.wait(available) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }
        *available -= 1;
    }
}

/// Deterministic mock provider used by `chat_session` tests and offline runs.
#[derive(Debug)]
pub struct MockProvider {
    script: Mutex<VecDeque<ScriptedTurn>>,
    requests: Mutex<Vec<TurnRequest>>,
    delay: Duration,
    gate: Option<MockGate>,
}

impl MockProvider {
    /// Creates a provider that answers turns from `script` in order, then falls
    /// back to canned replies.
    #[must_use]
    pub fn new(script: Vec<ScriptedTurn>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
            gate: None,
        }
    }

    /// Creates a provider whose turns block until the returned gate releases them.
    #[must_use]
    pub fn gated(script: Vec<ScriptedTurn>) -> (Self, MockGate) {
        let gate = MockGate::default();
        let mut provider = Self::new(script);
        provider.gate = Some(gate.clone());
        (provider, gate)
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<TurnRequest> {
        lock_unpoisoned(&self.requests).clone()
    }

    const RUN_DELAY_MS: u64 = 200;
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(Vec::new()).with_delay(Duration::from_millis(Self::RUN_DELAY_MS))
    }
}

impl AssistantProvider for MockProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: MOCK_PROVIDER_ID.to_string(),
            endpoint: "mock://cyber-bot".to_string(),
        }
    }

    fn send(&self, req: TurnRequest) -> Result<TurnReply, String> {
        lock_unpoisoned(&self.requests).push(req.clone());

        if let Some(gate) = self.gate.as_ref() {
            gate.wait();
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let scripted = lock_unpoisoned(&self.script).pop_front();
        match scripted {
            Some(outcome) => outcome,
            None => Ok(canned_reply(&req.kind)),
        }
    }
}

fn canned_reply(kind: &TurnKind) -> TurnReply {
    match kind {
        TurnKind::Chat { message } if message.trim().eq_ignore_ascii_case("help") => {
            TurnReply::new(
                true,
                "**Commands**\n• `search <terms>`\n• `check md5 <hash>`\n• `stats`\n• `help`",
            )
            .with_category("help")
        }
        TurnKind::Chat { message } => {
            TurnReply::new(true, format!("Mock bot received: `{}`", message.trim()))
                .with_category("unknown")
        }
        TurnKind::Probe(probe) => {
            let text = match probe {
                ProbeKind::Health => "**Status:** healthy",
                ProbeKind::Stats => "**Total commands:** 0",
                ProbeKind::Commands => "**Available commands:** help",
            };
            TurnReply::new(true, text).with_category(probe.as_str())
        }
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
