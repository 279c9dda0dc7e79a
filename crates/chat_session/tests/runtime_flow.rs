mod support;

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use assistant_provider::{
    AssistantProvider, ProviderProfile, TurnKind, TurnReply, TurnRequest,
};
use assistant_provider_mock::MockProvider;
use chat_session::app::{App, HostOps, Mode, FAILURE_TEXT};
use chat_session::identity::SessionIdentity;
use chat_session::runtime::{
    Command, RuntimeController, RuntimeHandle, ERROR_REQUEST_ALREADY_ACTIVE,
};
use chat_session::transcript::Outcome;

use support::{lock_unpoisoned, wait_until};

const WAIT: Duration = Duration::from_secs(5);

struct Harness {
    app: Arc<Mutex<App>>,
    host: Arc<RuntimeController>,
    receiver: Receiver<Command>,
}

impl Harness {
    fn new(provider: Arc<dyn AssistantProvider>) -> Self {
        let app = Arc::new(Mutex::new(App::new(SessionIdentity::new(
            "user_1",
            "session_1",
        ))));
        let (handle, receiver) = RuntimeHandle::channel();
        let host = RuntimeController::new(Arc::clone(&app), handle, provider);
        Self {
            app,
            host,
            receiver,
        }
    }

    fn submit(&self, text: &str) {
        let mut host = Arc::clone(&self.host);
        lock_unpoisoned(&self.app).on_submit(text, &mut host);
    }

    /// Waits for the worker to queue its outcome, then applies it.
    fn settle(&self) -> usize {
        let deadline = Instant::now() + WAIT;
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            match self.receiver.recv_timeout(remaining) {
                Ok(Command::DrainEvents) => return self.host.flush_pending_events(),
                Ok(_) => continue,
                Err(_) => break,
            }
        }
        panic!("worker did not report an outcome in time");
    }

    fn app(&self) -> App {
        lock_unpoisoned(&self.app).clone()
    }
}

struct PanickingProvider;

impl AssistantProvider for PanickingProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: "panic".to_string(),
            endpoint: "memory://panic".to_string(),
        }
    }

    fn send(&self, _req: TurnRequest) -> Result<TurnReply, String> {
        panic!("provider exploded");
    }
}

#[test]
fn reply_is_applied_after_drain() {
    let provider = Arc::new(MockProvider::new(vec![Ok(TurnReply::new(
        true,
        "**Commands**",
    )
    .with_category("help")
    .with_timestamp("2024-01-01T00:00:00Z"))]));
    let harness = Harness::new(provider.clone());

    harness.submit("help");
    assert_eq!(harness.settle(), 1);

    let app = harness.app();
    assert_eq!(app.mode, Mode::Idle);
    assert_eq!(app.transcript.len(), 3);
    let reply = app.transcript.last().expect("reply entry");
    assert_eq!(reply.text, "**Commands**");
    assert_eq!(reply.category.as_deref(), Some("help"));
    assert!(!harness.host.has_active_request());

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].kind,
        TurnKind::Chat {
            message: "help".to_string()
        }
    );
    assert_eq!(requests[0].user_id, "user_1");
    assert_eq!(requests[0].session_id, "session_1");
}

#[test]
fn only_one_request_is_in_flight() {
    let (provider, gate) = MockProvider::gated(Vec::new());
    let provider = Arc::new(provider);
    let harness = Harness::new(provider.clone());

    harness.submit("search xss");
    assert!(wait_until(WAIT, || provider.requests().len() == 1));
    assert!(harness.host.has_active_request());

    harness.submit("search sqli");
    let mut host = Arc::clone(&harness.host);
    let refused = host.start_request(TurnRequest::chat(99, "sneaky", "u", "s"));
    assert_eq!(refused, Err(ERROR_REQUEST_ALREADY_ACTIVE.to_string()));

    let pending = harness.app();
    assert_eq!(pending.mode, Mode::Pending { request_id: 1 });
    assert_eq!(pending.transcript.len(), 2);

    gate.release();
    assert_eq!(harness.settle(), 1);

    assert_eq!(provider.requests().len(), 1);
    assert_eq!(harness.app().transcript.len(), 3);
    assert!(!harness.host.has_active_request());
}

#[test]
fn transport_failure_sets_banner() {
    let provider = Arc::new(MockProvider::new(vec![Err(
        "request error: connection refused".to_string(),
    )]));
    let harness = Harness::new(provider);

    harness.submit("stats");
    harness.settle();

    let app = harness.app();
    assert_eq!(app.mode, Mode::Idle);
    let entry = app.transcript.last().expect("failure entry");
    assert_eq!(entry.text, FAILURE_TEXT);
    assert_eq!(entry.outcome, Some(Outcome { success: false }));
    assert_eq!(
        app.error.as_deref(),
        Some("request error: connection refused")
    );
}

#[test]
fn provider_panic_becomes_failure() {
    let harness = Harness::new(Arc::new(PanickingProvider));

    harness.submit("help");
    harness.settle();

    let app = harness.app();
    assert_eq!(app.mode, Mode::Idle);
    assert_eq!(app.transcript.len(), 3);
    assert_eq!(app.error.as_deref(), Some("Assistant provider panicked"));
    assert!(!harness.host.has_active_request());

    harness.submit("help");
    assert_eq!(harness.app().mode, Mode::Pending { request_id: 2 });
    harness.settle();
}

#[test]
fn reset_while_in_flight_discards_outcome() {
    let (provider, gate) = MockProvider::gated(vec![Ok(TurnReply::new(true, "late"))]);
    let harness = Harness::new(Arc::new(provider));

    harness.submit("search xss");
    {
        let mut host = Arc::clone(&harness.host);
        lock_unpoisoned(&harness.app).reset(&mut host);
    }

    gate.release();
    harness.settle();

    let app = harness.app();
    assert_eq!(app.mode, Mode::Idle);
    assert_eq!(app.transcript.len(), 1);
    assert!(!harness.host.has_active_request());
}

#[test]
fn host_calls_are_forwarded_to_front_end_queue() {
    let harness = Harness::new(Arc::new(MockProvider::new(Vec::new())));
    let mut host = Arc::clone(&harness.host);

    host.request_render();
    host.request_stop();

    assert_eq!(harness.receiver.try_recv(), Ok(Command::RequestRender));
    assert_eq!(harness.receiver.try_recv(), Ok(Command::RequestStop));
    assert_eq!(harness.host.flush_pending_events(), 0);
}
