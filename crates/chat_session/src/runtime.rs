use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use assistant_provider::{AssistantProvider, RequestId, TurnEvent, TurnKind, TurnRequest};

use crate::app::{App, HostOps};

pub const ERROR_REQUEST_ALREADY_ACTIVE: &str = "Request already active";

/// Messages consumed by the front-end loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Input(String),
    InputClosed,
    DrainEvents,
    RequestRender,
    RequestStop,
}

/// Cloneable sender side of the front-end command queue.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    sender: Sender<Command>,
}

impl RuntimeHandle {
    pub fn channel() -> (Self, Receiver<Command>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    /// Queues a command; dropped silently once the loop has gone away.
    pub fn dispatch(&self, command: Command) {
        let _ = self.sender.send(command);
    }
}

struct ActiveRequest {
    request_id: RequestId,
    join_handle: Option<JoinHandle<()>>,
}

pub struct RuntimeController {
    app: Arc<Mutex<App>>,
    runtime_handle: RuntimeHandle,
    pending_events: Arc<Mutex<VecDeque<TurnEvent>>>,
    active_request: Mutex<Option<ActiveRequest>>,
    provider: Arc<dyn AssistantProvider>,
}

impl RuntimeController {
    /// Creates a controller that buffers turn events before applying them to `App`.
    ///
    /// The front-end loop drains events when it receives [`Command::DrainEvents`].
    /// Headless callers use [`RuntimeController::flush_pending_events`] instead.
    pub fn new(
        app: Arc<Mutex<App>>,
        runtime_handle: RuntimeHandle,
        provider: Arc<dyn AssistantProvider>,
    ) -> Arc<Self> {
        Arc::new(Self {
            app,
            runtime_handle,
            pending_events: Arc::new(Mutex::new(VecDeque::new())),
            active_request: Mutex::new(None),
            provider,
        })
    }

    fn start_request_internal(self: &Arc<Self>, request: TurnRequest) -> Result<(), String> {
        let mut active_request = self.lock_active_request();
        if active_request.is_some() {
            return Err(ERROR_REQUEST_ALREADY_ACTIVE.to_string());
        }

        let request_id = request.request_id;
        let join_handle = self.spawn_worker(request)?;
        *active_request = Some(ActiveRequest {
            request_id,
            join_handle: Some(join_handle),
        });

        Ok(())
    }

    fn spawn_worker(self: &Arc<Self>, request: TurnRequest) -> Result<JoinHandle<()>, String> {
        let request_id = request.request_id;
        let controller = Arc::clone(self);
        thread::Builder::new()
            .name(format!("cyber-chat-request-{request_id}"))
            .spawn(move || controller.run_worker(request))
            .map_err(|error| format!("Failed to spawn request worker: {error}"))
    }

    fn run_worker(self: Arc<Self>, request: TurnRequest) {
        let request_id = request.request_id;
        let kind = match &request.kind {
            TurnKind::Chat { .. } => "chat",
            TurnKind::Probe(probe) => probe.as_str(),
        };
        tracing::info!(target: "chat_session", request_id, kind, "request started");

        let provider = Arc::clone(&self.provider);
        let outcome = catch_unwind(AssertUnwindSafe(|| provider.send(request)));

        let event = match outcome {
            Ok(Ok(reply)) => {
                tracing::info!(
                    target: "chat_session",
                    request_id,
                    success = reply.success,
                    category = reply.category.as_deref().unwrap_or(""),
                    "request resolved"
                );
                TurnEvent::Replied { request_id, reply }
            }
            Ok(Err(error)) => {
                tracing::warn!(target: "chat_session", request_id, %error, "request failed");
                TurnEvent::Failed { request_id, error }
            }
            Err(_) => {
                tracing::error!(target: "chat_session", request_id, "assistant provider panicked");
                TurnEvent::Failed {
                    request_id,
                    error: "Assistant provider panicked".to_string(),
                }
            }
        };

        self.enqueue_event(event);
    }

    fn enqueue_event(self: &Arc<Self>, event: TurnEvent) {
        let should_drain = {
            let mut queue = lock_unpoisoned(&self.pending_events);
            let should_drain = queue.is_empty();
            queue.push_back(event);
            should_drain
        };

        if should_drain {
            self.runtime_handle.dispatch(Command::DrainEvents);
        }
    }

    /// Applies every queued turn event to `App`; returns how many were applied.
    pub fn drain_pending_events(&self) -> usize {
        let mut drained = 0usize;

        loop {
            let event = {
                let mut pending_events = lock_unpoisoned(&self.pending_events);
                pending_events.pop_front()
            };

            match event {
                Some(event) => {
                    self.apply_event(event);
                    drained += 1;
                }
                None => break,
            }
        }

        drained
    }

    /// Drains queued turn events and schedules a render.
    ///
    /// Use this in harnesses that never run the front-end loop.
    pub fn flush_pending_events(&self) -> usize {
        let drained = self.drain_pending_events();
        if drained > 0 {
            self.runtime_handle.dispatch(Command::RequestRender);
        }

        drained
    }

    pub fn has_active_request(&self) -> bool {
        self.lock_active_request().is_some()
    }

    fn apply_event(&self, event: TurnEvent) {
        let request_id = event.request_id();

        {
            let mut app = lock_unpoisoned(&self.app);
            match event {
                TurnEvent::Replied { request_id, reply } => app.on_reply(request_id, reply),
                TurnEvent::Failed { request_id, error } => app.on_failure(request_id, &error),
            }
        }

        self.clear_active_request_if_matching(request_id);
    }

    fn clear_active_request_if_matching(&self, request_id: RequestId) {
        let mut active_request = self.lock_active_request();
        let matches = active_request.as_ref().map(|active| active.request_id) == Some(request_id);
        if !matches {
            return;
        }

        let Some(mut completed) = active_request.take() else {
            return;
        };

        if let Some(join_handle) = completed.join_handle.take() {
            let is_current_thread = join_handle.thread().id() == thread::current().id();
            if !is_current_thread && join_handle.is_finished() {
                let _ = join_handle.join();
            }
        }
    }

    fn lock_active_request(&self) -> MutexGuard<'_, Option<ActiveRequest>> {
        lock_unpoisoned(&self.active_request)
    }
}

impl HostOps for Arc<RuntimeController> {
    fn start_request(&mut self, request: TurnRequest) -> Result<(), String> {
        self.start_request_internal(request)
    }

    fn request_render(&mut self) {
        self.runtime_handle.dispatch(Command::RequestRender);
    }

    fn request_stop(&mut self) {
        self.runtime_handle.dispatch(Command::RequestStop);
    }
}

pub(crate) fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
