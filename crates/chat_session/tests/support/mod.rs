#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard};
use std::thread;
use std::time::{Duration, Instant};

use assistant_provider::{RequestId, TurnRequest};
use chat_session::app::HostOps;

/// Records every host call; `start_request` fails while `refuse` is set.
#[derive(Default)]
pub struct HostSpy {
    pub started: Vec<TurnRequest>,
    pub render_requests: usize,
    pub stop_requests: usize,
    pub refuse: Option<String>,
}

impl HostSpy {
    pub fn refusing(error: &str) -> Self {
        Self {
            refuse: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn started_ids(&self) -> Vec<RequestId> {
        self.started.iter().map(|request| request.request_id).collect()
    }
}

impl HostOps for HostSpy {
    fn start_request(&mut self, request: TurnRequest) -> Result<(), String> {
        if let Some(error) = self.refuse.as_ref() {
            return Err(error.clone());
        }
        self.started.push(request);
        Ok(())
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }

    fn request_stop(&mut self) {
        self.stop_requests += 1;
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Polls `condition` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
