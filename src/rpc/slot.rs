//! Call slot: the state machine behind one result panel.
//!
//! A slot owns at most one in-flight call. Issuing new params aborts the
//! previous call and bumps the slot generation; a completion is only written
//! if its generation is still current, so a response that races past the
//! abort is dropped. The core imposes no timeout: a stalled exchange keeps
//! the slot in `Loading` until it is superseded or detached.

use super::client::{CallParams, RpcClient};
use super::models::CallState;
use futures_util::future::{AbortHandle, Abortable};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// State shared between the slot and the tasks it spawns.
struct Shared {
    state: watch::Sender<CallState>,
    generation: AtomicU64,
}

impl Shared {
    /// Writes `outcome` only if `generation` is still the current request.
    fn complete(&self, generation: u64, outcome: CallState) -> bool {
        // The generation check runs under the channel lock so a concurrent
        // `issue` cannot interleave between check and write.
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = outcome;
            true
        })
    }
}

struct InFlight {
    generation: u64,
    abort: AbortHandle,
}

/// One logical request slot.
pub struct CallSlot {
    client: RpcClient,
    shared: Arc<Shared>,
    in_flight: Option<InFlight>,
    last_params: Option<CallParams>,
}

impl CallSlot {
    pub fn new(client: RpcClient) -> Self {
        let (state, _) = watch::channel(CallState::Idle);
        Self {
            client,
            shared: Arc::new(Shared {
                state,
                generation: AtomicU64::new(0),
            }),
            in_flight: None,
            last_params: None,
        }
    }

    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Current state snapshot.
    pub fn state(&self) -> CallState {
        self.shared.state.borrow().clone()
    }

    /// Stream of state transitions.
    pub fn subscribe(&self) -> watch::Receiver<CallState> {
        self.shared.state.subscribe()
    }

    /// Params of the most recent logical request, if any.
    pub fn params(&self) -> Option<&CallParams> {
        self.last_params.as_ref()
    }

    /// `(state, params) -> state'`: re-issues only when `params` differ by
    /// value from the current request. Returns whether a call was issued.
    pub fn update(&mut self, params: CallParams) -> bool {
        if self.last_params.as_ref() == Some(&params) {
            return false;
        }
        self.issue(params);
        true
    }

    /// Starts a new logical request, superseding whatever was in flight.
    pub fn issue(&mut self, params: CallParams) {
        self.cancel_in_flight();

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.state.send_replace(CallState::Loading);

        let (abort, registration) = AbortHandle::new_pair();
        let client = self.client.clone();
        let shared = Arc::clone(&self.shared);
        let task_params = params.clone();

        tokio::spawn(async move {
            let call = async { client.call(&task_params).await };
            match Abortable::new(call, registration).await {
                Ok(outcome) => {
                    if !shared.complete(generation, outcome) {
                        log::debug!("[RPC] dropping stale completion #{}", generation);
                    }
                }
                Err(_) => log::debug!("[RPC] call #{} aborted", generation),
            }
        });

        self.in_flight = Some(InFlight { generation, abort });
        self.last_params = Some(params);
    }

    /// The consumer went away: abort any pending call and return to `Idle`.
    /// A later `issue` starts over.
    pub fn detach(&mut self) {
        self.cancel_in_flight();
        self.last_params = None;

        // Any task that slipped past the abort now fails the generation check.
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        self.shared.state.send_replace(CallState::Idle);
    }

    /// Waits until the current request reaches a terminal state, or until
    /// the slot is detached. Returns immediately with `Idle` when nothing was
    /// issued.
    pub async fn settled(&self) -> CallState {
        let mut rx = self.shared.state.subscribe();
        let current = rx.borrow_and_update().clone();
        if current == CallState::Idle || current.is_terminal() {
            return current;
        }
        let settled = match rx
            .wait_for(|state| *state == CallState::Idle || state.is_terminal())
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            // Invalidate first so a completion already past the abort point
            // fails the generation check.
            self.shared
                .generation
                .fetch_max(in_flight.generation + 1, Ordering::SeqCst);
            in_flight.abort.abort();
        }
    }
}

impl Drop for CallSlot {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
