//! Event handler record - per-subscription state.
//!
//! Each subscription is an explicit record holding its own throttle and
//! expiry state. Handlers never interact with each other; the bus walks a
//! bucket and asks each record to attempt an invocation.

use std::rc::Rc;

/// Identifies one subscription on a bus.
///
/// Ids are unique per bus and monotonically increasing. Holding an id does
/// not keep the handler alive; configuration and removal go through the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) u64);

/// The subscriber-supplied callback, invoked with the emit arguments.
pub type InnerCallback<A, R> = Rc<dyn Fn(&A) -> R>;

/// Optional callback that receives the inner callback's return value.
pub type ResultCallback<R> = Rc<dyn Fn(&R)>;

/// One subscription: callback plus throttle/expiry state.
///
/// All timestamps are in milliseconds on the owning bus's clock.
pub(crate) struct Handler<A, R> {
    pub(crate) id: HandlerId,
    /// Event name the handler is registered under. Immutable after creation.
    pub(crate) event: String,
    /// Cleared once the firing budget is exhausted. An inactive handler is
    /// never invoked again and is pruned at the end of the emit pass.
    pub(crate) active: bool,
    /// Successful invocations so far.
    pub(crate) call_count: u32,
    /// Cap on successful invocations. Zero means unlimited.
    pub(crate) call_limit: u32,
    /// Timestamp of the most recent successful invocation. `None` until the
    /// handler has fired once, so a throttle configured before the first
    /// call never suppresses it.
    pub(crate) last_called: Option<f64>,
    /// Throttle window. An attempt within `min_interval` of `last_called`
    /// is skipped without touching any counters.
    pub(crate) min_interval: f64,
    /// Deactivate after the first successful invocation, regardless of
    /// `call_limit`.
    pub(crate) fire_once: bool,
    pub(crate) inner: InnerCallback<A, R>,
    pub(crate) result_callback: Option<ResultCallback<R>>,
}

impl<A, R> Handler<A, R> {
    pub(crate) fn new(id: HandlerId, event: &str, inner: InnerCallback<A, R>) -> Self {
        Self {
            id,
            event: event.to_string(),
            active: true,
            call_count: 0,
            call_limit: 0,
            last_called: None,
            min_interval: 0.0,
            fire_once: false,
            inner,
            result_callback: None,
        }
    }

    /// Attempt one invocation at time `now`.
    ///
    /// Guards the actual callback: inactive handlers and throttled attempts
    /// are no-ops. A throttled attempt does not count against `call_limit`.
    pub(crate) fn call(&mut self, args: &A, now: f64) {
        if !self.active {
            return;
        }

        if let Some(last) = self.last_called {
            if now - last < self.min_interval {
                log::trace!("handler {:?} throttled on '{}'", self.id, self.event);
                return;
            }
        }

        let result = (self.inner)(args);
        self.last_called = Some(now);
        self.call_count += 1;

        if let Some(callback) = &self.result_callback {
            callback(&result);
        }

        // Check for the finished condition.
        if self.call_limit > 0 && self.call_count >= self.call_limit {
            self.active = false;
        }

        if self.fire_once {
            self.active = false;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
