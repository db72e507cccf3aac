//! Event bus - named buckets of throttled, expiring handlers.
//!
//! The bus maps event names to ordered handler buckets and dispatches
//! synchronously: handlers fire strictly in subscription order within one
//! `emit` call. Handlers exhausted during a pass are pruned only after the
//! whole bucket has been walked, so removal never happens mid-dispatch.
//!
//! There is no error channel. Emitting an unknown event name, configuring
//! an unknown handler id, and unsubscribing twice are all silent no-ops.
//!
//! # Example
//!
//! ```
//! use easel::EventBus;
//!
//! let mut bus: EventBus<i32> = EventBus::new();
//! let id = bus.subscribe("ping", |value| println!("ping: {value}"));
//! bus.set_call_limit(id, 3);
//! bus.emit("ping", &42);
//! ```

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use super::handler::{Handler, HandlerId, ResultCallback};

/// Milliseconds source used for throttle timestamps.
type Clock = Box<dyn Fn() -> f64>;

/// Named subscriber lists with per-handler throttle and expiry state.
///
/// Generic over the emit-argument type `A` and the inner callback's return
/// type `R`. Each bus instance is independent; construct one per scene or
/// session rather than sharing a global.
pub struct EventBus<A, R = ()> {
    buckets: HashMap<String, Vec<Handler<A, R>>>,
    next_id: u64,
    clock: Clock,
}

impl<A, R> EventBus<A, R> {
    /// Create a bus whose clock counts milliseconds from construction.
    pub fn new() -> Self {
        let start = Instant::now();
        Self::with_clock(move || start.elapsed().as_secs_f64() * 1000.0)
    }

    /// Create a bus with an injected clock.
    ///
    /// The clock returns milliseconds on an arbitrary epoch; only
    /// differences are ever taken. Intended for deterministic throttle
    /// tests.
    pub fn with_clock(clock: impl Fn() -> f64 + 'static) -> Self {
        Self {
            buckets: HashMap::new(),
            next_id: 0,
            clock: Box::new(clock),
        }
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribe `callback` to `event`.
    ///
    /// The handler is appended to the event's bucket (created on demand) and
    /// starts out unlimited and unthrottled; configure it afterwards through
    /// the id-keyed setters.
    pub fn subscribe<F>(&mut self, event: &str, callback: F) -> HandlerId
    where
        F: Fn(&A) -> R + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;

        let handler = Handler::new(id, event, Rc::new(callback));
        self.buckets.entry(event.to_string()).or_default().push(handler);

        log::debug!("subscribed {id:?} to '{event}'");
        id
    }

    /// Remove a handler immediately, regardless of its active flag.
    ///
    /// Used for manual cancellation; unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: HandlerId) {
        for bucket in self.buckets.values_mut() {
            let before = bucket.len();
            bucket.retain(|handler| handler.id != id);
            if bucket.len() != before {
                log::debug!("unsubscribed {id:?}");
                return;
            }
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Dispatch `args` to every active handler subscribed to `event`, in
    /// subscription order.
    ///
    /// Throttled handlers are skipped without mutating their counters.
    /// Handlers that exhaust their budget during this pass are removed from
    /// the bucket after the pass completes. An unknown event name is a
    /// no-op.
    pub fn emit(&mut self, event: &str, args: &A) {
        let Some(bucket) = self.buckets.get_mut(event) else {
            return;
        };

        log::trace!("emit '{event}' to {} handler(s)", bucket.len());

        let now = (self.clock)();
        for handler in bucket.iter_mut() {
            handler.call(args, now);
        }

        // Deferred removal: prune only after the full pass, so the bucket is
        // never mutated while it is being walked.
        bucket.retain(|handler| handler.active);
    }

    // =========================================================================
    // Handler configuration
    // =========================================================================

    /// Cap the handler's successful invocations. Zero means unlimited.
    pub fn set_call_limit(&mut self, id: HandlerId, limit: u32) {
        if let Some(handler) = self.handler_mut(id) {
            handler.call_limit = limit;
        }
    }

    /// Set the handler's throttle window in milliseconds.
    pub fn set_min_interval(&mut self, id: HandlerId, interval: f64) {
        if let Some(handler) = self.handler_mut(id) {
            handler.min_interval = interval;
        }
    }

    /// Deactivate the handler after its first successful invocation.
    pub fn set_fire_once(&mut self, id: HandlerId, fire_once: bool) {
        if let Some(handler) = self.handler_mut(id) {
            handler.fire_once = fire_once;
        }
    }

    /// Attach a callback that receives the inner callback's return value on
    /// every successful invocation.
    pub fn set_result_callback<F>(&mut self, id: HandlerId, callback: F)
    where
        F: Fn(&R) + 'static,
    {
        if let Some(handler) = self.handler_mut(id) {
            handler.result_callback = Some(Rc::new(callback) as ResultCallback<R>);
        }
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Whether the handler is still present in its bucket.
    pub fn is_subscribed(&self, id: HandlerId) -> bool {
        self.buckets
            .values()
            .any(|bucket| bucket.iter().any(|handler| handler.id == id))
    }

    /// Successful invocations so far, or `None` if the handler is gone.
    pub fn call_count(&self, id: HandlerId) -> Option<u32> {
        self.handler(id).map(|handler| handler.call_count)
    }

    /// The event name a handler is registered under, or `None` if gone.
    pub fn event_of(&self, id: HandlerId) -> Option<&str> {
        self.handler(id).map(|handler| handler.event.as_str())
    }

    /// Number of handlers currently subscribed to `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.buckets.get(event).map_or(0, Vec::len)
    }

    fn handler(&self, id: HandlerId) -> Option<&Handler<A, R>> {
        self.buckets
            .values()
            .flat_map(|bucket| bucket.iter())
            .find(|handler| handler.id == id)
    }

    fn handler_mut(&mut self, id: HandlerId) -> Option<&mut Handler<A, R>> {
        self.buckets
            .values_mut()
            .flat_map(|bucket| bucket.iter_mut())
            .find(|handler| handler.id == id)
    }
}

impl<A, R> Default for EventBus<A, R> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
