//! Event subscription and dispatch.
//!
//! - Bus: named buckets of handlers, synchronous in-order dispatch
//! - Handler: per-subscription throttle and expiry state
//!
//! Subscriptions are configured after creation through id-keyed setters on
//! the bus; see [`EventBus`].

mod bus;
mod handler;

pub use bus::EventBus;
pub use handler::{HandlerId, InnerCallback, ResultCallback};
