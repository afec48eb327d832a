//! Action/filter publish-subscribe used internally and by extensions.
//!
//! Hooks are named extension points. Actions are fire-and-forget; filters
//! pipeline a value through every listener. Listeners run in ascending
//! priority order, ties broken by registration order, and a failing listener
//! is logged and skipped so one broken extension never halts the rest.

mod bus;

pub use bus::{DEFAULT_PRIORITY, HookBus};
