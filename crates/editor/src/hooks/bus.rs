//! The hook bus: two ordered-callback collections keyed by name.
//!
//! Actions and filters are kept as distinct collections rather than one
//! polymorphic mechanism; each listener list stays sorted by
//! `(priority, registration order)`.

use std::collections::HashMap;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, error};

/// Priority used when a listener does not declare one.
pub const DEFAULT_PRIORITY: i32 = 20;

type ActionCallback = Box<dyn Fn(&[Value]) -> Result<()> + Send + Sync>;
type FilterCallback = Box<dyn Fn(Value, &[Value]) -> Result<Value> + Send + Sync>;

struct Listener<C> {
    priority: i32,
    order: u64,
    callback: C,
}

/// Synchronous, in-process publish-subscribe.
#[derive(Default)]
pub struct HookBus {
    actions: HashMap<String, Vec<Listener<ActionCallback>>>,
    filters: HashMap<String, Vec<Listener<FilterCallback>>>,
    next_order: u64,
}

impl HookBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to an action at [`DEFAULT_PRIORITY`].
    pub fn add_action<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: Fn(&[Value]) -> Result<()> + Send + Sync + 'static,
    {
        self.add_action_with_priority(name, DEFAULT_PRIORITY, callback);
    }

    /// Subscribe to an action. Lower priority runs first; equal priorities
    /// run in registration order.
    pub fn add_action_with_priority<F>(&mut self, name: impl Into<String>, priority: i32, callback: F)
    where
        F: Fn(&[Value]) -> Result<()> + Send + Sync + 'static,
    {
        let order = self.next_order;
        self.next_order += 1;
        let listeners = self.actions.entry(name.into()).or_default();
        listeners.push(Listener {
            priority,
            order,
            callback: Box::new(callback),
        });
        listeners.sort_by_key(|l| (l.priority, l.order));
    }

    /// Subscribe to a filter at [`DEFAULT_PRIORITY`].
    pub fn add_filter<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: Fn(Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.add_filter_with_priority(name, DEFAULT_PRIORITY, callback);
    }

    /// Subscribe to a filter. Lower priority runs first; equal priorities
    /// run in registration order.
    pub fn add_filter_with_priority<F>(&mut self, name: impl Into<String>, priority: i32, callback: F)
    where
        F: Fn(Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let order = self.next_order;
        self.next_order += 1;
        let listeners = self.filters.entry(name.into()).or_default();
        listeners.push(Listener {
            priority,
            order,
            callback: Box::new(callback),
        });
        listeners.sort_by_key(|l| (l.priority, l.order));
    }

    /// Fire an action. Listeners run in priority order; a failing listener
    /// is logged and skipped, never propagated.
    pub fn do_action(&self, name: &str, args: &[Value]) {
        let Some(listeners) = self.actions.get(name) else {
            debug!(hook = %name, "no listeners registered for action");
            return;
        };
        for listener in listeners {
            if let Err(e) = (listener.callback)(args) {
                error!(
                    hook = %name,
                    priority = listener.priority,
                    error = %e,
                    "action listener failed"
                );
            }
        }
    }

    /// Pipeline a value through every filter listener. Each listener
    /// receives the previous listener's output; with zero listeners the
    /// input passes through unchanged. A failing listener is logged and its
    /// stage is skipped.
    pub fn apply_filters(&self, name: &str, value: Value, args: &[Value]) -> Value {
        let Some(listeners) = self.filters.get(name) else {
            return value;
        };
        let mut current = value;
        for listener in listeners {
            match (listener.callback)(current.clone(), args) {
                Ok(next) => current = next,
                Err(e) => {
                    error!(
                        hook = %name,
                        priority = listener.priority,
                        error = %e,
                        "filter listener failed"
                    );
                }
            }
        }
        current
    }

    /// Whether any listener subscribes to the action.
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.get(name).is_some_and(|l| !l.is_empty())
    }

    /// Whether any listener subscribes to the filter.
    pub fn has_filter(&self, name: &str) -> bool {
        self.filters.get(name).is_some_and(|l| !l.is_empty())
    }

    /// Number of listeners subscribed to the action.
    pub fn action_count(&self, name: &str) -> usize {
        self.actions.get(name).map(Vec::len).unwrap_or(0)
    }

    /// Number of listeners subscribed to the filter.
    pub fn filter_count(&self, name: &str) -> usize {
        self.filters.get(name).map(Vec::len).unwrap_or(0)
    }
}

impl std::fmt::Debug for HookBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookBus")
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .field("filters", &self.filters.keys().collect::<Vec<_>>())
            .finish()
    }
}
