//! Lifecycle observers.
//!
//! A hook registered on a client runs once per request, right after the
//! transport request is created and before the method, headers and timeout
//! are finalized. Hooks may inspect or mutate the request.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use reqwest::Request;

/// Callback invoked with each newly created request.
pub type CreateHook = Arc<dyn Fn(&mut Request) + Send + Sync>;

/// Handle returned by [`RestClient::subscribe`](crate::RestClient::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Hooks {
    next_id: AtomicU64,
    entries: RwLock<Vec<(SubscriptionId, CreateHook)>>,
}

impl Hooks {
    pub(crate) fn subscribe(&self, hook: CreateHook) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, hook));
        id
    }

    pub(crate) fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Run every hook in registration order.
    ///
    /// The lock is released before any hook runs, so a hook may subscribe or
    /// unsubscribe without deadlocking; such changes apply from the next
    /// request on.
    pub(crate) fn emit_create(&self, request: &mut Request) {
        let hooks: Vec<CreateHook> = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, hook)| Arc::clone(hook))
            .collect();

        if hooks.is_empty() {
            return;
        }
        tracing::trace!(count = hooks.len(), url = %request.url(), "running create hooks");
        for hook in hooks {
            hook(request);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").field("count", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn request() -> Request {
        Request::new(
            reqwest::Method::GET,
            "http://example.com/".parse().unwrap(),
        )
    }

    #[test]
    fn test_hooks_run_in_order_and_can_mutate() {
        let hooks = Hooks::default();
        hooks.subscribe(Arc::new(|req: &mut Request| {
            req.headers_mut()
                .insert("x-order", "first".parse().unwrap());
        }));
        hooks.subscribe(Arc::new(|req: &mut Request| {
            let prev = req.headers()["x-order"].to_str().unwrap().to_string();
            req.headers_mut()
                .insert("x-order", format!("{prev},second").parse().unwrap());
        }));

        let mut req = request();
        hooks.emit_create(&mut req);
        assert_eq!(req.headers()["x-order"], "first,second");
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let hooks = Hooks::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let id = hooks.subscribe(Arc::new(move |_: &mut Request| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        hooks.emit_create(&mut request());
        assert!(hooks.unsubscribe(id));
        assert!(!hooks.unsubscribe(id));
        hooks.emit_create(&mut request());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(hooks.len(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let hooks = Hooks::default();
        let a = hooks.subscribe(Arc::new(|_: &mut Request| {}));
        let b = hooks.subscribe(Arc::new(|_: &mut Request| {}));
        assert_ne!(a, b);
        assert_eq!(hooks.len(), 2);
    }
}
