use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use serde_json::Value;
use tracing::debug;
use zeroframe_core::{Frame, LogSink};

use crate::ZeroFrame;

/// Callback for a request pushed by the host: `(command, params)`.
pub type RequestHandler = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// Handlers for host-initiated requests, keyed by command name.
/// Clones share the same registry.
#[derive(Clone, Default)]
pub struct RequestHandlers {
    inner: Arc<RwLock<HashMap<String, Vec<RequestHandler>>>>,
}

impl RequestHandlers {
    /// Register `handler` for `command`. Several handlers may share a command.
    pub fn on_request<H>(&self, command: impl Into<String>, handler: H)
    where
        H: Fn(&str, &Value) + Send + Sync + 'static,
    {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(command.into())
            .or_default()
            .push(Arc::new(handler));
    }

    /// Run every handler registered for `command`, in registration order.
    /// Returns how many ran.
    ///
    /// `Frame` only carries page-to-host traffic; the transport that receives host pushes
    /// calls this (or [`RequestHandlers::route_all`]) for each one.
    pub fn route(&self, command: &str, params: &Value) -> usize {
        let handlers = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(command)
            .cloned()
            .unwrap_or_default();
        if handlers.is_empty() {
            debug!(%command, "no handler for host request");
            return 0;
        }
        for handler in &handlers {
            handler(command, params);
        }
        handlers.len()
    }

    /// Route a batch of pushed requests in order. Returns the total handler runs.
    pub fn route_all<I>(&self, requests: I) -> usize
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        requests
            .into_iter()
            .map(|(command, params)| self.route(&command, &params))
            .sum()
    }

    pub fn registered(&self, command: &str) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(command)
            .map_or(0, Vec::len)
    }
}

impl<F: Frame, L: LogSink + 'static> ZeroFrame<F, L> {
    /// Shorthand for `self.requests().on_request(..)`.
    pub fn on_request<H>(&self, command: impl Into<String>, handler: H)
    where
        H: Fn(&str, &Value) + Send + Sync + 'static,
    {
        self.requests().on_request(command, handler);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use crate::testing::harness;

    use super::*;

    #[test]
    fn routes_to_all_handlers_in_order() {
        let (zf, _frame) = harness();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for tag in ["first", "second"] {
            let seen = Arc::clone(&seen);
            zf.on_request("setSiteInfo", move |command, params| {
                seen.lock()
                    .expect("lock")
                    .push(format!("{tag}:{command}:{}", params["address"]));
            });
        }

        let ran = zf
            .requests()
            .route("setSiteInfo", &json!({ "address": "1Abc" }));

        assert_eq!(ran, 2);
        assert_eq!(
            *seen.lock().expect("lock"),
            vec![
                r#"first:setSiteInfo:"1Abc""#.to_string(),
                r#"second:setSiteInfo:"1Abc""#.to_string(),
            ]
        );
    }

    #[test]
    fn routes_requests_pushed_by_frame() {
        let (zf, frame) = harness();
        let addresses = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&addresses);
        zf.on_request("setSiteInfo", move |_, params| {
            sink.lock().expect("lock").push(params["address"].clone());
        });

        frame
            .push_request("setSiteInfo", json!({ "address": "1Abc" }))
            .push_request("wrapperOpenedWebsocket", Value::Null)
            .push_request("setSiteInfo", json!({ "address": "1Def" }));

        assert_eq!(zf.requests().route_all(frame.take_requests()), 2);
        assert_eq!(
            *addresses.lock().expect("lock"),
            vec![json!("1Abc"), json!("1Def")]
        );
        assert!(frame.invocations().is_empty());
    }

    #[test]
    fn unknown_requests_are_ignored() {
        let handlers = RequestHandlers::default();
        assert_eq!(handlers.route("wrapperOpenedWebsocket", &Value::Null), 0);
        assert_eq!(handlers.registered("wrapperOpenedWebsocket"), 0);
    }

    #[test]
    fn clones_share_registry() {
        let handlers = RequestHandlers::default();
        let clone = handlers.clone();
        clone.on_request("wrapperClosedWebsocket", |_, _| {});
        assert_eq!(handlers.registered("wrapperClosedWebsocket"), 1);
    }
}
