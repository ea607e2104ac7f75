pub mod response;
mod verbs;

use std::sync::Arc;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Body, Client, Method, Request};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ClientConfig, ClientOptions, RequestOptions};
use crate::error::{RestError, Result};
use crate::hooks::{Hooks, SubscriptionId};

pub use response::{is_success_status, resolve, Response, SUCCESS_STATUSES};

/// REST client bound to a fixed base URL.
///
/// Every verb method issues exactly one request and resolves exactly once.
/// Concurrent calls share nothing but the read-only configuration and the
/// hook registry.
#[derive(Debug)]
pub struct RestClient {
    client: Client,
    config: ClientConfig,
    hooks: Hooks,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, options: ClientOptions) -> Self {
        Self::with_http_client(base_url, options, Client::new())
    }

    /// Build a client on top of an existing `reqwest::Client`.
    pub fn with_http_client(
        base_url: impl Into<String>,
        options: ClientOptions,
        client: Client,
    ) -> Self {
        Self {
            client,
            config: ClientConfig::new(base_url, options),
            hooks: Hooks::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Base URL and default options this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Register a hook that runs on every newly created request, before it
    /// is sent. Returns an id for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe<F>(&self, hook: F) -> SubscriptionId
    where
        F: Fn(&mut Request) + Send + Sync + 'static,
    {
        self.hooks.subscribe(Arc::new(hook))
    }

    /// Remove a hook. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.hooks.unsubscribe(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.hooks.len()
    }

    /// Send one request to `base_url + path` and resolve its outcome.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        path: String,
        method: Method,
        body: Option<String>,
        options: Option<&RequestOptions>,
    ) -> Result<Response<T>> {
        let url = Url::parse(&format!("{}{}", self.config.base_url, path))?;
        let options = self.config.merged(options);

        let mut request = Request::new(method.clone(), url.clone());
        self.hooks.emit_create(&mut request);

        // Method and URL are fixed once hooks have run.
        *request.method_mut() = method;
        *request.url_mut() = url;

        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(headers) = &options.headers {
            let extra = headers.to_header_map()?;
            for name in extra.keys() {
                request.headers_mut().remove(name);
            }
            for (name, value) in &extra {
                request.headers_mut().append(name.clone(), value.clone());
            }
        }

        if let Some(timeout) = options.effective_timeout() {
            *request.timeout_mut() = Some(timeout);
        }

        *request.body_mut() = body.map(Body::from);

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let response = self.client.execute(request).await.map_err(|e| {
            warn!(%method, %url, error = %e, "request failed without a response");
            RestError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(%method, %url, status = status.as_u16(), error = %e, "failed to read response body");
            RestError::Transport(e)
        })?;
        debug!(%method, %url, status = status.as_u16(), bytes = text.len(), "request completed");

        let outcome = resolve(status, &text);
        if let Err(e) = &outcome {
            warn!(%method, %url, error = %e, "request rejected");
        }
        outcome
    }
}
