use std::time::Duration;

use crate::headers::HeaderList;

/// Per-call request options. The same shape serves as client-level defaults
/// ([`ClientOptions`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Request timeout. `Duration::ZERO` means no timeout.
    pub timeout: Option<Duration>,
    /// Extra request headers.
    pub headers: Option<HeaderList>,
}

/// Client-level default options.
pub type ClientOptions = RequestOptions;

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the header set. Accepts a `HeaderMap` or a list of pairs.
    pub fn with_headers(mut self, headers: impl Into<HeaderList>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Append a single header to the header set.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HeaderList::new)
            .push(name, value);
        self
    }

    /// Effective timeout, treating a zero duration as unset.
    pub(crate) fn effective_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|t| !t.is_zero())
    }
}

/// Configuration for a [`RestClient`](crate::RestClient). Immutable once the
/// client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every formatted path is appended to (e.g. `http://example.com`).
    pub base_url: String,
    /// Defaults applied to every request.
    pub defaults: ClientOptions,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, defaults: ClientOptions) -> Self {
        Self {
            base_url: base_url.into(),
            defaults,
        }
    }

    /// Resolve the options for one request.
    ///
    /// Each field of `call` overrides the client default. Headers merge by
    /// name: a name given per call replaces every default entry of that name.
    pub fn merged(&self, call: Option<&RequestOptions>) -> RequestOptions {
        let Some(call) = call else {
            return self.defaults.clone();
        };

        let headers = match (&self.defaults.headers, &call.headers) {
            (Some(defaults), Some(overrides)) => Some(defaults.merge_over(overrides)),
            (None, Some(overrides)) => Some(overrides.clone()),
            (defaults, None) => defaults.clone(),
        };

        RequestOptions {
            timeout: call.timeout.or(self.defaults.timeout),
            headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new(
            "http://example.com",
            ClientOptions::new()
                .with_timeout(Duration::from_secs(5))
                .with_header("Accept", "application/json")
                .with_header("X-Client", "default"),
        )
    }

    #[test]
    fn test_merged_without_call_options_is_defaults() {
        let cfg = config();
        assert_eq!(cfg.merged(None), cfg.defaults);
    }

    #[test]
    fn test_call_timeout_overrides_default() {
        let call = RequestOptions::new().with_timeout(Duration::from_millis(250));
        let merged = config().merged(Some(&call));
        assert_eq!(merged.timeout, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_default_timeout_kept_when_call_has_none() {
        let call = RequestOptions::new().with_header("X-Extra", "1");
        let merged = config().merged(Some(&call));
        assert_eq!(merged.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_call_headers_override_by_name() {
        let call = RequestOptions::new().with_header("x-client", "call");
        let merged = config().merged(Some(&call));
        let headers: Vec<_> = merged.headers.as_ref().unwrap().iter().collect();
        assert_eq!(
            headers,
            vec![("Accept", "application/json"), ("x-client", "call")]
        );
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let opts = RequestOptions::new().with_timeout(Duration::ZERO);
        assert_eq!(opts.effective_timeout(), None);
        let opts = RequestOptions::new().with_timeout(Duration::from_millis(1));
        assert_eq!(opts.effective_timeout(), Some(Duration::from_millis(1)));
    }
}
