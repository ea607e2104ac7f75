pub mod config;
pub mod error;
pub mod headers;
pub mod hooks;
pub mod path;
pub mod query;
pub mod rest;

// ---- Top-level re-exports for ergonomic usage ----

// Client
pub use rest::RestClient;

// Configuration
pub use config::{ClientConfig, ClientOptions, RequestOptions};
pub use headers::HeaderList;

// Errors
pub use error::{RestError, Result, TRANSPORT_ERROR_MESSAGE};

// Request shaping
pub use path::{format_path, PathSpec};
pub use query::{QueryParams, QueryValue};

// Responses
pub use rest::{is_success_status, resolve, Response, SUCCESS_STATUSES};

// Lifecycle hooks
pub use hooks::{CreateHook, SubscriptionId};
