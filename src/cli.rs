use clap::{Args, Parser, Subcommand};

/// rest-client — issue JSON requests against a fixed base URL.
#[derive(Parser, Debug)]
#[command(name = "rest-client", version)]
pub struct Cli {
    /// Base URL (falls back to the REST_BASE_URL environment variable)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds (0 disables the timeout)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Extra header as `Name: value` (repeatable)
    #[arg(short = 'H', long = "header", global = true)]
    pub headers: Vec<String>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long, global = true)]
    pub raw: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// GET a resource
    Get(GetArgs),

    /// POST a JSON body
    Post(BodyArgs),

    /// PUT a JSON body
    Put(BodyArgs),

    /// DELETE a resource
    Delete(BodyArgs),
}

/// Arguments for the `get` subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Path, or several segments joined with `/`
    #[arg(required = true)]
    pub path: Vec<String>,

    /// Query parameter as `key=value` (repeat a key to send a list)
    #[arg(short, long = "param")]
    pub params: Vec<String>,
}

/// Arguments for the `post`, `put` and `delete` subcommands.
#[derive(Args, Debug)]
pub struct BodyArgs {
    /// Path, or several segments joined with `/`
    #[arg(required = true)]
    pub path: Vec<String>,

    /// Request body, sent verbatim
    #[arg(short, long)]
    pub body: Option<String>,
}

/// Split `Name: value` into its parts.
pub fn parse_header(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}

/// Split `key=value` into its parts. A missing `=` yields an empty value.
pub fn parse_param(raw: &str) -> (String, String) {
    match raw.split_once('=') {
        Some((k, v)) => (k.to_string(), v.to_string()),
        None => (raw.to_string(), String::new()),
    }
}
