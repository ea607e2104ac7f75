use std::io::{self, Write};

use rest_client::{Response, RestError};
use serde_json::Value;

/// Write a successful response: the status code line, then the JSON payload.
pub fn write_response<W: Write>(resp: &Response<Value>, raw: bool, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", resp.status_code)?;
    write_json(&resp.data, raw, writer)?;
    writer.flush()
}

/// Write a failed request. Rejections print their status and JSON body so the
/// server's error payload reaches stdout like a normal response would.
pub fn write_error<W: Write>(err: &RestError, raw: bool, writer: &mut W) -> io::Result<()> {
    match err {
        RestError::Rejected { status, body } => {
            writeln!(writer, "{status}")?;
            write_json(body, raw, writer)?;
        }
        other => {
            if let Some(status) = other.status() {
                writeln!(writer, "{status}")?;
            }
            writeln!(writer, "error: {other}")?;
        }
    }
    writer.flush()
}

fn write_json<W: Write>(value: &Value, raw: bool, writer: &mut W) -> io::Result<()> {
    let text = if raw {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    writeln!(writer, "{text}")
}
