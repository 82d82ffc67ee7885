//! Messages exchanged with the runtime process.
//!
//! The runtime reads one JSON request from stdin and writes one JSON
//! response line to stdout, then exits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// JavaScript run by `node -e`.
///
/// Evaluates the artifact as a CommonJS module, starts the entry point's
/// worker once with the flags and answers with the first value published on
/// the output port.
pub const DRIVER: &str = r#"
let input = "";
process.stdin.setEncoding("utf8");
process.stdin.on("data", (chunk) => { input += chunk; });
process.stdin.on("end", () => {
    const respond = (message) => {
        process.stdout.write(JSON.stringify(message) + "\n", () => process.exit(0));
    };
    try {
        const request = JSON.parse(input);
        const module = { exports: {} };
        new Function("module", "exports", request.artifact).call(globalThis, module, module.exports);
        const entry = module.exports[request.entry];
        if (!entry || typeof entry.worker !== "function") {
            respond({ kind: "missing_entry", name: request.entry });
            return;
        }
        const app = entry.worker(request.flags);
        const port = app.ports && app.ports[request.port];
        if (!port) {
            respond({ kind: "error", message: "port not found: " + request.port });
            return;
        }
        port.subscribe((pairs) => respond({ kind: "rendered", pairs: pairs }));
    } catch (err) {
        respond({ kind: "error", message: String((err && err.stack) || err) });
    }
});
"#;

/// Request written to the runtime's stdin.
#[derive(Debug, Serialize)]
pub struct WorkerRequest<'a> {
    /// Compiled JavaScript of the artifact.
    pub artifact: &'a str,
    /// Entry point module name.
    pub entry: &'a str,
    /// Output port name.
    pub port: &'a str,
    /// Ordered `(output_key, model)` pairs.
    pub flags: &'a [(String, Value)],
}

/// Response read from the runtime's stdout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkerResponse {
    /// The port published the aggregate result.
    Rendered { pairs: Vec<(String, String)> },

    /// The artifact does not define the entry point.
    MissingEntry { name: String },

    /// The artifact threw while loading or starting.
    Error { message: String },
}

impl WorkerResponse {
    /// Parse the first non-empty line of runtime output.
    pub fn parse(stdout: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(stdout);
        let line = text
            .lines()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| Error::Worker("runtime produced no output".to_string()))?;

        serde_json::from_str(line)
            .map_err(|e| Error::Worker(format!("unreadable runtime response: {e}")))
    }
}

/// Rendered text for one view of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub output_key: String,
    pub rendered_text: String,
}
