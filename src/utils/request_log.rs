use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// The parts of an incoming request worth dumping while debugging.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RequestInfo {
    pub method: String,
    pub path: String,
    pub content_type: String,
    pub query: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub remote_addr: Option<String>,
}

impl RequestInfo {
    /// A bare GET, the way a test client issues it.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            path: path.into(),
            content_type: "application/octet-stream".to_string(),
            query: BTreeMap::new(),
            headers: BTreeMap::from([
                ("host".to_string(), "testserver".to_string()),
                ("cookie".to_string(), String::new()),
            ]),
            remote_addr: Some("127.0.0.1".to_string()),
        }
    }

    pub fn attribute_count(&self) -> usize {
        match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields.len(),
            _ => 0,
        }
    }
}

/// Writes `attributes` of `request` to `log`, one call per line.
///
/// An empty `attributes` means all of them. Map attributes get a heading
/// line followed by one line per entry. Names that are not attributes of
/// the request are skipped.
pub fn pp_request<F>(request: &RequestInfo, mut log: F, attributes: &[&str])
where
    F: FnMut(&str),
{
    let fields = match serde_json::to_value(request) {
        Ok(Value::Object(fields)) => fields,
        _ => return,
    };

    let names: Vec<&str> = if attributes.is_empty() {
        fields.keys().map(String::as_str).collect()
    } else {
        attributes.to_vec()
    };

    for name in names {
        match fields.get(name) {
            None => continue,
            Some(Value::Object(entries)) => {
                log(&format!("{}:", name));
                for (key, value) in entries {
                    log(&format!("    {}: {}", key, render(value)));
                }
            }
            Some(value) => log(&format!("{}: {}", name, render(value))),
        }
    }
}

/// `pp_request` into the `debug` level.
pub fn pp_request_debug(request: &RequestInfo, attributes: &[&str]) {
    pp_request(request, |line| debug!("{}", line), attributes);
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}
