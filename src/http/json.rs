//! Navigation into parsed JSON responses.
//!
//! Cluster API responses are nested maps keyed by names the suite knows
//! (`basic`, `settings`) and by names it does not (node ids). A [`JsonPath`]
//! covers both, plus selecting an array element by one of its fields.
//! A path that does not resolve yields [`Lookup::Missing`] naming where it
//! stopped; it is never an error.

use serde_json::Value;
use std::fmt;

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object member by key.
    Key(String),
    /// First member of an object, whatever its key.
    First,
    /// First array element whose `field` is the string `equals`.
    Find { field: String, equals: String },
}

/// A path from the response root to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

/// Result of following a [`JsonPath`].
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    /// The path broke off; `at` is the prefix that could not be resolved.
    Missing { at: String },
}

impl JsonPath {
    /// The empty path (the root itself).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path of plain keys, e.g. `["version", "number"]`.
    pub fn keys(keys: &[&str]) -> Self {
        keys.iter().fold(Self::root(), |path, k| path.key(*k))
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    pub fn first(mut self) -> Self {
        self.segments.push(Segment::First);
        self
    }

    pub fn find(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.segments.push(Segment::Find {
            field: field.into(),
            equals: equals.into(),
        });
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Follow the path through `value`.
    pub fn lookup<'a>(&self, value: &'a Value) -> Lookup<'a> {
        let mut current = value;
        for (index, segment) in self.segments.iter().enumerate() {
            let next = match segment {
                Segment::Key(key) => current.as_object().and_then(|m| m.get(key)),
                Segment::First => current.as_object().and_then(|m| m.values().next()),
                Segment::Find { field, equals } => current.as_array().and_then(|items| {
                    items.iter().find(|item| {
                        item.get(field).and_then(Value::as_str) == Some(equals.as_str())
                    })
                }),
            };
            match next {
                Some(v) => current = v,
                None => {
                    return Lookup::Missing {
                        at: Self {
                            segments: self.segments[..=index].to_vec(),
                        }
                        .to_string(),
                    }
                }
            }
        }
        Lookup::Found(current)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Find { field, equals } => write!(f, "[{}={}]", field, equals)?,
                other => {
                    if index > 0 {
                        write!(f, ".")?;
                    }
                    match other {
                        Segment::Key(key) => write!(f, "{}", key)?,
                        _ => write!(f, "*")?,
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nodes_plugins() -> Value {
        json!({
            "nodes": {
                "q1w2e3": {
                    "plugins": [
                        {"name": "x-pack", "version": "5.6.9"},
                        {"name": "ingest-attachment", "version": "5.6.9"}
                    ]
                }
            }
        })
    }

    #[test]
    fn follows_plain_keys() {
        let value = json!({"version": {"number": "6.2.4"}});
        let path = JsonPath::keys(&["version", "number"]);
        assert_eq!(path.lookup(&value), Lookup::Found(&json!("6.2.4")));
    }

    #[test]
    fn first_and_find_select_plugin_version() {
        let value = nodes_plugins();
        let path = JsonPath::root()
            .key("nodes")
            .first()
            .key("plugins")
            .find("name", "x-pack")
            .key("version");
        assert_eq!(path.lookup(&value), Lookup::Found(&json!("5.6.9")));
    }

    #[test]
    fn missing_reports_prefix() {
        let value = nodes_plugins();
        let path = JsonPath::root()
            .key("nodes")
            .first()
            .key("plugins")
            .find("name", "analysis-icu")
            .key("version");
        assert_eq!(
            path.lookup(&value),
            Lookup::Missing {
                at: "nodes.*.plugins[name=analysis-icu]".to_string()
            }
        );
    }

    #[test]
    fn key_on_non_object_is_missing() {
        let value = json!({"basic": "not an object"});
        let path = JsonPath::keys(&["basic", "settings"]);
        assert_eq!(
            path.lookup(&value),
            Lookup::Missing {
                at: "basic.settings".to_string()
            }
        );
    }

    #[test]
    fn root_path_displays_dollar() {
        assert_eq!(JsonPath::root().to_string(), "$");
        assert_eq!(JsonPath::root().lookup(&json!(1)), Lookup::Found(&json!(1)));
    }
}
