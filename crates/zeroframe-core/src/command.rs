use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named parameters sent along with a command.
pub type Params = Map<String, Value>;

/// A single request to the frame. Built per call and never retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Command {
    /// Command name as understood by the frame (e.g. `siteInfo`).
    pub name: String,
    /// Parameters; empty when the caller supplies none.
    #[serde(default)]
    pub params: Params,
}

impl Command {
    /// Command with no parameters. The frame still receives an empty mapping.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Params::new(),
        }
    }

    pub fn with_params(name: impl Into<String>, params: Params) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// Add one parameter, replacing any previous value under the same key.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add a parameter only when a value is present.
    pub fn param_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }
}

impl From<&str> for Command {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Command {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl<S: Into<String>> From<(S, Params)> for Command {
    fn from((name, params): (S, Params)) -> Self {
        Self::with_params(name, params)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_name_gets_empty_params() {
        let cmd = Command::from("ping");
        assert_eq!(cmd.name, "ping");
        assert!(cmd.params.is_empty());
    }

    #[test]
    fn builder_skips_absent_optionals() {
        let cmd = Command::new("wrapperOpenWindow")
            .param("url", "/index.html")
            .param_opt("target", None::<String>)
            .param_opt("specs", Some("width=100"));

        assert_eq!(
            Value::Object(cmd.params),
            json!({ "url": "/index.html", "specs": "width=100" })
        );
    }

    #[test]
    fn deserializes_without_params_field() {
        let cmd: Command = serde_json::from_value(json!({ "name": "siteInfo" })).expect("parse");
        assert_eq!(cmd, Command::new("siteInfo"));
    }
}
