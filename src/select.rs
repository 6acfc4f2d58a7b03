use serde_json::Value;

use crate::errors::SsmError;

/// Which part of an invocation becomes its output.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// The whole response (`*`).
    Full,
    /// One top-level response field.
    Field(String),
    /// One input value echoed back (`^Name`).
    Input(String),
    /// Print nothing.
    Nothing,
}

impl Selector {
    pub fn parse(raw: &str) -> Selector {
        let raw = raw.trim();
        if raw == "*" {
            Selector::Full
        } else if raw.starts_with('^') {
            Selector::Input(raw[1..].to_string())
        } else {
            Selector::Field(raw.to_string())
        }
    }

    /// Combines `--select`, the deprecated `--pass-thru` and the
    /// operation's defaults into one selector.
    pub fn resolve(
        select: Option<&str>,
        pass_thru: bool,
        primary: Option<&str>,
        pass_thru_input: Option<&str>,
    ) -> Result<Selector, SsmError> {
        match (select, pass_thru) {
            (Some(_), true) => Err(SsmError::SelectorConflict),
            (Some(raw), false) => Ok(Selector::parse(raw)),
            (None, true) => match pass_thru_input {
                Some(input) => Ok(Selector::Input(input.to_string())),
                None => Err(SsmError::InvalidSelector {
                    selector: "--pass-thru".to_string(),
                    reason: "this operation has nothing to pass through".to_string(),
                }),
            },
            (None, false) => Ok(primary.map(Selector::parse).unwrap_or(Selector::Nothing)),
        }
    }

    /// Rejects names that can never resolve, so a typo fails before the call.
    /// `response_shape` is a response with every field present.
    pub fn check(&self, inputs: &Value, response_shape: &Value) -> Result<(), SsmError> {
        let (name, source, what) = match self {
            Selector::Field(name) => (name, response_shape, "response field"),
            Selector::Input(name) => (name, inputs, "input"),
            Selector::Full | Selector::Nothing => return Ok(()),
        };
        if source.get(name.as_str()).is_some() {
            Ok(())
        } else {
            Err(SsmError::InvalidSelector {
                selector: name.clone(),
                reason: format!("no {} named '{}', expected one of: {}", what, name, field_names(source)),
            })
        }
    }

    pub fn project(&self, response: Value, inputs: &Value) -> Option<Value> {
        let selected = match self {
            Selector::Full => Some(response),
            Selector::Field(name) => response.get(name.as_str()).cloned(),
            Selector::Input(name) => inputs.get(name.as_str()).cloned(),
            Selector::Nothing => None,
        };
        selected.and_then(|v| if v.is_null() { None } else { Some(v) })
    }
}

fn field_names(value: &Value) -> String {
    match value.as_object() {
        Some(map) if !map.is_empty() => map.keys().cloned().collect::<Vec<_>>().join(", "),
        _ => "(none)".to_string(),
    }
}
