//! One module per group of SSM API operations. Every operation is a
//! subcommand struct that binds itself into a request, knows which SDK call
//! to make and what its default output is.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::errors::SsmError;
use crate::ssm_ops::SsmApi;

pub mod activations;
pub mod associations;
pub mod automation;
pub mod commands;
pub mod documents;
pub mod maintenance_windows;
pub mod ops_items;
pub mod parameters;
pub mod patch_baselines;
pub mod tags;

pub trait Operation: Serialize {
    type Request: fmt::Debug;
    type Response: Serialize + Default;

    /// API operation name, as AWS spells it.
    const NAME: &'static str;
    /// Default `--select`. `None` prints nothing.
    const PRIMARY: Option<&'static str>;
    /// Input echoed by `--pass-thru`.
    const PASS_THRU: Option<&'static str> = None;
    const MUTATING: bool = true;

    /// Inputs as `--select '^Name'` sees them.
    fn inputs(&self) -> Result<Value, SsmError> {
        to_json(self)
    }

    /// What the confirmation prompt names as the target.
    fn target(&self) -> String;

    /// Validates inputs and assembles the request. Never touches the network.
    fn bind(&self) -> Result<Self::Request, SsmError>;

    fn dispatch(api: &dyn SsmApi, request: Self::Request) -> Result<Self::Response, SsmError>;
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value, SsmError> {
    serde_json::to_value(value).map_err(|e| SsmError::Output { message: e.to_string() })
}

/// Required string input. Blank counts as missing.
pub fn required_str(operation: &str, parameter: &str, value: &Option<String>) -> Result<String, SsmError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(SsmError::missing(operation, parameter)),
    }
}

pub fn required<T: Clone>(operation: &str, parameter: &str, value: &Option<T>) -> Result<T, SsmError> {
    value.clone().ok_or_else(|| SsmError::missing(operation, parameter))
}

/// `Some(true)` for a set switch, otherwise left out of the request.
pub fn flag(set: bool) -> Option<bool> {
    if set {
        Some(true)
    } else {
        None
    }
}

pub fn display_or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_missing() {
        let err = required_str("CreateOpsItem", "Title", &Some("   ".to_string())).unwrap_err();
        assert_eq!(err, SsmError::missing("CreateOpsItem", "Title"));
        assert!(required_str("CreateOpsItem", "Title", &None).is_err());
        assert_eq!(required_str("CreateOpsItem", "Title", &Some("disk".to_string())).unwrap(), "disk");
    }

    #[test]
    fn required_values() {
        assert_eq!(required("CreateMaintenanceWindow", "Duration", &Some(3i64)).unwrap(), 3);
        assert!(required::<i64>("CreateMaintenanceWindow", "Duration", &None).is_err());
    }

    #[test]
    fn switches_only_appear_when_set() {
        assert_eq!(flag(true), Some(true));
        assert_eq!(flag(false), None);
    }
}
