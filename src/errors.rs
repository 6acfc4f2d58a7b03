/// Everything that can stop an invocation.
///
/// The first group is raised while binding inputs, before any call to AWS is
/// made. `NameResolution`, `Credentials`, `Transport` and `Service` come back
/// from the SDK.
#[derive(Debug, Clone, Fail, PartialEq)]
pub enum SsmError {
    #[fail(display = "{}: missing required parameter '{}'", operation, parameter)]
    MissingParameter { operation: String, parameter: String },

    #[fail(display = "invalid value for '{}': {}", parameter, reason)]
    InvalidParameter { parameter: String, reason: String },

    #[fail(display = "--pass-thru and --select cannot be used together, use --select '^<Input>' instead")]
    SelectorConflict,

    #[fail(display = "invalid selector '{}': {}", selector, reason)]
    InvalidSelector { selector: String, reason: String },

    #[fail(
        display = "Name resolution failure attempting to reach service in region {} (as inferred from the endpoint): {}",
        region, message
    )]
    NameResolution { region: String, message: String },

    #[fail(display = "unable to load AWS credentials: {}", message)]
    Credentials { message: String },

    #[fail(display = "transport failure: {}", message)]
    Transport { message: String },

    #[fail(display = "{} failed: {}", operation, message)]
    Service { operation: String, message: String },

    #[fail(display = "unable to read confirmation: {}", message)]
    Prompt { message: String },

    #[fail(display = "unable to render output: {}", message)]
    Output { message: String },
}

impl SsmError {
    pub fn missing(operation: &str, parameter: &str) -> Self {
        SsmError::MissingParameter {
            operation: operation.to_string(),
            parameter: parameter.to_string(),
        }
    }

    pub fn invalid(parameter: &str, reason: &str) -> Self {
        SsmError::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for errors raised before dispatch.
    pub fn is_validation(&self) -> bool {
        match self {
            SsmError::MissingParameter { .. }
            | SsmError::InvalidParameter { .. }
            | SsmError::SelectorConflict
            | SsmError::InvalidSelector { .. } => true,
            _ => false,
        }
    }
}

/// Markers the HTTP stack puts in its message when the endpoint host
/// could not be resolved.
const NAME_RESOLUTION_MARKERS: &[&str] = &[
    "failed to lookup address",
    "dns error",
    "name or service not known",
    "nodename nor servname provided",
    "no such host",
    "temporary failure in name resolution",
];

pub fn is_name_resolution_failure(message: &str) -> bool {
    let lowered = message.to_lowercase();
    NAME_RESOLUTION_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Sorts a dispatch-level failure into `NameResolution` or `Transport`.
pub fn dispatch_error(region: &str, message: String) -> SsmError {
    if is_name_resolution_failure(&message) {
        SsmError::NameResolution {
            region: region.to_string(),
            message,
        }
    } else {
        SsmError::Transport { message }
    }
}
