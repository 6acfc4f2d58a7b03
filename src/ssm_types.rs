//! Shapes shared by several operations, plus the parsers that turn
//! command-line strings into them.

use std::collections::HashMap;

pub type ParameterMap = HashMap<String, Vec<String>>;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Target {
    pub key: Option<String>,
    pub values: Option<Vec<String>>,
}

/// One `key=value` pair from the command line.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct NotificationConfig {
    pub notification_arn: Option<String>,
    pub notification_events: Option<Vec<String>>,
    pub notification_type: Option<String>,
}

impl NotificationConfig {
    /// `None` unless at least one member was supplied.
    pub fn from_parts(arn: Option<String>, events: Vec<String>, kind: Option<String>) -> Option<Self> {
        let config = NotificationConfig {
            notification_arn: arn,
            notification_events: non_empty(events),
            notification_type: kind,
        };
        if config == NotificationConfig::default() {
            None
        } else {
            Some(config)
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CloudWatchOutputConfig {
    pub cloud_watch_log_group_name: Option<String>,
    pub cloud_watch_output_enabled: Option<bool>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct S3OutputLocation {
    #[serde(rename = "OutputS3BucketName")]
    pub output_s3_bucket_name: Option<String>,
    #[serde(rename = "OutputS3KeyPrefix")]
    pub output_s3_key_prefix: Option<String>,
    #[serde(rename = "OutputS3Region")]
    pub output_s3_region: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct OutputLocation {
    #[serde(rename = "S3Location")]
    pub s3_location: Option<S3OutputLocation>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingInfo {
    #[serde(rename = "S3BucketName")]
    pub s3_bucket_name: String,
    #[serde(rename = "S3KeyPrefix")]
    pub s3_key_prefix: Option<String>,
    #[serde(rename = "S3Region")]
    pub s3_region: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct TaskInvocationParameters {
    pub run_command: Option<RunCommandParameters>,
    pub automation: Option<AutomationParameters>,
    pub step_functions: Option<StepFunctionsParameters>,
    pub lambda: Option<LambdaParameters>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct RunCommandParameters {
    pub comment: Option<String>,
    pub document_hash: Option<String>,
    pub document_hash_type: Option<String>,
    pub notification_config: Option<NotificationConfig>,
    #[serde(rename = "OutputS3BucketName")]
    pub output_s3_bucket_name: Option<String>,
    #[serde(rename = "OutputS3KeyPrefix")]
    pub output_s3_key_prefix: Option<String>,
    pub parameters: Option<ParameterMap>,
    pub service_role_arn: Option<String>,
    pub timeout_seconds: Option<i64>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct AutomationParameters {
    pub document_version: Option<String>,
    pub parameters: Option<ParameterMap>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct StepFunctionsParameters {
    pub input: Option<String>,
    pub name: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct LambdaParameters {
    pub client_context: Option<String>,
    pub qualifier: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PatchFilter {
    pub key: String,
    pub values: Vec<String>,
}

/// Some(v) when v has anything in it.
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Groups repeated `key=value` pairs by key, keeping command-line order.
pub fn parameter_map(pairs: &[KeyValue]) -> Option<ParameterMap> {
    if pairs.is_empty() {
        return None;
    }
    let mut map = ParameterMap::new();
    for pair in pairs {
        map.entry(pair.key.clone()).or_insert_with(Vec::new).push(pair.value.clone());
    }
    Some(map)
}

fn split_pair(raw: &str) -> Result<(String, String), String> {
    match raw.find('=') {
        Some(0) | None => Err(format!("expected key=value, got '{}'", raw)),
        Some(idx) => Ok((raw[..idx].trim().to_string(), raw[idx + 1..].to_string())),
    }
}

pub fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = split_pair(raw)?;
    Ok(KeyValue { key, value })
}

pub fn parse_tag(raw: &str) -> Result<Tag, String> {
    let (key, value) = split_pair(raw)?;
    Ok(Tag { key, value })
}

/// `key=v1,v2`, the form used for targets and patch filters.
fn split_list(raw: &str) -> Result<(String, Vec<String>), String> {
    let (key, values) = split_pair(raw)?;
    let values: Vec<String> = values
        .split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if values.is_empty() {
        return Err(format!("'{}' lists no values", key));
    }
    Ok((key, values))
}

pub fn parse_target(raw: &str) -> Result<Target, String> {
    let (key, values) = split_list(raw)?;
    Ok(Target { key: Some(key), values: Some(values) })
}

pub fn parse_patch_filter(raw: &str) -> Result<PatchFilter, String> {
    let (key, values) = split_list(raw)?;
    Ok(PatchFilter { key, values })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_keeps_everything_after_first_equals() {
        let tag = parse_tag("Owner=a=b").unwrap();
        assert_eq!(tag, Tag { key: "Owner".to_string(), value: "a=b".to_string() });
        assert_eq!(parse_tag("Empty=").unwrap().value, "");
        assert!(parse_tag("=nokey").is_err());
        assert!(parse_tag("novalue").is_err());
    }

    #[test]
    fn target_splits_values() {
        let target = parse_target("tag:Env=prod, stage").unwrap();
        assert_eq!(target.key.as_ref().map(String::as_str), Some("tag:Env"));
        assert_eq!(target.values, Some(vec!["prod".to_string(), "stage".to_string()]));
        assert!(parse_target("InstanceIds=").is_err());
    }

    #[test]
    fn parameter_map_groups_repeated_keys() {
        let pairs = vec![
            parse_key_value("commands=echo a,b").unwrap(),
            parse_key_value("commands=ls").unwrap(),
            parse_key_value("workingDirectory=/tmp").unwrap(),
        ];
        let map = parameter_map(&pairs).unwrap();
        assert_eq!(map["commands"], vec!["echo a,b".to_string(), "ls".to_string()]);
        assert_eq!(map["workingDirectory"], vec!["/tmp".to_string()]);
        assert_eq!(parameter_map(&[]), None);
    }

    #[test]
    fn notification_config_omitted_when_nothing_set() {
        assert_eq!(NotificationConfig::from_parts(None, vec![], None), None);
        let config = NotificationConfig::from_parts(None, vec!["Failed".to_string()], None).unwrap();
        assert_eq!(config.notification_events, Some(vec!["Failed".to_string()]));
        assert_eq!(config.notification_arn, None);
        assert_eq!(config.notification_type, None);
    }
}
