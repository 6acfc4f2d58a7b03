//! Run Command: SendCommand.

use crate::errors::SsmError;
use crate::operations::{display_or_empty, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{
    non_empty, parameter_map, parse_key_value, parse_target, CloudWatchOutputConfig, KeyValue, NotificationConfig,
    ParameterMap, Target,
};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SendCommand {
    /// Command document, e.g. AWS-RunShellScript
    #[structopt(long)]
    pub document_name: Option<String>,
    #[structopt(long)]
    pub document_hash: Option<String>,
    #[structopt(long, possible_values = &["Sha256", "Sha1"])]
    pub document_hash_type: Option<String>,
    /// Instance ID, repeatable
    #[structopt(long = "instance-id")]
    pub instance_ids: Vec<String>,
    /// key=v1,v2, repeatable
    #[structopt(long = "target", parse(try_from_str = parse_target))]
    pub targets: Vec<Target>,
    /// Document parameter as key=value, repeat the key for list values
    #[structopt(long = "parameter", parse(try_from_str = parse_key_value))]
    pub parameters: Vec<KeyValue>,
    #[structopt(long)]
    pub comment: Option<String>,
    /// Seconds to wait for delivery before the command fails
    #[structopt(long)]
    pub timeout_seconds: Option<i64>,
    #[structopt(long)]
    pub output_s3_bucket_name: Option<String>,
    #[structopt(long)]
    pub output_s3_key_prefix: Option<String>,
    #[structopt(long)]
    pub output_s3_region: Option<String>,
    #[structopt(long)]
    pub max_concurrency: Option<String>,
    #[structopt(long)]
    pub max_errors: Option<String>,
    /// Role used to publish SNS notifications
    #[structopt(long)]
    pub service_role_arn: Option<String>,
    #[structopt(long)]
    pub notification_config_notification_arn: Option<String>,
    /// All, InProgress, Success, TimedOut, Cancelled or Failed; repeatable
    #[structopt(long = "notification-config-notification-event")]
    pub notification_config_notification_events: Vec<String>,
    #[structopt(long, possible_values = &["Command", "Invocation"])]
    pub notification_config_notification_type: Option<String>,
    #[structopt(long)]
    pub cloud_watch_output_config_cloud_watch_log_group_name: Option<String>,
    #[structopt(long)]
    pub cloud_watch_output_config_cloud_watch_output_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SendCommandRequest {
    pub document_name: String,
    pub document_hash: Option<String>,
    pub document_hash_type: Option<String>,
    pub instance_ids: Option<Vec<String>>,
    pub targets: Option<Vec<Target>>,
    pub parameters: Option<ParameterMap>,
    pub comment: Option<String>,
    pub timeout_seconds: Option<i64>,
    pub output_s3_bucket_name: Option<String>,
    pub output_s3_key_prefix: Option<String>,
    pub output_s3_region: Option<String>,
    pub max_concurrency: Option<String>,
    pub max_errors: Option<String>,
    pub service_role_arn: Option<String>,
    pub notification_config: Option<NotificationConfig>,
    pub cloud_watch_output_config: Option<CloudWatchOutputConfig>,
}

/// The `Command` structure AWS returns.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SentCommand {
    pub command_id: Option<String>,
    pub document_name: Option<String>,
    pub document_version: Option<String>,
    pub comment: Option<String>,
    pub status: Option<String>,
    pub status_details: Option<String>,
    pub instance_ids: Option<Vec<String>>,
    pub targets: Option<Vec<Target>>,
    pub target_count: Option<i64>,
    pub max_concurrency: Option<String>,
    pub max_errors: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SendCommandResponse {
    pub command: Option<SentCommand>,
}

impl SendCommand {
    fn cloud_watch_output_config(&self) -> Option<CloudWatchOutputConfig> {
        let config = CloudWatchOutputConfig {
            cloud_watch_log_group_name: self.cloud_watch_output_config_cloud_watch_log_group_name.clone(),
            cloud_watch_output_enabled: self.cloud_watch_output_config_cloud_watch_output_enabled,
        };
        if config == CloudWatchOutputConfig::default() {
            None
        } else {
            Some(config)
        }
    }
}

impl Operation for SendCommand {
    type Request = SendCommandRequest;
    type Response = SendCommandResponse;

    const NAME: &'static str = "SendCommand";
    const PRIMARY: Option<&'static str> = Some("Command");

    fn target(&self) -> String {
        display_or_empty(&self.document_name)
    }

    fn bind(&self) -> Result<SendCommandRequest, SsmError> {
        let document_name = required_str(Self::NAME, "DocumentName", &self.document_name)?;
        if self.instance_ids.is_empty() && self.targets.is_empty() {
            return Err(SsmError::missing(Self::NAME, "InstanceIds or Targets"));
        }
        if !self.instance_ids.is_empty() && !self.targets.is_empty() {
            return Err(SsmError::invalid("InstanceIds", "use either instance IDs or targets, not both"));
        }
        Ok(SendCommandRequest {
            document_name,
            document_hash: self.document_hash.clone(),
            document_hash_type: self.document_hash_type.clone(),
            instance_ids: non_empty(self.instance_ids.clone()),
            targets: non_empty(self.targets.clone()),
            parameters: parameter_map(&self.parameters),
            comment: self.comment.clone(),
            timeout_seconds: self.timeout_seconds,
            output_s3_bucket_name: self.output_s3_bucket_name.clone(),
            output_s3_key_prefix: self.output_s3_key_prefix.clone(),
            output_s3_region: self.output_s3_region.clone(),
            max_concurrency: self.max_concurrency.clone(),
            max_errors: self.max_errors.clone(),
            service_role_arn: self.service_role_arn.clone(),
            notification_config: NotificationConfig::from_parts(
                self.notification_config_notification_arn.clone(),
                self.notification_config_notification_events.clone(),
                self.notification_config_notification_type.clone(),
            ),
            cloud_watch_output_config: self.cloud_watch_output_config(),
        })
    }

    fn dispatch(api: &dyn SsmApi, request: SendCommandRequest) -> Result<SendCommandResponse, SsmError> {
        api.send_command(request)
    }
}
