//! Maintenance windows: CreateMaintenanceWindow, UpdateMaintenanceWindowTask.
//!
//! `update-maintenance-window-task` carries the deepest nesting of any
//! subcommand: `TaskInvocationParameters` has four branches, and the
//! Run Command branch has a notification config of its own. Each level is
//! only built when something beneath it was supplied.

use crate::errors::SsmError;
use crate::operations::{display_or_empty, flag, required, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{
    non_empty, parameter_map, parse_key_value, parse_tag, parse_target, AutomationParameters, KeyValue,
    LambdaParameters, LoggingInfo, NotificationConfig, RunCommandParameters, StepFunctionsParameters, Tag, Target,
    TaskInvocationParameters,
};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMaintenanceWindow {
    #[structopt(long)]
    pub name: Option<String>,
    #[structopt(long)]
    pub description: Option<String>,
    /// cron or rate expression
    #[structopt(long)]
    pub schedule: Option<String>,
    /// IANA time zone the schedule is evaluated in
    #[structopt(long)]
    pub schedule_timezone: Option<String>,
    /// Window length in hours
    #[structopt(long)]
    pub duration: Option<i64>,
    /// Hours before the end of the window to stop scheduling tasks
    #[structopt(long)]
    pub cutoff: Option<i64>,
    /// Allow tasks to run on instances not registered as targets
    #[structopt(long)]
    pub allow_unassociated_targets: bool,
    /// ISO-8601 start, e.g. 2026-11-01T00:00:00Z
    #[structopt(long)]
    pub start_date: Option<String>,
    #[structopt(long)]
    pub end_date: Option<String>,
    #[structopt(long)]
    pub client_token: Option<String>,
    /// Key=Value, repeatable
    #[structopt(long = "tag", parse(try_from_str = parse_tag))]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateMaintenanceWindowRequest {
    pub name: String,
    pub description: Option<String>,
    pub schedule: String,
    pub schedule_timezone: Option<String>,
    pub duration: i64,
    pub cutoff: i64,
    pub allow_unassociated_targets: bool,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub client_token: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateMaintenanceWindowResponse {
    pub window_id: Option<String>,
}

impl Operation for CreateMaintenanceWindow {
    type Request = CreateMaintenanceWindowRequest;
    type Response = CreateMaintenanceWindowResponse;

    const NAME: &'static str = "CreateMaintenanceWindow";
    const PRIMARY: Option<&'static str> = Some("WindowId");

    fn target(&self) -> String {
        display_or_empty(&self.name)
    }

    fn bind(&self) -> Result<CreateMaintenanceWindowRequest, SsmError> {
        let name = required_str(Self::NAME, "Name", &self.name)?;
        let schedule = required_str(Self::NAME, "Schedule", &self.schedule)?;
        let duration = required(Self::NAME, "Duration", &self.duration)?;
        let cutoff = required(Self::NAME, "Cutoff", &self.cutoff)?;
        if duration < 1 || duration > 24 {
            return Err(SsmError::invalid("Duration", "must be between 1 and 24 hours"));
        }
        if cutoff < 0 || cutoff >= duration {
            return Err(SsmError::invalid("Cutoff", "must be at least 0 and shorter than the duration"));
        }
        Ok(CreateMaintenanceWindowRequest {
            name,
            description: self.description.clone(),
            schedule,
            schedule_timezone: self.schedule_timezone.clone(),
            duration,
            cutoff,
            allow_unassociated_targets: self.allow_unassociated_targets,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            client_token: self.client_token.clone(),
            tags: non_empty(self.tags.clone()),
        })
    }

    fn dispatch(
        api: &dyn SsmApi,
        request: CreateMaintenanceWindowRequest,
    ) -> Result<CreateMaintenanceWindowResponse, SsmError> {
        api.create_maintenance_window(request)
    }
}

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateMaintenanceWindowTask {
    #[structopt(long)]
    pub window_id: Option<String>,
    #[structopt(long)]
    pub window_task_id: Option<String>,
    /// key=v1,v2, repeatable
    #[structopt(long = "target", parse(try_from_str = parse_target))]
    pub targets: Vec<Target>,
    #[structopt(long)]
    pub task_arn: Option<String>,
    #[structopt(long)]
    pub service_role_arn: Option<String>,
    #[structopt(long)]
    pub priority: Option<i64>,
    #[structopt(long)]
    pub max_concurrency: Option<String>,
    #[structopt(long)]
    pub max_errors: Option<String>,
    #[structopt(long)]
    pub name: Option<String>,
    #[structopt(long)]
    pub description: Option<String>,
    /// Clear every field that is not given here
    #[structopt(long)]
    pub replace: bool,

    #[structopt(long)]
    pub logging_info_s3_bucket_name: Option<String>,
    #[structopt(long)]
    pub logging_info_s3_key_prefix: Option<String>,
    #[structopt(long)]
    pub logging_info_s3_region: Option<String>,

    #[structopt(long)]
    pub run_command_comment: Option<String>,
    #[structopt(long)]
    pub run_command_document_hash: Option<String>,
    #[structopt(long, possible_values = &["Sha256", "Sha1"])]
    pub run_command_document_hash_type: Option<String>,
    #[structopt(long)]
    pub run_command_output_s3_bucket_name: Option<String>,
    #[structopt(long)]
    pub run_command_output_s3_key_prefix: Option<String>,
    /// Run Command parameter as key=value, repeat the key for list values
    #[structopt(long = "run-command-parameter", parse(try_from_str = parse_key_value))]
    pub run_command_parameters: Vec<KeyValue>,
    #[structopt(long)]
    pub run_command_service_role_arn: Option<String>,
    #[structopt(long)]
    pub run_command_timeout_seconds: Option<i64>,
    #[structopt(long)]
    pub notification_config_notification_arn: Option<String>,
    /// All, InProgress, Success, TimedOut, Cancelled or Failed; repeatable
    #[structopt(long = "notification-config-notification-event")]
    pub notification_config_notification_events: Vec<String>,
    #[structopt(long, possible_values = &["Command", "Invocation"])]
    pub notification_config_notification_type: Option<String>,

    #[structopt(long)]
    pub automation_document_version: Option<String>,
    /// Automation parameter as key=value, repeat the key for list values
    #[structopt(long = "automation-parameter", parse(try_from_str = parse_key_value))]
    pub automation_parameters: Vec<KeyValue>,

    #[structopt(long)]
    pub step_functions_input: Option<String>,
    #[structopt(long)]
    pub step_functions_name: Option<String>,

    #[structopt(long)]
    pub lambda_client_context: Option<String>,
    #[structopt(long)]
    pub lambda_qualifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateMaintenanceWindowTaskRequest {
    pub window_id: String,
    pub window_task_id: String,
    pub targets: Option<Vec<Target>>,
    pub task_arn: Option<String>,
    pub service_role_arn: Option<String>,
    pub priority: Option<i64>,
    pub max_concurrency: Option<String>,
    pub max_errors: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub replace: Option<bool>,
    pub logging_info: Option<LoggingInfo>,
    pub task_invocation_parameters: Option<TaskInvocationParameters>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateMaintenanceWindowTaskResponse {
    pub window_id: Option<String>,
    pub window_task_id: Option<String>,
    pub targets: Option<Vec<Target>>,
    pub task_arn: Option<String>,
    pub service_role_arn: Option<String>,
    pub priority: Option<i64>,
    pub max_concurrency: Option<String>,
    pub max_errors: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub logging_info: Option<LoggingInfo>,
    pub task_invocation_parameters: Option<TaskInvocationParameters>,
}

fn some_if_set<T: Default + PartialEq>(value: T) -> Option<T> {
    if value == T::default() {
        None
    } else {
        Some(value)
    }
}

impl UpdateMaintenanceWindowTask {
    /// Bucket and region are both mandatory once any logging field is given.
    fn logging_info(&self) -> Result<Option<LoggingInfo>, SsmError> {
        if self.logging_info_s3_bucket_name.is_none()
            && self.logging_info_s3_key_prefix.is_none()
            && self.logging_info_s3_region.is_none()
        {
            return Ok(None);
        }
        Ok(Some(LoggingInfo {
            s3_bucket_name: required_str(Self::NAME, "LoggingInfo_S3BucketName", &self.logging_info_s3_bucket_name)?,
            s3_key_prefix: self.logging_info_s3_key_prefix.clone(),
            s3_region: required_str(Self::NAME, "LoggingInfo_S3Region", &self.logging_info_s3_region)?,
        }))
    }

    fn run_command(&self) -> Option<RunCommandParameters> {
        some_if_set(RunCommandParameters {
            comment: self.run_command_comment.clone(),
            document_hash: self.run_command_document_hash.clone(),
            document_hash_type: self.run_command_document_hash_type.clone(),
            notification_config: NotificationConfig::from_parts(
                self.notification_config_notification_arn.clone(),
                self.notification_config_notification_events.clone(),
                self.notification_config_notification_type.clone(),
            ),
            output_s3_bucket_name: self.run_command_output_s3_bucket_name.clone(),
            output_s3_key_prefix: self.run_command_output_s3_key_prefix.clone(),
            parameters: parameter_map(&self.run_command_parameters),
            service_role_arn: self.run_command_service_role_arn.clone(),
            timeout_seconds: self.run_command_timeout_seconds,
        })
    }

    fn task_invocation_parameters(&self) -> Option<TaskInvocationParameters> {
        some_if_set(TaskInvocationParameters {
            run_command: self.run_command(),
            automation: some_if_set(AutomationParameters {
                document_version: self.automation_document_version.clone(),
                parameters: parameter_map(&self.automation_parameters),
            }),
            step_functions: some_if_set(StepFunctionsParameters {
                input: self.step_functions_input.clone(),
                name: self.step_functions_name.clone(),
            }),
            lambda: some_if_set(LambdaParameters {
                client_context: self.lambda_client_context.clone(),
                qualifier: self.lambda_qualifier.clone(),
            }),
        })
    }
}

impl Operation for UpdateMaintenanceWindowTask {
    type Request = UpdateMaintenanceWindowTaskRequest;
    type Response = UpdateMaintenanceWindowTaskResponse;

    const NAME: &'static str = "UpdateMaintenanceWindowTask";
    const PRIMARY: Option<&'static str> = Some("*");
    const PASS_THRU: Option<&'static str> = Some("WindowId");

    fn target(&self) -> String {
        format!("{}/{}", display_or_empty(&self.window_id), display_or_empty(&self.window_task_id))
    }

    fn bind(&self) -> Result<UpdateMaintenanceWindowTaskRequest, SsmError> {
        Ok(UpdateMaintenanceWindowTaskRequest {
            window_id: required_str(Self::NAME, "WindowId", &self.window_id)?,
            window_task_id: required_str(Self::NAME, "WindowTaskId", &self.window_task_id)?,
            targets: non_empty(self.targets.clone()),
            task_arn: self.task_arn.clone(),
            service_role_arn: self.service_role_arn.clone(),
            priority: self.priority,
            max_concurrency: self.max_concurrency.clone(),
            max_errors: self.max_errors.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            replace: flag(self.replace),
            logging_info: self.logging_info()?,
            task_invocation_parameters: self.task_invocation_parameters(),
        })
    }

    fn dispatch(
        api: &dyn SsmApi,
        request: UpdateMaintenanceWindowTaskRequest,
    ) -> Result<UpdateMaintenanceWindowTaskResponse, SsmError> {
        api.update_maintenance_window_task(request)
    }
}
