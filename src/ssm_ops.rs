use rusoto_core::{Region, RusotoError};
use rusoto_ssm as ssm;
use rusoto_ssm::{Ssm, SsmClient};
use std::error::Error;
use std::fmt;

use crate::errors::{dispatch_error, SsmError};
use crate::operations::activations::{CreateActivationRequest, CreateActivationResponse};
use crate::operations::associations::{AssociationDescription, CreateAssociationRequest, CreateAssociationResponse};
use crate::operations::automation::{StartAutomationExecutionRequest, StartAutomationExecutionResponse};
use crate::operations::commands::{SendCommandRequest, SendCommandResponse, SentCommand};
use crate::operations::documents::{
    CreateDocumentRequest, CreateDocumentResponse, DocumentDefaultVersionDescription, DocumentDescription,
    UpdateDocumentDefaultVersionRequest, UpdateDocumentDefaultVersionResponse,
};
use crate::operations::maintenance_windows::{
    CreateMaintenanceWindowRequest, CreateMaintenanceWindowResponse, UpdateMaintenanceWindowTaskRequest,
    UpdateMaintenanceWindowTaskResponse,
};
use crate::operations::ops_items::{CreateOpsItemRequest, CreateOpsItemResponse};
use crate::operations::parameters::{
    DeleteParameterRequest, DeleteParameterResponse, GetParametersRequest, GetParametersResponse, Parameter,
    PutParameterRequest, PutParameterResponse,
};
use crate::operations::patch_baselines::{CreatePatchBaselineRequest, CreatePatchBaselineResponse};
use crate::operations::tags::{AddTagsToResourceRequest, AddTagsToResourceResponse};
use crate::ssm_types::{
    AutomationParameters, LambdaParameters, LoggingInfo, NotificationConfig, OutputLocation, RunCommandParameters,
    S3OutputLocation, StepFunctionsParameters, Tag, Target, TaskInvocationParameters,
};

/// The Systems Manager calls this tool makes, one method per API operation.
pub trait SsmApi {
    fn add_tags_to_resource(&self, req: AddTagsToResourceRequest) -> Result<AddTagsToResourceResponse, SsmError>;
    fn create_activation(&self, req: CreateActivationRequest) -> Result<CreateActivationResponse, SsmError>;
    fn create_association(&self, req: CreateAssociationRequest) -> Result<CreateAssociationResponse, SsmError>;
    fn create_document(&self, req: CreateDocumentRequest) -> Result<CreateDocumentResponse, SsmError>;
    fn create_maintenance_window(
        &self,
        req: CreateMaintenanceWindowRequest,
    ) -> Result<CreateMaintenanceWindowResponse, SsmError>;
    fn create_ops_item(&self, req: CreateOpsItemRequest) -> Result<CreateOpsItemResponse, SsmError>;
    fn create_patch_baseline(&self, req: CreatePatchBaselineRequest) -> Result<CreatePatchBaselineResponse, SsmError>;
    fn delete_parameter(&self, req: DeleteParameterRequest) -> Result<DeleteParameterResponse, SsmError>;
    fn get_parameters(&self, req: GetParametersRequest) -> Result<GetParametersResponse, SsmError>;
    fn put_parameter(&self, req: PutParameterRequest) -> Result<PutParameterResponse, SsmError>;
    fn send_command(&self, req: SendCommandRequest) -> Result<SendCommandResponse, SsmError>;
    fn start_automation_execution(
        &self,
        req: StartAutomationExecutionRequest,
    ) -> Result<StartAutomationExecutionResponse, SsmError>;
    fn update_document_default_version(
        &self,
        req: UpdateDocumentDefaultVersionRequest,
    ) -> Result<UpdateDocumentDefaultVersionResponse, SsmError>;
    fn update_maintenance_window_task(
        &self,
        req: UpdateMaintenanceWindowTaskRequest,
    ) -> Result<UpdateMaintenanceWindowTaskResponse, SsmError>;
}

pub struct SSMOps {
    region: String,
    ssm_client: SsmClient,
}

impl fmt::Debug for SSMOps {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ region: {} }}", self.region)
    }
}

impl SSMOps {
    /// An unknown region name is rejected rather than replaced by the default.
    pub fn new(region: &str, endpoint_url: Option<&str>) -> Result<Self, SsmError> {
        let aws_region = match endpoint_url {
            Some(endpoint) => Region::Custom {
                name: region.to_string(),
                endpoint: endpoint.to_string(),
            },
            None => region
                .parse::<Region>()
                .map_err(|e| SsmError::invalid("Region", &format!("'{}': {}", region, e)))?,
        };
        debug!(region = %aws_region.name(), "creating SSM client");
        Ok(SSMOps {
            region: aws_region.name().to_string(),
            ssm_client: SsmClient::new(aws_region),
        })
    }

    fn failed<E: Error + 'static>(&self, operation: &str, err: RusotoError<E>) -> SsmError {
        match err {
            RusotoError::HttpDispatch(dispatch) => dispatch_error(&self.region, dispatch.to_string()),
            RusotoError::Credentials(creds) => SsmError::Credentials { message: creds.to_string() },
            other => SsmError::Service {
                operation: operation.to_string(),
                message: other.to_string(),
            },
        }
    }
}

impl SsmApi for SSMOps {
    fn add_tags_to_resource(&self, req: AddTagsToResourceRequest) -> Result<AddTagsToResourceResponse, SsmError> {
        let input = ssm::AddTagsToResourceRequest {
            resource_id: req.resource_id,
            resource_type: req.resource_type,
            tags: req.tags.into_iter().map(to_tag).collect(),
            ..Default::default()
        };
        self.ssm_client
            .add_tags_to_resource(input)
            .sync()
            .map_err(|e| self.failed("AddTagsToResource", e))?;
        Ok(AddTagsToResourceResponse {})
    }

    fn create_activation(&self, req: CreateActivationRequest) -> Result<CreateActivationResponse, SsmError> {
        let input = ssm::CreateActivationRequest {
            default_instance_name: req.default_instance_name,
            description: req.description,
            expiration_date: req.expiration_date,
            iam_role: req.iam_role,
            registration_limit: req.registration_limit,
            tags: to_tags(req.tags),
            ..Default::default()
        };
        let output = self
            .ssm_client
            .create_activation(input)
            .sync()
            .map_err(|e| self.failed("CreateActivation", e))?;
        Ok(CreateActivationResponse {
            activation_id: output.activation_id,
            activation_code: output.activation_code,
        })
    }

    fn create_association(&self, req: CreateAssociationRequest) -> Result<CreateAssociationResponse, SsmError> {
        let input = ssm::CreateAssociationRequest {
            association_name: req.association_name,
            automation_target_parameter_name: req.automation_target_parameter_name,
            compliance_severity: req.compliance_severity,
            document_version: req.document_version,
            instance_id: req.instance_id,
            max_concurrency: req.max_concurrency,
            max_errors: req.max_errors,
            name: req.name,
            output_location: req.output_location.map(|l| ssm::InstanceAssociationOutputLocation {
                s3_location: l.s3_location.map(|s3| ssm::S3OutputLocation {
                    output_s3_bucket_name: s3.output_s3_bucket_name,
                    output_s3_key_prefix: s3.output_s3_key_prefix,
                    output_s3_region: s3.output_s3_region,
                }),
            }),
            parameters: req.parameters,
            schedule_expression: req.schedule_expression,
            targets: to_targets(req.targets),
            ..Default::default()
        };
        let output = self
            .ssm_client
            .create_association(input)
            .sync()
            .map_err(|e| self.failed("CreateAssociation", e))?;
        Ok(CreateAssociationResponse {
            association_description: output.association_description.map(|d| AssociationDescription {
                name: d.name,
                association_id: d.association_id,
                association_name: d.association_name,
                association_version: d.association_version,
                document_version: d.document_version,
                instance_id: d.instance_id,
                schedule_expression: d.schedule_expression,
                automation_target_parameter_name: d.automation_target_parameter_name,
                compliance_severity: d.compliance_severity,
                max_concurrency: d.max_concurrency,
                max_errors: d.max_errors,
                targets: from_targets(d.targets),
                parameters: d.parameters,
                output_location: d.output_location.map(|l| OutputLocation {
                    s3_location: l.s3_location.map(|s3| S3OutputLocation {
                        output_s3_bucket_name: s3.output_s3_bucket_name,
                        output_s3_key_prefix: s3.output_s3_key_prefix,
                        output_s3_region: s3.output_s3_region,
                    }),
                }),
            }),
        })
    }

    fn create_document(&self, req: CreateDocumentRequest) -> Result<CreateDocumentResponse, SsmError> {
        let input = ssm::CreateDocumentRequest {
            content: req.content,
            document_format: req.document_format,
            document_type: req.document_type,
            name: req.name,
            tags: to_tags(req.tags),
            target_type: req.target_type,
            version_name: req.version_name,
            ..Default::default()
        };
        let output = self
            .ssm_client
            .create_document(input)
            .sync()
            .map_err(|e| self.failed("CreateDocument", e))?;
        Ok(CreateDocumentResponse {
            document_description: output.document_description.map(|d| DocumentDescription {
                name: d.name,
                owner: d.owner,
                status: d.status,
                document_version: d.document_version,
                version_name: d.version_name,
                document_type: d.document_type,
                document_format: d.document_format,
                schema_version: d.schema_version,
                latest_version: d.latest_version,
                default_version: d.default_version,
                target_type: d.target_type,
                hash: d.hash,
                hash_type: d.hash_type,
                description: d.description,
            }),
        })
    }

    fn create_maintenance_window(
        &self,
        req: CreateMaintenanceWindowRequest,
    ) -> Result<CreateMaintenanceWindowResponse, SsmError> {
        let input = ssm::CreateMaintenanceWindowRequest {
            allow_unassociated_targets: req.allow_unassociated_targets,
            client_token: req.client_token,
            cutoff: req.cutoff,
            description: req.description,
            duration: req.duration,
            end_date: req.end_date,
            name: req.name,
            schedule: req.schedule,
            schedule_timezone: req.schedule_timezone,
            start_date: req.start_date,
            tags: to_tags(req.tags),
            ..Default::default()
        };
        let output = self
            .ssm_client
            .create_maintenance_window(input)
            .sync()
            .map_err(|e| self.failed("CreateMaintenanceWindow", e))?;
        Ok(CreateMaintenanceWindowResponse { window_id: output.window_id })
    }

    fn create_ops_item(&self, req: CreateOpsItemRequest) -> Result<CreateOpsItemResponse, SsmError> {
        let input = ssm::CreateOpsItemRequest {
            description: req.description,
            notifications: req
                .notifications
                .map(|arns| arns.into_iter().map(|arn| ssm::OpsItemNotification { arn: Some(arn) }).collect()),
            operational_data: req.operational_data.map(|data| {
                data.into_iter()
                    .map(|(k, v)| (k, ssm::OpsItemDataValue { type_: v.data_type, value: v.value }))
                    .collect()
            }),
            priority: req.priority,
            related_ops_items: req
                .related_ops_items
                .map(|ids| ids.into_iter().map(|ops_item_id| ssm::RelatedOpsItem { ops_item_id }).collect()),
            source: req.source,
            tags: to_tags(req.tags),
            title: req.title,
            ..Default::default()
        };
        let output = self
            .ssm_client
            .create_ops_item(input)
            .sync()
            .map_err(|e| self.failed("CreateOpsItem", e))?;
        Ok(CreateOpsItemResponse { ops_item_id: output.ops_item_id })
    }

    fn create_patch_baseline(&self, req: CreatePatchBaselineRequest) -> Result<CreatePatchBaselineResponse, SsmError> {
        let input = ssm::CreatePatchBaselineRequest {
            approved_patches: req.approved_patches,
            approved_patches_compliance_level: req.approved_patches_compliance_level,
            approved_patches_enable_non_security: req.approved_patches_enable_non_security,
            client_token: req.client_token,
            description: req.description,
            global_filters: req.global_filters.map(|filters| ssm::PatchFilterGroup {
                patch_filters: filters
                    .into_iter()
                    .map(|f| ssm::PatchFilter { key: f.key, values: f.values })
                    .collect(),
            }),
            name: req.name,
            operating_system: req.operating_system,
            rejected_patches: req.rejected_patches,
            rejected_patches_action: req.rejected_patches_action,
            tags: to_tags(req.tags),
            ..Default::default()
        };
        let output = self
            .ssm_client
            .create_patch_baseline(input)
            .sync()
            .map_err(|e| self.failed("CreatePatchBaseline", e))?;
        Ok(CreatePatchBaselineResponse { baseline_id: output.baseline_id })
    }

    fn delete_parameter(&self, req: DeleteParameterRequest) -> Result<DeleteParameterResponse, SsmError> {
        let input = ssm::DeleteParameterRequest { name: req.name };
        self.ssm_client
            .delete_parameter(input)
            .sync()
            .map_err(|e| self.failed("DeleteParameter", e))?;
        Ok(DeleteParameterResponse {})
    }

    fn get_parameters(&self, req: GetParametersRequest) -> Result<GetParametersResponse, SsmError> {
        let input = ssm::GetParametersRequest { names: req.names, with_decryption: req.with_decryption };
        let output = self
            .ssm_client
            .get_parameters(input)
            .sync()
            .map_err(|e| self.failed("GetParameters", e))?;
        let invalid_parameters = output.invalid_parameters.unwrap_or_default();
        if !invalid_parameters.is_empty() {
            warn!(invalid = %invalid_parameters.join(", "), "some parameters were not found");
        }
        Ok(GetParametersResponse {
            parameters: output
                .parameters
                .unwrap_or_default()
                .into_iter()
                .map(|p| Parameter {
                    name: p.name,
                    p_type: p.type_,
                    value: p.value,
                    version: p.version,
                    arn: p.arn,
                    last_modified_date: p.last_modified_date,
                })
                .collect(),
            invalid_parameters,
        })
    }

    fn put_parameter(&self, req: PutParameterRequest) -> Result<PutParameterResponse, SsmError> {
        let input = ssm::PutParameterRequest {
            allowed_pattern: req.allowed_pattern,
            description: req.description,
            key_id: req.key_id,
            name: req.name,
            overwrite: req.overwrite,
            policies: req.policies,
            tags: to_tags(req.tags),
            tier: req.tier,
            type_: req.parameter_type,
            value: req.value,
            ..Default::default()
        };
        let output = self
            .ssm_client
            .put_parameter(input)
            .sync()
            .map_err(|e| self.failed("PutParameter", e))?;
        Ok(PutParameterResponse { version: output.version })
    }

    fn send_command(&self, req: SendCommandRequest) -> Result<SendCommandResponse, SsmError> {
        let input = ssm::SendCommandRequest {
            cloud_watch_output_config: req.cloud_watch_output_config.map(|c| ssm::CloudWatchOutputConfig {
                cloud_watch_log_group_name: c.cloud_watch_log_group_name,
                cloud_watch_output_enabled: c.cloud_watch_output_enabled,
            }),
            comment: req.comment,
            document_hash: req.document_hash,
            document_hash_type: req.document_hash_type,
            document_name: req.document_name,
            instance_ids: req.instance_ids,
            max_concurrency: req.max_concurrency,
            max_errors: req.max_errors,
            notification_config: to_notification(req.notification_config),
            output_s3_bucket_name: req.output_s3_bucket_name,
            output_s3_key_prefix: req.output_s3_key_prefix,
            output_s3_region: req.output_s3_region,
            parameters: req.parameters,
            service_role_arn: req.service_role_arn,
            targets: to_targets(req.targets),
            timeout_seconds: req.timeout_seconds,
            ..Default::default()
        };
        let output = self
            .ssm_client
            .send_command(input)
            .sync()
            .map_err(|e| self.failed("SendCommand", e))?;
        Ok(SendCommandResponse {
            command: output.command.map(|c| SentCommand {
                command_id: c.command_id,
                document_name: c.document_name,
                document_version: c.document_version,
                comment: c.comment,
                status: c.status,
                status_details: c.status_details,
                instance_ids: c.instance_ids,
                targets: from_targets(c.targets),
                target_count: c.target_count,
                max_concurrency: c.max_concurrency,
                max_errors: c.max_errors,
            }),
        })
    }

    fn start_automation_execution(
        &self,
        req: StartAutomationExecutionRequest,
    ) -> Result<StartAutomationExecutionResponse, SsmError> {
        let input = ssm::StartAutomationExecutionRequest {
            client_token: req.client_token,
            document_name: req.document_name,
            document_version: req.document_version,
            max_concurrency: req.max_concurrency,
            max_errors: req.max_errors,
            mode: req.mode,
            parameters: req.parameters,
            target_parameter_name: req.target_parameter_name,
            targets: to_targets(req.targets),
            ..Default::default()
        };
        let output = self
            .ssm_client
            .start_automation_execution(input)
            .sync()
            .map_err(|e| self.failed("StartAutomationExecution", e))?;
        Ok(StartAutomationExecutionResponse { automation_execution_id: output.automation_execution_id })
    }

    fn update_document_default_version(
        &self,
        req: UpdateDocumentDefaultVersionRequest,
    ) -> Result<UpdateDocumentDefaultVersionResponse, SsmError> {
        let input = ssm::UpdateDocumentDefaultVersionRequest {
            document_version: req.document_version,
            name: req.name,
        };
        let output = self
            .ssm_client
            .update_document_default_version(input)
            .sync()
            .map_err(|e| self.failed("UpdateDocumentDefaultVersion", e))?;
        Ok(UpdateDocumentDefaultVersionResponse {
            description: output.description.map(|d| DocumentDefaultVersionDescription {
                name: d.name,
                default_version: d.default_version,
            }),
        })
    }

    fn update_maintenance_window_task(
        &self,
        req: UpdateMaintenanceWindowTaskRequest,
    ) -> Result<UpdateMaintenanceWindowTaskResponse, SsmError> {
        let input = ssm::UpdateMaintenanceWindowTaskRequest {
            description: req.description,
            logging_info: req.logging_info.map(|l| ssm::LoggingInfo {
                s3_bucket_name: l.s3_bucket_name,
                s3_key_prefix: l.s3_key_prefix,
                s3_region: l.s3_region,
            }),
            max_concurrency: req.max_concurrency,
            max_errors: req.max_errors,
            name: req.name,
            priority: req.priority,
            replace: req.replace,
            service_role_arn: req.service_role_arn,
            targets: to_targets(req.targets),
            task_arn: req.task_arn,
            task_invocation_parameters: req.task_invocation_parameters.map(to_invocation),
            window_id: req.window_id,
            window_task_id: req.window_task_id,
            ..Default::default()
        };
        let output = self
            .ssm_client
            .update_maintenance_window_task(input)
            .sync()
            .map_err(|e| self.failed("UpdateMaintenanceWindowTask", e))?;
        Ok(UpdateMaintenanceWindowTaskResponse {
            window_id: output.window_id,
            window_task_id: output.window_task_id,
            targets: from_targets(output.targets),
            task_arn: output.task_arn,
            service_role_arn: output.service_role_arn,
            priority: output.priority,
            max_concurrency: output.max_concurrency,
            max_errors: output.max_errors,
            name: output.name,
            description: output.description,
            logging_info: output.logging_info.map(|l| LoggingInfo {
                s3_bucket_name: l.s3_bucket_name,
                s3_key_prefix: l.s3_key_prefix,
                s3_region: l.s3_region,
            }),
            task_invocation_parameters: output.task_invocation_parameters.map(from_invocation),
        })
    }
}

fn to_tag(tag: Tag) -> ssm::Tag {
    ssm::Tag { key: tag.key, value: tag.value }
}

fn to_tags(tags: Option<Vec<Tag>>) -> Option<Vec<ssm::Tag>> {
    tags.map(|tags| tags.into_iter().map(to_tag).collect())
}

fn to_targets(targets: Option<Vec<Target>>) -> Option<Vec<ssm::Target>> {
    targets.map(|targets| {
        targets
            .into_iter()
            .map(|t| ssm::Target { key: t.key, values: t.values })
            .collect()
    })
}

fn from_targets(targets: Option<Vec<ssm::Target>>) -> Option<Vec<Target>> {
    targets.map(|targets| {
        targets
            .into_iter()
            .map(|t| Target { key: t.key, values: t.values })
            .collect()
    })
}

fn to_notification(config: Option<NotificationConfig>) -> Option<ssm::NotificationConfig> {
    config.map(|c| ssm::NotificationConfig {
        notification_arn: c.notification_arn,
        notification_events: c.notification_events,
        notification_type: c.notification_type,
    })
}

fn from_notification(config: Option<ssm::NotificationConfig>) -> Option<NotificationConfig> {
    config.map(|c| NotificationConfig {
        notification_arn: c.notification_arn,
        notification_events: c.notification_events,
        notification_type: c.notification_type,
    })
}

fn to_invocation(params: TaskInvocationParameters) -> ssm::MaintenanceWindowTaskInvocationParameters {
    ssm::MaintenanceWindowTaskInvocationParameters {
        automation: params.automation.map(|a| ssm::MaintenanceWindowAutomationParameters {
            document_version: a.document_version,
            parameters: a.parameters,
        }),
        lambda: params.lambda.map(|l| ssm::MaintenanceWindowLambdaParameters {
            client_context: l.client_context,
            qualifier: l.qualifier,
            ..Default::default()
        }),
        run_command: params.run_command.map(|r| ssm::MaintenanceWindowRunCommandParameters {
            comment: r.comment,
            document_hash: r.document_hash,
            document_hash_type: r.document_hash_type,
            notification_config: to_notification(r.notification_config),
            output_s3_bucket_name: r.output_s3_bucket_name,
            output_s3_key_prefix: r.output_s3_key_prefix,
            parameters: r.parameters,
            service_role_arn: r.service_role_arn,
            timeout_seconds: r.timeout_seconds,
            ..Default::default()
        }),
        step_functions: params.step_functions.map(|s| ssm::MaintenanceWindowStepFunctionsParameters {
            input: s.input,
            name: s.name,
        }),
    }
}

fn from_invocation(params: ssm::MaintenanceWindowTaskInvocationParameters) -> TaskInvocationParameters {
    TaskInvocationParameters {
        run_command: params.run_command.map(|r| RunCommandParameters {
            comment: r.comment,
            document_hash: r.document_hash,
            document_hash_type: r.document_hash_type,
            notification_config: from_notification(r.notification_config),
            output_s3_bucket_name: r.output_s3_bucket_name,
            output_s3_key_prefix: r.output_s3_key_prefix,
            parameters: r.parameters,
            service_role_arn: r.service_role_arn,
            timeout_seconds: r.timeout_seconds,
        }),
        automation: params.automation.map(|a| AutomationParameters {
            document_version: a.document_version,
            parameters: a.parameters,
        }),
        step_functions: params.step_functions.map(|s| StepFunctionsParameters { input: s.input, name: s.name }),
        lambda: params.lambda.map(|l| LambdaParameters { client_context: l.client_context, qualifier: l.qualifier }),
    }
}
