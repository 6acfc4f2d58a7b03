use crate::errors::SsmError;
use crate::operations::{display_or_empty, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{
    non_empty, parameter_map, parse_key_value, parse_target, KeyValue, OutputLocation, ParameterMap,
    S3OutputLocation, Target,
};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAssociation {
    /// SSM document to associate
    #[structopt(long)]
    pub name: Option<String>,
    #[structopt(long)]
    pub association_name: Option<String>,
    #[structopt(long)]
    pub document_version: Option<String>,
    /// Single instance to associate (prefer --target)
    #[structopt(long)]
    pub instance_id: Option<String>,
    /// key=v1,v2, repeatable
    #[structopt(long = "target", parse(try_from_str = parse_target))]
    pub targets: Vec<Target>,
    /// Document parameter as key=value, repeat the key for list values
    #[structopt(long = "parameter", parse(try_from_str = parse_key_value))]
    pub parameters: Vec<KeyValue>,
    /// cron or rate expression
    #[structopt(long)]
    pub schedule_expression: Option<String>,
    #[structopt(long)]
    pub automation_target_parameter_name: Option<String>,
    #[structopt(long, possible_values = &["CRITICAL", "HIGH", "MEDIUM", "LOW", "UNSPECIFIED"])]
    pub compliance_severity: Option<String>,
    #[structopt(long)]
    pub max_concurrency: Option<String>,
    #[structopt(long)]
    pub max_errors: Option<String>,
    /// S3 bucket for command output
    #[structopt(long = "s3-bucket-name")]
    pub output_s3_bucket_name: Option<String>,
    #[structopt(long = "s3-key-prefix")]
    pub output_s3_key_prefix: Option<String>,
    #[structopt(long = "s3-region")]
    pub output_s3_region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateAssociationRequest {
    pub name: String,
    pub association_name: Option<String>,
    pub document_version: Option<String>,
    pub instance_id: Option<String>,
    pub targets: Option<Vec<Target>>,
    pub parameters: Option<ParameterMap>,
    pub schedule_expression: Option<String>,
    pub automation_target_parameter_name: Option<String>,
    pub compliance_severity: Option<String>,
    pub max_concurrency: Option<String>,
    pub max_errors: Option<String>,
    pub output_location: Option<OutputLocation>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct AssociationDescription {
    pub name: Option<String>,
    pub association_id: Option<String>,
    pub association_name: Option<String>,
    pub association_version: Option<String>,
    pub document_version: Option<String>,
    pub instance_id: Option<String>,
    pub schedule_expression: Option<String>,
    pub automation_target_parameter_name: Option<String>,
    pub compliance_severity: Option<String>,
    pub max_concurrency: Option<String>,
    pub max_errors: Option<String>,
    pub targets: Option<Vec<Target>>,
    pub parameters: Option<ParameterMap>,
    pub output_location: Option<OutputLocation>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateAssociationResponse {
    pub association_description: Option<AssociationDescription>,
}

impl CreateAssociation {
    fn output_location(&self) -> Option<OutputLocation> {
        let s3 = S3OutputLocation {
            output_s3_bucket_name: self.output_s3_bucket_name.clone(),
            output_s3_key_prefix: self.output_s3_key_prefix.clone(),
            output_s3_region: self.output_s3_region.clone(),
        };
        if s3 == S3OutputLocation::default() {
            None
        } else {
            Some(OutputLocation { s3_location: Some(s3) })
        }
    }
}

impl Operation for CreateAssociation {
    type Request = CreateAssociationRequest;
    type Response = CreateAssociationResponse;

    const NAME: &'static str = "CreateAssociation";
    const PRIMARY: Option<&'static str> = Some("AssociationDescription");

    fn target(&self) -> String {
        display_or_empty(&self.name)
    }

    fn bind(&self) -> Result<CreateAssociationRequest, SsmError> {
        let name = required_str(Self::NAME, "Name", &self.name)?;
        if self.instance_id.is_some() && !self.targets.is_empty() {
            return Err(SsmError::invalid("InstanceId", "use either an instance ID or targets, not both"));
        }
        Ok(CreateAssociationRequest {
            name,
            association_name: self.association_name.clone(),
            document_version: self.document_version.clone(),
            instance_id: self.instance_id.clone(),
            targets: non_empty(self.targets.clone()),
            parameters: parameter_map(&self.parameters),
            schedule_expression: self.schedule_expression.clone(),
            automation_target_parameter_name: self.automation_target_parameter_name.clone(),
            compliance_severity: self.compliance_severity.clone(),
            max_concurrency: self.max_concurrency.clone(),
            max_errors: self.max_errors.clone(),
            output_location: self.output_location(),
        })
    }

    fn dispatch(api: &dyn SsmApi, request: CreateAssociationRequest) -> Result<CreateAssociationResponse, SsmError> {
        api.create_association(request)
    }
}
