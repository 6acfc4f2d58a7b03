//! Parameter Store: PutParameter, DeleteParameter, GetParameters.

use crate::errors::SsmError;
use crate::operations::{display_or_empty, flag, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{non_empty, parse_tag, Tag};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct PutParameter {
    /// Fully qualified parameter name, e.g. /app/db/password
    #[structopt(long)]
    pub name: Option<String>,
    /// Parameter value
    #[structopt(long)]
    pub value: Option<String>,
    /// Parameter type
    #[structopt(long = "type", possible_values = &["String", "StringList", "SecureString"])]
    #[serde(rename = "Type")]
    pub parameter_type: Option<String>,
    #[structopt(long)]
    pub description: Option<String>,
    /// KMS key for SecureString parameters
    #[structopt(long)]
    pub key_id: Option<String>,
    /// Replace the value of an existing parameter
    #[structopt(long)]
    pub overwrite: bool,
    /// Regular expression the value must match
    #[structopt(long)]
    pub allowed_pattern: Option<String>,
    #[structopt(long, possible_values = &["Standard", "Advanced", "Intelligent-Tiering"])]
    pub tier: Option<String>,
    /// Parameter policies, as a JSON array
    #[structopt(long)]
    pub policies: Option<String>,
    /// Key=Value, repeatable
    #[structopt(long = "tag", parse(try_from_str = parse_tag))]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PutParameterRequest {
    pub name: String,
    pub value: String,
    pub parameter_type: String,
    pub description: Option<String>,
    pub key_id: Option<String>,
    pub overwrite: Option<bool>,
    pub allowed_pattern: Option<String>,
    pub tier: Option<String>,
    pub policies: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct PutParameterResponse {
    pub version: Option<i64>,
}

impl Operation for PutParameter {
    type Request = PutParameterRequest;
    type Response = PutParameterResponse;

    const NAME: &'static str = "PutParameter";
    const PRIMARY: Option<&'static str> = Some("Version");
    const PASS_THRU: Option<&'static str> = Some("Name");

    fn target(&self) -> String {
        display_or_empty(&self.name)
    }

    fn bind(&self) -> Result<PutParameterRequest, SsmError> {
        if self.overwrite && !self.tags.is_empty() {
            return Err(SsmError::invalid("Tags", "tags cannot be set while overwriting, use add-tags-to-resource"));
        }
        Ok(PutParameterRequest {
            name: required_str(Self::NAME, "Name", &self.name)?,
            value: required_str(Self::NAME, "Value", &self.value)?,
            parameter_type: required_str(Self::NAME, "Type", &self.parameter_type)?,
            description: self.description.clone(),
            key_id: self.key_id.clone(),
            overwrite: flag(self.overwrite),
            allowed_pattern: self.allowed_pattern.clone(),
            tier: self.tier.clone(),
            policies: self.policies.clone(),
            tags: non_empty(self.tags.clone()),
        })
    }

    fn dispatch(api: &dyn SsmApi, request: PutParameterRequest) -> Result<PutParameterResponse, SsmError> {
        api.put_parameter(request)
    }
}

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteParameter {
    /// Name of the parameter to delete
    #[structopt(long)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteParameterRequest {
    pub name: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct DeleteParameterResponse {}

impl Operation for DeleteParameter {
    type Request = DeleteParameterRequest;
    type Response = DeleteParameterResponse;

    const NAME: &'static str = "DeleteParameter";
    const PRIMARY: Option<&'static str> = None;
    const PASS_THRU: Option<&'static str> = Some("Name");

    fn target(&self) -> String {
        display_or_empty(&self.name)
    }

    fn bind(&self) -> Result<DeleteParameterRequest, SsmError> {
        Ok(DeleteParameterRequest { name: required_str(Self::NAME, "Name", &self.name)? })
    }

    fn dispatch(api: &dyn SsmApi, request: DeleteParameterRequest) -> Result<DeleteParameterResponse, SsmError> {
        api.delete_parameter(request)
    }
}

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct GetParameters {
    /// Parameter Name, up to 10
    #[structopt(long = "name", max_values = 10)]
    pub names: Vec<String>,
    /// Decrypt SecureString values
    #[structopt(short = "d", long = "decrypt")]
    pub with_decryption: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetParametersRequest {
    pub names: Vec<String>,
    pub with_decryption: Option<bool>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Parameter {
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub p_type: Option<String>,
    pub value: Option<String>,
    pub version: Option<i64>,
    #[serde(rename = "ARN")]
    pub arn: Option<String>,
    pub last_modified_date: Option<f64>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct GetParametersResponse {
    pub parameters: Vec<Parameter>,
    pub invalid_parameters: Vec<String>,
}

impl Operation for GetParameters {
    type Request = GetParametersRequest;
    type Response = GetParametersResponse;

    const NAME: &'static str = "GetParameters";
    const PRIMARY: Option<&'static str> = Some("Parameters");
    const MUTATING: bool = false;

    fn target(&self) -> String {
        self.names.join(", ")
    }

    fn bind(&self) -> Result<GetParametersRequest, SsmError> {
        let names: Vec<String> = self.names.iter().filter(|n| !n.trim().is_empty()).cloned().collect();
        if names.is_empty() {
            return Err(SsmError::missing(Self::NAME, "Names"));
        }
        Ok(GetParametersRequest { names, with_decryption: flag(self.with_decryption) })
    }

    fn dispatch(api: &dyn SsmApi, request: GetParametersRequest) -> Result<GetParametersResponse, SsmError> {
        api.get_parameters(request)
    }
}
