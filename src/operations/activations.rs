use crate::errors::SsmError;
use crate::operations::{display_or_empty, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{non_empty, parse_tag, Tag};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateActivation {
    /// IAM role the managed instances assume
    #[structopt(long)]
    pub iam_role: Option<String>,
    #[structopt(long)]
    pub default_instance_name: Option<String>,
    #[structopt(long)]
    pub description: Option<String>,
    /// Maximum number of instances to register
    #[structopt(long)]
    pub registration_limit: Option<i64>,
    /// Expiry, seconds since the Unix epoch
    #[structopt(long)]
    pub expiration_date: Option<f64>,
    /// Key=Value, repeatable
    #[structopt(long = "tag", parse(try_from_str = parse_tag))]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateActivationRequest {
    pub iam_role: String,
    pub default_instance_name: Option<String>,
    pub description: Option<String>,
    pub registration_limit: Option<i64>,
    pub expiration_date: Option<f64>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateActivationResponse {
    pub activation_id: Option<String>,
    pub activation_code: Option<String>,
}

impl Operation for CreateActivation {
    type Request = CreateActivationRequest;
    type Response = CreateActivationResponse;

    const NAME: &'static str = "CreateActivation";
    const PRIMARY: Option<&'static str> = Some("*");

    fn target(&self) -> String {
        display_or_empty(&self.iam_role)
    }

    fn bind(&self) -> Result<CreateActivationRequest, SsmError> {
        if let Some(limit) = self.registration_limit {
            if limit < 1 || limit > 1000 {
                return Err(SsmError::invalid("RegistrationLimit", "must be between 1 and 1000"));
            }
        }
        Ok(CreateActivationRequest {
            iam_role: required_str(Self::NAME, "IamRole", &self.iam_role)?,
            default_instance_name: self.default_instance_name.clone(),
            description: self.description.clone(),
            registration_limit: self.registration_limit,
            expiration_date: self.expiration_date,
            tags: non_empty(self.tags.clone()),
        })
    }

    fn dispatch(api: &dyn SsmApi, request: CreateActivationRequest) -> Result<CreateActivationResponse, SsmError> {
        api.create_activation(request)
    }
}
