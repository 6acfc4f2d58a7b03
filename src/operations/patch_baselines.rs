use crate::errors::SsmError;
use crate::operations::{display_or_empty, flag, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{non_empty, parse_patch_filter, parse_tag, PatchFilter, Tag};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePatchBaseline {
    #[structopt(long)]
    pub name: Option<String>,
    #[structopt(long)]
    pub description: Option<String>,
    #[structopt(
        long,
        possible_values = &["WINDOWS", "AMAZON_LINUX", "AMAZON_LINUX_2", "UBUNTU", "REDHAT_ENTERPRISE_LINUX", "SUSE", "CENTOS", "ORACLE_LINUX", "DEBIAN"]
    )]
    pub operating_system: Option<String>,
    /// Global filter as KEY=v1,v2, e.g. PRODUCT=WindowsServer2019; repeatable
    #[structopt(long = "global-filter", parse(try_from_str = parse_patch_filter))]
    pub global_filters: Vec<PatchFilter>,
    /// Patch to approve explicitly, repeatable
    #[structopt(long = "approved-patch")]
    pub approved_patches: Vec<String>,
    #[structopt(long, possible_values = &["CRITICAL", "HIGH", "MEDIUM", "LOW", "INFORMATIONAL", "UNSPECIFIED"])]
    pub approved_patches_compliance_level: Option<String>,
    /// Also approve non-security updates from the approved list
    #[structopt(long)]
    pub approved_patches_enable_non_security: bool,
    /// Patch to reject explicitly, repeatable
    #[structopt(long = "rejected-patch")]
    pub rejected_patches: Vec<String>,
    #[structopt(long, possible_values = &["ALLOW_AS_DEPENDENCY", "BLOCK"])]
    pub rejected_patches_action: Option<String>,
    #[structopt(long)]
    pub client_token: Option<String>,
    /// Key=Value, repeatable
    #[structopt(long = "tag", parse(try_from_str = parse_tag))]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatePatchBaselineRequest {
    pub name: String,
    pub description: Option<String>,
    pub operating_system: Option<String>,
    pub global_filters: Option<Vec<PatchFilter>>,
    pub approved_patches: Option<Vec<String>>,
    pub approved_patches_compliance_level: Option<String>,
    pub approved_patches_enable_non_security: Option<bool>,
    pub rejected_patches: Option<Vec<String>>,
    pub rejected_patches_action: Option<String>,
    pub client_token: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePatchBaselineResponse {
    pub baseline_id: Option<String>,
}

impl Operation for CreatePatchBaseline {
    type Request = CreatePatchBaselineRequest;
    type Response = CreatePatchBaselineResponse;

    const NAME: &'static str = "CreatePatchBaseline";
    const PRIMARY: Option<&'static str> = Some("BaselineId");

    fn target(&self) -> String {
        display_or_empty(&self.name)
    }

    fn bind(&self) -> Result<CreatePatchBaselineRequest, SsmError> {
        Ok(CreatePatchBaselineRequest {
            name: required_str(Self::NAME, "Name", &self.name)?,
            description: self.description.clone(),
            operating_system: self.operating_system.clone(),
            global_filters: non_empty(self.global_filters.clone()),
            approved_patches: non_empty(self.approved_patches.clone()),
            approved_patches_compliance_level: self.approved_patches_compliance_level.clone(),
            approved_patches_enable_non_security: flag(self.approved_patches_enable_non_security),
            rejected_patches: non_empty(self.rejected_patches.clone()),
            rejected_patches_action: self.rejected_patches_action.clone(),
            client_token: self.client_token.clone(),
            tags: non_empty(self.tags.clone()),
        })
    }

    fn dispatch(api: &dyn SsmApi, request: CreatePatchBaselineRequest) -> Result<CreatePatchBaselineResponse, SsmError> {
        api.create_patch_baseline(request)
    }
}
