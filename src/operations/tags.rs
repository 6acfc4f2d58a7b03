use crate::errors::SsmError;
use crate::operations::{display_or_empty, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{parse_tag, Tag};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct AddTagsToResource {
    #[structopt(
        long,
        possible_values = &["Document", "ManagedInstance", "MaintenanceWindow", "Parameter", "PatchBaseline", "OpsItem"]
    )]
    pub resource_type: Option<String>,
    /// Resource ID, e.g. mi-012345abcde or the parameter name
    #[structopt(long)]
    pub resource_id: Option<String>,
    /// Key=Value, repeatable
    #[structopt(long = "tag", parse(try_from_str = parse_tag))]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddTagsToResourceRequest {
    pub resource_type: String,
    pub resource_id: String,
    pub tags: Vec<Tag>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct AddTagsToResourceResponse {}

impl Operation for AddTagsToResource {
    type Request = AddTagsToResourceRequest;
    type Response = AddTagsToResourceResponse;

    const NAME: &'static str = "AddTagsToResource";
    const PRIMARY: Option<&'static str> = None;
    const PASS_THRU: Option<&'static str> = Some("ResourceId");

    fn target(&self) -> String {
        display_or_empty(&self.resource_id)
    }

    fn bind(&self) -> Result<AddTagsToResourceRequest, SsmError> {
        let resource_type = required_str(Self::NAME, "ResourceType", &self.resource_type)?;
        let resource_id = required_str(Self::NAME, "ResourceId", &self.resource_id)?;
        if self.tags.is_empty() {
            return Err(SsmError::missing(Self::NAME, "Tags"));
        }
        Ok(AddTagsToResourceRequest { resource_type, resource_id, tags: self.tags.clone() })
    }

    fn dispatch(api: &dyn SsmApi, request: AddTagsToResourceRequest) -> Result<AddTagsToResourceResponse, SsmError> {
        api.add_tags_to_resource(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{run, Call, FakeSsm};
    use serde_json::json;

    fn op() -> AddTagsToResource {
        AddTagsToResource {
            resource_type: Some("Parameter".to_string()),
            resource_id: Some("/app/db".to_string()),
            tags: vec![Tag { key: "Team".to_string(), value: "core".to_string() }],
        }
    }

    #[test]
    fn tags_are_required() {
        let fake = FakeSsm::new();
        let err = run(&AddTagsToResource { tags: vec![], ..op() }, None, false, &fake).unwrap_err();
        assert_eq!(err, SsmError::missing("AddTagsToResource", "Tags"));
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn pass_thru_returns_resource_id() {
        let fake = FakeSsm::new();
        assert_eq!(run(&op(), None, false, &fake).unwrap(), None);
        assert_eq!(run(&op(), None, true, &fake).unwrap(), Some(json!("/app/db")));
        match fake.last() {
            Some(Call::AddTagsToResource(req)) => assert_eq!(req.tags.len(), 1),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn empty_response_has_no_fields_to_select() {
        let fake = FakeSsm::new();
        assert!(run(&op(), Some("ResourceId"), false, &fake).unwrap_err().is_validation());
        assert_eq!(fake.call_count(), 0);
    }
}
