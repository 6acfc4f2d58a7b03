//! SSM documents: CreateDocument, UpdateDocumentDefaultVersion.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::errors::SsmError;
use crate::operations::{display_or_empty, required_str, to_json, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{non_empty, parse_tag, Tag};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDocument {
    #[structopt(long)]
    pub name: Option<String>,
    /// Document body, inline
    #[structopt(long)]
    pub content: Option<String>,
    /// Read the document body from a file. Selected as `^Content`.
    #[structopt(long, parse(from_os_str))]
    #[serde(skip)]
    pub content_file: Option<PathBuf>,
    #[structopt(
        long,
        possible_values = &["Command", "Policy", "Automation", "Session", "Package", "ApplicationConfiguration", "ApplicationConfigurationSchema", "DeploymentStrategy", "ChangeCalendar"]
    )]
    pub document_type: Option<String>,
    #[structopt(long, possible_values = &["YAML", "JSON"])]
    pub document_format: Option<String>,
    /// Resource type the document can run on, e.g. /AWS::EC2::Instance
    #[structopt(long)]
    pub target_type: Option<String>,
    #[structopt(long)]
    pub version_name: Option<String>,
    /// Key=Value, repeatable
    #[structopt(long = "tag", parse(try_from_str = parse_tag))]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateDocumentRequest {
    pub name: String,
    pub content: String,
    pub document_type: Option<String>,
    pub document_format: Option<String>,
    pub target_type: Option<String>,
    pub version_name: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentDescription {
    pub name: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub document_version: Option<String>,
    pub version_name: Option<String>,
    pub document_type: Option<String>,
    pub document_format: Option<String>,
    pub schema_version: Option<String>,
    pub latest_version: Option<String>,
    pub default_version: Option<String>,
    pub target_type: Option<String>,
    pub hash: Option<String>,
    pub hash_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDocumentResponse {
    pub document_description: Option<DocumentDescription>,
}

impl CreateDocument {
    fn content(&self) -> Result<Option<String>, SsmError> {
        match (&self.content, &self.content_file) {
            (Some(_), Some(_)) => Err(SsmError::invalid("Content", "give either --content or --content-file")),
            (Some(inline), None) => Ok(Some(inline.clone())),
            (None, Some(path)) => fs::read_to_string(path)
                .map(Some)
                .map_err(|e| SsmError::invalid("Content", &format!("unable to read {}: {}", path.display(), e))),
            (None, None) => Ok(None),
        }
    }
}

impl Operation for CreateDocument {
    type Request = CreateDocumentRequest;
    type Response = CreateDocumentResponse;

    const NAME: &'static str = "CreateDocument";
    const PRIMARY: Option<&'static str> = Some("DocumentDescription");

    fn inputs(&self) -> Result<Value, SsmError> {
        let mut inputs = to_json(self)?;
        if let Some(content) = self.content()? {
            inputs["Content"] = Value::String(content);
        }
        Ok(inputs)
    }

    fn target(&self) -> String {
        display_or_empty(&self.name)
    }

    fn bind(&self) -> Result<CreateDocumentRequest, SsmError> {
        let content = self.content()?;
        Ok(CreateDocumentRequest {
            name: required_str(Self::NAME, "Name", &self.name)?,
            content: required_str(Self::NAME, "Content", &content)?,
            document_type: self.document_type.clone(),
            document_format: self.document_format.clone(),
            target_type: self.target_type.clone(),
            version_name: self.version_name.clone(),
            tags: non_empty(self.tags.clone()),
        })
    }

    fn dispatch(api: &dyn SsmApi, request: CreateDocumentRequest) -> Result<CreateDocumentResponse, SsmError> {
        api.create_document(request)
    }
}

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDocumentDefaultVersion {
    #[structopt(long)]
    pub name: Option<String>,
    /// Version to make the default
    #[structopt(long)]
    pub document_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateDocumentDefaultVersionRequest {
    pub name: String,
    pub document_version: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentDefaultVersionDescription {
    pub name: Option<String>,
    pub default_version: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDocumentDefaultVersionResponse {
    pub description: Option<DocumentDefaultVersionDescription>,
}

impl Operation for UpdateDocumentDefaultVersion {
    type Request = UpdateDocumentDefaultVersionRequest;
    type Response = UpdateDocumentDefaultVersionResponse;

    const NAME: &'static str = "UpdateDocumentDefaultVersion";
    const PRIMARY: Option<&'static str> = Some("Description");

    fn target(&self) -> String {
        display_or_empty(&self.name)
    }

    fn bind(&self) -> Result<UpdateDocumentDefaultVersionRequest, SsmError> {
        Ok(UpdateDocumentDefaultVersionRequest {
            name: required_str(Self::NAME, "Name", &self.name)?,
            document_version: required_str(Self::NAME, "DocumentVersion", &self.document_version)?,
        })
    }

    fn dispatch(
        api: &dyn SsmApi,
        request: UpdateDocumentDefaultVersionRequest,
    ) -> Result<UpdateDocumentDefaultVersionResponse, SsmError> {
        api.update_document_default_version(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{run, Call, FakeSsm};
    use serde_json::json;

    const BODY: &str = r#"{"schemaVersion":"2.2","mainSteps":[]}"#;

    #[test]
    fn content_is_required() {
        let fake = FakeSsm::new();
        let op = CreateDocument { name: Some("Restart".to_string()), ..Default::default() };
        let err = run(&op, None, false, &fake).unwrap_err();
        assert_eq!(err, SsmError::missing("CreateDocument", "Content"));
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn unreadable_content_file_fails_before_dispatch() {
        let fake = FakeSsm::new();
        let op = CreateDocument {
            name: Some("Restart".to_string()),
            content_file: Some(PathBuf::from("/nonexistent/ssm_cmd/doc.json")),
            ..Default::default()
        };
        assert!(run(&op, None, false, &fake).unwrap_err().is_validation());
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn content_from_file_can_be_echoed() {
        let path = std::env::temp_dir().join(format!("ssm_cmd-doc-{}.json", std::process::id()));
        fs::write(&path, BODY).unwrap();
        let fake = FakeSsm::new();
        let op = CreateDocument {
            name: Some("Restart".to_string()),
            content_file: Some(path.clone()),
            ..Default::default()
        };
        let out = run(&op, Some("^Content"), false, &fake);
        fs::remove_file(&path).unwrap();
        assert_eq!(out.unwrap(), Some(json!(BODY)));
        match fake.last() {
            Some(Call::CreateDocument(req)) => assert_eq!(req.content, BODY),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn content_and_content_file_conflict() {
        let fake = FakeSsm::new();
        let op = CreateDocument {
            name: Some("Restart".to_string()),
            content: Some(BODY.to_string()),
            content_file: Some(PathBuf::from("doc.json")),
            ..Default::default()
        };
        assert!(run(&op, None, false, &fake).unwrap_err().is_validation());
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn creates_with_inline_content() {
        let mut fake = FakeSsm::new();
        fake.responses.create_document = CreateDocumentResponse {
            document_description: Some(DocumentDescription {
                name: Some("Restart".to_string()),
                status: Some("Creating".to_string()),
                ..Default::default()
            }),
        };
        let op = CreateDocument {
            name: Some("Restart".to_string()),
            content: Some(BODY.to_string()),
            document_type: Some("Command".to_string()),
            ..Default::default()
        };
        let out = run(&op, None, false, &fake).unwrap().unwrap();
        assert_eq!(out["Status"], json!("Creating"));
        match fake.last() {
            Some(Call::CreateDocument(req)) => {
                assert_eq!(req.content, BODY);
                assert_eq!(req.tags, None);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn default_version_needs_both_inputs() {
        let fake = FakeSsm::new();
        let op = UpdateDocumentDefaultVersion { name: Some("Restart".to_string()), document_version: None };
        let err = run(&op, None, false, &fake).unwrap_err();
        assert_eq!(err, SsmError::missing("UpdateDocumentDefaultVersion", "DocumentVersion"));
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn default_version_returns_description() {
        let mut fake = FakeSsm::new();
        fake.responses.update_document_default_version = UpdateDocumentDefaultVersionResponse {
            description: Some(DocumentDefaultVersionDescription {
                name: Some("Restart".to_string()),
                default_version: Some("2".to_string()),
            }),
        };
        let op = UpdateDocumentDefaultVersion {
            name: Some("Restart".to_string()),
            document_version: Some("2".to_string()),
        };
        assert_eq!(
            run(&op, None, false, &fake).unwrap(),
            Some(json!({"Name": "Restart", "DefaultVersion": "2"}))
        );
    }
}
