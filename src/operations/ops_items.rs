//! OpsCenter: CreateOpsItem.

use std::collections::HashMap;

use crate::errors::SsmError;
use crate::operations::{display_or_empty, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{non_empty, parse_key_value, parse_tag, KeyValue, Tag};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateOpsItem {
    #[structopt(long)]
    pub title: Option<String>,
    #[structopt(long)]
    pub description: Option<String>,
    /// Origin of the item, e.g. EC2 or a custom string
    #[structopt(long)]
    pub source: Option<String>,
    /// 1 (highest) to 5
    #[structopt(long)]
    pub priority: Option<i64>,
    /// key=value, stored as searchable operational data
    #[structopt(long = "operational-data", parse(try_from_str = parse_key_value))]
    pub operational_data: Vec<KeyValue>,
    /// SNS topic ARN notified on change, repeatable
    #[structopt(long = "notification")]
    pub notifications: Vec<String>,
    /// Related OpsItem ID, repeatable
    #[structopt(long = "related-ops-item")]
    pub related_ops_items: Vec<String>,
    /// Key=Value, repeatable
    #[structopt(long = "tag", parse(try_from_str = parse_tag))]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OpsItemDataValue {
    pub data_type: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateOpsItemRequest {
    pub title: String,
    pub description: String,
    pub source: String,
    pub priority: Option<i64>,
    pub operational_data: Option<HashMap<String, OpsItemDataValue>>,
    pub notifications: Option<Vec<String>>,
    pub related_ops_items: Option<Vec<String>>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct CreateOpsItemResponse {
    pub ops_item_id: Option<String>,
}

const SEARCHABLE_STRING: &str = "SearchableString";

fn operational_data(pairs: &[KeyValue]) -> Result<Option<HashMap<String, OpsItemDataValue>>, SsmError> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut data = HashMap::new();
    for pair in pairs {
        if pair.key.starts_with("/aws") {
            return Err(SsmError::invalid("OperationalData", "keys starting with /aws are reserved"));
        }
        let value = OpsItemDataValue { data_type: Some(SEARCHABLE_STRING.to_string()), value: Some(pair.value.clone()) };
        if data.insert(pair.key.clone(), value).is_some() {
            return Err(SsmError::invalid("OperationalData", &format!("key '{}' given twice", pair.key)));
        }
    }
    Ok(Some(data))
}

impl Operation for CreateOpsItem {
    type Request = CreateOpsItemRequest;
    type Response = CreateOpsItemResponse;

    const NAME: &'static str = "CreateOpsItem";
    const PRIMARY: Option<&'static str> = Some("OpsItemId");

    fn target(&self) -> String {
        display_or_empty(&self.title)
    }

    fn bind(&self) -> Result<CreateOpsItemRequest, SsmError> {
        let description = required_str(Self::NAME, "Description", &self.description)?;
        let source = required_str(Self::NAME, "Source", &self.source)?;
        let title = required_str(Self::NAME, "Title", &self.title)?;
        if let Some(priority) = self.priority {
            if priority < 1 || priority > 5 {
                return Err(SsmError::invalid("Priority", "must be between 1 and 5"));
            }
        }
        Ok(CreateOpsItemRequest {
            title,
            description,
            source,
            priority: self.priority,
            operational_data: operational_data(&self.operational_data)?,
            notifications: non_empty(self.notifications.clone()),
            related_ops_items: non_empty(self.related_ops_items.clone()),
            tags: non_empty(self.tags.clone()),
        })
    }

    fn dispatch(api: &dyn SsmApi, request: CreateOpsItemRequest) -> Result<CreateOpsItemResponse, SsmError> {
        api.create_ops_item(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{run, Call, FakeSsm};
    use serde_json::json;

    fn op() -> CreateOpsItem {
        CreateOpsItem {
            title: Some("Disk almost full".to_string()),
            description: Some("/var is at 93%".to_string()),
            source: Some("EC2".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn every_mandatory_input_is_checked() {
        for (field, op) in vec![
            ("Description", CreateOpsItem { description: None, ..op() }),
            ("Source", CreateOpsItem { source: None, ..op() }),
            ("Title", CreateOpsItem { title: None, ..op() }),
        ] {
            let fake = FakeSsm::new();
            assert_eq!(run(&op, None, false, &fake).unwrap_err(), SsmError::missing("CreateOpsItem", field));
            assert_eq!(fake.call_count(), 0);
        }
    }

    #[test]
    fn returns_new_item_id_by_default() {
        let mut fake = FakeSsm::new();
        fake.responses.create_ops_item = CreateOpsItemResponse { ops_item_id: Some("oi-1f050EXAMPLE".to_string()) };
        assert_eq!(run(&op(), None, false, &fake).unwrap(), Some(json!("oi-1f050EXAMPLE")));
        assert_eq!(
            run(&op(), Some("*"), false, &fake).unwrap(),
            Some(json!({"OpsItemId": "oi-1f050EXAMPLE"}))
        );
    }

    #[test]
    fn optional_lists_left_out() {
        let fake = FakeSsm::new();
        run(&op(), None, false, &fake).unwrap();
        match fake.last() {
            Some(Call::CreateOpsItem(req)) => {
                assert_eq!(req.operational_data, None);
                assert_eq!(req.notifications, None);
                assert_eq!(req.related_ops_items, None);
                assert_eq!(req.priority, None);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn operational_data_is_searchable() {
        let fake = FakeSsm::new();
        let op = CreateOpsItem { operational_data: vec![parse_key_value("host=web-1").unwrap()], ..op() };
        run(&op, None, false, &fake).unwrap();
        match fake.last() {
            Some(Call::CreateOpsItem(req)) => {
                let data = req.operational_data.unwrap();
                assert_eq!(data["host"].value, Some("web-1".to_string()));
                assert_eq!(data["host"].data_type, Some("SearchableString".to_string()));
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn reserved_and_duplicate_keys_rejected() {
        let fake = FakeSsm::new();
        let reserved = CreateOpsItem { operational_data: vec![parse_key_value("/aws/x=1").unwrap()], ..op() };
        assert!(run(&reserved, None, false, &fake).unwrap_err().is_validation());
        let twice = CreateOpsItem {
            operational_data: vec![parse_key_value("k=1").unwrap(), parse_key_value("k=2").unwrap()],
            ..op()
        };
        assert!(run(&twice, None, false, &fake).unwrap_err().is_validation());
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn priority_out_of_range() {
        let fake = FakeSsm::new();
        assert!(run(&CreateOpsItem { priority: Some(9), ..op() }, None, false, &fake).is_err());
        assert_eq!(fake.call_count(), 0);
    }
}
