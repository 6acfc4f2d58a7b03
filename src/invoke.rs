use serde_json::Value;

use crate::confirm::Confirm;
use crate::errors::SsmError;
use crate::operations::{to_json, Operation};
use crate::select::Selector;
use crate::ssm_ops::SsmApi;

/// Flags that apply to every subcommand.
#[derive(Debug, Default, Clone)]
pub struct InvokeOptions {
    pub select: Option<String>,
    pub pass_thru: bool,
    pub force: bool,
}

/// Runs one operation: selector and inputs are validated, the user is asked
/// (unless forced), exactly one call is made and the selected part of the
/// response is returned.
pub fn invoke<O: Operation>(
    op: &O,
    options: &InvokeOptions,
    api: &dyn SsmApi,
    confirm: &mut dyn Confirm,
) -> Result<Option<Value>, SsmError> {
    let inputs = op.inputs()?;
    let selector = Selector::resolve(options.select.as_deref(), options.pass_thru, O::PRIMARY, O::PASS_THRU)?;
    selector.check(&inputs, &to_json(&O::Response::default())?)?;
    if options.pass_thru {
        warn!("--pass-thru is deprecated, use --select '^{}'", O::PASS_THRU.unwrap_or_default());
    }

    let request = op.bind()?;

    if O::MUTATING && !options.force {
        let target = op.target();
        if !confirm.confirm(O::NAME, &target)? {
            info!(operation = O::NAME, resource = %target, "not confirmed, nothing sent");
            return Ok(None);
        }
    }

    debug!(operation = O::NAME, "calling Systems Manager");
    let response = O::dispatch(api, request)?;
    info!(operation = O::NAME, "done");
    Ok(selector.project(to_json(&response)?, &inputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::ops_items::{CreateOpsItem, CreateOpsItemResponse};
    use crate::operations::parameters::GetParameters;
    use crate::testing::{Answer, FakeSsm};
    use serde_json::json;

    fn ops_item() -> CreateOpsItem {
        CreateOpsItem {
            title: Some("t".to_string()),
            description: Some("d".to_string()),
            source: Some("s".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn declined_confirmation_sends_nothing() {
        let fake = FakeSsm::new();
        let mut answer = Answer::new(false);
        let out = invoke(&ops_item(), &InvokeOptions::default(), &fake, &mut answer).unwrap();
        assert_eq!(out, None);
        assert_eq!(answer.asked, vec![("CreateOpsItem".to_string(), "t".to_string())]);
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn accepted_confirmation_dispatches_once() {
        let mut fake = FakeSsm::new();
        fake.responses.create_ops_item = CreateOpsItemResponse { ops_item_id: Some("oi-1".to_string()) };
        let mut answer = Answer::new(true);
        let out = invoke(&ops_item(), &InvokeOptions::default(), &fake, &mut answer).unwrap();
        assert_eq!(out, Some(json!("oi-1")));
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn force_skips_the_prompt() {
        let fake = FakeSsm::new();
        let mut answer = Answer::new(false);
        let options = InvokeOptions { force: true, ..Default::default() };
        invoke(&ops_item(), &options, &fake, &mut answer).unwrap();
        assert!(answer.asked.is_empty());
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn validation_happens_before_the_prompt() {
        let fake = FakeSsm::new();
        let mut answer = Answer::new(true);
        let op = CreateOpsItem { title: None, ..ops_item() };
        assert!(invoke(&op, &InvokeOptions::default(), &fake, &mut answer).is_err());
        assert!(answer.asked.is_empty());
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn read_only_operations_never_prompt() {
        let fake = FakeSsm::new();
        let mut answer = Answer::new(false);
        let op = GetParameters { names: vec!["/a".to_string()], with_decryption: false };
        invoke(&op, &InvokeOptions::default(), &fake, &mut answer).unwrap();
        assert!(answer.asked.is_empty());
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn service_errors_propagate_unchanged() {
        let failure = SsmError::Service {
            operation: "CreateOpsItem".to_string(),
            message: "OpsItemLimitExceededException".to_string(),
        };
        let fake = FakeSsm::failing(failure.clone());
        let options = InvokeOptions { force: true, ..Default::default() };
        let err = invoke(&ops_item(), &options, &fake, &mut Answer::new(true)).unwrap_err();
        assert_eq!(err, failure);
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn name_resolution_failures_surface_wrapped() {
        let fake = FakeSsm::failing(crate::errors::dispatch_error(
            "us-east-1",
            "dns error: failed to lookup address information".to_string(),
        ));
        let options = InvokeOptions { force: true, ..Default::default() };
        let err = invoke(&ops_item(), &options, &fake, &mut Answer::new(true)).unwrap_err();
        assert!(err.to_string().contains("failed to lookup address information"));
        assert!(!err.is_validation());
    }

    #[test]
    fn unknown_field_rejected_before_dispatch() {
        let fake = FakeSsm::new();
        let options = InvokeOptions { select: Some("OpsItemArn".to_string()), force: true, ..Default::default() };
        let err = invoke(&ops_item(), &options, &fake, &mut Answer::new(true)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(fake.call_count(), 0);
    }
}
