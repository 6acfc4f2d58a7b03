use crate::errors::SsmError;
use crate::operations::{display_or_empty, required_str, Operation};
use crate::ssm_ops::SsmApi;
use crate::ssm_types::{non_empty, parameter_map, parse_key_value, parse_target, KeyValue, ParameterMap, Target};

#[derive(StructOpt, Serialize, Debug, Default)]
#[serde(rename_all = "PascalCase")]
pub struct StartAutomationExecution {
    /// Automation document to run
    #[structopt(long)]
    pub document_name: Option<String>,
    #[structopt(long)]
    pub document_version: Option<String>,
    /// Document parameter as key=value, repeat the key for list values
    #[structopt(long = "parameter", parse(try_from_str = parse_key_value))]
    pub parameters: Vec<KeyValue>,
    #[structopt(long)]
    pub client_token: Option<String>,
    #[structopt(long, possible_values = &["Auto", "Interactive"])]
    pub mode: Option<String>,
    /// Parameter that receives each target (rate control)
    #[structopt(long)]
    pub target_parameter_name: Option<String>,
    /// key=v1,v2, repeatable
    #[structopt(long = "target", parse(try_from_str = parse_target))]
    pub targets: Vec<Target>,
    #[structopt(long)]
    pub max_concurrency: Option<String>,
    #[structopt(long)]
    pub max_errors: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StartAutomationExecutionRequest {
    pub document_name: String,
    pub document_version: Option<String>,
    pub parameters: Option<ParameterMap>,
    pub client_token: Option<String>,
    pub mode: Option<String>,
    pub target_parameter_name: Option<String>,
    pub targets: Option<Vec<Target>>,
    pub max_concurrency: Option<String>,
    pub max_errors: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct StartAutomationExecutionResponse {
    pub automation_execution_id: Option<String>,
}

impl Operation for StartAutomationExecution {
    type Request = StartAutomationExecutionRequest;
    type Response = StartAutomationExecutionResponse;

    const NAME: &'static str = "StartAutomationExecution";
    const PRIMARY: Option<&'static str> = Some("AutomationExecutionId");

    fn target(&self) -> String {
        display_or_empty(&self.document_name)
    }

    fn bind(&self) -> Result<StartAutomationExecutionRequest, SsmError> {
        let document_name = required_str(Self::NAME, "DocumentName", &self.document_name)?;
        if !self.targets.is_empty() && self.target_parameter_name.is_none() {
            return Err(SsmError::missing(Self::NAME, "TargetParameterName"));
        }
        Ok(StartAutomationExecutionRequest {
            document_name,
            document_version: self.document_version.clone(),
            parameters: parameter_map(&self.parameters),
            client_token: self.client_token.clone(),
            mode: self.mode.clone(),
            target_parameter_name: self.target_parameter_name.clone(),
            targets: non_empty(self.targets.clone()),
            max_concurrency: self.max_concurrency.clone(),
            max_errors: self.max_errors.clone(),
        })
    }

    fn dispatch(
        api: &dyn SsmApi,
        request: StartAutomationExecutionRequest,
    ) -> Result<StartAutomationExecutionResponse, SsmError> {
        api.start_automation_execution(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{run, Call, FakeSsm};
    use serde_json::json;

    fn op() -> StartAutomationExecution {
        StartAutomationExecution {
            document_name: Some("AWS-RestartEC2Instance".to_string()),
            parameters: vec![parse_key_value("InstanceId=i-0abc").unwrap()],
            ..Default::default()
        }
    }

    #[test]
    fn returns_execution_id() {
        let mut fake = FakeSsm::new();
        fake.responses.start_automation_execution =
            StartAutomationExecutionResponse { automation_execution_id: Some("4105a4fc".to_string()) };
        assert_eq!(run(&op(), None, false, &fake).unwrap(), Some(json!("4105a4fc")));
        match fake.last() {
            Some(Call::StartAutomationExecution(req)) => {
                assert_eq!(req.parameters.unwrap()["InstanceId"], vec!["i-0abc".to_string()]);
                assert_eq!(req.targets, None);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn targets_need_a_target_parameter() {
        let fake = FakeSsm::new();
        let op = StartAutomationExecution { targets: vec![parse_target("tag:Env=dev").unwrap()], ..op() };
        let err = run(&op, None, false, &fake).unwrap_err();
        assert_eq!(err, SsmError::missing("StartAutomationExecution", "TargetParameterName"));
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn echo_document_name() {
        let fake = FakeSsm::new();
        assert_eq!(run(&op(), Some("^DocumentName"), false, &fake).unwrap(), Some(json!("AWS-RestartEC2Instance")));
    }
}
