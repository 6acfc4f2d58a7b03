//! Recording stand-ins for the SDK and the confirmation prompt.

use std::cell::RefCell;

use serde_json::Value;

use crate::confirm::Confirm;
use crate::errors::SsmError;
use crate::invoke::{invoke, InvokeOptions};
use crate::operations::activations::*;
use crate::operations::associations::*;
use crate::operations::automation::*;
use crate::operations::commands::*;
use crate::operations::documents::*;
use crate::operations::maintenance_windows::*;
use crate::operations::ops_items::*;
use crate::operations::parameters::*;
use crate::operations::patch_baselines::*;
use crate::operations::tags::*;
use crate::operations::Operation;
use crate::ssm_ops::SsmApi;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AddTagsToResource(AddTagsToResourceRequest),
    CreateActivation(CreateActivationRequest),
    CreateAssociation(CreateAssociationRequest),
    CreateDocument(CreateDocumentRequest),
    CreateMaintenanceWindow(CreateMaintenanceWindowRequest),
    CreateOpsItem(CreateOpsItemRequest),
    CreatePatchBaseline(CreatePatchBaselineRequest),
    DeleteParameter(DeleteParameterRequest),
    GetParameters(GetParametersRequest),
    PutParameter(PutParameterRequest),
    SendCommand(SendCommandRequest),
    StartAutomationExecution(StartAutomationExecutionRequest),
    UpdateDocumentDefaultVersion(UpdateDocumentDefaultVersionRequest),
    UpdateMaintenanceWindowTask(UpdateMaintenanceWindowTaskRequest),
}

/// What the fake answers with, per operation.
#[derive(Debug, Default)]
pub struct Responses {
    pub create_activation: CreateActivationResponse,
    pub create_association: CreateAssociationResponse,
    pub create_document: CreateDocumentResponse,
    pub create_maintenance_window: CreateMaintenanceWindowResponse,
    pub create_ops_item: CreateOpsItemResponse,
    pub create_patch_baseline: CreatePatchBaselineResponse,
    pub get_parameters: GetParametersResponse,
    pub put_parameter: PutParameterResponse,
    pub send_command: SendCommandResponse,
    pub start_automation_execution: StartAutomationExecutionResponse,
    pub update_document_default_version: UpdateDocumentDefaultVersionResponse,
    pub update_maintenance_window_task: UpdateMaintenanceWindowTaskResponse,
}

#[derive(Debug, Default)]
pub struct FakeSsm {
    pub responses: Responses,
    failure: Option<SsmError>,
    calls: RefCell<Vec<Call>>,
}

impl FakeSsm {
    pub fn new() -> Self {
        FakeSsm::default()
    }

    /// Every call is recorded, then fails with `err`.
    pub fn failing(err: SsmError) -> Self {
        FakeSsm { failure: Some(err), ..FakeSsm::default() }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last(&self) -> Option<Call> {
        self.calls.borrow().last().cloned()
    }

    fn record<T: Clone>(&self, call: Call, response: &T) -> Result<T, SsmError> {
        self.calls.borrow_mut().push(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(response.clone()),
        }
    }
}

impl SsmApi for FakeSsm {
    fn add_tags_to_resource(&self, req: AddTagsToResourceRequest) -> Result<AddTagsToResourceResponse, SsmError> {
        self.record(Call::AddTagsToResource(req), &AddTagsToResourceResponse {})
    }

    fn create_activation(&self, req: CreateActivationRequest) -> Result<CreateActivationResponse, SsmError> {
        self.record(Call::CreateActivation(req), &self.responses.create_activation)
    }

    fn create_association(&self, req: CreateAssociationRequest) -> Result<CreateAssociationResponse, SsmError> {
        self.record(Call::CreateAssociation(req), &self.responses.create_association)
    }

    fn create_document(&self, req: CreateDocumentRequest) -> Result<CreateDocumentResponse, SsmError> {
        self.record(Call::CreateDocument(req), &self.responses.create_document)
    }

    fn create_maintenance_window(
        &self,
        req: CreateMaintenanceWindowRequest,
    ) -> Result<CreateMaintenanceWindowResponse, SsmError> {
        self.record(Call::CreateMaintenanceWindow(req), &self.responses.create_maintenance_window)
    }

    fn create_ops_item(&self, req: CreateOpsItemRequest) -> Result<CreateOpsItemResponse, SsmError> {
        self.record(Call::CreateOpsItem(req), &self.responses.create_ops_item)
    }

    fn create_patch_baseline(&self, req: CreatePatchBaselineRequest) -> Result<CreatePatchBaselineResponse, SsmError> {
        self.record(Call::CreatePatchBaseline(req), &self.responses.create_patch_baseline)
    }

    fn delete_parameter(&self, req: DeleteParameterRequest) -> Result<DeleteParameterResponse, SsmError> {
        self.record(Call::DeleteParameter(req), &DeleteParameterResponse {})
    }

    fn get_parameters(&self, req: GetParametersRequest) -> Result<GetParametersResponse, SsmError> {
        self.record(Call::GetParameters(req), &self.responses.get_parameters)
    }

    fn put_parameter(&self, req: PutParameterRequest) -> Result<PutParameterResponse, SsmError> {
        self.record(Call::PutParameter(req), &self.responses.put_parameter)
    }

    fn send_command(&self, req: SendCommandRequest) -> Result<SendCommandResponse, SsmError> {
        self.record(Call::SendCommand(req), &self.responses.send_command)
    }

    fn start_automation_execution(
        &self,
        req: StartAutomationExecutionRequest,
    ) -> Result<StartAutomationExecutionResponse, SsmError> {
        self.record(Call::StartAutomationExecution(req), &self.responses.start_automation_execution)
    }

    fn update_document_default_version(
        &self,
        req: UpdateDocumentDefaultVersionRequest,
    ) -> Result<UpdateDocumentDefaultVersionResponse, SsmError> {
        self.record(Call::UpdateDocumentDefaultVersion(req), &self.responses.update_document_default_version)
    }

    fn update_maintenance_window_task(
        &self,
        req: UpdateMaintenanceWindowTaskRequest,
    ) -> Result<UpdateMaintenanceWindowTaskResponse, SsmError> {
        self.record(Call::UpdateMaintenanceWindowTask(req), &self.responses.update_maintenance_window_task)
    }
}

/// Fixed answer to every prompt, remembering what was asked.
pub struct Answer {
    yes: bool,
    pub asked: Vec<(String, String)>,
}

impl Answer {
    pub fn new(yes: bool) -> Self {
        Answer { yes, asked: Vec::new() }
    }
}

impl Confirm for Answer {
    fn confirm(&mut self, operation: &str, target: &str) -> Result<bool, SsmError> {
        self.asked.push((operation.to_string(), target.to_string()));
        Ok(self.yes)
    }
}

/// Invokes with `--force`, the way most operation tests want it.
pub fn run<O: Operation>(
    op: &O,
    select: Option<&str>,
    pass_thru: bool,
    api: &FakeSsm,
) -> Result<Option<Value>, SsmError> {
    let options = InvokeOptions {
        select: select.map(str::to_string),
        pass_thru,
        force: true,
    };
    invoke(op, &options, api, &mut Answer::new(true))
}
