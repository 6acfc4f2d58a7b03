use crate::invoke::InvokeOptions;
use crate::operations::activations::CreateActivation;
use crate::operations::associations::CreateAssociation;
use crate::operations::automation::StartAutomationExecution;
use crate::operations::commands::SendCommand;
use crate::operations::documents::{CreateDocument, UpdateDocumentDefaultVersion};
use crate::operations::maintenance_windows::{CreateMaintenanceWindow, UpdateMaintenanceWindowTask};
use crate::operations::ops_items::CreateOpsItem;
use crate::operations::parameters::{DeleteParameter, GetParameters, PutParameter};
use crate::operations::patch_baselines::CreatePatchBaseline;
use crate::operations::tags::AddTagsToResource;

#[derive(StructOpt, Debug)]
#[structopt(name = "ssm_cmd",
    about = "AWS Systems Manager from the command line - one subcommand per SSM API operation, written in Rust."
)]
pub struct Opt {
    /// AWS Region
    #[structopt(short = "r", long = "region", env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,
    /// Send requests to this endpoint instead of the regional one
    #[structopt(long = "endpoint-url")]
    pub endpoint_url: Option<String>,
    /// Output: '*' for the whole response, a response field name, or '^Input' to echo an input
    #[structopt(short = "s", long = "select")]
    pub select: Option<String>,
    /// Deprecated, echo the operation's main input. Use --select '^Input'
    #[structopt(long = "pass-thru")]
    pub pass_thru: bool,
    /// Do not ask before changing anything
    #[structopt(short = "f", long = "force")]
    pub force: bool,
    /// Quiet Mode => Only Errors and Command Output
    #[structopt(short = "q", long = "quiet")]
    pub quiet: bool,
    /// More log output on stderr, repeat for more
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: u8,
    #[structopt(subcommand)]
    pub cmd: Command,
}

impl Opt {
    pub fn invoke_options(&self) -> InvokeOptions {
        InvokeOptions {
            select: self.select.clone(),
            pass_thru: self.pass_thru,
            force: self.force,
        }
    }
}

#[derive(StructOpt, Debug)]
pub enum Command {
    /// Add or overwrite tags on a document, managed instance, window, parameter, baseline or OpsItem
    #[structopt(name = "add-tags-to-resource")]
    AddTagsToResource(AddTagsToResource),
    /// Create an activation code for registering on-premises machines
    #[structopt(name = "create-activation")]
    CreateActivation(CreateActivation),
    /// Associate an SSM document with instances or targets
    #[structopt(name = "create-association")]
    CreateAssociation(CreateAssociation),
    /// Create an SSM document
    #[structopt(name = "create-document")]
    CreateDocument(CreateDocument),
    /// Create a maintenance window
    #[structopt(name = "create-maintenance-window")]
    CreateMaintenanceWindow(CreateMaintenanceWindow),
    /// Create an OpsCenter work item
    #[structopt(name = "create-ops-item")]
    CreateOpsItem(CreateOpsItem),
    /// Create a patch baseline
    #[structopt(name = "create-patch-baseline")]
    CreatePatchBaseline(CreatePatchBaseline),
    /// Delete a parameter from Parameter Store
    #[structopt(name = "delete-parameter")]
    DeleteParameter(DeleteParameter),
    /// Get Parameters by Name
    #[structopt(name = "get-parameters", visible_alias = "get")]
    GetParameters(GetParameters),
    /// Add or overwrite a parameter in Parameter Store
    #[structopt(name = "put-parameter")]
    PutParameter(PutParameter),
    /// Run a command document on instances or targets
    #[structopt(name = "send-command")]
    SendCommand(SendCommand),
    /// Start an Automation document
    #[structopt(name = "start-automation-execution")]
    StartAutomationExecution(StartAutomationExecution),
    /// Set the default version of a document
    #[structopt(name = "update-document-default-version")]
    UpdateDocumentDefaultVersion(UpdateDocumentDefaultVersion),
    /// Change a task registered with a maintenance window
    #[structopt(name = "update-maintenance-window-task")]
    UpdateMaintenanceWindowTask(UpdateMaintenanceWindowTask),
}
