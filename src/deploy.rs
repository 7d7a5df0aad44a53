//! Optional backend deployment: upload the script, let the user publish it,
//! then record the published web-app id in the frontend configuration.

use crate::constants::BACKEND_COMMIT_MESSAGE;
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::rewrite::{RewriteContext, RewriteSpec};
use crate::runner::CommandRunner;
use crate::settings::ToolCommand;
use crate::vcs;
use log::{debug, error};
use std::path::Path;

/// Outcome of the deployment step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The upload (or the follow-up update) failed; the project is still usable.
    Failed(String),
    /// The script was uploaded. Holds the web-app id if the user provided one
    /// and it was committed.
    Uploaded { backend: Option<String> },
}

/// URL of the script editor for `script_id`.
pub fn script_editor_url(script_id: &str) -> String {
    format!("https://script.google.com/d/{script_id}/edit")
}

/// Everything the deployer needs besides the project itself.
pub struct Deployer<'a> {
    pub command: &'a ToolCommand,
    pub runner: &'a dyn CommandRunner,
    pub prompter: &'a dyn Prompter,
    pub renderer: &'a dyn TemplateRenderer,
}

impl Deployer<'_> {
    /// Uploads the backend in `root/backend`, runs the publish checkpoint and
    /// commits the captured web-app id.
    ///
    /// Failures never propagate: they are logged and reported as
    /// [`DeployOutcome::Failed`].
    pub fn deploy(&self, root: &Path, script_id: &str, context: &RewriteContext) -> DeployOutcome {
        println!("\n> Push backend script, must have {} installed.", self.command.program);

        if let Err(e) = self.runner.run(self.command, &root.join("backend")) {
            let err = Error::DeployError(e.to_string());
            error!("{err}");
            return DeployOutcome::Failed(err.to_string());
        }

        match self.publish(root, script_id, context) {
            Ok(backend) => DeployOutcome::Uploaded { backend },
            Err(e) => {
                error!("{e}");
                DeployOutcome::Failed(e.to_string())
            }
        }
    }

    fn publish(
        &self,
        root: &Path,
        script_id: &str,
        context: &RewriteContext,
    ) -> Result<Option<String>> {
        let Some(backend) = self.prompter.checkpoint(&script_editor_url(script_id))? else {
            debug!("No web app id provided, keeping placeholder");
            return Ok(None);
        };

        let context = RewriteContext { backend: backend.clone(), ..context.clone() };
        let report = RewriteSpec::backend().apply(root, self.renderer, &context)?;
        if report.rewritten.is_empty() {
            debug!("No frontend configuration to update");
            return Ok(None);
        }

        let repo = vcs::open(root)?;
        vcs::commit_all(&repo, BACKEND_COMMIT_MESSAGE)?;
        Ok(Some(backend))
    }
}
