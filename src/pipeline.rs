//! Project creation pipeline.
//!
//! Stages run strictly in order:
//! `Resolving -> Cloning -> Provisioning -> Rewriting -> VersionControl ->
//! Deploying (optional) -> Installing -> Done`. Provisioning and deployment
//! degrade on failure; every other stage aborts the run with its own error.
//! Nothing is rolled back on abort.

use crate::cloud::{provision, AuthenticatedClient, ResourceSet};
use crate::configs::ProjectConfigs;
use crate::constants::{artifacts, INITIAL_COMMIT_MESSAGE, REMOTE_NAME};
use crate::deploy::{DeployOutcome, Deployer};
use crate::error::{Error, Result};
use crate::install::install;
use crate::loader::fetch_template;
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::report::Report;
use crate::resolver::{resolve, ProjectRequest};
use crate::rewrite::{RewriteContext, RewriteSpec};
use crate::runner::CommandRunner;
use crate::secrets::SecretBundle;
use crate::settings::{RemoteRequest, Settings};
use crate::vcs;
use console::style;
use log::{debug, warn};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Resolving,
    Cloning,
    Provisioning,
    Rewriting,
    VersionControl,
    Deploying,
    Installing,
    Done,
    Aborted(String),
}

/// Steps recorded in the [`PipelineResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Clone,
    Provision,
    Rewrite,
    VersionControl,
    Remote,
    Deploy,
    Install,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Skipped,
    /// Completed with fallback values.
    Degraded(String),
    /// Failed without aborting the run.
    Failed(String),
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub target_dir: PathBuf,
    pub steps: Vec<(Step, StepStatus)>,
    pub resources: ResourceSet,
    pub report: Report,
    /// Warnings shown to the user during the run.
    pub warnings: Vec<String>,
}

impl PipelineResult {
    pub fn status(&self, step: Step) -> Option<&StepStatus> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, status)| status)
    }
}

/// Collaborators handed to the pipeline. The client is `None` when the user
/// is not logged in.
pub struct Collaborators<'a> {
    pub client: Option<&'a dyn AuthenticatedClient>,
    pub prompter: &'a dyn Prompter,
    pub runner: &'a dyn CommandRunner,
    pub renderer: &'a dyn TemplateRenderer,
}

pub struct Pipeline<'a> {
    settings: &'a Settings,
    deps: Collaborators<'a>,
    state: PipelineState,
    steps: Vec<(Step, StepStatus)>,
    warnings: Vec<String>,
}

impl<'a> Pipeline<'a> {
    pub fn new(settings: &'a Settings, deps: Collaborators<'a>) -> Self {
        Self {
            settings,
            deps,
            state: PipelineState::Resolving,
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    fn transition(&mut self, state: PipelineState) {
        debug!("Pipeline state: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn record(&mut self, step: Step, status: StepStatus) {
        debug!("Step {step:?}: {status:?}");
        self.steps.push((step, status));
    }

    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }

    /// Creates project `name` from `template` inside `base_dir`.
    ///
    /// # Arguments
    /// * `base_dir` - Directory the project folder is created in
    /// * `template` - Template name, git URL or local path
    /// * `name` - Requested project name, sanitized before use
    ///
    /// # Returns
    /// * `Result<PipelineResult>` - Step statuses, created resources, warnings
    ///   and the closing report
    ///
    /// # Errors
    /// Returns the error of the first fatal stage; the pipeline is then in
    /// the `Aborted` state.
    pub fn run(&mut self, base_dir: &Path, template: &str, name: &str) -> Result<PipelineResult> {
        match self.execute(base_dir, template, name) {
            Ok(result) => {
                self.transition(PipelineState::Done);
                Ok(result)
            }
            Err(e) => {
                self.transition(PipelineState::Aborted(e.to_string()));
                Err(e)
            }
        }
    }

    fn execute(&mut self, base_dir: &Path, template: &str, name: &str) -> Result<PipelineResult> {
        self.transition(PipelineState::Resolving);
        let remote = self.settings.remote.clone();
        let request = resolve(base_dir, template, name, &self.settings.org, remote)?;
        let root = request.target_dir.clone();

        if self.deps.client.is_none() {
            self.warn(
                "(!) Please login to setup and config the project automatically! \
                 $ sheetbase login"
                    .to_string(),
            );
        }
        println!("\n> Create new Sheetbase project.");

        self.transition(PipelineState::Cloning);
        fetch_template(&request.source, &root)?;
        if !root.join(artifacts::SHEETBASE_CONFIG).exists() {
            self.warn(format!(
                "(!) Looks like the repo is not a valid Sheetbase theme! ({})",
                request.source
            ));
        }
        self.record(Step::Clone, StepStatus::Succeeded);

        self.transition(PipelineState::Provisioning);
        let resources = self.provision(&request);
        let secrets = SecretBundle::generate();

        self.transition(PipelineState::Rewriting);
        let context = RewriteContext::new(&request.name, &secrets, &resources, None);
        let rewritten = RewriteSpec::project().apply(&root, self.deps.renderer, &context)?;
        debug!(
            "Rewrote {} artifacts, skipped {}",
            rewritten.rewritten.len(),
            rewritten.skipped.len()
        );
        self.record(Step::Rewrite, StepStatus::Succeeded);

        self.transition(PipelineState::VersionControl);
        let remote = self.version_control(&request)?;
        println!("\n{}", style("New Sheetbase project created successfully!").green());

        if let Some(script_id) = resources.backend_script_id() {
            self.transition(PipelineState::Deploying);
            let deployer = Deployer {
                command: &self.settings.deployer,
                runner: self.deps.runner,
                prompter: self.deps.prompter,
                renderer: self.deps.renderer,
            };
            let status = match deployer.deploy(&root, script_id, &context) {
                DeployOutcome::Uploaded { .. } => StepStatus::Succeeded,
                DeployOutcome::Failed(reason) => StepStatus::Failed(reason),
            };
            self.record(Step::Deploy, status);
        } else {
            self.record(Step::Deploy, StepStatus::Skipped);
        }

        self.transition(PipelineState::Installing);
        if self.settings.install {
            install(&root, &self.settings.installer, self.deps.runner)?;
            self.record(Step::Install, StepStatus::Succeeded);
        } else {
            self.record(Step::Install, StepStatus::Skipped);
        }

        let report = Report::new(&request.name, remote, ProjectConfigs::load(&root));
        Ok(PipelineResult {
            target_dir: root,
            steps: std::mem::take(&mut self.steps),
            resources,
            report,
            warnings: std::mem::take(&mut self.warnings),
        })
    }

    fn provision(&mut self, request: &ProjectRequest) -> ResourceSet {
        let configs = ProjectConfigs::load(&request.target_dir);
        let resources =
            provision(self.deps.client, &request.name, configs.template_database.as_deref());

        let status = if self.deps.client.is_none() {
            StepStatus::Degraded("not logged in".to_string())
        } else if resources.has_failures() {
            StepStatus::Degraded("some resources could not be created".to_string())
        } else {
            StepStatus::Succeeded
        };
        self.record(Step::Provision, status);
        resources
    }

    /// Creates the baseline commit and attaches the remote. Returns the
    /// attached remote URL.
    fn version_control(&mut self, request: &ProjectRequest) -> Result<Option<String>> {
        let repo = vcs::initialize(&request.target_dir, INITIAL_COMMIT_MESSAGE)?;
        self.record(Step::VersionControl, StepStatus::Succeeded);

        let url = match &request.remote {
            RemoteRequest::None => None,
            RemoteRequest::Url(url) => Some(url.clone()),
            RemoteRequest::Prompt => self
                .deps
                .prompter
                .remote_url()
                .map_err(|e| Error::VersionControlError(e.to_string()))?,
        };

        let Some(url) = url else {
            self.record(Step::Remote, StepStatus::Skipped);
            return Ok(None);
        };

        if !vcs::is_valid_git_url(&url) {
            self.warn(format!("(!) Invalid git URL '{url}', no remote attached"));
            self.record(Step::Remote, StepStatus::Degraded(format!("invalid URL '{url}'")));
            return Ok(None);
        }

        vcs::add_remote(&repo, REMOTE_NAME, &url)?;
        self.record(Step::Remote, StepStatus::Succeeded);
        Ok(Some(url))
    }
}
