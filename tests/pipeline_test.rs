mod common;

use common::{
    full_template, read_json, settings, write, FakeClient, RecordingRunner, ScriptedPrompter,
};
use git2::Repository;
use sheetbase::cloud::AuthenticatedClient;
use sheetbase::configs::quoted_field;
use sheetbase::error::Error;
use sheetbase::pipeline::{Collaborators, Pipeline, PipelineState, Step, StepStatus};
use sheetbase::prompt::NonInteractivePrompter;
use sheetbase::renderer::MiniJinjaRenderer;
use sheetbase::settings::{RemoteRequest, Settings};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Fixture {
    template: TempDir,
    workspace: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self { template: TempDir::new().unwrap(), workspace: TempDir::new().unwrap() }
    }

    fn template_path(&self) -> &str {
        self.template.path().to_str().unwrap()
    }

    fn project(&self, name: &str) -> std::path::PathBuf {
        self.workspace.path().join(name)
    }
}

fn collaborators<'a>(
    client: Option<&'a FakeClient>,
    prompter: &'a ScriptedPrompter,
    runner: &'a RecordingRunner,
    renderer: &'a MiniJinjaRenderer,
) -> Collaborators<'a> {
    Collaborators {
        client: client.map(|c| c as &dyn AuthenticatedClient),
        prompter,
        runner,
        renderer,
    }
}

fn commit_messages(root: &Path) -> Vec<String> {
    let repo = Repository::open(root).unwrap();
    let mut walk = repo.revwalk().unwrap();
    walk.push_head().unwrap();
    walk.map(|oid| repo.find_commit(oid.unwrap()).unwrap().message().unwrap().to_string())
        .collect()
}

#[test_log::test]
fn test_minimal_template_without_login() {
    let fixture = Fixture::new();
    write(fixture.template.path(), "package.json", r#"{ "name": "template" }"#);
    write(
        fixture.template.path(),
        "sheetbase.config.json",
        r#"{ "name": "template", "driveFolder": "old" }"#,
    );

    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));

    let result =
        pipeline.run(fixture.workspace.path(), fixture.template_path(), "my app").unwrap();
    let root = fixture.project("my-app");

    assert_eq!(pipeline.state(), &PipelineState::Done);
    assert_eq!(result.target_dir, root);
    assert_eq!(read_json(&root.join("package.json"))["name"], "my-app");
    assert_eq!(read_json(&root.join("sheetbase.config.json"))["driveFolder"], "");
    assert!(matches!(result.status(Step::Provision), Some(StepStatus::Degraded(_))));
    assert_eq!(result.status(Step::Deploy), Some(&StepStatus::Skipped));
    assert_eq!(result.status(Step::Remote), Some(&StepStatus::Skipped));
    assert_eq!(commit_messages(&root), vec!["Initial commit".to_string()]);
    assert_eq!(runner.commands(), vec!["npm install".to_string()]);
    assert_eq!(runner.calls.borrow()[0].1, root);
    assert_eq!(result.report.property("Drive folder"), Some("n/a".to_string()));
    assert_eq!(result.report.property("Repo"), Some("n/a".to_string()));
}

#[test]
fn test_backend_config_secrets() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));
    pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    let root = fixture.project("app");
    let backend = fs::read_to_string(root.join("backend/configs/Sheetbase.config.js")).unwrap();
    let frontend = fs::read_to_string(root.join("src/configs/sheetbase.config.ts")).unwrap();

    let api_key = quoted_field(&backend, "apiKey").unwrap();
    assert_eq!(api_key.len(), 32);
    assert_eq!(backend.matches(api_key.as_str()).count(), 1);
    assert!(backend.contains(r#"// "apiKey": "keep-me""#));
    assert_eq!(quoted_field(&frontend, "apiKey"), Some(api_key));
    assert_eq!(quoted_field(&backend, "encryptionKey").unwrap().chars().count(), 12);

    assert!(backend.contains(r#""database": "<your_spreadsheet_id>""#));
    assert!(backend.contains(r#""contentFolder": "<your_folder_id>""#));
    assert!(frontend.contains(r#""backend": "<your_webapp_id>""#));
    assert_eq!(read_json(&root.join("backend/.clasp.json"))["scriptId"], "<scriptId>");
}

#[test]
fn test_full_provisioning_and_report() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let client = FakeClient::default();
    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline =
        Pipeline::new(&settings, collaborators(Some(&client), &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    assert_eq!(result.status(Step::Provision), Some(&StepStatus::Succeeded));
    assert!(client.urls().iter().any(|u| u.ends_with("/template-db/copy")));
    assert_eq!(result.report.property("Backend script"), Some("script-id".to_string()));
    assert_eq!(result.report.property("Drive folder"), Some("folder-id".to_string()));
    assert_eq!(result.report.property("Database"), Some("database-id".to_string()));
    assert_eq!(result.report.property("Backend"), Some("n/a".to_string()));

    // Deployment ran, but no web app id was given
    assert_eq!(result.status(Step::Deploy), Some(&StepStatus::Succeeded));
    assert_eq!(
        prompter.checkpoints.borrow().as_slice(),
        ["https://script.google.com/d/script-id/edit".to_string()]
    );
    assert_eq!(runner.commands(), vec!["clasp push".to_string(), "npm install".to_string()]);
    assert_eq!(runner.calls.borrow()[0].1, fixture.project("app").join("backend"));
    assert_eq!(commit_messages(&fixture.project("app")).len(), 1);
}

#[test]
fn test_report_reads_persisted_configuration() {
    let fixture = Fixture::new();
    write(fixture.template.path(), "package.json", r#"{ "name": "template" }"#);

    let client = FakeClient::default();
    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline =
        Pipeline::new(&settings, collaborators(Some(&client), &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    // The script exists in the cloud but no artifact records it
    assert_eq!(result.resources.backend_script_id(), Some("script-id"));
    assert_eq!(result.report.property("Backend script"), Some("n/a".to_string()));
}

#[test]
fn test_backend_id_is_committed() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let client = FakeClient::default();
    let prompter = ScriptedPrompter { backend: Some("webapp-123".into()), ..Default::default() };
    let (runner, renderer) = (RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline =
        Pipeline::new(&settings, collaborators(Some(&client), &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();
    let root = fixture.project("app");

    let frontend = fs::read_to_string(root.join("src/configs/sheetbase.config.ts")).unwrap();
    assert_eq!(quoted_field(&frontend, "backend"), Some("webapp-123".to_string()));
    assert_eq!(
        commit_messages(&root),
        vec!["Update backend".to_string(), "Initial commit".to_string()]
    );
    assert_eq!(result.report.property("Backend"), Some("webapp-123".to_string()));
}

#[test_log::test]
fn test_deploy_failure_is_not_fatal() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let client = FakeClient::default();
    let prompter = ScriptedPrompter { backend: Some("webapp-123".into()), ..Default::default() };
    let (runner, renderer) = (RecordingRunner::failing(&["clasp"]), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline =
        Pipeline::new(&settings, collaborators(Some(&client), &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    assert_eq!(pipeline.state(), &PipelineState::Done);
    assert!(matches!(result.status(Step::Deploy), Some(StepStatus::Failed(_))));
    assert!(prompter.checkpoints.borrow().is_empty());
    assert_eq!(runner.commands(), vec!["clasp push".to_string(), "npm install".to_string()]);
    assert_eq!(result.report.property("Backend"), Some("n/a".to_string()));
}

#[test]
fn test_existing_directory_aborts_without_side_effects() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());
    fs::create_dir(fixture.project("my-app")).unwrap();

    let client = FakeClient::default();
    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline =
        Pipeline::new(&settings, collaborators(Some(&client), &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "my:app");

    assert!(matches!(result, Err(Error::DirectoryExistsError { .. })));
    assert!(matches!(pipeline.state(), PipelineState::Aborted(_)));
    assert!(client.calls.borrow().is_empty());
    assert!(runner.calls.borrow().is_empty());
    assert_eq!(fs::read_dir(fixture.project("my-app")).unwrap().count(), 0);
}

#[test]
fn test_clone_failure_aborts() {
    let fixture = Fixture::new();
    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));

    let result =
        pipeline.run(fixture.workspace.path(), "file:///nonexistent/sheetbase-x.git", "app");

    assert!(matches!(result, Err(Error::CloneError { .. })));
    assert!(matches!(pipeline.state(), PipelineState::Aborted(_)));
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_config_write_failure_aborts_before_git() {
    let fixture = Fixture::new();
    write(fixture.template.path(), "package.json", "{ broken");

    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app");

    assert!(matches!(result, Err(Error::ConfigWriteError { .. })));
    assert!(!fixture.project("app").join(".git").exists());
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_install_failure_aborts() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::failing(&["npm"]), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app");

    assert!(matches!(result, Err(Error::InstallError(_))));
    assert!(matches!(pipeline.state(), PipelineState::Aborted(_)));
    // Partial project is left in place
    assert!(fixture.project("app").join(".git").exists());
}

#[test]
fn test_skip_install() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = Settings { install: false, ..settings() };
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    assert_eq!(result.status(Step::Install), Some(&StepStatus::Skipped));
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_remote_from_settings() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = Settings {
        remote: RemoteRequest::Url("https://github.com/me/app.git".into()),
        ..settings()
    };
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    let repo = Repository::open(fixture.project("app")).unwrap();
    assert_eq!(repo.find_remote("origin").unwrap().url(), Some("https://github.com/me/app.git"));
    assert_eq!(result.report.property("Repo"), Some("https://github.com/me/app.git".to_string()));
    assert!(result
        .report
        .next_commands()
        .iter()
        .any(|(command, _)| command == "git push -u origin master"));
}

#[test]
fn test_prompted_invalid_remote_is_not_attached() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let prompter =
        ScriptedPrompter { remote: Some("git@github.com:me/app.git".into()), ..Default::default() };
    let (runner, renderer) = (RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = Settings { remote: RemoteRequest::Prompt, ..settings() };
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    let repo = Repository::open(fixture.project("app")).unwrap();
    assert!(repo.remotes().unwrap().is_empty());
    assert!(matches!(result.status(Step::Remote), Some(StepStatus::Degraded(_))));
    assert_eq!(result.report.property("Repo"), Some("n/a".to_string()));
}

#[test]
fn test_non_interactive_prompter() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let client = FakeClient::default();
    let prompter = NonInteractivePrompter;
    let (runner, renderer) = (RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = Settings { remote: RemoteRequest::Prompt, ..settings() };
    let deps = Collaborators {
        client: Some(&client as &dyn AuthenticatedClient),
        prompter: &prompter,
        runner: &runner,
        renderer: &renderer,
    };
    let mut pipeline = Pipeline::new(&settings, deps);

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    assert_eq!(result.status(Step::Remote), Some(&StepStatus::Skipped));
    assert_eq!(result.status(Step::Deploy), Some(&StepStatus::Succeeded));
    assert_eq!(commit_messages(&fixture.project("app")).len(), 1);
}

#[test_log::test]
fn test_login_and_template_warnings() {
    let fixture = Fixture::new();
    write(fixture.template.path(), "package.json", r#"{ "name": "template" }"#);

    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline = Pipeline::new(&settings, collaborators(None, &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    assert_eq!(pipeline.state(), &PipelineState::Done);
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings[0].contains("sheetbase login"));
    assert!(result.warnings[1].contains("not a valid Sheetbase theme"));
}

#[test_log::test]
fn test_no_warnings_for_full_template_with_login() {
    let fixture = Fixture::new();
    full_template(fixture.template.path());

    let client = FakeClient::default();
    let (prompter, runner, renderer) =
        (ScriptedPrompter::default(), RecordingRunner::default(), MiniJinjaRenderer::new());
    let settings = settings();
    let mut pipeline =
        Pipeline::new(&settings, collaborators(Some(&client), &prompter, &runner, &renderer));

    let result = pipeline.run(fixture.workspace.path(), fixture.template_path(), "app").unwrap();

    assert!(result.warnings.is_empty());
}
