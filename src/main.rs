//! Sheetbase's main application entry point.
//! Parses the command line, builds the collaborators and runs the pipeline.

use std::path::Path;

use sheetbase::{
    cli::{get_args, Args},
    cloud::{AuthenticatedClient, GoogleClient},
    error::{default_error_handler, Result},
    pipeline::{Collaborators, Pipeline},
    prompt::{DialoguerPrompter, NonInteractivePrompter, Prompter},
    renderer::MiniJinjaRenderer,
    runner::SystemRunner,
    settings::Settings,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose { log::LevelFilter::Trace } else { log::LevelFilter::Warn })
        .format_timestamp(None)
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    let settings = Settings::from(&args);

    let client = GoogleClient::from_environment();
    let prompter: Box<dyn Prompter> = if settings.interactive {
        Box::new(DialoguerPrompter::new())
    } else {
        Box::new(NonInteractivePrompter)
    };
    let runner = SystemRunner;
    let renderer = MiniJinjaRenderer::new();

    let deps = Collaborators {
        client: client.as_ref().map(|c| c as &dyn AuthenticatedClient),
        prompter: &*prompter,
        runner: &runner,
        renderer: &renderer,
    };

    let mut pipeline = Pipeline::new(&settings, deps);
    let result = pipeline.run(Path::new("."), &args.template, &args.name)?;
    println!("{}", result.report.render());
    Ok(())
}
