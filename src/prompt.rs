//! User interaction: the questions asked while a project is created.

use crate::error::{Error, Result};
use dialoguer::Input;
use log::{debug, warn};

/// Source of answers for the interactive parts of the pipeline.
pub trait Prompter {
    /// Asks for the git remote URL. An empty answer means no remote.
    fn remote_url(&self) -> Result<Option<String>>;

    /// Shows `url` to the user, waits for the manual publish step and asks
    /// for the resulting web-app id. An empty answer means none.
    fn checkpoint(&self, url: &str) -> Result<Option<String>>;
}

fn non_empty(answer: String) -> Option<String> {
    let answer = answer.trim();
    (!answer.is_empty()).then(|| answer.to_string())
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn remote_url(&self) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt("Git remote URL (https://...git)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(non_empty(answer))
    }

    fn checkpoint(&self, url: &str) -> Result<Option<String>> {
        println!("\n> Opening {url}");
        println!("  Publish the script as a web app, then paste its id below.");
        if let Err(e) = webbrowser::open(url) {
            warn!("Unable to open the browser: {e}");
        }

        let answer: String = Input::new()
            .with_prompt("Backend web app id")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))?;
        Ok(non_empty(answer))
    }
}

/// Prompter that answers every question with nothing.
#[derive(Debug, Default)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn remote_url(&self) -> Result<Option<String>> {
        debug!("Non-interactive run, no remote URL");
        Ok(None)
    }

    fn checkpoint(&self, url: &str) -> Result<Option<String>> {
        println!("\n> Publish the backend manually at {url}");
        Ok(None)
    }
}
