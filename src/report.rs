//! Closing summary printed once a project is created.

use crate::configs::ProjectConfigs;
use console::style;

const NOT_AVAILABLE: &str = "n/a";

/// Summary of a created project. Configuration values come from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub name: String,
    /// Remote that was attached, if any.
    pub remote: Option<String>,
    pub configs: ProjectConfigs,
}

impl Report {
    pub fn new(name: &str, remote: Option<String>, configs: ProjectConfigs) -> Self {
        Self { name: name.to_string(), remote, configs }
    }

    /// Labelled properties, `n/a` where a value is absent.
    pub fn properties(&self) -> Vec<(&'static str, String)> {
        let value = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
        vec![
            ("Repo", value(&self.remote)),
            ("Backend", value(&self.configs.backend)),
            ("Drive folder", value(&self.configs.drive_folder)),
            ("Backend script", value(&self.configs.backend_script)),
            ("Database", value(&self.configs.database)),
        ]
    }

    /// Returns the value of a property by label.
    pub fn property(&self, label: &str) -> Option<String> {
        self.properties().into_iter().find(|(l, _)| *l == label).map(|(_, v)| v)
    }

    /// Suggested follow-up commands.
    pub fn next_commands(&self) -> Vec<(String, Option<&'static str>)> {
        let mut commands = vec![
            (format!("cd ./{}", self.name), None),
            ("sheetbase mine -o".to_string(), Some("See the Drive folder.")),
        ];
        if self.remote.is_some() {
            commands.push(("git push -u origin master".to_string(), None));
        }
        commands
    }

    pub fn render(&self) -> String {
        let mut out = String::from("\n\n> Done! What next?\n\n");
        for (command, hint) in self.next_commands() {
            out.push_str(&format!("   $ {}", style(command).green()));
            if let Some(hint) = hint {
                out.push_str(&format!(" - {hint}"));
            }
            out.push('\n');
        }

        out.push_str("\n> Properties & configurations:\n\n");
        for (label, value) in self.properties() {
            out.push_str(&format!("+ {label}: {}\n", style(value).green()));
        }
        out
    }
}
