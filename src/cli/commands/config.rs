use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use std::process::Command;

/// Editor to use: `--editor`, then $EDITOR / $VISUAL, then a platform default.
fn pick_editor(requested: &Option<String>) -> String {
    requested.clone().unwrap_or_else(|| {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    })
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            let mut shown = cfg.clone();
            if shown.api_token.is_some() {
                shown.api_token = Some("********".to_string());
            }
            println!("📄 Current configuration:\n");
            println!("{}", serde_yaml::to_string(&shown)?);
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            let path = Config::config_file();
            if !path.exists() {
                warning("No configuration file yet, run `opsgrid init` first.");
                return Ok(());
            }

            let editor_to_use = pick_editor(editor);
            match Command::new(&editor_to_use).arg(&path).status() {
                Ok(s) if s.success() => {}
                _ => {
                    error(format!("Failed to edit configuration file using '{editor_to_use}'"));
                    return Ok(());
                }
            }

            // the edited file must still load
            match Config::load() {
                Ok(_) => success(format!(
                    "Configuration file edited successfully using '{editor_to_use}'"
                )),
                Err(e) => error(format!("Configuration saved but invalid: {e}")),
            }
        }
    }

    Ok(())
}
