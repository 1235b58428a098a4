use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

const MAX_TARGET_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    match Regex::new(r"\x1B\[[0-9;]*[mK]") {
        Ok(re) => re.replace_all(s, "").into_owned(),
        Err(_) => s.to_string(),
    }
}

/// Colour per operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "edit" => Colour::Green,
        "submit" => Colour::Cyan,
        "cancel" => Colour::Yellow,
        "edit_failed" | "submit_failed" => Colour::Red,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log {
        print: true,
        resource,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database_path())?;
        let entries = load_log(&pool.conn, resource.map(|r| r.name()))?;

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        // op + resource + target in one column
        let labelled: Vec<(String, String)> = entries
            .iter()
            .map(|e| {
                let mut label = color_for_operation(&e.operation)
                    .paint(e.operation.as_str())
                    .to_string();
                if !e.resource.is_empty() {
                    label.push_str(&format!(" {}", e.resource));
                }
                if !e.target.is_empty() {
                    label.push_str(&format!(" {}", e.target));
                }
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%F %T").to_string())
                    .unwrap_or_else(|_| e.date.clone());
                (date, label)
            })
            .collect();

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = labelled.iter().map(|(d, _)| d.width()).max().unwrap_or(10);
        let op_w = labelled
            .iter()
            .map(|(_, l)| strip_ansi(l).width())
            .max()
            .unwrap_or(10)
            .min(MAX_TARGET_WIDTH);

        println!("📜 Internal log:\n");

        for (entry, (date, label)) in entries.iter().zip(labelled) {
            let visible = strip_ansi(&label).width();
            let padding = " ".repeat(op_w.saturating_sub(visible));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id,
                date,
                label,
                padding,
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }
    }

    Ok(())
}
