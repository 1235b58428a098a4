use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::grid::search::{ColumnVisibility, filter_by_search, paginate};
use crate::ui::messages::info;
use crate::utils::formatting::bold;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        resource,
        search,
        page,
        page_size,
        hide,
    } = cmd
    {
        let (_backend, session) = open_session(cfg, *resource)?;
        let adapter = session.adapter();
        let visibility = ColumnVisibility::hiding(session.columns(), hide)?;

        let term = search.as_deref().unwrap_or("");
        let filtered = filter_by_search(session.rows(), &adapter, &visibility, term);
        let view = paginate(
            &filtered,
            page.saturating_sub(1),
            page_size.unwrap_or(cfg.page_size),
        );

        if view.rows.is_empty() {
            if term.is_empty() {
                info(format!("No {} yet.", resource.name()));
            } else {
                info(format!("No {} match '{}'.", resource.name(), term));
            }
            return Ok(());
        }
        if view.page + 1 != *page {
            info(format!(
                "Page {} is out of range, showing page {}.",
                page,
                view.page + 1
            ));
        }

        println!("{}\n", bold(resource.name()));
        print!(
            "{}",
            adapter
                .render(view.rows.iter().copied(), &visibility)
                .render(&cfg.separator_char)
        );

        let filtered_note = if filtered.len() == session.rows().len() {
            String::new()
        } else {
            format!(" (filtered from {})", session.rows().len())
        };
        println!(
            "\nPage {}/{} · {} rows{}",
            view.page + 1,
            view.total_pages,
            view.total_rows,
            filtered_note
        );
    }
    Ok(())
}
