use crate::cli::commands::open_session;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, GridExport};
use crate::grid::search::{ColumnVisibility, filter_by_search};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        resource,
        format,
        file,
        search,
        hide,
        force,
    } = cmd
    {
        let (_backend, session) = open_session(cfg, *resource)?;
        let adapter = session.adapter();
        let visibility = ColumnVisibility::hiding(session.columns(), hide)?;

        let rows = filter_by_search(
            session.rows(),
            &adapter,
            &visibility,
            search.as_deref().unwrap_or(""),
        );

        info(format!(
            "Exporting {} {} rows as {}",
            rows.len(),
            resource.name(),
            format.as_str()
        ));

        let data = GridExport::build(&adapter, &rows, &visibility);
        ExportLogic::export(&data, *format, file, *force)?;
    }

    Ok(())
}
