use crate::api::client::Backend;
use crate::cli::commands::{open_audit, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::interceptor::Capture;
use crate::core::session::{EditOutcome, GridSession};
use crate::errors::{AppError, AppResult};
use crate::grid::search::ColumnVisibility;
use crate::models::row::RowId;
use crate::ui::dialog::{AutoConfirm, Confirmer, StdinConfirmer};
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        resource,
        id,
        field,
        value,
        yes,
    } = cmd
    {
        let (backend, mut session) = open_session(cfg, *resource)?;

        let audit = open_audit(cfg)?;
        let _audit = session.bus().subscribe(move |ev| audit.handle(ev));

        let mut confirmer: Box<dyn Confirmer> = if *yes {
            Box::new(AutoConfirm(true))
        } else {
            Box::new(StdinConfirmer)
        };

        run_edit(
            &mut session,
            &backend,
            &RowId::from(id.as_str()),
            field,
            value,
            confirmer.as_mut(),
            &cfg.separator_char,
        )?;
    }

    Ok(())
}

/// One full edit cycle: capture, confirm or cancel, send, reconcile.
pub fn run_edit<B: Backend + ?Sized>(
    session: &mut GridSession,
    backend: &B,
    id: &RowId,
    field: &str,
    value: &str,
    confirmer: &mut dyn Confirmer,
    separator_char: &str,
) -> AppResult<()> {
    if session.begin_edit(id, field, value)? == Capture::Unchanged {
        info(format!(
            "No change: {} of row #{} already reads '{}'.",
            field,
            id,
            session.display_cell(id, field)?
        ));
        return Ok(());
    }

    let dialog = session.dialog().ok_or(AppError::NoPendingChange)?;
    if !confirmer.confirm(&dialog) {
        session.cancel();
        info("Edit cancelled, nothing was sent.");
        return Ok(());
    }

    let outcome = session.commit(backend)?;
    for n in session.take_notifications() {
        n.emit();
    }

    match outcome {
        EditOutcome::Committed { row, .. } => {
            let table = session
                .adapter()
                .render(std::iter::once(&row), &ColumnVisibility::default());
            print!("\n{}", table.render(separator_char));
            Ok(())
        }
        EditOutcome::Failed { error, .. } => Err(error.into()),
    }
}
