use crate::cli::commands::{open_audit, open_session};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::bulk::{FormOutcome, FormSubmission};
use crate::errors::AppResult;
use crate::grid::search::ColumnVisibility;
use crate::models::row::RowId;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit { resource, id, set } = cmd {
        let (backend, mut session) = open_session(cfg, *resource)?;

        let audit = open_audit(cfg)?;
        let _audit = session.bus().subscribe(move |ev| audit.handle(ev));

        let form = FormSubmission::new(RowId::from(id.as_str()), set.clone());
        let outcome = form.submit(&mut session, &backend)?;

        for n in session.take_notifications() {
            n.emit();
        }

        match outcome {
            FormOutcome::Submitted(row) => {
                let table = session
                    .adapter()
                    .render(std::iter::once(&row), &ColumnVisibility::default());
                print!("\n{}", table.render(&cfg.separator_char));
            }
            FormOutcome::Failed(error) => return Err(error.into()),
        }
    }

    Ok(())
}
