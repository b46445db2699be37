//! Venue command handlers.

use tabled::Tabled;

use soundcheck_core::{DeleteKind, NewVenue, Venue};

use crate::cli::{GlobalOpts, VenuesArgs, VenuesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VenueRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Logo")]
    logo: String,
}

impl From<&Venue> for VenueRow {
    fn from(v: &Venue) -> Self {
        Self {
            id: v.id.to_string(),
            name: v.name.clone(),
            logo: v.logo.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: VenuesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        VenuesCommand::List => {
            let editor = util::loaded_editor(global).await?;
            let venues = editor.snapshot().venues;
            let out =
                output::render_list(&global.output, &venues, |v| VenueRow::from(v), |v| v.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VenuesCommand::Add { name, logo } => {
            let editor = util::loaded_editor(global).await?;
            let venue = editor.add_venue(NewVenue { name, logo }).await?;
            output::status(&format!("Added venue {}", venue.id), &global.color, global.quiet);
            Ok(())
        }

        VenuesCommand::Update { id, name, logo } => {
            let editor = util::loaded_editor(global).await?;
            let venue = editor
                .update_venue(&util::parse_id(&id), NewVenue { name, logo })
                .await?;
            output::status(
                &format!("Updated venue {}", venue.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        VenuesCommand::Delete { id } => {
            let mut editor = util::loaded_editor(global).await?;
            editor.request_delete(DeleteKind::Venue, util::parse_id(&id))?;

            if !util::confirm(&format!("Delete venue '{id}'?"), global.yes)? {
                editor.cancel_delete();
                return Ok(());
            }

            editor.confirm_delete().await?;
            output::status("Venue deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}
