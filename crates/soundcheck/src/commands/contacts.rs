//! Contact inbox command handlers.

use tabled::Tabled;

use soundcheck_core::{ContactSubmission, list_contacts};

use crate::cli::{ContactsArgs, ContactsCommand, GlobalOpts};
use crate::config::build_clients;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl From<&ContactSubmission> for ContactRow {
    fn from(c: &ContactSubmission) -> Self {
        Self {
            received: c.created_at.format("%Y-%m-%d %H:%M").to_string(),
            name: c.name.clone(),
            email: c.email.clone(),
            event: c.event_type.to_string(),
            date: c.event_date.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ContactsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ContactsCommand::List => {
            let clients = build_clients(global)?;
            let contacts = list_contacts(&clients.rows).await?;
            let out = output::render_list(
                &global.output,
                &contacts,
                |c| ContactRow::from(c),
                |c| c.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
