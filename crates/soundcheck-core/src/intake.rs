// ── Contact intake ──
//
// The public, unauthenticated submission path and the admin inbox.
// Submissions are the durable record of intent; the notification email
// (dispatched elsewhere) is best-effort and never rolls one back.

use tracing::info;

use soundcheck_api::RowsClient;

use crate::convert;
use crate::error::CoreError;
use crate::model::{ContactDraft, ContactSubmission};

/// Validate and store a visitor's contact submission, returning the
/// stored record with its server-assigned id.
pub async fn submit_contact(
    rows: &RowsClient,
    draft: &ContactDraft,
) -> Result<ContactSubmission, CoreError> {
    draft.validate()?;

    let stored = rows.insert_contact(&convert::contact_to_new_row(draft)).await?;
    info!(id = %stored.id, event_type = %stored.event_type, "contact submission stored");
    Ok(convert::contact_from_row(stored))
}

/// List every stored submission, newest first (admin inbox).
pub async fn list_contacts(rows: &RowsClient) -> Result<Vec<ContactSubmission>, CoreError> {
    let stored = rows.list_contacts().await?;
    Ok(convert::contacts_from_rows(stored))
}
