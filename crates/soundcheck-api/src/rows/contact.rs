// Rows surface contact-submission endpoints
//
// Submissions are write-once: public visitors insert, admins list.
// There is no update or delete path by design.

use tracing::debug;

use crate::error::Error;
use crate::rows::RowsClient;
use crate::rows::models::{ContactRow, NewContactRow};

const RELATION: &str = "contact_submissions";

impl RowsClient {
    /// Insert a contact submission, returning the stored row with its
    /// server-assigned id and timestamp.
    pub async fn insert_contact(&self, row: &NewContactRow) -> Result<ContactRow, Error> {
        debug!(event_type = %row.event_type, "inserting contact submission");
        self.insert(RELATION, row).await
    }

    /// List all contact submissions, newest first.
    pub async fn list_contacts(&self) -> Result<Vec<ContactRow>, Error> {
        self.select(RELATION, &[("select", "*"), ("order", "created_at.desc")])
            .await
    }
}
