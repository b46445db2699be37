// Rows surface mix endpoints

use tracing::debug;

use crate::error::Error;
use crate::rows::RowsClient;
use crate::rows::models::{MixRow, NewMixRow};

const RELATION: &str = "mixes";

impl RowsClient {
    /// List all mixes, ordered by `display_order` ascending.
    pub async fn list_mixes(&self) -> Result<Vec<MixRow>, Error> {
        self.select(
            RELATION,
            &[("select", "*"), ("order", "display_order.asc")],
        )
        .await
    }

    /// Insert a mix row, returning the server-assigned representation.
    pub async fn insert_mix(&self, row: &NewMixRow) -> Result<MixRow, Error> {
        debug!(title = %row.title, "inserting mix row");
        self.insert(RELATION, row).await
    }

    /// Delete a mix row by id.
    pub async fn delete_mix(&self, id: i64) -> Result<(), Error> {
        let id_filter = format!("eq.{id}");
        debug!(id, "deleting mix row");
        self.delete(RELATION, &[("id", &id_filter)]).await
    }
}
