// Rows surface venue endpoints

use tracing::debug;

use crate::error::Error;
use crate::rows::RowsClient;
use crate::rows::models::{NewVenueRow, VenuePatch, VenueRow};

const RELATION: &str = "venues";

impl RowsClient {
    /// List all venues, ordered by `display_order` ascending.
    pub async fn list_venues(&self) -> Result<Vec<VenueRow>, Error> {
        self.select(
            RELATION,
            &[("select", "*"), ("order", "display_order.asc")],
        )
        .await
    }

    /// Insert a venue row, returning the server-assigned representation.
    pub async fn insert_venue(&self, row: &NewVenueRow) -> Result<VenueRow, Error> {
        debug!(name = %row.name, "inserting venue row");
        self.insert(RELATION, row).await
    }

    /// Update an existing venue's editable columns.
    pub async fn update_venue(&self, id: i64, patch: &VenuePatch) -> Result<Option<VenueRow>, Error> {
        let id_filter = format!("eq.{id}");
        debug!(id, "updating venue row");
        let mut rows: Vec<VenueRow> = self.update(RELATION, &[("id", &id_filter)], patch).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// Delete a venue row by id.
    pub async fn delete_venue(&self, id: i64) -> Result<(), Error> {
        let id_filter = format!("eq.{id}");
        debug!(id, "deleting venue row");
        self.delete(RELATION, &[("id", &id_filter)]).await
    }
}
