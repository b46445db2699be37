// Rows surface photo endpoints
//
// Photos carry a `display_order` column that defines the gallery render
// sequence; every listing is ordered by it ascending.

use tracing::debug;

use crate::error::Error;
use crate::rows::RowsClient;
use crate::rows::models::{NewPhotoRow, PhotoRow};

const RELATION: &str = "photos";

impl RowsClient {
    /// List all photos, ordered by `display_order` ascending.
    pub async fn list_photos(&self) -> Result<Vec<PhotoRow>, Error> {
        self.select(
            RELATION,
            &[("select", "*"), ("order", "display_order.asc")],
        )
        .await
    }

    /// Fetch a single photo by id, or `None` if it doesn't exist.
    pub async fn get_photo(&self, id: i64) -> Result<Option<PhotoRow>, Error> {
        let id_filter = format!("eq.{id}");
        let mut rows: Vec<PhotoRow> = self
            .select(RELATION, &[("select", "*"), ("id", &id_filter), ("limit", "1")])
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// The current maximum `display_order`, or `None` for an empty gallery.
    pub async fn max_photo_order(&self) -> Result<Option<i64>, Error> {
        #[derive(serde::Deserialize)]
        struct OrderOnly {
            display_order: i64,
        }

        let rows: Vec<OrderOnly> = self
            .select(
                RELATION,
                &[
                    ("select", "display_order"),
                    ("order", "display_order.desc"),
                    ("limit", "1"),
                ],
            )
            .await?;
        Ok(rows.first().map(|r| r.display_order))
    }

    /// Insert a photo row, returning the server-assigned representation.
    pub async fn insert_photo(&self, row: &NewPhotoRow) -> Result<PhotoRow, Error> {
        debug!(url = %row.url, "inserting photo row");
        self.insert(RELATION, row).await
    }

    /// Write a photo's `display_order` (used by the reorder engine).
    pub async fn set_photo_order(&self, id: i64, display_order: i64) -> Result<(), Error> {
        let id_filter = format!("eq.{id}");
        let _: Vec<PhotoRow> = self
            .update(
                RELATION,
                &[("id", &id_filter)],
                &serde_json::json!({ "display_order": display_order }),
            )
            .await?;
        Ok(())
    }

    /// Delete a photo row by id.
    pub async fn delete_photo(&self, id: i64) -> Result<(), Error> {
        let id_filter = format!("eq.{id}");
        debug!(id, "deleting photo row");
        self.delete(RELATION, &[("id", &id_filter)]).await
    }
}
