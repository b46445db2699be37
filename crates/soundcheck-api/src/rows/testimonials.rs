// Rows surface testimonial endpoints

use tracing::debug;

use crate::error::Error;
use crate::rows::RowsClient;
use crate::rows::models::{NewTestimonialRow, TestimonialPatch, TestimonialRow};

const RELATION: &str = "testimonials";

impl RowsClient {
    /// List all testimonials, ordered by `display_order` ascending.
    pub async fn list_testimonials(&self) -> Result<Vec<TestimonialRow>, Error> {
        self.select(
            RELATION,
            &[("select", "*"), ("order", "display_order.asc")],
        )
        .await
    }

    /// Insert a testimonial row, returning the server-assigned representation.
    pub async fn insert_testimonial(&self, row: &NewTestimonialRow) -> Result<TestimonialRow, Error> {
        debug!(name = %row.name, "inserting testimonial row");
        self.insert(RELATION, row).await
    }

    /// Update an existing testimonial's editable columns.
    pub async fn update_testimonial(
        &self,
        id: i64,
        patch: &TestimonialPatch,
    ) -> Result<Option<TestimonialRow>, Error> {
        let id_filter = format!("eq.{id}");
        debug!(id, "updating testimonial row");
        let mut rows: Vec<TestimonialRow> =
            self.update(RELATION, &[("id", &id_filter)], patch).await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0))
        })
    }

    /// Delete a testimonial row by id.
    pub async fn delete_testimonial(&self, id: i64) -> Result<(), Error> {
        let id_filter = format!("eq.{id}");
        debug!(id, "deleting testimonial row");
        self.delete(RELATION, &[("id", &id_filter)]).await
    }
}
