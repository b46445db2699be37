//! Testimonial command handlers.

use tabled::Tabled;

use soundcheck_core::{DeleteKind, NewTestimonial, Rating, Testimonial};

use crate::cli::{GlobalOpts, TestimonialFields, TestimonialsArgs, TestimonialsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TestimonialRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Text")]
    text: String,
}

impl From<&Testimonial> for TestimonialRow {
    fn from(t: &Testimonial) -> Self {
        let mut text = t.text.clone();
        if text.len() > 60 {
            text.truncate(57);
            text.push_str("...");
        }
        Self {
            id: t.id.to_string(),
            name: t.name.clone(),
            event: t.event.clone(),
            rating: "★".repeat(usize::from(t.rating.stars())),
            text,
        }
    }
}

fn draft_from(fields: TestimonialFields) -> Result<NewTestimonial, CliError> {
    Ok(NewTestimonial {
        name: fields.name,
        event: fields.event,
        text: fields.text,
        rating: Rating::new(fields.rating)?,
        image: fields.image,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: TestimonialsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TestimonialsCommand::List => {
            let editor = util::loaded_editor(global).await?;
            let testimonials = editor.snapshot().testimonials;
            let out = output::render_list(
                &global.output,
                &testimonials,
                |t| TestimonialRow::from(t),
                |t| t.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TestimonialsCommand::Add { fields } => {
            let editor = util::loaded_editor(global).await?;
            let added = editor.add_testimonial(draft_from(fields)?).await?;
            output::status(
                &format!("Added testimonial {}", added.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        TestimonialsCommand::Update { id, fields } => {
            let editor = util::loaded_editor(global).await?;
            let updated = editor
                .update_testimonial(&util::parse_id(&id), draft_from(fields)?)
                .await?;
            output::status(
                &format!("Updated testimonial {}", updated.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        TestimonialsCommand::Delete { id } => {
            let mut editor = util::loaded_editor(global).await?;
            editor.request_delete(DeleteKind::Testimonial, util::parse_id(&id))?;

            if !util::confirm(&format!("Delete testimonial '{id}'?"), global.yes)? {
                editor.cancel_delete();
                return Ok(());
            }

            editor.confirm_delete().await?;
            output::status("Testimonial deleted", &global.color, global.quiet);
            Ok(())
        }

        TestimonialsCommand::UploadImage { file } => {
            let (file_name, bytes, content_type) = util::read_image(&file)?;
            let editor = util::loaded_editor(global).await?;
            let url = editor
                .upload_testimonial_image(&file_name, bytes, content_type)
                .await?;
            output::print_output(&url, global.quiet);
            Ok(())
        }
    }
}
