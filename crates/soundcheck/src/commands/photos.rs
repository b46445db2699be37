//! Photo gallery command handlers.

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Tabled;

use soundcheck_core::{DeleteKind, Photo, PhotoUpload};

use crate::cli::{GlobalOpts, PhotosArgs, PhotosCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PhotoRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Order")]
    order: i64,
    #[tabled(rename = "Alt")]
    alt: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Photo> for PhotoRow {
    fn from(p: &Photo) -> Self {
        Self {
            id: p.id.to_string(),
            order: p.display_order,
            alt: p.alt.clone(),
            url: p.url.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: PhotosArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        PhotosCommand::List => {
            let editor = util::loaded_editor(global).await?;
            let photos = editor.snapshot().photos;
            let out = output::render_list(
                &global.output,
                &photos,
                |p| PhotoRow::from(p),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PhotosCommand::Upload { file, alt } => {
            let (file_name, bytes, content_type) = util::read_image(&file)?;
            let editor = util::loaded_editor(global).await?;

            let spinner = upload_spinner(global.quiet, &file_name);
            let result = editor
                .upload_photo(PhotoUpload {
                    file_name,
                    bytes,
                    content_type: content_type.into(),
                    alt,
                })
                .await;
            spinner.finish_and_clear();

            let photo = result?;
            output::status(
                &format!("Uploaded photo {} ({})", photo.id, photo.url),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        PhotosCommand::Delete { id } => {
            let mut editor = util::loaded_editor(global).await?;
            editor.request_delete(DeleteKind::Photo, util::parse_id(&id))?;

            if !util::confirm(&format!("Delete photo '{id}'? This is permanent."), global.yes)? {
                editor.cancel_delete();
                return Ok(());
            }

            editor.confirm_delete().await?;
            output::status("Photo deleted", &global.color, global.quiet);
            Ok(())
        }

        PhotosCommand::Reorder { from, to } => {
            if from == 0 || to == 0 {
                return Err(CliError::Validation {
                    field: "position".into(),
                    reason: "positions are 1-based".into(),
                });
            }
            let editor = util::loaded_editor(global).await?;
            editor.reorder_photos(from - 1, to - 1).await?;
            output::status(
                &format!("Moved photo from position {from} to {to}"),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}

fn upload_spinner(quiet: bool, file_name: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("static template is valid"),
    );
    spinner.set_message(format!("Uploading {file_name}…"));
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner
}
