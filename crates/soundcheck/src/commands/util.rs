//! Shared helpers for command handlers.

use std::path::Path;

use soundcheck_core::{ContentEditor, EntityId, FallbackCache, image_content_type};

use crate::cli::GlobalOpts;
use crate::config::{Clients, build_clients};
use crate::error::CliError;

/// Build an editor with the snapshot loaded and the fallback cache
/// attached. Every mutating handler starts here.
pub async fn loaded_editor(global: &GlobalOpts) -> Result<ContentEditor, CliError> {
    let Clients { rows, storage, .. } = build_clients(global)?;
    let editor = ContentEditor::new(rows, storage).with_cache(FallbackCache::new());
    editor.load().await;
    Ok(editor)
}

/// Parse an id argument into an `EntityId`.
pub fn parse_id(raw: &str) -> EntityId {
    raw.parse().unwrap_or(EntityId::Serial(i64::MIN))
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read an image file and resolve its upload content type from the
/// extension.
pub fn read_image(path: &Path) -> Result<(String, Vec<u8>, &'static str), CliError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| CliError::Validation {
            field: "file".into(),
            reason: "path has no file name".into(),
        })?;

    let content_type = image_content_type(&file_name).ok_or_else(|| CliError::Validation {
        field: "file".into(),
        reason: "unsupported image type (use JPEG, PNG, or WebP)".into(),
    })?;

    let bytes = std::fs::read(path)?;
    Ok((file_name, bytes, content_type))
}
