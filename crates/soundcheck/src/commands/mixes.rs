//! Mix command handlers.

use tabled::Tabled;

use soundcheck_core::{DeleteKind, Mix, NewMix, Platform};

use crate::cli::{GlobalOpts, MixesArgs, MixesCommand, PlatformArg};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct MixRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Platform")]
    platform: String,
    #[tabled(rename = "Embed URL")]
    embed_url: String,
}

impl From<&Mix> for MixRow {
    fn from(m: &Mix) -> Self {
        Self {
            id: m.id.to_string(),
            title: m.title.clone(),
            platform: m.platform.to_string(),
            embed_url: m.embed_url.clone(),
        }
    }
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Spotify => Self::Spotify,
            PlatformArg::Mixcloud => Self::Mixcloud,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: MixesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        MixesCommand::List => {
            let editor = util::loaded_editor(global).await?;
            let mixes = editor.snapshot().mixes;
            let out =
                output::render_list(&global.output, &mixes, |m| MixRow::from(m), |m| m.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        MixesCommand::Add {
            title,
            embed_url,
            platform,
            description,
        } => {
            let editor = util::loaded_editor(global).await?;
            let mix = editor
                .add_mix(NewMix {
                    title,
                    embed_url,
                    platform: platform.into(),
                    description,
                })
                .await?;
            output::status(&format!("Added mix {}", mix.id), &global.color, global.quiet);
            Ok(())
        }

        MixesCommand::Delete { id } => {
            let mut editor = util::loaded_editor(global).await?;
            editor.request_delete(DeleteKind::Mix, util::parse_id(&id))?;

            if !util::confirm(&format!("Delete mix '{id}'?"), global.yes)? {
                editor.cancel_delete();
                return Ok(());
            }

            editor.confirm_delete().await?;
            output::status("Mix deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}
