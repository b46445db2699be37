//! Featured-video command handlers.

use soundcheck_core::FeaturedVideo;

use crate::cli::{GlobalOpts, VideoArgs, VideoCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: VideoArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        VideoCommand::Show => {
            let editor = util::loaded_editor(global).await?;
            let video = editor.snapshot().video;
            let out = output::render_single(
                &global.output,
                &video,
                detail,
                |v: &FeaturedVideo| v.url.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        VideoCommand::Set { url, poster } => {
            let editor = util::loaded_editor(global).await?;
            let video = editor.set_video(url, poster).await?;
            output::status(
                &format!("Featured video set to {}", video.url),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}

fn detail(video: &FeaturedVideo) -> String {
    format!(
        "URL:    {}\nPoster: {}\nTitle:  {}\n{}",
        video.url, video.poster_image, video.title, video.description
    )
}
