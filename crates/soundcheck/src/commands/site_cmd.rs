//! Static site build and canonical-link rewrite handlers.

use soundcheck_core::load_snapshot;
use soundcheck_core::model::FeaturedVideo;

use crate::cli::{GlobalOpts, SiteArgs, SiteCommand};
use crate::config::build_clients;
use crate::error::CliError;
use crate::output;
use crate::site::{canonical, render};

pub async fn handle(args: SiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SiteCommand::Build { out } => {
            let clients = build_clients(global)?;
            let snapshot = load_snapshot(&clients.rows, &FeaturedVideo::default()).await;

            std::fs::create_dir_all(&out)?;
            let index = render::render_site(&snapshot);
            let index_path = out.join("index.html");
            std::fs::write(&index_path, index)?;

            output::status(
                &format!(
                    "Built site ({} photos, {} mixes, {} testimonials) at {}",
                    snapshot.photos.len(),
                    snapshot.mixes.len(),
                    snapshot.testimonials.len(),
                    index_path.display()
                ),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        SiteCommand::Canonical { dist, base_url } => {
            let base_url = match base_url {
                Some(url) => url,
                None => {
                    let clients = build_clients(global)?;
                    clients
                        .profile
                        .and_then(|p| p.site_url)
                        .ok_or_else(|| CliError::Validation {
                            field: "base-url".into(),
                            reason: "no --base-url given and the profile has no site_url".into(),
                        })?
                }
            };

            let written = canonical::rewrite_dist(&dist, &base_url)?;
            for file in &written {
                output::status(&format!("Wrote {file}"), &global.color, global.quiet);
            }
            output::status("Canonical HTML generation done.", &global.color, global.quiet);
            Ok(())
        }
    }
}
