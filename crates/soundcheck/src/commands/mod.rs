//! Command handlers, one module per entity.

pub mod auth;
pub mod contacts;
pub mod mixes;
pub mod photos;
pub mod serve;
pub mod site_cmd;
pub mod testimonials;
pub mod util;
pub mod venues;
pub mod video;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Auth(args) => auth::handle(args, global).await,
        Command::Photos(args) => photos::handle(args, global).await,
        Command::Mixes(args) => mixes::handle(args, global).await,
        Command::Testimonials(args) => testimonials::handle(args, global).await,
        Command::Venues(args) => venues::handle(args, global).await,
        Command::Video(args) => video::handle(args, global).await,
        Command::Contacts(args) => contacts::handle(args, global).await,
        Command::Site(args) => site_cmd::handle(args, global).await,
        Command::Serve(args) => serve::handle(args, global).await,
        Command::Completions(_) => unreachable!("handled before dispatch"),
    }
}
