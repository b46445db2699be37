//! Embedded HTTP CMS surface (`soundcheck serve`).

use std::sync::Arc;

use soundcheck_server::{build_router, state::AppState};

use crate::cli::{GlobalOpts, ServeArgs};
use crate::config::build_clients;
use crate::error::CliError;

pub async fn handle(args: ServeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let clients = build_clients(global)?;
    let Some(profile) = clients.profile else {
        return Err(CliError::Config(
            "`serve` needs a config profile (the service key is resolved from it)".into(),
        ));
    };

    let state = AppState::from_profile(&profile, &clients.profile_name)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(addr = %args.bind, "CMS surface listening");
    axum::serve(listener, app)
        .await
        .map_err(CliError::Io)?;
    Ok(())
}
