//! Standalone entry point for the HTTP CMS surface.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use soundcheck_server::{build_router, state::AppState};

/// soundcheck-server -- HTTP CMS surface for the content backend
#[derive(Debug, Parser)]
#[command(name = "soundcheck-server", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8787", env = "SOUNDCHECK_BIND")]
    bind: SocketAddr,

    /// Backend profile to use
    #[arg(long, short = 'p', env = "SOUNDCHECK_PROFILE")]
    profile: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = soundcheck_config::load_config_or_default();
    let profile_name = args
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".into());
    let profile = config.profiles.get(&profile_name).ok_or_else(|| {
        format!(
            "profile '{profile_name}' not found in {}",
            soundcheck_config::config_path().display()
        )
    })?;

    let state = Arc::new(AppState::from_profile(profile, &profile_name)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(addr = %args.bind, "CMS surface listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}
