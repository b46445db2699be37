//! Admin session command handlers.

use secrecy::SecretString;

use soundcheck_core::session::{Route, SessionEvent, SessionGate, View};
use soundcheck_core::SignUpOutcome;

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::config::build_clients;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let clients = build_clients(global)?;

    match args.command {
        AuthCommand::Signup { email, name } => {
            let password = prompt_password("New account password: ")?;
            let outcome = clients
                .auth
                .sign_up(&email, &password, name.as_deref())
                .await?;

            match outcome {
                SignUpOutcome::Active(session) => {
                    soundcheck_config::save_session(&session)?;
                    output::status(
                        &format!("Account created; signed in as {}", session.user.email),
                        &global.color,
                        global.quiet,
                    );
                }
                SignUpOutcome::ConfirmationRequired { user } => {
                    output::status(
                        &format!(
                            "Account created for {}. Check your email to confirm before signing in.",
                            user.email
                        ),
                        &global.color,
                        global.quiet,
                    );
                }
            }
            Ok(())
        }

        AuthCommand::Login { email } => {
            let password = prompt_password("Password: ")?;
            let session = clients
                .auth
                .sign_in_with_password(&email, &password)
                .await?;
            soundcheck_config::save_session(&session)?;
            output::status(
                &format!("Signed in as {}", session.user.email),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        AuthCommand::Logout => {
            if let Some(session) = clients.session {
                if let Err(e) = clients.auth.sign_out(&session.access_token).await {
                    // The local session is discarded either way.
                    tracing::debug!(error = %e, "remote signout failed");
                }
            }
            soundcheck_config::clear_session()?;
            output::status("Signed out", &global.color, global.quiet);
            Ok(())
        }

        AuthCommand::Session => {
            // Drive the same gate the admin view uses: enter with the
            // admin route requested, then resolve the session check.
            let mut gate = SessionGate::new();
            gate.handle(SessionEvent::RouteChanged(Route::Admin));

            let resolved = match &clients.session {
                Some(session) => clients.auth.get_user(&session.access_token).await.ok(),
                None => None,
            };
            gate.handle(SessionEvent::SessionResolved(resolved));

            let line = match (gate.view(), gate.state()) {
                (View::Admin, soundcheck_core::SessionState::Authenticated { user }) => {
                    format!("Authenticated as {} (admin view available)", user.email)
                }
                _ => "Not authenticated (login view)".to_owned(),
            };
            output::print_output(&line, global.quiet);
            Ok(())
        }
    }
}

fn prompt_password(prompt: &str) -> Result<SecretString, CliError> {
    let raw = rpassword::prompt_password(prompt)?;
    if raw.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password must not be empty".into(),
        });
    }
    Ok(SecretString::from(raw))
}
