//! Session commands: login, logout, whoami.

use anyhow::Result;
use colored::Colorize;

use folio_client::FolioClient;
use folio_core::auth::SessionState;

pub async fn login(client: &FolioClient, username: &str, password: &str) -> Result<()> {
    match client.session().login(username, password).await {
        Ok(()) => {
            println!("{}", format!("Logged in as {}", username).green());
            Ok(())
        }
        Err(err) if err.is_auth() => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn logout(client: &FolioClient) -> Result<()> {
    client.session().logout().await;
    println!("{}", "Logged out.".yellow());
    Ok(())
}

pub async fn whoami(client: &FolioClient) -> Result<()> {
    match client.session().state().await {
        SessionState::Authenticated { .. } => {
            println!("{}", "Authenticated: admin session on file.".green());
        }
        SessionState::Unauthenticated => {
            println!("Not logged in.");
        }
        SessionState::Loading => {
            println!("Session state is still being restored.");
        }
    }
    Ok(())
}
