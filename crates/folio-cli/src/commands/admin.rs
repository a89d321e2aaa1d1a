//! Authenticated content management.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use tokio::sync::broadcast;
use tokio::time::timeout;

use folio_client::FolioClient;
use folio_core::auth::SessionEvent;
use folio_core::model::{BlogPostDraft, ProjectDraft};

use crate::{AdminAction, BlogAction, ProjectAction};

pub async fn run(client: &FolioClient, action: AdminAction) -> Result<()> {
    if !client.session().is_authenticated().await {
        eprintln!("{}", "Not logged in. Run 'folio login' first.".red());
        std::process::exit(1);
    }

    // Subscribe before dispatching so an expiry raised by the call below
    // is observed even though another task handles it.
    let mut events = client.session().subscribe();

    match dispatch(client, action).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_unauthorized() => {
            wait_for_expiry(&mut events).await;
            eprintln!(
                "{}",
                "Session expired. Run 'folio login' to sign in again.".yellow()
            );
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

async fn dispatch(client: &FolioClient, action: AdminAction) -> folio_core::Result<()> {
    match action {
        AdminAction::Projects { action } => projects(client, action).await,
        AdminAction::Blog { action } => blog(client, action).await,
        AdminAction::Contacts => contacts(client).await,
    }
}

async fn projects(client: &FolioClient, action: ProjectAction) -> folio_core::Result<()> {
    match action {
        ProjectAction::List => {
            let projects = client.admin().projects().await?;
            println!("{}", format!("Projects ({})", projects.len()).bold());
            for project in &projects {
                let marker = if project.featured { " ★" } else { "" };
                println!(
                    "  {}  {}{}",
                    project.id.yellow(),
                    project.title.green(),
                    marker
                );
            }
        }
        ProjectAction::Create {
            title,
            description,
            technologies,
            image_url,
            github_url,
            live_url,
            featured,
        } => {
            let draft = ProjectDraft {
                title,
                description,
                technologies,
                image_url,
                github_url,
                live_url,
                featured,
            };
            let ack = client.admin().create_project(&draft).await?;
            println!("{}", format!("✓ {}", ack).green());
        }
        ProjectAction::Update {
            id,
            title,
            description,
            technologies,
            image_url,
            github_url,
            live_url,
            featured,
        } => {
            let draft = ProjectDraft {
                title,
                description,
                technologies,
                image_url,
                github_url,
                live_url,
                featured,
            };
            let ack = client.admin().update_project(&id, &draft).await?;
            println!("{}", format!("✓ {}", ack).green());
        }
        ProjectAction::Delete { id } => {
            let ack = client.admin().delete_project(&id).await?;
            println!("{}", format!("✓ {}", ack).green());
        }
    }
    Ok(())
}

async fn blog(client: &FolioClient, action: BlogAction) -> folio_core::Result<()> {
    match action {
        BlogAction::List => {
            let posts = client.admin().blog_posts().await?;
            println!("{}", format!("Blog posts ({})", posts.len()).bold());
            for post in &posts {
                let marker = if post.published { "" } else { " (draft)" };
                println!("  {}  {}{}", post.id.yellow(), post.title.green(), marker);
            }
        }
        BlogAction::Create {
            title,
            excerpt,
            content,
            image_url,
            tags,
            published,
        } => {
            let draft = BlogPostDraft {
                title,
                content,
                excerpt,
                image_url,
                tags,
                published,
            };
            let ack = client.admin().create_post(&draft).await?;
            println!("{}", format!("✓ {}", ack).green());
        }
        BlogAction::Update {
            id,
            title,
            excerpt,
            content,
            image_url,
            tags,
            published,
        } => {
            let draft = BlogPostDraft {
                title,
                content,
                excerpt,
                image_url,
                tags,
                published,
            };
            let ack = client.admin().update_post(&id, &draft).await?;
            println!("{}", format!("✓ {}", ack).green());
        }
        BlogAction::Delete { id } => {
            let ack = client.admin().delete_post(&id).await?;
            println!("{}", format!("✓ {}", ack).green());
        }
    }
    Ok(())
}

async fn contacts(client: &FolioClient) -> folio_core::Result<()> {
    let messages = client.admin().contacts().await?;
    println!("{}", format!("Contact messages ({})", messages.len()).bold());
    for msg in &messages {
        let date = msg
            .created_at
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!();
        println!(
            "{}",
            format!("{} <{}>  {}", msg.name, msg.email, date).bold()
        );
        if let Some(subject) = &msg.subject {
            println!("  {}", subject.green());
        }
        println!("  {}", msg.message);
    }
    Ok(())
}

/// Waits briefly for the session watcher to finish tearing the session
/// down so the stored token is cleared before the process exits.
async fn wait_for_expiry(events: &mut broadcast::Receiver<SessionEvent>) {
    let _ = timeout(Duration::from_secs(2), async {
        loop {
            match events.recv().await {
                Ok(SessionEvent::SessionExpired) => break,
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    })
    .await;
}
