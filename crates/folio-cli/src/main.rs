use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio_client::FolioClient;
use folio_core::config::ClientConfig;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "folio CLI - browse and manage a personal-portfolio backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects, filtered by search term and technology tag
    Projects {
        /// Case-insensitive search over title, description, and technologies
        #[arg(long)]
        search: Option<String>,

        /// Only show projects using this technology
        #[arg(long)]
        tag: Option<String>,

        /// Only show featured projects
        #[arg(long)]
        featured: bool,
    },
    /// List published blog posts, filtered by search term and tag
    Blog {
        /// Case-insensitive search over title, excerpt, and tags
        #[arg(long)]
        search: Option<String>,

        /// Only show posts carrying this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// List skills grouped by category
    Skills,
    /// Show the work history, newest first
    Experience,
    /// Fetch every public list concurrently and print a summary
    Overview,
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        message: String,
    },
    /// Log in as the portfolio admin and store the session token
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },
    /// Log out and discard the stored token
    Logout,
    /// Show the current session state
    Whoami,
    /// Authenticated content management
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Manage blog posts
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// Show the contact-form inbox
    Contacts,
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List all projects
    List,
    /// Create a project
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Technology used; repeat for several
        #[arg(long = "tech")]
        technologies: Vec<String>,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        github_url: Option<String>,

        #[arg(long)]
        live_url: Option<String>,

        #[arg(long)]
        featured: bool,
    },
    /// Replace a project's fields
    Update {
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Technology used; repeat for several
        #[arg(long = "tech")]
        technologies: Vec<String>,

        #[arg(long)]
        image_url: Option<String>,

        #[arg(long)]
        github_url: Option<String>,

        #[arg(long)]
        live_url: Option<String>,

        #[arg(long)]
        featured: bool,
    },
    /// Delete a project
    Delete { id: String },
}

#[derive(Subcommand)]
enum BlogAction {
    /// List all posts, drafts included
    List,
    /// Create a post
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        excerpt: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        image_url: Option<String>,

        /// Post tag; repeat for several
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        published: bool,
    },
    /// Replace a post's fields
    Update {
        id: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        excerpt: String,

        #[arg(long)]
        content: String,

        #[arg(long)]
        image_url: Option<String>,

        /// Post tag; repeat for several
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        published: bool,
    },
    /// Delete a post
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::load()?;
    let client = FolioClient::new(&config).await?;

    match cli.command {
        Commands::Projects {
            search,
            tag,
            featured,
        } => commands::browse::projects(&client, search, tag, featured).await?,
        Commands::Blog { search, tag } => commands::browse::blog(&client, search, tag).await?,
        Commands::Skills => commands::browse::skills(&client).await?,
        Commands::Experience => commands::browse::experience(&client).await?,
        Commands::Overview => commands::browse::overview(&client).await?,
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => commands::contact::send(&client, name, email, subject, message).await?,
        Commands::Login { username, password } => {
            commands::auth::login(&client, &username, &password).await?
        }
        Commands::Logout => commands::auth::logout(&client).await?,
        Commands::Whoami => commands::auth::whoami(&client).await?,
        Commands::Admin { action } => commands::admin::run(&client, action).await?,
    }

    Ok(())
}
