//! CLI entry point for blogpage

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blogpage")]
#[command(version)]
#[command(about = "Resolve blog post slugs to page data", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve page data over HTTP
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Print the page data for a slug
    #[command(alias = "r")]
    Resolve {
        /// Slug of the post
        slug: String,
    },

    /// List the posts that can be resolved
    List,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogpage=debug,info"
    } else {
        "blogpage=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let blog = blogpage::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            blogpage::server::start(&blog, &ip, port).await?;
        }

        Commands::Resolve { slug } => {
            let blog = blogpage::Blog::new(&base_dir)?;
            blogpage::commands::resolve::run(&blog, &slug).await?;
        }

        Commands::List => {
            let blog = blogpage::Blog::new(&base_dir)?;
            blogpage::commands::list::run(&blog)?;
        }

        Commands::New { title, slug } => {
            let blog = blogpage::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            blogpage::commands::new::run(&blog, &title, slug.as_deref())?;
        }

        Commands::Version => {
            println!("blogpage version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
