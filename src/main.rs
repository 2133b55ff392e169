//! CLI entry point for postlint

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postlint")]
#[command(version)]
#[command(about = "Validate the front matter of Markdown blog posts", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every post and check permalinks are unique
    #[command(alias = "c")]
    Check {
        /// Re-check whenever a post or the config changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List valid posts, most recently modified first
    List,

    /// Print the validated record of a single post as JSON
    Show {
        /// Post file to validate
        file: PathBuf,

        /// Include the post body
        #[arg(long)]
        body: bool,
    },

    /// Create a new post with valid front matter
    New {
        /// Title of the new post
        title: String,

        /// Author (defaults to `default_author` from _config.yml)
        #[arg(short, long)]
        author: Option<String>,

        /// Layout (defaults to `default_layout` from _config.yml)
        #[arg(short, long)]
        layout: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postlint=debug,info"
    } else {
        "postlint=info"
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
    let app = postlint::Postlint::new(&base_dir)?;

    match cli.command {
        Commands::Check { watch } => {
            tracing::info!("Checking posts in {:?}", app.source_dir);
            let summary = app.check()?;
            postlint::commands::check::print(&summary);

            if watch {
                postlint::commands::check::watch(&app).await?;
            } else if !summary.is_clean() {
                anyhow::bail!("{} problem(s) found", summary.problems());
            }
        }

        Commands::List => {
            postlint::commands::list::run(&app)?;
        }

        Commands::Show { file, body } => {
            postlint::commands::show::run(&app, &file, body)?;
        }

        Commands::New {
            title,
            author,
            layout,
        } => {
            tracing::info!("Creating new post with title: {}", title);
            postlint::commands::new::run(&app, &title, layout.as_deref(), author.as_deref())?;
        }
    }

    Ok(())
}
