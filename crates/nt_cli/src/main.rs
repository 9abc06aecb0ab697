use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::NaiveDate;
use clap::Parser;
use nt_app::prelude::*;
use nt_core::FeedGateway;
use nt_feed::{init_logging, FeedConfig, NewsApiGateway};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Search news and keep a list of favorites", long_about = None)]
pub struct Cli {
    /// Key-value backend: memory or sqlite
    #[arg(long, default_value = "sqlite", global = true)]
    storage: String,
    /// Database file for the sqlite backend
    #[arg(long, default_value = "news.db", global = true)]
    db: PathBuf,
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Oldest publication date to search (YYYY-MM-DD)
    #[arg(long, global = true)]
    from: Option<NaiveDate>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Log in with one of the known accounts
    Login {
        email: String,
        password: String,
    },
    Logout,
    Whoami,
    /// Search the news feed; an empty term uses the default query
    Search {
        term: Option<String>,
    },
    /// Show one search result and optionally toggle its favorite status
    Show {
        index: usize,
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        toggle: bool,
    },
    Favorites {
        #[command(subcommand)]
        command: Option<FavoritesCommands>,
    },
}

#[derive(clap::Subcommand, Debug)]
enum FavoritesCommands {
    List,
    /// Remove the favorite at the position printed by `favorites list`
    Remove {
        index: usize,
    },
}

/// Stands in for the feed when no api key is configured. Commands that never
/// search still work.
struct UnconfiguredGateway {
    reason: String,
}

#[async_trait]
impl FeedGateway for UnconfiguredGateway {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn search(&self, _term: Option<&str>) -> Result<Vec<ArticleRecord>> {
        Err(Error::Config(self.reason.clone()))
    }
}

fn feed_config(cli: &Cli) -> FeedConfig {
    let mut config = FeedConfig::default();
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(from) = cli.from {
        config = config.with_from(from);
    }
    config
}

fn create_gateway(config: FeedConfig) -> Arc<dyn FeedGateway> {
    match NewsApiGateway::new(config) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => Arc::new(UnconfiguredGateway {
            reason: format!("{} (pass --api-key or set NEWSAPI_KEY)", e),
        }),
    }
}

fn print_article(index: usize, article: &ArticleRecord) {
    println!("[{}] {}", index, article.title);
    if !article.description.is_empty() {
        println!("    {}", article.description);
    }
    if let Some(image) = &article.image_url {
        println!("    🖼️  {}", image);
    }
}

async fn require_session(app: &mut App) -> anyhow::Result<()> {
    if !app.resume().await.context("Failed to read session")? {
        bail!("Not logged in, run `nt login <email> <password>` first");
    }
    Ok(())
}

async fn search(app: &mut App, term: Option<String>) -> anyhow::Result<ListController> {
    let mut list = app.news_screen();
    if !list.submit_search(term.unwrap_or_default()).await {
        bail!("Search failed: {}", list.last_error().unwrap_or("unknown error"));
    }
    Ok(list)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::WARN });

    let store = nt_storage::create_store(&cli.storage, &cli.db)
        .await
        .with_context(|| format!("Failed to open {} storage", cli.storage))?;
    let gateway = create_gateway(feed_config(&cli));
    info!("🦗 Using {} feed with {} storage", gateway.name(), store.name());
    let mut app = App::new(store, gateway);

    match cli.command {
        Commands::Login { email, password } => {
            let mut login = app.login_screen().with_credentials(email, password);
            if !login.submit(&mut app.navigator).await {
                bail!("{}", login.last_error().unwrap_or("Login failed"));
            }
            println!("✨ Logged in");
        }
        Commands::Logout => {
            app.session().clear().await.context("Failed to clear session")?;
            println!("👋 Logged out");
        }
        Commands::Whoami => match app.session().current_user().await? {
            Some(user) => println!("{}", user.email),
            None => println!("Not logged in"),
        },
        Commands::Search { term } => {
            require_session(&mut app).await?;
            let list = search(&mut app, term).await?;
            if list.items().is_empty() {
                println!("No articles found.");
            }
            for (index, article) in list.items().iter().enumerate() {
                print_article(index, article);
            }
        }
        Commands::Show { index, query, toggle } => {
            require_session(&mut app).await?;
            let list = search(&mut app, query).await?;
            if !list.select(index, &mut app.navigator) {
                bail!("No article at position {} ({} results)", index, list.items().len());
            }
            let Some(mut detail) = app.detail_screen().await else {
                bail!("No article selected");
            };
            if toggle {
                detail.toggle().await;
            }
            if let Some(error) = detail.last_error() {
                bail!("Favorites unavailable: {}", error);
            }
            print_article(index, detail.article());
            println!("    {}", if detail.is_favorite() { "⭐ In favorites" } else { "☆ Not in favorites" });
        }
        Commands::Favorites { command } => {
            require_session(&mut app).await?;
            let mut screen = app.favorites_screen().await;
            if let Some(FavoritesCommands::Remove { index }) = command {
                let before = screen.items().len();
                screen.remove_at(index).await;
                if screen.items().len() == before && screen.last_error().is_none() {
                    println!("No favorite at position {}", index);
                }
            }
            if let Some(error) = screen.last_error() {
                bail!("Favorites unavailable: {}", error);
            }
            if screen.is_empty() {
                println!("No favorite news yet.");
            }
            for (index, article) in screen.items().iter().enumerate() {
                print_article(index, article);
            }
        }
    }

    Ok(())
}
