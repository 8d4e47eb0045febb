use std::path::PathBuf;

use clap::Parser;

use blog_users::config::ConfigLoader;
use blog_users::logger::init_logger;
use blog_users::server::Server;

/// User management REST API for the blog platform.
#[derive(Parser, Debug)]
#[command(name = "blog-users", version, about)]
struct Cli {
    /// Directory containing configuration files
    #[arg(long, env = "BLOG_USERS_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Bind host override
    #[arg(long)]
    host: Option<String>,

    /// Bind port override
    #[arg(long)]
    port: Option<u16>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loader = match cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    let mut settings = loader.load()?;

    // CLI flags win over every file and environment source
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(level) = cli.log_level {
        settings.logger.level = level;
    }

    init_logger(&settings.logger)?;

    Server::new(settings).run().await
}
