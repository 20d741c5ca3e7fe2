use anyhow::Result;
use clap::Parser;
use gh_user_stats::server;
use gh_user_stats::stats::SamplingLimits;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

/// MCP server for GitHub — summarizes users and repositories for LLMs
#[derive(Parser)]
#[command(name = "gh-user-stats", version, about)]
struct Cli {
    /// GitHub personal access token.
    /// Can also be set via GITHUB_TOKEN environment variable.
    #[arg(long)]
    token: Option<String>,

    /// Read GitHub token from an environment variable.
    /// Default: GITHUB_TOKEN
    #[arg(long = "token-env")]
    token_env: Option<String>,

    /// GitHub API base URL, falling back to GITHUB_API_URL and then the public API
    #[arg(long = "api-url")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Resolve token: --token > --token-env > GITHUB_TOKEN
    let token = if let Some(t) = cli.token {
        Some(t)
    } else {
        let env_name = cli.token_env.as_deref().unwrap_or("GITHUB_TOKEN");
        match std::env::var(env_name) {
            Ok(t) if !t.is_empty() => {
                tracing::info!(env = env_name, "Read GitHub token from environment variable");
                Some(t)
            }
            _ => None,
        }
    };

    let api_url = cli
        .api_url
        .or_else(|| std::env::var("GITHUB_API_URL").ok().filter(|u| !u.is_empty()));

    let mut builder = octocrab::OctocrabBuilder::new();
    if let Some(ref url) = api_url {
        builder = builder
            .base_uri(url.as_str())
            .map_err(|e| anyhow::anyhow!("Invalid GitHub API URL {}: {}", url, e))?;
    }
    if let Some(ref t) = token {
        builder = builder.personal_token(t.clone());
    } else {
        tracing::warn!("No GitHub token provided — API rate limits will be very restrictive");
    }
    let github = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create GitHub client: {}", e))?;

    tracing::info!(
        authenticated = token.is_some(),
        api_url = api_url.as_deref().unwrap_or("https://api.github.com"),
        "Starting gh-user-stats server"
    );

    let service = server::GithubStatsServer::new(github, SamplingLimits::default());
    let running = service.serve(stdio()).await?;
    running.waiting().await?;

    Ok(())
}
