use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{schemars, tool, tool_handler, tool_router, ServerHandler};
use serde::Deserialize;

use crate::error::GithubStatsError;
use crate::format;
use crate::github::GithubClient;
use crate::stats::{self, SamplingLimits};

#[derive(Clone)]
pub struct GithubStatsServer {
    github: GithubClient,
    limits: SamplingLimits,
    tool_router: ToolRouter<Self>,
}

// -- Tool parameter types --

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UserParams {
    #[schemars(description = "GitHub username")]
    pub username: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RepoParams {
    #[schemars(description = "Repository owner (user or org)")]
    pub owner: String,

    #[schemars(description = "Repository name")]
    pub repo: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenameRepoParams {
    #[schemars(description = "Repository owner (user or org)")]
    pub owner: String,

    #[schemars(description = "Current repository name")]
    pub repo: String,

    #[schemars(description = "New repository name")]
    #[serde(rename = "newName")]
    pub new_name: String,
}

impl GithubStatsServer {
    pub fn new(github: octocrab::Octocrab, limits: SamplingLimits) -> Self {
        Self {
            github: GithubClient::new(github),
            limits,
            tool_router: Self::tool_router(),
        }
    }

    /// Profile, sampled repositories and contribution rollup for one user.
    /// The repository listing is fetched once and shared by both sections.
    pub async fn do_get_user(&self, username: &str) -> Result<String, GithubStatsError> {
        let user = self.github.user(username).await?;
        let repos = stats::list_user_repos(&self.github, username, &self.limits).await?;
        let contributions = stats::summarize(&self.github, username, &repos, &self.limits).await;
        Ok(format::user_report(username, &user, repos.len(), &contributions))
    }

    pub async fn do_get_repo(&self, owner: &str, repo: &str) -> Result<String, GithubStatsError> {
        let details = self.github.repo(owner, repo).await?;
        Ok(format::repo_report(owner, repo, &details))
    }

    pub async fn do_update_repo_name(
        &self,
        owner: &str,
        repo: &str,
        new_name: &str,
    ) -> Result<String, GithubStatsError> {
        let renamed = self.github.rename_repo(owner, repo, new_name).await?;
        tracing::info!(owner, repo, new_name, "Renamed repository");
        Ok(format::rename_report(repo, new_name, &renamed))
    }
}

/// Every outcome is a single text block. Failures are reported as text with
/// the given prefix, never as a protocol-level error.
fn text_result(result: Result<String, GithubStatsError>, error_prefix: &str) -> CallToolResult {
    let text = match result {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(error = %e, "{}", error_prefix);
            format!("{}: {}", error_prefix, e.message())
        }
    };
    CallToolResult::success(vec![Content::text(text)])
}

// -- MCP tool handlers (thin wrappers calling do_* methods) --

#[tool_router]
impl GithubStatsServer {
    #[tool(
        name = "getUser",
        description = "Get a GitHub user's profile with sampled commit, pull request, issue and language statistics across their first repositories"
    )]
    async fn get_user(
        &self,
        Parameters(params): Parameters<UserParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::debug!(username = %params.username, "getUser");
        let result = self.do_get_user(&params.username).await;
        Ok(text_result(result, "Error fetching user information"))
    }

    #[tool(
        name = "getRepo",
        description = "Get repository info including description, stars, forks, language, dates, open issues and license"
    )]
    async fn get_repo(
        &self,
        Parameters(params): Parameters<RepoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::debug!(owner = %params.owner, repo = %params.repo, "getRepo");
        let result = self.do_get_repo(&params.owner, &params.repo).await;
        Ok(text_result(result, "Error fetching repository information"))
    }

    #[tool(
        name = "updateRepoName",
        description = "Rename a repository. The change is applied immediately on GitHub"
    )]
    async fn update_repo_name(
        &self,
        Parameters(params): Parameters<RenameRepoParams>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::debug!(owner = %params.owner, repo = %params.repo, "updateRepoName");
        let result = self
            .do_update_repo_name(&params.owner, &params.repo, &params.new_name)
            .await;
        Ok(text_result(result, "Error updating repository name"))
    }
}

#[tool_handler]
impl ServerHandler for GithubStatsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gh-user-stats".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "GitHub server. Use getUser for a user's profile and sampled activity \
                 statistics, getRepo for repository details, and updateRepoName to \
                 rename a repository (takes effect immediately)."
                    .to_string(),
            ),
        }
    }
}
