//! Thin typed layer over the raw GitHub REST routes this server needs.
//!
//! Responses are deserialized into small local models with lenient defaults
//! instead of octocrab's full models, so partial payloads still parse.

use std::collections::BTreeMap;
use std::sync::Arc;

use octocrab::params::State;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::error::GithubStatsError;

/// Public profile returned by `GET /users/{username}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub hireable: Option<bool>,
    pub public_repos: u64,
    pub total_private_repos: Option<u64>,
    pub followers: u64,
    pub following: u64,
    pub created_at: Option<String>,
}

/// One entry of a user's repository listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RepoListing {
    pub name: String,
    pub full_name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub html_url: Option<String>,
    pub fork: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: Option<String>,
}

/// Repository metadata returned by `GET /repos/{owner}/{repo}` and by the
/// rename `PATCH`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepoDetails {
    pub name: String,
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub open_issues_count: u64,
    pub license: Option<License>,
    pub html_url: Option<String>,
}

#[derive(Serialize)]
struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<State>,
    per_page: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    name: &'a str,
}

#[derive(Clone)]
pub struct GithubClient {
    octo: Arc<octocrab::Octocrab>,
}

impl GithubClient {
    pub fn new(octo: octocrab::Octocrab) -> Self {
        Self {
            octo: Arc::new(octo),
        }
    }

    pub async fn user(&self, username: &str) -> Result<UserProfile, GithubStatsError> {
        sanitize_github_name(username, "username")?;
        let route = format!("/users/{}", username);
        Ok(self.octo.get(route, None::<&()>).await?)
    }

    /// One page of a user's repositories, in the order the API returns them.
    pub async fn user_repos_page(
        &self,
        username: &str,
        per_page: u8,
        page: u32,
    ) -> Result<Vec<RepoListing>, GithubStatsError> {
        sanitize_github_name(username, "username")?;
        let route = format!("/users/{}/repos", username);
        let query = ListQuery {
            state: None,
            per_page,
            page: Some(page),
        };
        Ok(self.octo.get(route, Some(&query)).await?)
    }

    /// Number of commits on the first page of the default branch history.
    pub async fn count_commits(
        &self,
        owner: &str,
        repo: &str,
        per_page: u8,
    ) -> Result<u64, GithubStatsError> {
        self.count_first_page(owner, repo, "commits", None, per_page)
            .await
    }

    pub async fn count_pulls(
        &self,
        owner: &str,
        repo: &str,
        state: State,
        per_page: u8,
    ) -> Result<u64, GithubStatsError> {
        self.count_first_page(owner, repo, "pulls", Some(state), per_page)
            .await
    }

    /// GitHub's issue listing also contains pull requests; they are counted
    /// as issues here.
    pub async fn count_issues(
        &self,
        owner: &str,
        repo: &str,
        state: State,
        per_page: u8,
    ) -> Result<u64, GithubStatsError> {
        self.count_first_page(owner, repo, "issues", Some(state), per_page)
            .await
    }

    async fn count_first_page(
        &self,
        owner: &str,
        repo: &str,
        resource: &str,
        state: Option<State>,
        per_page: u8,
    ) -> Result<u64, GithubStatsError> {
        let route = repo_route(owner, repo, Some(resource))?;
        let query = ListQuery {
            state,
            per_page,
            page: None,
        };
        let items: Vec<IgnoredAny> = self.octo.get(route, Some(&query)).await?;
        Ok(items.len() as u64)
    }

    /// Bytes of code per language for one repository.
    pub async fn languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<BTreeMap<String, u64>, GithubStatsError> {
        let route = repo_route(owner, repo, Some("languages"))?;
        Ok(self.octo.get(route, None::<&()>).await?)
    }

    pub async fn repo(&self, owner: &str, repo: &str) -> Result<RepoDetails, GithubStatsError> {
        let route = repo_route(owner, repo, None)?;
        Ok(self.octo.get(route, None::<&()>).await?)
    }

    /// Renames a repository. Takes effect immediately on GitHub.
    pub async fn rename_repo(
        &self,
        owner: &str,
        repo: &str,
        new_name: &str,
    ) -> Result<RepoDetails, GithubStatsError> {
        let route = repo_route(owner, repo, None)?;
        if new_name.trim().is_empty() {
            return Err(GithubStatsError::InvalidParam(
                "newName must not be empty".to_string(),
            ));
        }
        let body = RenameBody { name: new_name };
        Ok(self.octo.patch(route, Some(&body)).await?)
    }
}

fn repo_route(owner: &str, repo: &str, resource: Option<&str>) -> Result<String, GithubStatsError> {
    sanitize_github_name(owner, "owner")?;
    sanitize_github_name(repo, "repo")?;
    Ok(match resource {
        Some(resource) => format!("/repos/{}/{}/{}", owner, repo, resource),
        None => format!("/repos/{}/{}", owner, repo),
    })
}

/// Validate that a GitHub owner/repo name doesn't contain characters that
/// could be used for URL injection in raw API routes.
pub(crate) fn sanitize_github_name(name: &str, field: &str) -> Result<(), GithubStatsError> {
    if name.is_empty() {
        return Err(GithubStatsError::InvalidParam(format!(
            "{} must not be empty",
            field
        )));
    }
    for ch in ['/', '?', '#', '%', '\0', ' ', '\n', '\t'] {
        if name.contains(ch) {
            return Err(GithubStatsError::InvalidParam(format!(
                "{} contains invalid character '{}'",
                field, ch
            )));
        }
    }
    Ok(())
}
