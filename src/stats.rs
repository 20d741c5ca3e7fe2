//! Bounded per-repository and per-user activity sampling.
//!
//! Every count here comes from a single capped page of results. The numbers
//! are samples that saturate at [`SamplingLimits::per_page`], not totals.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use octocrab::params::State;

use crate::error::GithubStatsError;
use crate::github::{GithubClient, RepoListing};

/// Caps that bound how many API calls a single tool invocation can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingLimits {
    /// Items requested per list call. Counts saturate at this value.
    pub per_page: u8,
    /// Pages of a user's repository listing to walk.
    pub max_pages: u32,
    /// Repositories per listing page that get stats fetched.
    pub repos_per_page: usize,
    /// Repositories folded into a contribution summary.
    pub max_repos: usize,
}

impl Default for SamplingLimits {
    fn default() -> Self {
        Self {
            per_page: 30,
            max_pages: 2,
            repos_per_page: 5,
            max_repos: 10,
        }
    }
}

/// Sampled activity for one repository. Each field is the length of one
/// capped page, so a value equal to `per_page` means "at least that many".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoStats {
    pub commit_count: u64,
    pub open_prs: u64,
    pub closed_prs: u64,
    pub open_issues: u64,
    pub closed_issues: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepoSummary {
    pub repo: RepoListing,
    /// `None` when fetching stats failed: unknown, not zero.
    pub stats: Option<RepoStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MostActiveRepo {
    pub name: String,
    pub commits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionSummary {
    pub total_commits: u64,
    /// Always the Unix epoch. Nothing computes a real last-activity date yet.
    pub last_active: DateTime<Utc>,
    pub languages: BTreeMap<String, u64>,
    pub most_active_repo: MostActiveRepo,
    pub total_open_prs: u64,
    pub total_closed_prs: u64,
    pub total_open_issues: u64,
    pub total_closed_issues: u64,
}

impl ContributionSummary {
    /// Adds one repository's counters. Only a strictly greater commit count
    /// replaces the most active repository, so earlier repositories win ties.
    pub fn with_stats(mut self, name: &str, stats: Option<&RepoStats>) -> Self {
        let Some(stats) = stats else {
            return self;
        };
        self.total_commits += stats.commit_count;
        self.total_open_prs += stats.open_prs;
        self.total_closed_prs += stats.closed_prs;
        self.total_open_issues += stats.open_issues;
        self.total_closed_issues += stats.closed_issues;
        if stats.commit_count > self.most_active_repo.commits {
            self.most_active_repo = MostActiveRepo {
                name: name.to_string(),
                commits: stats.commit_count,
            };
        }
        self
    }

    pub fn with_languages(mut self, languages: &BTreeMap<String, u64>) -> Self {
        for (language, bytes) in languages {
            *self.languages.entry(language.clone()).or_insert(0) += bytes;
        }
        self
    }

    /// Languages by byte count, largest first. Equal counts keep name order.
    pub fn ranked_languages(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .languages
            .iter()
            .map(|(name, bytes)| (name.as_str(), *bytes))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Samples commit, pull request and issue counts for one repository.
/// Any failed request abandons the whole repository and yields `None`.
pub async fn fetch_repo_stats(
    github: &GithubClient,
    owner: &str,
    repo: &str,
    limits: &SamplingLimits,
) -> Option<RepoStats> {
    match try_fetch_repo_stats(github, owner, repo, limits).await {
        Ok(stats) => Some(stats),
        Err(e) => {
            tracing::warn!(owner, repo, error = %e, "Error fetching repository stats");
            None
        }
    }
}

async fn try_fetch_repo_stats(
    github: &GithubClient,
    owner: &str,
    repo: &str,
    limits: &SamplingLimits,
) -> Result<RepoStats, GithubStatsError> {
    let per_page = limits.per_page;
    Ok(RepoStats {
        commit_count: github.count_commits(owner, repo, per_page).await?,
        open_prs: github.count_pulls(owner, repo, State::Open, per_page).await?,
        closed_prs: github.count_pulls(owner, repo, State::Closed, per_page).await?,
        open_issues: github.count_issues(owner, repo, State::Open, per_page).await?,
        closed_issues: github.count_issues(owner, repo, State::Closed, per_page).await?,
    })
}

/// Walks the first `max_pages` pages of a user's repositories and samples
/// stats for the first `repos_per_page` of each. Stops at the first empty
/// page. Listing failures propagate; stats failures do not.
pub async fn list_user_repos(
    github: &GithubClient,
    username: &str,
    limits: &SamplingLimits,
) -> Result<Vec<RepoSummary>, GithubStatsError> {
    let mut repos = Vec::new();
    for page in 1..=limits.max_pages {
        let listing = github
            .user_repos_page(username, limits.per_page, page)
            .await?;
        if listing.is_empty() {
            break;
        }
        for repo in listing.into_iter().take(limits.repos_per_page) {
            let stats = fetch_repo_stats(github, username, &repo.name, limits).await;
            repos.push(RepoSummary { repo, stats });
        }
    }
    tracing::debug!(username, count = repos.len(), "Listed user repositories");
    Ok(repos)
}

/// Lists a user's repositories and folds them into a contribution summary.
pub async fn user_contributions(
    github: &GithubClient,
    username: &str,
    limits: &SamplingLimits,
) -> Result<ContributionSummary, GithubStatsError> {
    let repos = list_user_repos(github, username, limits).await?;
    Ok(summarize(github, username, &repos, limits).await)
}

/// Folds an existing listing into a contribution summary, fetching language
/// bytes per repository. A failed language fetch skips only that repository.
pub async fn summarize(
    github: &GithubClient,
    username: &str,
    repos: &[RepoSummary],
    limits: &SamplingLimits,
) -> ContributionSummary {
    let mut summary = ContributionSummary::default();
    for entry in repos.iter().take(limits.max_repos) {
        summary = summary.with_stats(&entry.repo.name, entry.stats.as_ref());
        match github.languages(username, &entry.repo.name).await {
            Ok(languages) => summary = summary.with_languages(&languages),
            Err(e) => {
                tracing::warn!(
                    owner = username,
                    repo = %entry.repo.name,
                    error = %e,
                    "Error fetching repository languages"
                );
            }
        }
    }
    summary
}
