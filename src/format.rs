//! Human-readable text blocks returned by the tools.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::github::{RepoDetails, UserProfile};
use crate::stats::ContributionSummary;

const NOT_PROVIDED: &str = "Not provided";
const NOT_AVAILABLE: &str = "Not available";
const NOT_SPECIFIED: &str = "Not specified";

/// Empty strings count as missing, same as an absent field.
fn or_placeholder<'a>(value: Option<&'a str>, placeholder: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// `M/D/YYYY`, accepting either an RFC 3339 timestamp or a bare `YYYY-MM-DD`
/// date. Anything unparseable is echoed back unchanged.
fn short_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => format_date(date),
        Err(_) => raw.to_string(),
    }
}

fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    format_date(ts.date_naive())
}

pub fn user_report(
    username: &str,
    user: &UserProfile,
    repo_count: usize,
    contributions: &ContributionSummary,
) -> String {
    let ranked = contributions.ranked_languages();
    let most_used = ranked.first().map(|(name, _)| *name).unwrap_or("None");
    let top_languages = ranked
        .iter()
        .take(5)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");

    // A zero private repo count renders as unavailable, like a missing one.
    let private_repos = match user.total_private_repos {
        Some(n) if n > 0 => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    };
    let twitter = match user.twitter_username.as_deref() {
        Some(handle) if !handle.is_empty() => format!("@{}", handle),
        _ => NOT_PROVIDED.to_string(),
    };
    let hireable = if user.hireable.unwrap_or(false) {
        "Yes"
    } else {
        "No"
    };

    format!(
        "User Information for {username}:
- Name: {name}
- Bio: {bio}
- Location: {location}
- Public Repos: {public_repos}
- Private Repos: {private_repos}
- Total Repositories: {repo_count}
- Followers: {followers}
- Following: {following}
- Created at: {created_at}
- Last Active: {last_active}
- Total Commits: {total_commits}
- Most Active Repository: {active_name} ({active_commits} commits)
- Most Used Language: {most_used}
- Top Languages: {top_languages}
- Pull Requests:
  - Open: {open_prs}
  - Closed: {closed_prs}
- Issues:
  - Open: {open_issues}
  - Closed: {closed_issues}
- Company: {company}
- Website: {website}
- Twitter: {twitter}
- Hireable: {hireable}",
        name = or_placeholder(user.name.as_deref(), NOT_PROVIDED),
        bio = or_placeholder(user.bio.as_deref(), NOT_PROVIDED),
        location = or_placeholder(user.location.as_deref(), NOT_PROVIDED),
        public_repos = user.public_repos,
        followers = user.followers,
        following = user.following,
        created_at = short_date(user.created_at.as_deref()),
        last_active = format_timestamp(&contributions.last_active),
        total_commits = contributions.total_commits,
        active_name = contributions.most_active_repo.name,
        active_commits = contributions.most_active_repo.commits,
        open_prs = contributions.total_open_prs,
        closed_prs = contributions.total_closed_prs,
        open_issues = contributions.total_open_issues,
        closed_issues = contributions.total_closed_issues,
        company = or_placeholder(user.company.as_deref(), NOT_PROVIDED),
        website = or_placeholder(user.blog.as_deref(), NOT_PROVIDED),
    )
}

pub fn repo_report(owner: &str, repo: &str, details: &RepoDetails) -> String {
    let license = details
        .license
        .as_ref()
        .and_then(|l| l.name.as_deref());
    format!(
        "Repository Information for {owner}/{repo}:
- Description: {description}
- Stars: {stars}
- Forks: {forks}
- Language: {language}
- Created at: {created_at}
- Last updated: {updated_at}
- Open Issues: {open_issues}
- License: {license}",
        description = or_placeholder(details.description.as_deref(), NOT_PROVIDED),
        stars = details.stargazers_count,
        forks = details.forks_count,
        language = or_placeholder(details.language.as_deref(), NOT_SPECIFIED),
        created_at = short_date(details.created_at.as_deref()),
        updated_at = short_date(details.updated_at.as_deref()),
        open_issues = details.open_issues_count,
        license = or_placeholder(license, NOT_SPECIFIED),
    )
}

pub fn rename_report(old_name: &str, new_name: &str, renamed: &RepoDetails) -> String {
    format!(
        "Repository name updated successfully!
Old name: {old_name}
New name: {new_name}
Repository URL: {url}",
        url = or_placeholder(renamed.html_url.as_deref(), NOT_AVAILABLE),
    )
}
