use gh_user_stats::server::GithubStatsServer;
use gh_user_stats::stats::SamplingLimits;
use httpmock::{Method::GET, MockServer};
use serde_json::{json, Value};

fn stub_server(server: &MockServer) -> GithubStatsServer {
    let octo = octocrab::OctocrabBuilder::new()
        .base_uri(server.base_url())
        .unwrap()
        .build()
        .unwrap();
    GithubStatsServer::new(octo, SamplingLimits::default())
}

fn items(n: usize) -> Value {
    Value::Array((0..n).map(|i| json!({ "id": i })).collect())
}

async fn mock_get<'a>(server: &'a MockServer, path: &str, body: Value) -> httpmock::Mock<'a> {
    let path = path.to_string();
    server
        .mock_async(move |when, then| {
            when.method(GET).path(path);
            then.status(200).json_body(body);
        })
        .await
}

#[tokio::test]
async fn get_user_reports_profile_and_sampled_activity() {
    let server = MockServer::start_async().await;
    mock_get(
        &server,
        "/users/octo",
        json!({
            "login": "octo",
            "name": "Octo Cat",
            "bio": null,
            "location": "San Francisco",
            "public_repos": 2,
            "followers": 100,
            "following": 1,
            "created_at": "2011-01-25T18:44:36Z",
            "company": "",
            "blog": "https://octo.dev",
            "twitter_username": null,
            "hireable": null,
        }),
    )
    .await;
    let first_page = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo/repos").query_param("page", "1");
            then.status(200)
                .json_body(json!([{ "name": "spoon" }, { "name": "knife" }]));
        })
        .await;
    let second_page = server
        .mock_async(|when, then| {
            when.method(GET).path("/users/octo/repos").query_param("page", "2");
            then.status(200).json_body(json!([]));
        })
        .await;

    // Every list endpoint of "spoon" returns three items; "knife" has no
    // stats routes and therefore unknown stats.
    mock_get(&server, "/repos/octo/spoon/commits", items(3)).await;
    mock_get(&server, "/repos/octo/spoon/pulls", items(3)).await;
    mock_get(&server, "/repos/octo/spoon/issues", items(3)).await;
    mock_get(&server, "/repos/octo/spoon/languages", json!({ "Rust": 10, "C": 90 })).await;
    mock_get(&server, "/repos/octo/knife/languages", json!({ "Rust": 100 })).await;

    let text = stub_server(&server).do_get_user("octo").await.unwrap();

    assert!(text.starts_with("User Information for octo:\n"));
    assert!(text.contains("- Name: Octo Cat\n"));
    assert!(text.contains("- Bio: Not provided\n"));
    assert!(text.contains("- Location: San Francisco\n"));
    assert!(text.contains("- Public Repos: 2\n"));
    assert!(text.contains("- Private Repos: Not available\n"));
    assert!(text.contains("- Total Repositories: 2\n"));
    assert!(text.contains("- Followers: 100\n"));
    assert!(text.contains("- Created at: 1/25/2011\n"));
    assert!(text.contains("- Last Active: 1/1/1970\n"));
    assert!(text.contains("- Total Commits: 3\n"));
    assert!(text.contains("- Most Active Repository: spoon (3 commits)\n"));
    assert!(text.contains("- Most Used Language: Rust\n"));
    assert!(text.contains("- Top Languages: Rust, C\n"));
    assert!(text.contains("- Pull Requests:\n  - Open: 3\n  - Closed: 3\n"));
    assert!(text.contains("- Issues:\n  - Open: 3\n  - Closed: 3\n"));
    assert!(text.contains("- Company: Not provided\n"));
    assert!(text.contains("- Website: https://octo.dev\n"));
    assert!(text.contains("- Twitter: Not provided\n"));
    assert!(text.ends_with("- Hireable: No"));

    // The listing is walked once and shared by both sections of the report.
    first_page.assert_hits_async(1).await;
    second_page.assert_hits_async(1).await;
}
