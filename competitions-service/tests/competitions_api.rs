//! Integration tests for the competitions service.
//!
//! These spin up the full server on a random port with the mock provider and
//! drive it over HTTP. Run with: cargo test -p competitions-service

use competitions_service::config::CompetitionsConfig;
use competitions_service::services::providers::TextProvider;
use competitions_service::services::providers::mock::MockTextProvider;
use competitions_service::startup::Application;
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app(provider: Arc<dyn TextProvider>) -> u16 {
    // Set test environment variables
    std::env::set_var("ENVIRONMENT", "test");
    std::env::set_var("APP__PORT", "0"); // Random port
    std::env::set_var("CLOUDFLARE_ACCOUNT_ID", "test-account");
    std::env::set_var("CLOUDFLARE_API_TOKEN", "test-token");
    std::env::set_var(
        "COMPETITIONS_TEXT_MODEL",
        "@cf/meta/llama-3.3-70b-instruct-fp8-fast",
    );
    std::env::set_var("STATIC_ASSETS_DIR", "tests/fixtures/static");

    let config = CompetitionsConfig::load().expect("Failed to load config");
    let app = Application::with_provider(config, provider)
        .await
        .expect("Failed to build application");

    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn well_formed_array_in_model_output_is_returned_verbatim() {
    let reply = "Here you go!\n[\n  {\"title\": \"Poetry Prize\", \"url\": \"https://example.com\", \"genre\": \"poetry\"}\n]\nGood luck!";
    let provider = Arc::new(MockTextProvider::with_reply(reply));
    let port = spawn_app(provider).await;
    let client = Client::new();

    let response = client
        .get(format!(
            "http://localhost:{}/api/competitions?prefs=poetry",
            port
        ))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body,
        json!([{
            "title": "Poetry Prize",
            "url": "https://example.com",
            "genre": "poetry"
        }])
    );
}

#[tokio::test]
async fn unparseable_output_returns_the_placeholder_listing() {
    let reply = "I'm sorry, I don't know of any competitions like that.";
    let provider = Arc::new(MockTextProvider::with_reply(reply));
    let port = spawn_app(provider).await;
    let client = Client::new();

    let response = client
        .get(format!(
            "http://localhost:{}/api/competitions?prefs=haiku",
            port
        ))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let listings = body.as_array().expect("body should be an array");
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0]["title"], "AI output could not be parsed");
    assert_eq!(listings[0]["description"], reply);
    assert_eq!(listings[0]["url"], "#");
}

#[tokio::test]
async fn provider_failure_returns_error_body() {
    let provider = Arc::new(MockTextProvider::new(false));
    let port = spawn_app(provider).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/api/competitions", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    // The handler reports inference failures in the body, not the status
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let error = body["error"].as_str().expect("error should be a string");
    assert!(error.contains("not enabled"));
}

#[tokio::test]
async fn missing_prefs_falls_back_to_general_writing() {
    let provider = Arc::new(MockTextProvider::with_reply("[]"));
    let port = spawn_app(provider.clone()).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/api/competitions", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let prompts = provider.seen_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"general writing\""));
}

#[tokio::test]
async fn post_to_competitions_is_rejected() {
    let provider = Arc::new(MockTextProvider::with_reply("[]"));
    let port = spawn_app(provider).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/api/competitions", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 405);
}

#[tokio::test]
async fn unknown_api_path_returns_not_found() {
    let provider = Arc::new(MockTextProvider::with_reply("[]"));
    let port = spawn_app(provider).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/api/reviews", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn root_path_serves_the_frontend() {
    let provider = Arc::new(MockTextProvider::with_reply("[]"));
    let port = spawn_app(provider).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("competition-finder-fixture"));
}

#[tokio::test]
async fn non_api_paths_fall_through_to_assets() {
    let provider = Arc::new(MockTextProvider::with_reply("[]"));
    let port = spawn_app(provider).await;
    let client = Client::new();

    // index.html resolves directly as a file
    let response = client
        .get(format!("http://localhost:{}/index.html", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    // A missing asset gets the asset service's 404, not the API catch-all
    let response = client
        .get(format!("http://localhost:{}/no-such-page", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 404);
}
