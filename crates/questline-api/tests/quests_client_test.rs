#![allow(clippy::unwrap_used)]
// Integration tests for `QuestsClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use questline_api::{Error, QuestsClient};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, QuestsClient) {
    let server = MockServer::start().await;
    let client = QuestsClient::with_client(reqwest::Client::new(), &server.uri()).unwrap();
    (server, client)
}

fn quest_payload() -> serde_json::Value {
    json!({
        "data": {
            "achievements": [
                { "id": "a1", "name": "Welcome to Tarkov", "hidden": false, "side": "All" }
            ],
            "prestige": [
                { "id": "p1", "name": "Prestige 1", "prestigeLevel": 1, "conditions": [] }
            ],
            "tasks": [
                {
                    "id": "t1",
                    "name": "Debut",
                    "trader": { "id": "tr1", "name": "Prapor", "normalizedName": "prapor" },
                    "minPlayerLevel": 1,
                    "factionName": "Any",
                    "taskRequirements": [],
                    "traderRequirements": [],
                    "objectives": [
                        { "id": "o1", "type": "shoot", "description": "Eliminate Scavs", "optional": false }
                    ]
                },
                {
                    "id": "t2",
                    "name": "Checking",
                    "factionName": "Any",
                    "taskRequirements": [{ "task": { "id": "t1" }, "status": ["complete"] }],
                    "traderRequirements": [
                        {
                            "requirementType": "level",
                            "trader": { "id": "tr1" },
                            "value": 2,
                            "compareMethod": ">="
                        }
                    ],
                    "objectives": [null]
                }
            ]
        }
    })
}

// ── Quest dataset ───────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_quests_sends_lang_and_mode() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(
            json!({ "variables": { "lang": "de", "gameMode": "pve" } }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(quest_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let data = client.fetch_quests("de", "pve").await.unwrap();

    assert_eq!(data.achievements.len(), 1);
    assert_eq!(data.prestige.len(), 1);
    assert_eq!(data.tasks.len(), 2);

    let checking = data.tasks[1].as_ref().unwrap();
    assert_eq!(checking.task_requirements.len(), 1);
    assert!(checking.objectives[0].is_none());
    let trader_req = checking.trader_requirements[0].as_ref().unwrap();
    assert_eq!(trader_req.requirement_type, "level");
    assert!((trader_req.value - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_partial_errors_still_return_data() {
    let (server, client) = setup().await;

    let mut payload = quest_payload();
    payload["errors"] = json!([{ "message": "prestige resolver timed out" }]);

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&server)
        .await;

    let data = client.fetch_quests("en", "regular").await.unwrap();
    assert_eq!(data.tasks.len(), 2);
}

#[tokio::test]
async fn test_errors_without_data_fail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "Unknown language" },
                { "message": "Unknown game mode" }
            ]
        })))
        .mount(&server)
        .await;

    let result = client.fetch_quests("xx", "regular").await;

    match result {
        Err(Error::GraphQl { message }) => {
            assert_eq!(message, "Unknown language; Unknown game mode");
        }
        other => panic!("expected GraphQl error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let result = client.fetch_quests("en", "regular").await;

    assert!(
        matches!(result, Err(Error::Http { status: 502, .. })),
        "expected Http error, got: {result:?}"
    );
    assert!(result.unwrap_err().is_transient());
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.fetch_quests("en", "regular").await;

    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Traders ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_traders() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "traders": [
                    { "id": "tr1", "name": "Prapor", "normalizedName": "prapor" },
                    { "id": "tr2", "name": "Therapist", "normalizedName": "therapist" }
                ]
            }
        })))
        .mount(&server)
        .await;

    let traders = client.fetch_traders("en", "regular").await.unwrap();

    assert_eq!(traders.len(), 2);
    assert_eq!(traders[1].normalized_name, "therapist");
}
