//! `WikiClient` against a mocked MediaWiki endpoint.
//!
//! Each test mounts canned `action=query` replies on a local server and
//! checks how `fetch_page` resolves them.

use std::time::Duration;

use assert_matches::assert_matches;
use serde_json::{json, Value};
use wikicache_wiki::{FetchOutcome, WikiClient, WikiError, WikiPage};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXTRACT_PROPS: &str = "extracts|info|pageprops";

fn client_for(server: &MockServer) -> WikiClient {
    WikiClient::new(
        format!("{}/w/api.php", server.uri()),
        "wikicache-tests",
        Duration::from_secs(5),
    )
    .unwrap()
}

async fn mount_search(server: &MockServer, query: &str, titles: &[&str]) {
    let hits: Vec<Value> = titles.iter().map(|t| json!({ "ns": 0, "title": t })).collect();
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "search"))
        .and(query_param("srsearch", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": true,
            "query": { "search": hits }
        })))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, title: &str, page: Value) {
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("prop", EXTRACT_PROPS))
        .and(query_param("titles", title))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "query": { "pages": [page] } })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_top_hit_to_article() {
    let server = MockServer::start().await;
    mount_search(&server, "turing", &["Turing machine", "Alan Turing"]).await;
    mount_page(
        &server,
        "Turing machine",
        json!({
            "pageid": 30403,
            "title": "Turing machine",
            "extract": "A Turing machine is a model of computation.\n\n== History ==\nIn 1936...",
            "fullurl": "https://en.wikipedia.org/wiki/Turing_machine"
        }),
    )
    .await;

    let outcome = client_for(&server).fetch_page("  turing ").await.unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Page(WikiPage {
            title: "Turing machine".into(),
            summary: "A Turing machine is a model of computation.".into(),
            content: "A Turing machine is a model of computation.\n\n== History ==\nIn 1936..."
                .into(),
            url: "https://en.wikipedia.org/wiki/Turing_machine".into(),
        })
    );
}

#[tokio::test]
async fn sends_format_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("action", "query"))
        .and(query_param("format", "json"))
        .and(query_param("formatversion", "2"))
        .and(header("user-agent", "wikicache-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "query": { "search": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).fetch_page("anything").await.unwrap();
}

#[tokio::test]
async fn disambiguation_page_lists_linked_titles() {
    let server = MockServer::start().await;
    mount_search(&server, "mercury", &["Mercury"]).await;
    mount_page(
        &server,
        "Mercury",
        json!({
            "title": "Mercury",
            "extract": "Mercury may refer to:",
            "pageprops": { "disambiguation": "" }
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(query_param("prop", "links"))
        .and(query_param("titles", "Mercury"))
        .and(query_param("plnamespace", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": { "pages": [{
                "title": "Mercury",
                "links": [
                    { "ns": 0, "title": "Mercury (element)" },
                    { "ns": 0, "title": "Mercury (planet)" }
                ]
            }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server).fetch_page("mercury").await.unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Ambiguous {
            query: "mercury".into(),
            options: vec!["Mercury (element)".into(), "Mercury (planet)".into()],
        }
    );
}

#[tokio::test]
async fn no_search_hit_is_not_found_without_page_lookup() {
    let server = MockServer::start().await;
    mount_search(&server, "qwertyuiop", &[]).await;
    Mock::given(query_param("prop", EXTRACT_PROPS))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = client_for(&server).fetch_page("qwertyuiop").await.unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::NotFound {
            query: "qwertyuiop".into()
        }
    );
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let server = MockServer::start().await;
    mount_search(&server, "ghost", &["Ghost page"]).await;
    mount_page(&server, "Ghost page", json!({ "title": "Ghost page", "missing": true })).await;

    let outcome = client_for(&server).fetch_page("ghost").await.unwrap();

    assert_matches!(outcome, FetchOutcome::NotFound { query } if query == "ghost");
}

#[tokio::test]
async fn non_success_status_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page("turing").await.unwrap_err();

    assert_matches!(err, WikiError::Api { status: 503, body } if body == "busy");
}

#[tokio::test]
async fn error_object_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "code": "maxlag", "info": "Waiting for replicas" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page("turing").await.unwrap_err();

    assert_matches!(
        err,
        WikiError::Remote { code, info } if code == "maxlag" && info == "Waiting for replicas"
    );
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page("turing").await.unwrap_err();

    assert_matches!(err, WikiError::Malformed(_));
}
