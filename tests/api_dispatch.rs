// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Integration tests for the authenticated dispatcher: credential
//! preconditions, base-path routing, parameter handling and error
//! passthrough.

use mockito::{Matcher, Server};
use serde_json::json;
use url::Url;
use withings_api::client::{Method, Params, WithingsClient};
use withings_api::config::{ClientConfig, Endpoints};
use withings_api::errors::Error;

fn endpoints(server: &Server) -> Endpoints {
    Endpoints {
        request_token_url: format!("{}/account/request_token", server.url()),
        access_token_url: format!("{}/account/access_token", server.url()),
        authorize_url: format!("{}/account/authorize", server.url()),
        api_base: format!("{}/", server.url()),
        api_base_v2: format!("{}/v2/", server.url()),
    }
}

fn authenticated_client(server: &Server) -> WithingsClient {
    let config = ClientConfig::new("consumerKey", "consumerSecret")
        .with_access_token("accessToken", "accessTokenSecret")
        .with_user_id("userID");
    WithingsClient::with_endpoints(config, endpoints(server))
}

#[tokio::test]
async fn api_call_without_access_token_fails_before_the_transport() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = ClientConfig::new("consumerKey", "consumerSecret").with_user_id("userID");
    let client = WithingsClient::with_endpoints(config, endpoints(&server));

    let url = Url::parse(&format!("{}/v2/measure", server.url())).unwrap();
    let err = client.api_call(url, Method::Get).await.unwrap_err();

    assert!(matches!(err, Error::Unauthenticated));
    mock.assert_async().await;
}

#[tokio::test]
async fn api_call_without_a_user_id_fails_before_the_transport() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = ClientConfig::new("consumerKey", "consumerSecret")
        .with_access_token("accessToken", "accessTokenSecret");
    let client = WithingsClient::with_endpoints(config, endpoints(&server));

    let url = Url::parse(&format!("{}/v2/measure", server.url())).unwrap();
    let err = client.api_call(url, Method::Get).await.unwrap_err();

    assert!(matches!(err, Error::MissingUser));
    mock.assert_async().await;
}

#[tokio::test]
async fn api_call_signs_with_the_access_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/measure")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("oauth_token".into(), "accessToken".into()),
            Matcher::UrlEncoded("oauth_consumer_key".into(), "consumerKey".into()),
        ]))
        .with_status(200)
        .with_body("raw body")
        .create_async()
        .await;

    let client = authenticated_client(&server);
    let url = Url::parse(&format!("{}/v2/measure", server.url())).unwrap();
    let body = client.api_call(url, Method::Get).await.unwrap();

    assert_eq!(body, "raw body");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_routes_regular_services_to_the_versioned_base() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/measure")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("action".into(), "getactivity".into()),
            Matcher::UrlEncoded("userid".into(), "userID".into()),
            Matcher::UrlEncoded("date".into(), "2016-01-01".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":0,"body":{"steps":5000}}"#)
        .create_async()
        .await;

    let client = authenticated_client(&server);
    let mut params = Params::new();
    params.insert("date", "2016-01-01");
    let value = client.get("measure", "getactivity", params).await.unwrap();

    assert_eq!(value, json!({"status": 0, "body": {"steps": 5000}}));
    mock.assert_async().await;
}

#[tokio::test]
async fn get_routes_getmeas_to_the_legacy_base() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/measure")
        .match_query(Matcher::UrlEncoded("action".into(), "getmeas".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":0,"body":{"measuregrps":[]}}"#)
        .create_async()
        .await;

    let client = authenticated_client(&server);
    client
        .get("measure", "getmeas", Params::new())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn get_routes_the_notify_service_to_the_legacy_base() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notify")
        .match_query(Matcher::UrlEncoded("action".into(), "list".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":0,"body":{"profiles":[]}}"#)
        .create_async()
        .await;

    let client = authenticated_client(&server);
    client.get("notify", "list", Params::new()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn post_always_routes_to_the_legacy_base() {
    let mut server = Server::new_async().await;
    let notify_mock = server
        .mock("POST", "/notify")
        .match_query(Matcher::UrlEncoded("action".into(), "subscribe".into()))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;
    let measure_mock = server
        .mock("POST", "/measure")
        .match_query(Matcher::UrlEncoded("action".into(), "getactivity".into()))
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let client = authenticated_client(&server);
    client.post("notify", "subscribe", Params::new()).await.unwrap();
    client
        .post("measure", "getactivity", Params::new())
        .await
        .unwrap();

    notify_mock.assert_async().await;
    measure_mock.assert_async().await;
}

#[tokio::test]
async fn post_returns_the_raw_body_without_parsing() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/notify")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("definitely not json")
        .create_async()
        .await;

    let client = authenticated_client(&server);
    let body = client
        .post("notify", "subscribe", Params::new())
        .await
        .unwrap();

    assert_eq!(body, "definitely not json");
}

#[tokio::test]
async fn empty_params_behave_like_the_paramless_form() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/measure")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("action".into(), "getactivity".into()),
            Matcher::UrlEncoded("userid".into(), "userID".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":0,"body":{}}"#)
        .expect(2)
        .create_async()
        .await;

    let client = authenticated_client(&server);
    let explicit = client
        .get("measure", "getactivity", Params::new())
        .await
        .unwrap();
    let default = client
        .get("measure", "getactivity", Params::default())
        .await
        .unwrap();

    assert_eq!(explicit, default);
    mock.assert_async().await;
}

#[tokio::test]
async fn parameter_values_are_percent_encoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/notify")
        .match_query(Matcher::UrlEncoded(
            "callbackurl".into(),
            "http://example.com/cb?x=1".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":0,"body":{}}"#)
        .create_async()
        .await;

    let client = authenticated_client(&server);
    let mut params = Params::new();
    params.insert("callbackurl", "http://example.com/cb?x=1");
    client.get("notify", "get", params).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn transport_errors_pass_through_unmodified() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/measure")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let client = authenticated_client(&server);
    let err = client
        .get("measure", "getactivity", Params::new())
        .await
        .unwrap_err();

    match err {
        Error::Transport(e) => {
            assert_eq!(e.status(), Some(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        }
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_json_on_a_successful_get_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/v2/measure")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = authenticated_client(&server);
    let err = client
        .get("measure", "getactivity", Params::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
}
