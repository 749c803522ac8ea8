//! Wrapper calls against a local mock HTTP server.

use apilink::{ParseError, RequestError, RequestWrapper, WrapperConfig};
use mockito::Matcher;

use super::init_test_env;

#[test]
fn test_get_json_with_basic_auth() {
    init_test_env();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/users/1")
        .match_header("authorization", "Basic dXNlcjpwYXNz")
        .match_header("accept", "*/*")
        .match_header("user-agent", Matcher::Regex("^apilink/".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "name": "Ada"}"#)
        .create();

    let api = RequestWrapper::new(format!("{}/", server.url()))
        .unwrap()
        .with_credentials("user", "pass");
    let response = api.get("users/1", true).unwrap();

    mock.assert();
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("Content-Type"), Some("application/json"));

    let first = response.json().unwrap();
    let second = response.json().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first["name"], "Ada");
}

#[test]
fn test_use_auth_false_sends_no_authorization() {
    init_test_env();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/public")
        .match_header("authorization", Matcher::Missing)
        .with_body("ok")
        .create();

    let api = RequestWrapper::new(format!("{}/", server.url()))
        .unwrap()
        .with_credentials("user", "pass");
    let response = api.get("public", false).unwrap();

    mock.assert();
    assert_eq!(response.text(), "ok");
}

#[test]
fn test_missing_password_sends_no_authorization() {
    init_test_env();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .match_header("authorization", Matcher::Missing)
        .create();

    let mut config = WrapperConfig::new(format!("{}/", server.url()));
    config.user = Some("user".to_string());
    let api = RequestWrapper::from_config(&config).unwrap();
    api.get("", true).unwrap();

    mock.assert();
}

#[test]
fn test_query_pairs_are_appended() {
    init_test_env();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".to_string(), "rust".to_string()),
            Matcher::UrlEncoded("page".to_string(), "2".to_string()),
        ]))
        .with_body("[]")
        .create();

    let api = RequestWrapper::new(format!("{}/search?", server.url())).unwrap();
    let response = api.get(vec![("q", "rust"), ("page", "2")], true).unwrap();

    mock.assert();
    assert!(response.json().unwrap().as_array().unwrap().is_empty());
}

#[test]
fn test_put_and_post_send_body_and_custom_headers() {
    init_test_env();
    let mut server = mockito::Server::new();
    let put = server
        .mock("PUT", "/items/7")
        .match_header("x-request-source", "tests")
        .match_body(r#"{"qty":3}"#)
        .with_status(204)
        .create();
    let post = server
        .mock("POST", "/items")
        .match_body("name=widget")
        .with_status(201)
        .with_body("<created id=\"8\"/>")
        .create();

    let mut api = RequestWrapper::new(format!("{}/", server.url())).unwrap();
    api.add_to_headers("X-Request-Source", "tests");

    let updated = api.put("items/7", r#"{"qty":3}"#, true).unwrap();
    assert_eq!(updated.status_code(), 204);

    let created = api.post("items", "name=widget", true).unwrap();
    assert_eq!(created.status_code(), 201);
    assert_eq!(created.xml().unwrap().attribute("id"), Some("8"));

    put.assert();
    post.assert();
}

#[test]
fn test_generic_request_with_other_verbs() {
    init_test_env();
    let mut server = mockito::Server::new();
    let delete = server.mock("DELETE", "/items/7").with_status(200).create();

    let api = RequestWrapper::new(format!("{}/", server.url())).unwrap();
    let response = api.request("delete", "items/7", "", true).unwrap();

    delete.assert();
    assert!(response.is_success());
}

#[test]
fn test_error_status_is_not_a_request_error() {
    init_test_env();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/broken")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create();

    let api = RequestWrapper::new(format!("{}/", server.url())).unwrap();
    let response = api.get("broken", true).unwrap();

    assert_eq!(response.status_code(), 502);
    let err = response.json().unwrap_err();
    assert!(matches!(err, ParseError::InvalidJson { .. }));
    assert!(err.to_string().contains("<html>Bad Gateway</html>"));
}

#[test]
fn test_serialize_parsed_after_xml_edit() {
    init_test_env();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/feed")
        .with_header("content-type", "application/xml")
        .with_body("<?xml version=\"1.0\"?>\n<feed><entry>one</entry></feed>")
        .create();

    let api = RequestWrapper::new(format!("{}/", server.url())).unwrap();
    let mut response = api.get("feed", true).unwrap();
    assert_eq!(response.serialize_parsed(), None);

    response
        .edit_xml(|feed| feed.set_attribute("seen", "true"))
        .unwrap();
    assert_eq!(
        response.serialize_parsed().as_deref(),
        Some(r#"<feed seen="true"><entry>one</entry></feed>"#)
    );
}

#[test]
fn test_connection_failure_surfaces_transport_error() {
    init_test_env();
    // Nothing listens on port 1
    let api = RequestWrapper::new("http://127.0.0.1:1/").unwrap();
    let err = api.get("anything", true).unwrap_err();

    match err {
        RequestError::Transport(inner) => assert!(inner.is_connect()),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[test]
fn test_unsupported_verb_never_reaches_server() {
    init_test_env();
    let mut server = mockito::Server::new();
    let mock = server.mock("TRACE", Matcher::Any).expect(0).create();

    let api = RequestWrapper::new(format!("{}/", server.url())).unwrap();
    let err = api.request("trace", "", "", true).unwrap_err();

    assert!(matches!(err, RequestError::UnsupportedMethod(_)));
    mock.assert();
}

#[test]
fn test_repeated_response_headers_are_kept() {
    init_test_env();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/login")
        .with_header("set-cookie", "session=abc")
        .with_header("set-cookie", "theme=dark")
        .create();

    let api = RequestWrapper::new(format!("{}/", server.url())).unwrap();
    let response = api.get("login", false).unwrap();

    assert_eq!(response.header("Set-Cookie"), Some("session=abc, theme=dark"));
}
