use chrono::NaiveDateTime;
use flatmock::prelude::*;
use std::fs;

fn client_for(resource: &str) -> MockClient {
    MockClient::when()
        .a_request()
        .then_return_file(get_test_resource_file_path(resource).unwrap())
        .build()
}

#[test]
fn file_body_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = client_for("tests/resources/http-200-response.txt");

    // Act
    let response = client
        .dispatch(&MockRequest::new("GET", "http://localhost/user"))
        .unwrap();

    // Assert
    assert_eq!(response.url, "http://localhost/user");
    assert_eq!(response.status, 200);
    assert_eq!(response.reason, "OK");
    assert_eq!(response.header("x-powered-by"), Some("Flat-File"));
    assert_eq!(
        response.body.mime_type,
        "application/json; charset=UTF-8"
    );

    let length = response.body.len().to_string();
    assert_eq!(response.header("Content-Length"), Some(length.as_str()));

    let json: serde_json::Value = serde_json::from_slice(&response.body.bytes).unwrap();
    assert_eq!(json["title"], "test");
    assert_eq!(json["properties"]["foo"], "bar");
    assert_eq!(json["foot"], "qwerty");
    assert!(response.body_str().ends_with("}\n"));
}

#[test]
fn date_placeholder_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = client_for("tests/resources/http-200-response.txt");

    // Act
    let response = client.dispatch(&MockRequest::new("GET", "/")).unwrap();

    // Assert
    let date = response.header("Date").unwrap();
    assert_ne!(date, "${DATE}");
    assert!(date.ends_with(" GMT"));
    assert!(NaiveDateTime::parse_from_str(date, "%a, %d %b %Y %H:%M:%S GMT").is_ok());
}

#[test]
fn headers_only_file_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = client_for("tests/resources/http-302-response.txt");

    // Act
    let response = client.dispatch(&MockRequest::new("GET", "/old")).unwrap();

    // Assert
    assert_eq!(response.status, 302);
    assert_eq!(response.reason, "Found");
    assert_eq!(response.header("Location"), Some("http://otherhost/"));
    assert_eq!(response.header("Content-Length"), Some("0"));
    assert!(response.body.is_empty());
    assert_eq!(response.body.mime_type, "text/plain; charset=UTF-8");
}

#[test]
fn declared_charset_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = client_for("tests/resources/http-404-response.txt");

    // Act
    let response = client.dispatch(&MockRequest::new("GET", "/missing")).unwrap();

    // Assert
    assert_eq!(response.status, 404);
    assert_eq!(response.reason, "Not Found");
    assert_eq!(
        &response.body.bytes[..],
        &b"<html><body>Gr\xfc\xdfe</body></html>\n"[..]
    );
    assert_eq!(response.header("Content-Length"), Some("32"));
}

#[test]
fn non_utf8_file_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = client_for("tests/resources/http-200-latin1-response.txt");

    // Act
    let response = client.dispatch(&MockRequest::new("GET", "/latin1")).unwrap();

    // Assert
    assert_eq!(response.status, 200);
    assert_eq!(&response.body.bytes[..], &b"Gr??e\n"[..]);
    assert_eq!(response.header("Content-Length"), Some("6"));
}

#[test]
fn invalid_file_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = client_for("tests/resources/invalid-response.txt");

    // Act
    let result = client.dispatch(&MockRequest::new("GET", "/"));

    // Assert
    match result {
        Err(Error::InvalidStatusLine(line)) => {
            assert_eq!(line, "<html><body>Not a response</body></html>")
        }
        other => panic!("expected an invalid status line, got {:?}", other),
    }
}

#[test]
fn missing_file_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = client_for("tests/resources/does-not-exist.txt");

    // Act
    let result = client.dispatch(&MockRequest::new("GET", "/"));

    // Assert
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn file_changes_are_picked_up_test() {
    let _ = env_logger::try_init();

    // Arrange
    let path = std::env::temp_dir().join(format!("flatmock-{}-reload.txt", std::process::id()));
    fs::write(&path, "HTTP/1.1 200 OK\n\nfirst\n").unwrap();

    let client = MockClient::when().a_request().then_return_file(&path).build();
    let req = MockRequest::new("GET", "/");

    // Act
    let first = client.dispatch(&req).unwrap();
    fs::write(&path, "HTTP/1.1 503 Service Unavailable\n\nsecond\n").unwrap();
    let second = client.dispatch(&req).unwrap();
    fs::remove_file(&path).unwrap();

    // Assert
    assert_eq!(first.status, 200);
    assert_eq!(first.body_str(), "first\n");
    assert_eq!(second.status, 503);
    assert_eq!(second.reason, "Service Unavailable");
    assert_eq!(second.body_str(), "second\n");
}

#[test]
fn parse_file_without_client_test() {
    let _ = env_logger::try_init();

    // Arrange
    let path = get_test_resource_file_path("tests/resources/http-302-response.txt").unwrap();

    // Act
    let first = flatmock::parser::parse_file("http://localhost/old", &path).unwrap();
    let second = flatmock::parser::parse_file("http://localhost/old", &path).unwrap();

    // Assert
    assert_eq!(first, second);
    assert_eq!(first.url, "http://localhost/old");
}
