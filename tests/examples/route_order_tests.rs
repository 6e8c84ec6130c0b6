use flatmock::prelude::*;

fn text(body: &str) -> MockResponse {
    MockResponse::new("/response", 200, "OK", vec![], TypedBody::text("text/plain", body))
}

#[test]
fn first_matching_route_wins_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = MockClient::when()
        .get()
        .with_path("/a")
        .then_return(text("first"))
        .a_request()
        .then_return(text("fallback"))
        .get()
        .with_path("/a")
        .then_return(text("never"))
        .build();

    // Act
    let a = client.dispatch(&MockRequest::new("GET", "/a")).unwrap();
    let other = client.dispatch(&MockRequest::new("DELETE", "/other")).unwrap();

    // Assert
    assert_eq!(a.body_str(), "first");
    assert_eq!(other.body_str(), "fallback");
}

#[test]
fn route_order_changes_result_test() {
    let _ = env_logger::try_init();

    // Arrange
    let general_first = MockClient::when()
        .a_request()
        .with_path_matching("/users/.*")
        .then_return(text("general"))
        .get()
        .with_path("/users/1")
        .then_return(text("specific"))
        .build();

    let specific_first = MockClient::when()
        .get()
        .with_path("/users/1")
        .then_return(text("specific"))
        .a_request()
        .with_path_matching("/users/.*")
        .then_return(text("general"))
        .build();

    let req = MockRequest::new("GET", "http://localhost/users/1");

    // Act
    let general = general_first.dispatch(&req).unwrap();
    let specific = specific_first.dispatch(&req).unwrap();

    // Assert
    assert_eq!(general.body_str(), "general");
    assert_eq!(specific.body_str(), "specific");
}

#[test]
fn dispatch_is_repeatable_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = MockClient::when()
        .get()
        .with_path("/static")
        .then_return_template("HTTP/1.1 200 OK\nContent-Length: ${LENGTH}\n\nsame\n")
        .build();
    let req = MockRequest::new("GET", "/static");

    // Act
    let first = client.dispatch(&req).unwrap();
    let second = client.dispatch(&req).unwrap();

    // Assert
    assert_eq!(first, second);
    assert_eq!(first.header("Content-Length"), Some("5"));
}
