use flatmock::prelude::*;

fn ok() -> MockResponse {
    MockResponse::new("/response", 200, "OK", vec![], TypedBody::empty())
}

#[test]
fn query_param_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = MockClient::when()
        .get()
        .with_path("/search")
        .with_query("query", "metallica")
        .then_return(ok())
        .build();

    // Act
    let first = client
        .dispatch(&MockRequest::new("GET", "http://localhost/search?page=2&query=metallica"))
        .unwrap();
    let other_value = client
        .dispatch(&MockRequest::new("GET", "http://localhost/search?query=slayer"))
        .unwrap();
    let no_query = client
        .dispatch(&MockRequest::new("GET", "http://localhost/search"))
        .unwrap();

    // Assert
    assert_eq!(first.status, 200);
    assert_eq!(other_value.status, 404);
    assert_eq!(no_query.status, 404);
}

#[test]
fn path_regex_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = MockClient::when()
        .a_request()
        .with_path_matching(r"/orders/\d+")
        .then_return(ok())
        .build();

    // Act
    let numeric = client.dispatch(&MockRequest::new("GET", "/orders/42")).unwrap();
    let suffixed = client.dispatch(&MockRequest::new("GET", "/orders/42/items")).unwrap();
    let prefixed = client.dispatch(&MockRequest::new("GET", "/api/orders/42")).unwrap();

    // Assert
    assert_eq!(numeric.status, 200);
    assert_eq!(suffixed.status, 404);
    assert_eq!(prefixed.status, 404);
    assert!(prefixed
        .body_str()
        .contains("a string matching the pattern"));
}

#[test]
fn path_params_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = MockClient::when()
        .delete()
        .with_path_params("/users/{userId}/posts/{postId}", [("userId", "7"), ("postId", "13")])
        .then_return(ok())
        .build();

    // Act
    let matching = client
        .dispatch(&MockRequest::new("DELETE", "https://example.org/users/7/posts/13"))
        .unwrap();
    let other = client
        .dispatch(&MockRequest::new("DELETE", "https://example.org/users/7/posts/14"))
        .unwrap();

    // Assert
    assert_eq!(matching.status, 200);
    assert_eq!(other.status, 404);
}
