use flatmock::prelude::*;

fn created() -> MockResponse {
    MockResponse::new("/users", 201, "Created", vec![], TypedBody::empty())
}

fn json_post(body: &str) -> MockRequest {
    MockRequest::new("POST", "http://localhost/users")
        .with_body(TypedBody::text("application/json", body))
}

#[test]
fn json_body_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = MockClient::when()
        .post()
        .with_path("/users")
        .with_body(vec![
            content_type(starts_with("application/json")),
            json_path("$.name", equal_to("Fred")),
            json_path("roles[0]", equal_to("admin")),
        ])
        .then_return(created())
        .build();

    // Act
    let matching = client
        .dispatch(&json_post(r#"{"name":"Fred","roles":["admin","user"]}"#))
        .unwrap();
    let other_name = client
        .dispatch(&json_post(r#"{"name":"Barney","roles":["admin"]}"#))
        .unwrap();
    let no_json = client.dispatch(&json_post("name=Fred")).unwrap();

    // Assert
    assert_eq!(matching.status, 201);
    assert_eq!(other_name.status, 404);
    assert_eq!(no_json.status, 404);
}

#[test]
fn string_body_test() {
    let _ = env_logger::try_init();

    // Arrange
    let client = MockClient::when()
        .put()
        .with_body(vec![body_text(contains("hello"))])
        .then_return(created())
        .build();

    // Act
    let with_text = client
        .dispatch(&MockRequest::new("PUT", "/").with_body(TypedBody::text("text/plain", "well hello there")))
        .unwrap();
    let without_text = client
        .dispatch(&MockRequest::new("PUT", "/").with_body(TypedBody::text("text/plain", "bye")))
        .unwrap();

    // Assert
    assert_eq!(with_text.status, 201);
    assert_eq!(without_text.status, 404);
}
