//! End-to-end decoding of single and batched responses.

use std::collections::HashMap;
use std::io::{self, Cursor, Read};

use assert2::{check, let_assert};
use bytes::Bytes;
use graph_response::{
    DecoderConfig, Error, ErrorKind, GraphResponse, HttpConnection, JsonObject, Response,
    ResponseDecoder,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct User {
    id: String,
    #[serde(default)]
    name: Option<String>,
}

fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: None,
    }
}

fn response(status: u16, body: &str) -> Response {
    Response::new(status, HashMap::new(), Bytes::from(body.to_string()))
}

fn kinds<T>(responses: &[GraphResponse<T>]) -> Vec<Option<ErrorKind>> {
    responses
        .iter()
        .map(|response| response.outcome().kind())
        .collect()
}

/// Connection streaming its body through a cursor, counting open streams.
struct CursorConnection {
    status: u16,
    body: Vec<u8>,
    opened: usize,
}

impl HttpConnection for CursorConnection {
    fn status(&self) -> io::Result<u16> {
        Ok(self.status)
    }

    fn input_stream(&mut self) -> io::Result<Box<dyn Read + '_>> {
        self.opened += 1;
        Ok(Box::new(Cursor::new(self.body.as_slice())))
    }

    fn error_stream(&mut self) -> io::Result<Box<dyn Read + '_>> {
        self.opened += 1;
        Ok(Box::new(Cursor::new(self.body.as_slice())))
    }
}

/// Connection whose status line cannot be read.
struct DeadConnection;

impl HttpConnection for DeadConnection {
    fn status(&self) -> io::Result<u16> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed"))
    }

    fn input_stream(&mut self) -> io::Result<Box<dyn Read + '_>> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed"))
    }

    fn error_stream(&mut self) -> io::Result<Box<dyn Read + '_>> {
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "connection closed"))
    }
}

#[test]
fn test_single_request_round_trip() {
    let decoder = ResponseDecoder::json::<User>();
    let responses = decoder.decode(response(200, r#"{"id":"123","name":"Alice"}"#), 1);

    let_assert!([only] = responses.as_slice());
    check!(only.status() == Some(200));
    check!(
        only.payload()
            == Some(&User {
                id: "123".to_string(),
                name: Some("Alice".to_string()),
            })
    );
}

#[test]
fn test_single_raw_payload_matches_body() {
    let responses = ResponseDecoder::new().decode(response(200, r#"{"id":"123","name":"Alice"}"#), 1);

    let_assert!([only] = responses.as_slice());
    let_assert!(Some(payload) = only.payload());
    check!(serde_json::Value::Object(payload.clone()) == json!({"id": "123", "name": "Alice"}));
}

#[test]
fn test_batch_isolation() {
    let decoder = ResponseDecoder::json::<User>();
    let responses = decoder.decode(
        response(200, r#"[{"id":"1"}, {"error":"oops"}, {"id":"3"}]"#),
        3,
    );

    check!(kinds(&responses) == vec![None, Some(ErrorKind::Service), None]);
    check!(responses.first().and_then(GraphResponse::payload) == Some(&user("1")));
    check!(responses.get(2).and_then(GraphResponse::payload) == Some(&user("3")));

    let_assert!(Some(err) = responses.get(1).and_then(GraphResponse::error));
    check!(err.service_message() == Some("oops"));
}

#[test]
fn test_malformed_element_does_not_affect_siblings() {
    let decoder = ResponseDecoder::json::<User>();
    let responses = decoder.decode(response(200, r#"[{"id":"1"}, "garbage", {"id":"3"}]"#), 3);

    check!(kinds(&responses) == vec![None, Some(ErrorKind::Malformed), None]);
}

#[test]
fn test_envelope_unwrapping() {
    let decoder = ResponseDecoder::json::<User>();
    let responses = decoder.decode(
        response(
            200,
            r#"[{"code":200, "body": {"id":"9"}}, {"code":200, "body": "{\"id\":\"9\"}"}]"#,
        ),
        2,
    );

    let payloads: Vec<_> = responses.iter().map(GraphResponse::payload).collect();
    check!(payloads == vec![Some(&user("9")), Some(&user("9"))]);
}

#[test]
fn test_status_classification() {
    let responses = ResponseDecoder::new().decode(
        response(200, r#"[{"code":404, "body":"not found"}, {"code":200, "body":"{}"}]"#),
        2,
    );

    let_assert!(Some(err) = responses.first().and_then(GraphResponse::error));
    check!(*err == Error::transport_with_body(404, "not found"));
    check!(responses.get(1).is_some_and(GraphResponse::is_success));
}

#[test]
fn test_structural_mismatch() {
    let responses = ResponseDecoder::new().decode(response(200, r#"[{"id":"1"}]"#), 2);

    check!(kinds(&responses) == vec![Some(ErrorKind::Malformed); 2]);
    let messages: Vec<_> = responses
        .iter()
        .filter_map(GraphResponse::error)
        .map(ToString::to_string)
        .collect();
    check!(messages.len() == 2);
    check!(messages.iter().all(|message| message.contains("unexpected number of results")));
}

#[test]
fn test_total_parse_failure() {
    let responses = ResponseDecoder::new().decode(response(200, "{not json"), 2);

    check!(kinds(&responses) == vec![Some(ErrorKind::Malformed); 2]);
    check!(responses.first().and_then(GraphResponse::error) == responses.get(1).and_then(GraphResponse::error));
}

#[test]
fn test_http_error_is_broadcast() {
    let mut connection = CursorConnection {
        status: 503,
        body: br#"{"error":{"message":"try later"}}"#.to_vec(),
        opened: 0,
    };
    let responses = ResponseDecoder::new().decode(&mut connection, 3);

    check!(connection.opened == 1);
    check!(kinds(&responses) == vec![Some(ErrorKind::Transport); 3]);
    for response in &responses {
        check!(response.status() == Some(503));
        let_assert!(Some(err) = response.error());
        check!(err.status() == Some(503));
        let_assert!(Some(Ok(body)) = err.decode_body::<serde_json::Value>());
        check!(body == json!({"error": {"message": "try later"}}));
    }
}

#[test]
fn test_unreadable_connection_is_broadcast() {
    let responses = ResponseDecoder::new().decode(DeadConnection, 2);

    check!(kinds(&responses) == vec![Some(ErrorKind::Malformed); 2]);
    check!(responses.iter().all(|response| response.status().is_none()));
    let_assert!(Some(Error::Io(message)) = responses.first().and_then(GraphResponse::error));
    check!(message == "connection closed");
}

#[test]
fn test_single_request_with_http_error() {
    let responses = ResponseDecoder::new().decode(response(400, r#"{"error":"bad"}"#), 1);

    let_assert!([only] = responses.as_slice());
    check!(only.outcome().kind() == Some(ErrorKind::Transport));
}

#[test]
fn test_body_size_limit() {
    let decoder =
        ResponseDecoder::new().with_config(DecoderConfig::builder().max_body_size(16).build());

    let small = decoder.decode(response(200, r#"{"id":"1"}"#), 1);
    check!(small.first().is_some_and(GraphResponse::is_success));

    let large = decoder.decode(response(200, r#"[{"id":"1"},{"id":"2"},{"id":"3"}]"#), 3);
    check!(kinds(&large) == vec![Some(ErrorKind::Malformed); 3]);
}

#[test]
fn test_payload_as() {
    let responses: Vec<GraphResponse<JsonObject>> =
        ResponseDecoder::new().decode(response(200, r#"[{"id":"1"}, {"id":"2","name":"Bob"}]"#), 2);

    let users: Vec<User> = responses
        .iter()
        .filter_map(|response| response.payload_as::<User>())
        .collect::<Result<_, _>>()
        .expect("users");
    check!(
        users
            == vec![
                user("1"),
                User {
                    id: "2".to_string(),
                    name: Some("Bob".to_string()),
                },
            ]
    );
}

#[test]
fn test_custom_decoder() {
    let decoder = ResponseDecoder::with_decoder(|object: JsonObject| -> graph_response::Result<String> {
        object
            .get("id")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::decode("id", "missing id"))
    });
    let responses = decoder.decode_text(Some(200), r#"[{"id":"a"}, {"name":"no id"}]"#, 2);

    check!(responses.first().and_then(GraphResponse::payload) == Some(&"a".to_string()));
    check!(responses.get(1).and_then(|response| response.outcome().kind()) == Some(ErrorKind::Malformed));
}

#[test]
fn test_idempotence() {
    let decoder = ResponseDecoder::new();
    let body = r#"[{"id":"1"}, {"error_reason":"denied"}, {"code":302}, [], {"body":"{\"x\":1}"}]"#;

    let first = decoder.decode_text(Some(200), body, 5);
    let second = decoder.decode_text(Some(200), body, 5);
    check!(first == second);
}

#[test]
fn test_parallel_decoding() {
    let decoder = ResponseDecoder::json::<User>();
    let body = r#"[{"id":"1"}, {"id":"2"}]"#;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| decoder.decode(response(200, body), 2)))
            .collect();

        for handle in handles {
            let responses = handle.join().expect("decode thread");
            let payloads: Vec<_> = responses.iter().map(GraphResponse::payload).collect();
            check!(payloads == vec![Some(&user("1")), Some(&user("2"))]);
        }
    });
}
