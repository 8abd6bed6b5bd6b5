use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, SERVER};
use hyper::{Response, StatusCode};
use serde_json::Value;

/// Build a success response with a JSON body.
///
/// With no payload the body is JSON `null`, so every response stays valid
/// JSON even when there is nothing to report.
pub fn success(payload: Option<&Value>, status: StatusCode) -> Response<Full<Bytes>> {
    let body = payload.unwrap_or(&Value::Null).to_string();
    build_json_response(status, body)
}

/// Build an error response with an `{"error": ...}` JSON body.
pub fn error(message: &str, status: StatusCode) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message }).to_string();
    build_json_response(status, body)
}

pub fn not_found() -> Response<Full<Bytes>> {
    error("Not found", StatusCode::NOT_FOUND)
}

/// Stamp the configured server name onto a response as the `Server` header.
pub fn set_server_header(response: &mut Response<Full<Bytes>>, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => {
            eprintln!("[ERROR] Invalid http.server_name '{server_name}': {e}");
        }
    }
}

fn build_json_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|e| {
            eprintln!("[ERROR] Failed to build response: {e}");
            Response::new(Full::new(Bytes::from("Error")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime")
            .block_on(response.into_body().collect())
            .expect("collect body")
            .to_bytes();
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[test]
    fn test_success_with_payload() {
        let payload = json!([{"name": "Ann"}]);
        let response = success(Some(&payload), StatusCode::OK);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        assert_eq!(body_string(response), r#"[{"name":"Ann"}]"#);
    }

    #[test]
    fn test_success_without_payload_is_json_null() {
        let response = success(None, StatusCode::CREATED);
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_string(response), "null");
    }

    #[test]
    fn test_error_body_shape() {
        let response = error("Invalid customer data", StatusCode::BAD_REQUEST);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["Content-Type"], "application/json");
        assert_eq!(
            body_string(response),
            r#"{"error":"Invalid customer data"}"#
        );
    }

    #[test]
    fn test_set_server_header() {
        let mut response = success(None, StatusCode::OK);
        set_server_header(&mut response, "customer-api/0.1");
        assert_eq!(response.headers()["Server"], "customer-api/0.1");
    }

    #[test]
    fn test_set_server_header_skips_invalid_name() {
        let mut response = success(None, StatusCode::OK);
        set_server_header(&mut response, "bad\nname");
        assert!(!response.headers().contains_key("Server"));
    }

    #[test]
    fn test_error_message_is_escaped() {
        let response = error(r#"bad "quote""#, StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response), r#"{"error":"bad \"quote\""}"#);
    }
}
