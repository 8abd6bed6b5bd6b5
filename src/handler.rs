use crate::config::AppState;
use crate::logger;
use crate::response;
use crate::store::CustomerRecord;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use serde_json::Value;
use std::convert::Infallible;
use std::sync::Arc;

const CUSTOMERS_PATH: &str = "/customers";

const INVALID_CUSTOMER: &str = "Invalid customer data";
const INVALID_UPDATE: &str = "Invalid customer data or customer ID not found";

/// Validate Content-Length header against max body size.
/// Returns Some(413 response) if too large, None otherwise.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size_str = match content_length.to_str() {
        Ok(s) => s,
        Err(_) => {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            return None;
        }
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(response::error(
                "Request body too large",
                StatusCode::PAYLOAD_TOO_LARGE,
            ))
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    let method = req.method().clone();
    let uri = req.uri().clone();

    let mut resp = if uri.path() != CUSTOMERS_PATH {
        response::not_found()
    } else if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        resp
    } else {
        match req.collect().await {
            Ok(collected) => dispatch(&method, &collected.to_bytes(), &state),
            Err(e) => {
                logger::log_error(&format!("Failed to read request body: {e}"));
                response::error("Failed to read request body", StatusCode::BAD_REQUEST)
            }
        }
    };

    response::set_server_header(&mut resp, &state.config.http.server_name);
    if state.config.logging.access_log {
        logger::log_request(&method, &uri, resp.status().as_u16());
    }
    Ok(resp)
}

/// Route a request on the customer resource by HTTP method.
fn dispatch(method: &Method, body: &[u8], state: &AppState) -> Response<Full<Bytes>> {
    match *method {
        Method::GET => list_customers(state),
        Method::POST => create_customer(body, state),
        Method::PUT => update_customer(body, state),
        _ => response::error("Method not allowed", StatusCode::METHOD_NOT_ALLOWED),
    }
}

fn list_customers(state: &AppState) -> Response<Full<Bytes>> {
    let customers = state
        .store
        .list()
        .into_iter()
        .map(Value::Object)
        .collect();
    response::success(Some(&Value::Array(customers)), StatusCode::OK)
}

fn create_customer(body: &[u8], state: &AppState) -> Response<Full<Bytes>> {
    // Malformed JSON degrades to an empty record, which then fails
    // validation like any other incomplete payload.
    let record: CustomerRecord = serde_json::from_slice(body).unwrap_or_default();
    if state.store.save(record) {
        response::success(None, StatusCode::CREATED)
    } else {
        response::error(INVALID_CUSTOMER, StatusCode::BAD_REQUEST)
    }
}

fn update_customer(body: &[u8], state: &AppState) -> Response<Full<Bytes>> {
    // The update body is form-encoded, not JSON. Inherited inconsistency
    // with the create path; kept as part of the wire contract.
    let mut record = parse_form_body(body);
    let id = match record.remove("id") {
        Some(Value::String(raw)) => match raw.parse::<usize>() {
            Ok(id) => id,
            Err(_) => {
                return response::error(INVALID_UPDATE, StatusCode::BAD_REQUEST);
            }
        },
        _ => {
            return response::error(INVALID_UPDATE, StatusCode::BAD_REQUEST);
        }
    };

    if state.store.update(id, record) {
        response::success(None, StatusCode::OK)
    } else {
        response::error(INVALID_UPDATE, StatusCode::BAD_REQUEST)
    }
}

/// Decode a form-encoded body into a record. All values come out as
/// strings; repeated keys keep the last value.
fn parse_form_body(body: &[u8]) -> CustomerRecord {
    url::form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}
