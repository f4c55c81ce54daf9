//! Authenticated JSON request client.
//!
//! Every call gets `Content-Type: application/json` and, when the session has
//! a token, a bearer `Authorization` header that callers cannot override.
//! Notifying calls post exactly one error notice per failed call; the error
//! is still returned to the caller.

use registry_core::ClientError;
use registry_shared::ClientConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::notice::NoticeBoard;
use crate::session::SessionStore;

pub const CONNECTION_ERROR_NOTICE: &str = "Có lỗi xảy ra khi kết nối với server";

#[derive(Clone)]
pub struct RequestClient {
    http: Client,
    base_url: Arc<str>,
    session: SessionStore,
    notices: NoticeBoard,
}

impl RequestClient {
    /// `timeout: None` lets a hung request wait indefinitely.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        session: SessionStore,
        notices: NoticeBoard,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClientError::Network {
            path: base_url.to_string(),
            message: format!("Failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            session,
            notices,
        })
    }

    pub fn from_config(
        config: &ClientConfig,
        session: SessionStore,
        notices: NoticeBoard,
    ) -> Result<Self, ClientError> {
        Self::new(&config.api.base_url, config.request_timeout(), session, notices)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.request_with_headers(method, path, body, HeaderMap::new())
            .await
    }

    /// Caller headers are sent as given, except `Authorization` which is dropped.
    pub async fn request_with_headers(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: HeaderMap,
    ) -> Result<Value, ClientError> {
        let result = self.execute(method, path, body, headers).await;
        self.report(result)
    }

    /// Same as [`request`](Self::request) but leaves notification to the caller.
    pub async fn request_quiet(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.execute(method, path, body, HeaderMap::new()).await
    }

    /// GET and decode; a decode failure counts as the call's one failure.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let result = match self.execute(Method::GET, path, None, HeaderMap::new()).await {
            Ok(value) => decode(path, value),
            Err(e) => Err(e),
        };
        self.report(result)
    }

    pub async fn get_json_quiet<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let value = self.execute(Method::GET, path, None, HeaderMap::new()).await?;
        decode(path, value)
    }

    /// Form-encoded POST without auth header. Quiet.
    pub async fn post_form(&self, path: &str, pairs: &[(&str, &str)]) -> Result<Value, ClientError> {
        debug!(method = "POST", path, "Sending form request");
        let response = self
            .http
            .post(self.url(path))
            .form(pairs)
            .send()
            .await
            .map_err(|e| network_error(path, e))?;
        read_json(path, response).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        mut headers: HeaderMap,
    ) -> Result<Value, ClientError> {
        headers.remove(AUTHORIZATION);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::Auth("token is not a valid header value".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        debug!(%method, path, "Sending request");
        let mut builder = self.http.request(method, self.url(path)).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| network_error(path, e))?;
        read_json(path, response).await
    }

    fn report<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if let Err(e) = &result {
            error!(path = e.path().unwrap_or_default(), status = ?e.status(), error = %e, "Request failed");
            self.notices.error(CONNECTION_ERROR_NOTICE);
        }
        result
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn network_error(path: &str, err: reqwest::Error) -> ClientError {
    ClientError::Network {
        path: path.to_string(),
        message: err.to_string(),
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Non-2xx becomes `Api`; an empty 2xx body reads as `null`.
async fn read_json(path: &str, response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Api {
            status: status.as_u16(),
            path: path.to_string(),
        });
    }

    let bytes = response.bytes().await.map_err(|e| network_error(path, e))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client_for(server: &MockServer, session: SessionStore) -> RequestClient {
        RequestClient::new(
            &server.uri(),
            None,
            session,
            NoticeBoard::new(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_bearer_and_content_type_attached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/households/"))
            .and(header("authorization", "Bearer tok-1"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "household_number": "HK001" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "h1" })))
            .expect(1)
            .mount(&server)
            .await;

        let session = SessionStore::in_memory();
        session.set_token("tok-1").unwrap();
        let client = client_for(&server, session);

        let body = json!({ "household_number": "HK001" });
        let created = client
            .request(Method::POST, "/api/households/", Some(&body))
            .await
            .unwrap();
        assert_eq!(created["id"], "h1");
    }

    #[tokio::test]
    async fn test_caller_cannot_override_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/persons/"))
            .respond_with(|req: &Request| {
                let auth: Vec<_> = req
                    .headers
                    .get_all("authorization")
                    .iter()
                    .map(|v| v.to_str().unwrap_or_default().to_string())
                    .collect();
                ResponseTemplate::new(200).set_body_json(json!({ "auth": auth }))
            })
            .mount(&server)
            .await;

        let session = SessionStore::in_memory();
        session.set_token("real").unwrap();
        let client = client_for(&server, session);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer forged"));
        headers.insert("x-trace", HeaderValue::from_static("1"));
        let echoed = client
            .request_with_headers(Method::GET, "/api/persons/", None, headers)
            .await
            .unwrap();
        assert_eq!(echoed["auth"], json!(["Bearer real"]));
    }

    #[tokio::test]
    async fn test_caller_authorization_dropped_without_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/persons/"))
            .respond_with(|req: &Request| {
                let has_auth = req.headers.contains_key("authorization");
                ResponseTemplate::new(200).set_body_json(json!({ "has_auth": has_auth }))
            })
            .mount(&server)
            .await;

        let client = client_for(&server, SessionStore::in_memory());
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer forged"));
        let echoed = client
            .request_with_headers(Method::GET, "/api/persons/", None, headers)
            .await
            .unwrap();
        assert_eq!(echoed["has_auth"], false);
    }

    #[tokio::test]
    async fn test_api_error_notifies_exactly_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/feedbacks/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server, SessionStore::in_memory());
        let err = client.request(Method::GET, "/api/feedbacks/", None).await.unwrap_err();

        assert_eq!(err, ClientError::Api { status: 500, path: "/api/feedbacks/".to_string() });
        let notices = client.notices().active();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, CONNECTION_ERROR_NOTICE);
    }

    #[tokio::test]
    async fn test_network_failure_has_no_status() {
        // port 1 is reserved; connecting is refused
        let client = RequestClient::new(
            "http://127.0.0.1:1",
            Some(Duration::from_secs(2)),
            SessionStore::in_memory(),
            NoticeBoard::new(Duration::from_secs(5)),
        )
        .unwrap();
        let err = client.request(Method::GET, "/api/me", None).await.unwrap_err();

        assert!(matches!(err, ClientError::Network { .. }));
        assert_eq!(err.status(), None);
        assert_eq!(err.path(), Some("/api/me"));
        assert_eq!(client.notices().active().len(), 1);
    }

    #[tokio::test]
    async fn test_quiet_request_does_not_notify() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server, SessionStore::in_memory());
        let err = client.get_json_quiet::<Value>("/api/me").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(client.notices().active().is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_is_null_and_decode_failure_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/persons/p1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/persons/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "not": "a list" })))
            .mount(&server)
            .await;

        let client = client_for(&server, SessionStore::in_memory());
        let deleted = client.request(Method::DELETE, "/api/persons/p1", None).await.unwrap();
        assert_eq!(deleted, Value::Null);

        let err = client.get_json::<Vec<Value>>("/api/persons/").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
        assert_eq!(client.notices().active().len(), 1);
    }

    #[tokio::test]
    async fn test_post_form_sends_urlencoded_without_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .respond_with(|req: &Request| {
                let body = String::from_utf8_lossy(&req.body).to_string();
                let has_auth = req.headers.contains_key("authorization");
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "body": body, "has_auth": has_auth }))
            })
            .mount(&server)
            .await;

        let session = SessionStore::in_memory();
        session.set_token("stale").unwrap();
        let client = client_for(&server, session);
        let echoed = client
            .post_form("/api/auth/login", &[("username", "admin"), ("password", "s3cr&t")])
            .await
            .unwrap();

        assert_eq!(echoed["body"], "username=admin&password=s3cr%26t");
        assert_eq!(echoed["has_auth"], false);
    }
}
