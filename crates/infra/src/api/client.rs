//! HTTP client for the CRM endpoints.
//!
//! [`CrmClient`] holds the base URL and transport; [`EntityClient`] is the
//! per-entity view with the list/get/create/update/delete contract. Every
//! response goes through one envelope decoder, so callers see either the
//! decoded records or a [`ClientError`].

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;

use keystone_core::Record;
use keystone_domain::{CrmError, EntityKind};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::errors::{ClientError, DEFAULT_API_ERROR};
use crate::http::HttpClient;

/// Client for a Keystone server.
#[derive(Clone)]
pub struct CrmClient {
    http: Arc<HttpClient>,
    base_url: Url,
}

impl CrmClient {
    /// Client with the default transport.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = HttpClient::new().map_err(|e| ClientError::Config(e.to_string()))?;
        Self::with_http(base_url, http)
    }

    /// Client over a preconfigured transport.
    pub fn with_http(base_url: &str, http: HttpClient) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!("{base_url} cannot be a base URL")));
        }
        // Relative joins keep any path prefix only with a trailing slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http: Arc::new(http), base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Typed client for one entity.
    pub fn entity<R: Record>(&self) -> EntityClient<R> {
        EntityClient { inner: self.clone(), _record: PhantomData }
    }

    /// Call the liveness endpoint.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let url = self.endpoint(&["api", "health"])?;
        let response = self.execute(self.http.request(Method::GET, url)).await?;
        read_body(response).await?.ok_or_else(|| ClientError::Decode("empty body".into()))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::Config("base URL cannot hold a path".into()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        self.http.send(request).await.map_err(transport_error)
    }
}

/// Client for one entity's collection and item endpoints.
pub struct EntityClient<R> {
    inner: CrmClient,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for EntityClient<R> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), _record: PhantomData }
    }
}

impl<R: Record> EntityClient<R> {
    pub const fn kind(&self) -> EntityKind {
        R::KIND
    }

    /// List records matching the filter parameters.
    #[instrument(skip(self, params), fields(entity = R::KIND.path_segment()))]
    pub async fn get_all(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<Vec<R::View>, ClientError> {
        // Sorted for stable URLs.
        let query: BTreeMap<&str, &str> =
            params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let url = self.collection_url()?;
        let request = self.inner.http.request(Method::GET, url).query(&query);
        let body = self.send(request).await?;
        envelope(body, R::KIND.collection_key())
    }

    /// Fetch one record; a missing id is [`ClientError::NotFound`].
    #[instrument(skip(self), fields(entity = R::KIND.path_segment()))]
    pub async fn get_by_id(&self, id: &str) -> Result<R::View, ClientError> {
        let url = self.item_url(id)?;
        let body = self.send(self.inner.http.request(Method::GET, url)).await?;
        envelope(body, R::KIND.item_key())
    }

    #[instrument(skip(self, input), fields(entity = R::KIND.path_segment()))]
    pub async fn create(&self, input: &R::Input) -> Result<R::View, ClientError> {
        let url = self.collection_url()?;
        let body = self.send(self.inner.http.request(Method::POST, url).json(input)).await?;
        envelope(body, R::KIND.item_key())
    }

    #[instrument(skip(self, patch), fields(entity = R::KIND.path_segment()))]
    pub async fn update(&self, id: &str, patch: &R::Patch) -> Result<R::View, ClientError> {
        let url = self.item_url(id)?;
        let body = self.send(self.inner.http.request(Method::PUT, url).json(patch)).await?;
        envelope(body, R::KIND.item_key())
    }

    /// Delete a record. An empty or confirmation body are both success.
    #[instrument(skip(self), fields(entity = R::KIND.path_segment()))]
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let url = self.item_url(id)?;
        self.send(self.inner.http.request(Method::DELETE, url)).await?;
        Ok(())
    }

    fn collection_url(&self) -> Result<Url, ClientError> {
        self.inner.endpoint(&["api", R::KIND.path_segment()])
    }

    fn item_url(&self, id: &str) -> Result<Url, ClientError> {
        self.inner.endpoint(&["api", R::KIND.path_segment(), id])
    }

    async fn send(&self, request: RequestBuilder) -> Result<Option<Value>, ClientError> {
        let response = self.inner.execute(request).await?;
        read_body(response).await
    }
}

fn transport_error(err: CrmError) -> ClientError {
    warn!(error = %err, "request did not reach the server");
    ClientError::Unavailable
}

fn is_json(response: &Response) -> Option<bool> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with("application/json"))
}

fn content_type(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string()
}

/// Check the status and content type and parse the body.
///
/// `Ok(None)` is a success without a body.
async fn read_body(response: Response) -> Result<Option<Value>, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let message = if is_json(&response) == Some(true) {
            response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        } else {
            None
        }
        .unwrap_or_else(|| DEFAULT_API_ERROR.to_string());

        debug!(status = status.as_u16(), %message, "API request failed");
        return Err(if status == StatusCode::NOT_FOUND {
            ClientError::NotFound(message)
        } else {
            ClientError::Api { status: status.as_u16(), message }
        });
    }

    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return Ok(None);
    }

    match is_json(&response) {
        Some(true) => {}
        // No declared type and no body, e.g. a bare 200 on delete.
        None if response.content_length() == Some(0) => return Ok(None),
        _ => return Err(ClientError::UnexpectedContentType(content_type(&response))),
    }

    let bytes = response.bytes().await.map_err(|e| ClientError::Decode(e.to_string()))?;
    if bytes.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(&bytes).map(Some).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Pull `key` out of an envelope and decode it.
fn envelope<T: DeserializeOwned>(body: Option<Value>, key: &str) -> Result<T, ClientError> {
    let mut body = body.ok_or_else(|| ClientError::Decode("empty response body".into()))?;
    let payload = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ClientError::Decode(format!("response has no `{key}` field")))?;
    serde_json::from_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use keystone_domain::{Lead, LeadInput, ProjectTask};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn lead(id: &str, first_name: &str) -> Lead {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).single().unwrap();
        Lead {
            id: id.into(),
            first_name: first_name.into(),
            last_name: "Lee".into(),
            email: "a@x.com".into(),
            phone: None,
            company: None,
            position: None,
            source: None,
            status: "New".into(),
            notes: None,
            assigned_to: None,
            priority: "Medium".into(),
            tags: vec![],
            created_at: at,
            updated_at: at,
        }
    }

    fn client_for(server: &MockServer) -> CrmClient {
        let http = HttpClient::builder()
            .max_attempts(1)
            .timeout(Duration::from_secs(5))
            .build()
            .expect("http client");
        CrmClient::with_http(&server.uri(), http).expect("client")
    }

    #[tokio::test]
    async fn get_all_sends_filters_and_unwraps_the_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads"))
            .and(query_param("search", "ann"))
            .and(query_param("status", "New"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "leads": [lead("l-1", "Ann")]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = HashMap::from([
            ("search".to_string(), "ann".to_string()),
            ("status".to_string(), "New".to_string()),
        ]);
        let leads = client_for(&server).entity::<Lead>().get_all(&params).await.unwrap();

        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].first_name, "Ann");
    }

    #[tokio::test]
    async fn project_tasks_use_the_camel_case_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/project-tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "projectTasks": [] })))
            .mount(&server)
            .await;

        let tasks =
            client_for(&server).entity::<ProjectTask>().get_all(&HashMap::new()).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn create_posts_json_and_reads_the_item_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/leads"))
            .and(body_partial_json(json!({ "firstName": "Ann" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "lead": lead("l-9", "Ann")
            })))
            .mount(&server)
            .await;

        let input = LeadInput {
            first_name: Some("Ann".into()),
            last_name: Some("Lee".into()),
            email: Some("a@x.com".into()),
            ..LeadInput::default()
        };
        let created = client_for(&server).entity::<Lead>().create(&input).await.unwrap();
        assert_eq!(created.id, "l-9");
    }

    #[tokio::test]
    async fn not_found_carries_the_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Lead not found" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).entity::<Lead>().get_by_id("missing").await.unwrap_err();
        assert_eq!(err, ClientError::NotFound("Lead not found".into()));
    }

    #[tokio::test]
    async fn error_without_message_uses_the_default() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).entity::<Lead>().delete("l-1").await.unwrap_err();
        assert_eq!(err, ClientError::Api { status: 500, message: DEFAULT_API_ERROR.into() });
    }

    #[tokio::test]
    async fn html_success_is_an_unexpected_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).entity::<Lead>().get_all(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedContentType(ct) if ct.starts_with("text/html")));
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/leads/l-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).entity::<Lead>().delete("l-1").await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let http = HttpClient::builder().max_attempts(1).build().unwrap();
        let client = CrmClient::with_http(&format!("http://{addr}"), http).unwrap();
        let err = client.entity::<Lead>().get_by_id("l-1").await.unwrap_err();
        assert_eq!(err, ClientError::Unavailable);
    }

    #[test]
    fn item_urls_escape_ids_and_keep_path_prefixes() {
        let http = HttpClient::new().unwrap();
        let client = CrmClient::with_http("http://localhost:3000/crm", http).unwrap();
        let url = client.endpoint(&["api", "leads", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/crm/api/leads/a%2Fb");
    }
}
