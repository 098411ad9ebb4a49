//! Debounced list queries for search-as-you-type.
//!
//! Each submission takes a new sequence token and aborts the previous
//! pending task. A task waits out the debounce delay, issues the request and
//! publishes its result only while its token is still the latest, so a slow
//! early response can never replace a fresher one.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use keystone_core::Record;
use keystone_domain::constants::SEARCH_DEBOUNCE_MS;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::client::EntityClient;
use super::errors::ClientError;

/// Outcome of one debounced query.
#[derive(Debug, Clone)]
pub struct SearchResult<R: Record> {
    /// Sequence token of the submission that produced this result.
    pub token: u64,
    pub params: HashMap<String, String>,
    pub outcome: Result<Vec<R::View>, ClientError>,
}

type Published<R> = Option<SearchResult<R>>;

/// Debounces `get_all` calls for one entity.
pub struct DebouncedSearch<R: Record> {
    client: EntityClient<R>,
    delay: Duration,
    latest: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    results: Arc<watch::Sender<Published<R>>>,
}

impl<R: Record> DebouncedSearch<R> {
    pub fn new(client: EntityClient<R>) -> Self {
        Self::with_delay(client, Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    pub fn with_delay(client: EntityClient<R>, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            client,
            delay,
            latest: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            results: Arc::new(tx),
        }
    }

    /// Receiver that sees every published result.
    pub fn subscribe(&self) -> watch::Receiver<Published<R>> {
        self.results.subscribe()
    }

    /// Token of the most recent submission; `0` before the first.
    pub fn latest_token(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Schedule a query, superseding any query not yet published.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, params: HashMap<String, String>) -> u64 {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let client = self.client.clone();
        let latest = Arc::clone(&self.latest);
        let results = Arc::clone(&self.results);
        let delay = self.delay;

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) != token {
                return;
            }

            let outcome = client.get_all(&params).await;

            let published = results.send_if_modified(|current| {
                let fresher_published = current.as_ref().is_some_and(|r| r.token > token);
                if fresher_published || latest.load(Ordering::SeqCst) != token {
                    return false;
                }
                *current = Some(SearchResult { token, params, outcome });
                true
            });
            if !published {
                debug!(token, "discarding superseded search result");
            }
        });

        if let Some(previous) = self.pending.lock().replace(task) {
            previous.abort();
        }
        token
    }

    /// Drop any pending query without publishing.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }
}

impl<R: Record> Drop for DebouncedSearch<R> {
    fn drop(&mut self) {
        if let Some(task) = self.pending.get_mut().take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use keystone_domain::Lead;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::CrmClient;
    use crate::http::HttpClient;

    fn search_for(server: &MockServer) -> DebouncedSearch<Lead> {
        let http = HttpClient::builder().max_attempts(1).build().expect("http client");
        let client = CrmClient::with_http(&server.uri(), http).expect("client");
        DebouncedSearch::with_delay(client.entity::<Lead>(), Duration::from_millis(100))
    }

    fn term(value: &str) -> HashMap<String, String> {
        HashMap::from([("search".to_string(), value.to_string())])
    }

    async fn next_result(
        rx: &mut watch::Receiver<Published<Lead>>,
    ) -> SearchResult<Lead> {
        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .expect("result published in time")
            .expect("sender alive");
        rx.borrow_and_update().clone().expect("result present")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn burst_of_submissions_issues_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/leads"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "leads": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let search = search_for(&server);
        let mut rx = search.subscribe();
        for partial in ["a", "an", "ann"] {
            search.submit(term(partial));
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let result = next_result(&mut rx).await;
        assert_eq!(result.token, 3);
        assert_eq!(result.params["search"], "ann");
        assert!(result.outcome.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn slow_superseded_response_is_never_published() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("search", "old"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "leads": [] }))
                    .set_delay(Duration::from_millis(600)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("search", "new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "leads": [] })))
            .mount(&server)
            .await;

        let search = search_for(&server);
        let mut rx = search.subscribe();

        search.submit(term("old"));
        // Past the debounce: the first request is in flight.
        tokio::time::sleep(Duration::from_millis(200)).await;
        let fresh = search.submit(term("new"));

        let result = next_result(&mut rx).await;
        assert_eq!(result.token, fresh);
        assert_eq!(result.params["search"], "new");

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(rx.borrow().as_ref().map(|r| r.token), Some(fresh));
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancel_drops_the_pending_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "leads": [] })))
            .expect(0)
            .mount(&server)
            .await;

        let search = search_for(&server);
        let rx = search.subscribe();
        search.submit(term("ann"));
        search.cancel();

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.borrow().is_none());
    }
}
