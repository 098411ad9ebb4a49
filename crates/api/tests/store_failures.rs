//! Store failures surface as generic 500 envelopes.

use std::sync::Arc;

use async_trait::async_trait;
use keystone_api::entity_router;
use keystone_core::{EntityService, EntityStore, ListFilter};
use keystone_domain::{CrmError, Lead, LeadPatch, NewLead, Result};
use keystone_infra::{ClientError, CrmClient, HttpClient};
use reqwest::StatusCode;
use serde_json::{json, Value};

mod support;
use support::TestServer;

/// A store whose database is always gone.
struct BrokenStore;

fn broken<T>() -> Result<T> {
    Err(CrmError::Database("database is locked".to_string()))
}

#[async_trait]
impl EntityStore<Lead> for BrokenStore {
    async fn list(&self, _filter: &ListFilter) -> Result<Vec<Lead>> {
        broken()
    }

    async fn find(&self, _id: &str) -> Result<Option<Lead>> {
        broken()
    }

    async fn create(&self, _record: NewLead) -> Result<Lead> {
        broken()
    }

    async fn update(&self, _id: &str, _patch: LeadPatch) -> Result<Option<Lead>> {
        broken()
    }

    async fn delete(&self, _id: &str) -> Result<bool> {
        broken()
    }

    async fn count(&self) -> Result<i64> {
        broken()
    }
}

async fn broken_server() -> TestServer {
    let service = EntityService::<Lead>::new(Arc::new(BrokenStore));
    TestServer::start(entity_router(service)).await
}

async fn error_of(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test(flavor = "multi_thread")]
async fn every_operation_reports_a_generic_failure() {
    let server = broken_server().await;
    let http = reqwest::Client::new();

    let cases = [
        (http.get(server.url("/api/leads")), "Failed to fetch leads"),
        (http.get(server.url("/api/leads/abc")), "Failed to fetch lead"),
        (
            http.post(server.url("/api/leads"))
                .json(&json!({ "firstName": "Ann", "lastName": "Lee", "email": "a@x.com" })),
            "Failed to create lead",
        ),
        (http.put(server.url("/api/leads/abc")).json(&json!({ "notes": "x" })), "Failed to update lead"),
        (http.delete(server.url("/api/leads/abc")), "Failed to delete lead"),
    ];

    for (request, message) in cases {
        let (status, body) = error_of(request.send().await.unwrap()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{message}");
        assert_eq!(body, json!({ "error": message }));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn validation_runs_before_the_store() {
    let server = broken_server().await;

    let response = reqwest::Client::new()
        .post(server.url("/api/leads"))
        .json(&json!({ "firstName": "Ann" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn client_sees_the_server_message() {
    let server = broken_server().await;
    let http = HttpClient::builder().max_attempts(1).build().expect("http client");
    let client = CrmClient::with_http(&server.base_url, http).expect("client");

    let err = client.entity::<Lead>().get_all(&Default::default()).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Api { status: 500, message: "Failed to fetch leads".to_string() }
    );
}
