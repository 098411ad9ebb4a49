#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use keystone_api::{build_router, AppContext};
use keystone_domain::Config;
use keystone_infra::{CrmClient, DbManager};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A router served on an ephemeral loopback port.
pub struct TestServer {
    pub base_url: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Serve any router, e.g. one built over a substitute store.
    pub async fn start(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback listener");
        let port = listener.local_addr().expect("listener address").port();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("test server");
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn client(&self) -> CrmClient {
        CrmClient::new(&self.base_url).expect("crm client")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// The full application over a fresh SQLite database.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub server: TestServer,
    /// Keep temporary directory alive for the lifetime of the app.
    _temp_dir: TempDir,
}

pub async fn spawn_app() -> TestApp {
    let temp_dir = TempDir::new().expect("failed to create temporary database directory");
    let db_path = temp_dir.path().join("keystone.db");

    let db = DbManager::new(&db_path, 4).expect("failed to open database");
    db.run_migrations().expect("failed to run schema migrations");

    let mut config = Config::default();
    config.database.path = db_path.display().to_string();
    let ctx = Arc::new(AppContext::with_db(config, Arc::new(db)));

    let server = TestServer::start(build_router(Arc::clone(&ctx))).await;
    TestApp { ctx, server, _temp_dir: temp_dir }
}
