#[cfg(test)]
pub mod test_utils {
    use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::http::HeaderValue;
    use axum::Router;
    use axum_test::TestServer;
    use migration::{Migrator, MigratorTrait};
    use model::entities::{auth_token, user};
    use moka::future::Cache;
    use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TEST_PASSWORD: &str = "testpass123";

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        db.execute_unprepared("PRAGMA foreign_keys = ON")
            .await
            .expect("Failed to enable foreign keys");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing, with a fresh media directory
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;
        let media_root = std::env::temp_dir().join(format!("catapi-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&media_root).expect("Failed to create media root");

        AppState {
            db,
            token_cache: Cache::new(100),
            media_root,
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level follows the RUST_LOG environment variable and defaults to
    /// WARN. Only the first call installs the subscriber.
    pub fn init_test_tracing() {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    /// Create axum app for testing
    pub fn setup_test_app(state: AppState) -> Router {
        init_test_tracing();
        create_router(state, Duration::from_secs(30), DEFAULT_MAX_UPLOAD_BYTES)
    }

    /// Start a test server and return it with the state it shares.
    pub async fn setup_test_server() -> (TestServer, AppState) {
        let state = setup_test_app_state().await;
        let server = TestServer::new(setup_test_app(state.clone())).expect("Failed to start test server");
        (server, state)
    }

    pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> user::Model {
        user::create_user(db, email, Some(TEST_PASSWORD), "Test Name")
            .await
            .expect("Failed to create test user")
    }

    /// `Authorization` header value carrying the user's API token.
    pub async fn auth_header(db: &DatabaseConnection, user_id: i32) -> HeaderValue {
        let token = auth_token::get_or_create_for_user(db, user_id)
            .await
            .expect("Failed to create token");
        HeaderValue::from_str(&format!("Token {}", token.key)).expect("Invalid header value")
    }

    /// Create a user and return it with its `Authorization` header value.
    pub async fn authenticated_user(db: &DatabaseConnection, email: &str) -> (user::Model, HeaderValue) {
        let account = create_test_user(db, email).await;
        let header = auth_header(db, account.id).await;
        (account, header)
    }
}
