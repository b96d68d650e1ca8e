#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;

use chirpy::configuration::{
    get_configuration, ApplicationSettings, DatabaseSettings, JwtSettings, Platform,
    PolkaSettings, Settings,
};
use chirpy::startup::run;
use chirpy::store::{ChirpStore, InMemoryStore, PostgresStore};
use serde_json::{json, Value};
use sqlx::{Connection, Executor, PgConnection, PgPool};

pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-chars";
pub const POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

pub struct LoggedInUser {
    pub id: String,
    pub token: String,
    pub refresh_token: String,
}

fn test_settings(port: u16, platform: Platform) -> Settings {
    Settings {
        database: DatabaseSettings {
            username: "unused".to_string(),
            password: "unused".to_string(),
            port: 5432,
            host: "localhost".to_string(),
            database_name: "unused".to_string(),
        },
        application: ApplicationSettings {
            host: "127.0.0.1".to_string(),
            port,
            platform,
        },
        jwt: JwtSettings {
            secret: JWT_SECRET.to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 60 * 60 * 24 * 60,
        },
        polka: PolkaSettings {
            api_key: POLKA_KEY.to_string(),
        },
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_on(Platform::Dev)
}

pub fn spawn_app_on(platform: Platform) -> TestApp {
    spawn_with_store(Arc::new(InMemoryStore::new()), platform, None)
}

/// Same app, backed by a fresh Postgres database named after a new uuid.
/// Connection details come from `configuration.yaml` / `APP_DATABASE__*`.
pub async fn spawn_app_with_postgres() -> (TestApp, PgPool) {
    let mut database = get_configuration()
        .expect("Failed to read configuration.")
        .database;
    database.database_name = uuid::Uuid::new_v4().to_string();

    let pool = configure_database(&database).await;
    let store = PostgresStore::new(pool.clone());
    let app = spawn_with_store(Arc::new(store), Platform::Dev, Some(database));

    (app, pool)
}

/// Create the database and apply the migrations through [`PostgresStore`]
pub async fn configure_database(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect(&config.connection_string_without_db())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, config.database_name))
        .await
        .expect("Failed to create database.");

    let pool = PgPool::connect(&config.connection_string())
        .await
        .expect("Failed to connect to Postgres.");
    PostgresStore::new(pool.clone())
        .migrate()
        .await
        .expect("Failed to migrate the database.");

    pool
}

fn spawn_with_store(
    store: Arc<dyn ChirpStore>,
    platform: Platform,
    database: Option<DatabaseSettings>,
) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let mut settings = test_settings(port, platform);
    if let Some(database) = database {
        settings.database = database;
    }

    let server = run(listener, store, settings).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn create_user(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/users"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Register and log in, returning the credentials
    pub async fn signed_in_user(&self, email: &str, password: &str) -> LoggedInUser {
        assert_eq!(201, self.create_user(email, password).await.status().as_u16());

        let body: Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse login response");

        LoggedInUser {
            id: body["id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
            refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn post_chirp(&self, token: &str, body: &str) -> reqwest::Response {
        self.client
            .post(self.url("/api/chirps"))
            .bearer_auth(token)
            .json(&json!({ "body": body }))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}
