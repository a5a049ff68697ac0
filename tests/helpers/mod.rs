//! Shared setup for the HTTP tests: a migrated temp-dir database behind the
//! real router.

#![allow(dead_code)]

use axum::Router;
use jointravel::{
    AppState, Config,
    config::{ClientConfig, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig},
};
use sqlx::SqlitePool;
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;

pub struct TestApp {
    pub config: Config,
    pub pool: SqlitePool,
    pub router: Router,
    // Dropped last: removes the database file.
    _dir: TempDir,
}

impl TestApp {
    pub fn token(&self, user_id: &str) -> String {
        jointravel::auth::generate_token(&self.config.jwt, user_id).unwrap()
    }
}

pub fn test_config(database_url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: database_url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            expiration_days: 1,
            issuer: "jointravel".to_string(),
            audience: "jointravel".to_string(),
        },
        client: ClientConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let config = test_config(format!("sqlite:{}", dir.child("jointravel.db").display()));

    let pool = jointravel::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    jointravel_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let state = AppState {
        config: config.clone(),
        review_command: jointravel_review::Command::new(jointravel_shared::State::single(
            pool.clone(),
        )),
        pool: pool.clone(),
    };

    Ok(TestApp {
        config,
        pool,
        router: jointravel::router(state),
        _dir: dir,
    })
}
