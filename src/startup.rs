use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use tracing::{Level, event, instrument};

use crate::{
    configuration::Settings,
    error::AppError,
    handlers::{
        create_actor, create_movie, delete_actor, delete_movie, health, list_actors, list_movies,
        search_movies, update_actor, update_movie,
    },
};

#[derive(Debug)]
pub struct Application {
    listener: tokio::net::TcpListener,
    state: Arc<AppState>,
    port: u16,
}

impl Application {
    #[instrument(name = "build_server", skip(cfg))]
    pub async fn build(cfg: &Settings) -> anyhow::Result<Self> {
        let host = &cfg.server.host;
        let port = cfg.server.port;
        let db_url = &cfg.database.url;

        // Create the TCPListener for further usage
        let lst = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
        let port = lst.local_addr()?.port();

        // connect to database and get the pool
        let pool = PgPool::connect(db_url).await?;

        // apply migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        // Initial state
        let state = AppState {
            db: pool,
            auth: AuthState {
                jwt_secret: cfg.auth.jwt_secret.clone(),
            },
        };

        let state = Arc::new(state);

        Ok(Self {
            listener: lst,
            state,
            port,
        })
    }

    #[instrument(name = "mainloop", skip(self))]
    pub async fn run_until_stopped(mut self) -> std::io::Result<()> {
        let addr = self.listener.local_addr()?;
        let host = addr.ip().to_string();
        let port = addr.port();

        // Create the router
        let router = self.create_app_router();

        event!(Level::INFO, "Serving at {}:{}", host, port);

        // Serve the server
        axum::serve(self.listener, router).await
    }

    fn create_app_router(&mut self) -> Router {
        // Initial router with state
        Router::new()
            .route("/", get(health))
            .route("/movies", get(list_movies).post(create_movie))
            .route("/movies/search", post(search_movies))
            .route("/movies/{movie_id}", patch(update_movie).delete(delete_movie))
            .route("/actors", get(list_actors).post(create_actor))
            .route("/actors/{actor_id}", patch(update_actor).delete(delete_actor))
            .fallback(route_not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

// unknown paths and unsupported verbs still answer with the uniform error body
async fn route_not_found() -> AppError {
    AppError::NotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[derive(Debug)]
pub struct AppState {
    pub db: PgPool,
    pub auth: AuthState,
}

#[derive(Debug)]
pub struct AuthState {
    pub jwt_secret: String,
}
