use crate::config::Config;
use crate::db::{self, Container, PgContainer};
use crate::users::{login, register};
use crate::votes::{cast_vote, list_votes};
use axum::{
    Router,
    extract::Extension,
    http::{
        Method, StatusCode,
        header::{ACCEPT, CONTENT_TYPE},
    },
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Collection handles shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn Container>,
    pub votes: Arc<dyn Container>,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = db::init_db(config).await?;
        db::spawn_health_check(pool.clone());

        let users = PgContainer::open(pool.clone(), &config.users_collection).await?;
        let votes = PgContainer::open(pool, &config.votes_collection).await?;

        Ok(AppState {
            users: Arc::new(users),
            votes: Arc::new(votes),
        })
    }
}

/// Routes are served both bare and under `/api`.
pub fn router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/user", post(register))
        .route("/vote", post(cast_vote))
        .route("/votes", get(list_votes))
        .route("/login", post(login));

    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .fallback(handler_404)
        .layer(Extension(app_state))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_credentials(true)
                .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE, ACCEPT]),
        )
        .layer(TraceLayer::new_for_http())
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
