use axum::{
    Router,
    routing::{get, post},
};
use configuration::Config;
use core_types::{Classroom, School};
use database::{ClassroomStore, DbRepository, SchoolStore};
use search_index::{ElasticIndex, SearchIndex};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// Both the store and the index sit behind their trait seams so the test
/// suite can drive the router against in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub schools: Arc<dyn SchoolStore>,
    pub classrooms: Arc<dyn ClassroomStore>,
    pub school_index: Arc<dyn SearchIndex<School>>,
    pub classroom_index: Arc<dyn SearchIndex<Classroom>>,
}

/// Builds the application router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/schools",
            post(handlers::schools::create)
                .put(handlers::schools::update)
                .get(handlers::schools::list),
        )
        .route(
            "/api/schools/:id",
            get(handlers::schools::get_one).delete(handlers::schools::remove),
        )
        .route(
            "/api/schools/:id/classrooms",
            get(handlers::schools::list_classrooms),
        )
        .route("/api/_search/schools", get(handlers::schools::search))
        .route(
            "/api/classrooms",
            post(handlers::classrooms::create)
                .put(handlers::classrooms::update)
                .get(handlers::classrooms::list),
        )
        .route(
            "/api/classrooms/:id",
            get(handlers::classrooms::get_one).delete(handlers::classrooms::remove),
        )
        .route("/api/_search/classrooms", get(handlers::classrooms::search))
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Wires the Postgres repository and the Elasticsearch client into the
/// router and serves until the process is stopped.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let state = Arc::new(AppState {
        schools: Arc::new(db_repo.clone()),
        classrooms: Arc::new(db_repo),
        school_index: Arc::new(ElasticIndex::<School>::new(&config.search.base_url)),
        classroom_index: Arc::new(ElasticIndex::<Classroom>::new(&config.search.base_url)),
    });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
