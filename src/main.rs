use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use redis::Client as RedisClient;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bobo_api::config::Config;
use bobo_api::middleware::auth::JwtSecret;
use bobo_api::services::assistant::AssistantService;
use bobo_api::{db, routes, services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    db::seed_reference_data(&pool).await?;
    info!("Database connected and migrations applied");

    let redis_client = RedisClient::open(config.redis_url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_async_connection().await?;
    info!("Redis connected");

    let assistant = Arc::new(AssistantService::new(&config));
    if config.openai_api_key.is_some() {
        info!("Chat assistant configured (model: {})", config.openai_model);
    } else {
        info!("OPENAI_API_KEY not set — chat assistant disabled");
    }

    services::metrics::start(pool.clone());

    let state = AppState {
        db: pool,
        redis: redis_conn,
        config: config.clone(),
        assistant,
    };

    // CORS: allow the app base origin; localhost is always allowed for
    // local development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        if o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") {
            return true;
        }
        o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(cors_origin);

    let jwt_secret = JwtSecret(config.jwt_secret.clone());

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Auth
        .route("/auth/signup", post(routes::auth::signup))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh_token))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/auth/me", get(routes::auth::me))
        .route("/auth/change-password", post(routes::auth::change_password))
        .route("/auth/update-email", post(routes::auth::update_email))
        .route("/auth/account", delete(routes::auth::delete_account))
        // Babies
        .route("/babies", get(routes::babies::list_babies).post(routes::babies::create_baby))
        .route(
            "/babies/{id}",
            get(routes::babies::get_baby)
                .put(routes::babies::update_baby)
                .delete(routes::babies::delete_baby),
        )
        // Event logs
        .route("/babies/{id}/sleep", get(routes::logs::list_sleep).post(routes::logs::log_sleep))
        .route("/babies/{id}/sleep/{log_id}", delete(routes::logs::delete_sleep))
        .route("/babies/{id}/feedings", get(routes::logs::list_feeding).post(routes::logs::log_feeding))
        .route("/babies/{id}/feedings/{log_id}", delete(routes::logs::delete_feeding))
        .route("/babies/{id}/diapers", get(routes::logs::list_diapers).post(routes::logs::log_diaper))
        .route("/babies/{id}/diapers/{log_id}", delete(routes::logs::delete_diaper))
        .route(
            "/babies/{id}/activity-logs",
            get(routes::logs::list_activity_logs).post(routes::logs::log_activity),
        )
        .route("/babies/{id}/activity-logs/{log_id}", delete(routes::logs::delete_activity_log))
        .route("/babies/{id}/growth", get(routes::logs::list_growth).post(routes::logs::log_growth))
        .route("/babies/{id}/growth/{log_id}", delete(routes::logs::delete_growth))
        .route("/babies/{id}/growth-summary", get(routes::logs::growth_summary))
        // Catalogs
        .route("/babies/{id}/activities", get(routes::activities::library))
        .route("/babies/{id}/activities/surprise", get(routes::activities::surprise))
        .route("/babies/{id}/activities/complete", post(routes::activities::complete))
        .route("/babies/{id}/nutrition", get(routes::nutrition::stages))
        .route("/babies/{id}/milestones", get(routes::milestones::overview))
        .route("/babies/{id}/milestones/{milestone_id}", post(routes::milestones::toggle))
        .route("/babies/{id}/insights", get(routes::insights::for_baby))
        // Community forum
        .route("/forum/categories", get(routes::forum::list_categories))
        .route("/forum/categories/{id}/threads", get(routes::forum::list_threads))
        .route("/forum/threads", post(routes::forum::create_thread))
        .route("/forum/threads/{id}", get(routes::forum::thread_detail))
        .route("/forum/threads/{id}/posts", post(routes::forum::add_post))
        .route("/forum/trending", get(routes::forum::trending))
        // Marketplace
        .route(
            "/marketplace/listings",
            get(routes::marketplace::browse).post(routes::marketplace::create_listing),
        )
        .route(
            "/marketplace/listings/{id}",
            get(routes::marketplace::listing_detail)
                .put(routes::marketplace::update_listing)
                .delete(routes::marketplace::delete_listing),
        )
        .route("/marketplace/listings/{id}/favorite", post(routes::marketplace::toggle_favorite))
        .route("/marketplace/listings/{id}/messages", post(routes::marketplace::message_seller))
        .route("/marketplace/my-listings", get(routes::marketplace::my_listings))
        .route("/marketplace/favorites", get(routes::marketplace::list_favorites))
        // AI chat assistant
        .route("/assistant/chat", post(routes::assistant::chat))
        // Media
        .route("/media", post(routes::media::upload_photo))
        .route("/media/files/{*path}", get(routes::media::serve_media))
        .layer(axum::Extension(jwt_secret))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Global body size limit of 20 MB (covers photo uploads)
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("bobo API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
