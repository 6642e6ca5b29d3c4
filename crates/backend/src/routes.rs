use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::shared::config::ServerConfig;
use crate::system::state::AppState;
use crate::{handlers, system};

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
}

/// Every /api route; all of them need an authenticated caller
fn api_routes() -> Router<AppState> {
    Router::new()
        // ========================================
        // SYSTEM
        // ========================================
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user),
        )
        // ========================================
        // A001 EVENTS
        // ========================================
        .route(
            "/api/events",
            get(handlers::a001_event::list_all).post(handlers::a001_event::create),
        )
        .route(
            "/api/events/:id",
            get(handlers::a001_event::get_by_id)
                .put(handlers::a001_event::update)
                .delete(handlers::a001_event::delete),
        )
        .route(
            "/api/events/:id/cfp-submissions",
            get(handlers::a002_cfp_submission::list_by_event),
        )
        .route(
            "/api/events/:id/attendees",
            get(handlers::a003_attendee::list_by_event),
        )
        .route(
            "/api/events/:id/sponsorships",
            get(handlers::a004_sponsorship::list_by_event),
        )
        .route(
            "/api/events/:id/assets",
            get(handlers::a006_asset::list_by_event),
        )
        // ========================================
        // A002 CFP SUBMISSIONS
        // ========================================
        .route(
            "/api/cfp-submissions",
            get(handlers::a002_cfp_submission::list_all)
                .post(handlers::a002_cfp_submission::create),
        )
        .route(
            "/api/cfp-submissions/:id",
            get(handlers::a002_cfp_submission::get_by_id)
                .put(handlers::a002_cfp_submission::update)
                .delete(handlers::a002_cfp_submission::delete),
        )
        // ========================================
        // A003 ATTENDEES
        // ========================================
        .route(
            "/api/attendees",
            get(handlers::a003_attendee::list_all).post(handlers::a003_attendee::create),
        )
        .route(
            "/api/attendees/:id",
            get(handlers::a003_attendee::get_by_id)
                .put(handlers::a003_attendee::update)
                .delete(handlers::a003_attendee::delete),
        )
        // ========================================
        // A004 SPONSORSHIPS
        // ========================================
        .route(
            "/api/sponsorships",
            get(handlers::a004_sponsorship::list_all).post(handlers::a004_sponsorship::create),
        )
        .route(
            "/api/sponsorships/:id",
            get(handlers::a004_sponsorship::get_by_id)
                .put(handlers::a004_sponsorship::update)
                .delete(handlers::a004_sponsorship::delete),
        )
        // ========================================
        // A005 APPROVAL WORKFLOWS
        // ========================================
        .route(
            "/api/approval-workflows",
            get(handlers::a005_approval_workflow::list_all)
                .post(handlers::a005_approval_workflow::create),
        )
        .route(
            "/api/approval-workflows/:id",
            get(handlers::a005_approval_workflow::get_by_id)
                .put(handlers::a005_approval_workflow::update)
                .delete(handlers::a005_approval_workflow::delete),
        )
        .route(
            "/api/approval-workflows/:id/submit",
            post(handlers::a005_approval_workflow::submit),
        )
        .route(
            "/api/approval-workflows/:id/decision",
            post(handlers::a005_approval_workflow::decide),
        )
        .route(
            "/api/approval-workflows/:id/resubmit",
            post(handlers::a005_approval_workflow::resubmit),
        )
        // ========================================
        // A006 ASSETS
        // ========================================
        .route(
            "/api/assets",
            get(handlers::a006_asset::list_all).post(handlers::a006_asset::create),
        )
        .route(
            "/api/assets/:id",
            get(handlers::a006_asset::get_by_id)
                .put(handlers::a006_asset::update)
                .delete(handlers::a006_asset::delete),
        )
        // ========================================
        // USECASES
        // ========================================
        // UseCase u501: Import events from CSV
        .route("/api/u501/import/parse", post(handlers::usecases::u501_parse))
        .route(
            "/api/u501/import/preview",
            post(handlers::usecases::u501_preview),
        )
        .route(
            "/api/u501/import/execute",
            post(handlers::usecases::u501_execute),
        )
}

/// Application router
pub fn configure_routes(state: AppState, server: &ServerConfig) -> Router {
    let api = api_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        system::auth::middleware::require_auth,
    ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(api)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors_layer(server))
        .with_state(state)
}
