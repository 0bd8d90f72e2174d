//! Route table

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use admin_core::Role;
use admin_shared::constants::{MAX_PACKAGE_SIZE, MIB};

use crate::handlers::{
    auth, dashboard, health, menus, navigation, packages, public, roles, user_flows, users,
    workflows,
};
use crate::middleware::{require_role, session_middleware};
use crate::state::AppState;

/// Largest accepted request body: one package plus form fields
const MAX_BODY_BYTES: usize = (MAX_PACKAGE_SIZE + MIB) as usize;

pub fn build_router(state: AppState) -> Router {
    // Anonymous
    let open = Router::new()
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/sign-out", post(auth::sign_out))
        .route("/auth/session", get(auth::session))
        .route("/public/workflows", get(public::workflows));

    // Any signed-in user
    let signed_in = Router::new()
        .route("/navigation", get(navigation::navigation))
        .route("/dashboard", get(dashboard::summary))
        .route_layer(from_fn_with_state(None::<Role>, require_role));

    // `user` role (admins included)
    let members = Router::new()
        .route("/packages", get(packages::list).post(packages::create))
        .route("/packages/{id}", put(packages::update).delete(packages::delete))
        .route("/packages/{id}/download", get(packages::download))
        .route("/workflows", get(workflows::list).post(workflows::create))
        .route(
            "/workflows/{id}",
            get(workflows::get).put(workflows::update).delete(workflows::delete),
        )
        .route("/user-flows", get(user_flows::search))
        .route_layer(from_fn_with_state(Some(Role::User), require_role));

    let admins = Router::new()
        .route("/menus", get(menus::list).post(menus::create))
        .route("/menus/parents", get(menus::parents))
        .route("/menus/icons", get(menus::icons))
        .route("/menus/{id}", put(menus::update).delete(menus::delete))
        .route("/roles", get(roles::matrix))
        .route("/roles/{role}/menus", get(roles::granted).put(roles::save))
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", put(users::update).delete(users::delete))
        .route_layer(from_fn_with_state(Some(Role::Admin), require_role));

    let api = Router::new()
        .merge(open)
        .merge(signed_in)
        .merge(members)
        .merge(admins)
        .layer(from_fn_with_state(state.clone(), session_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api)
        .with_state(state.clone())
        .layer(cors_layer(&state.config.app.cors_origin))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
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
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
