use super::{
    handlers::{cities, health, points_of_interest},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Cities
        .route("/api/cities", get(cities::get_cities))
        .route("/api/cities/{city_id}", get(cities::get_city))
        // Points of interest
        .route(
            "/api/cities/{city_id}/pointsofinterest",
            get(points_of_interest::get_points_of_interest)
                .post(points_of_interest::create_point_of_interest),
        )
        .route(
            "/api/cities/{city_id}/pointsofinterest/{id}",
            get(points_of_interest::get_point_of_interest)
                .put(points_of_interest::update_point_of_interest)
                .patch(points_of_interest::partially_update_point_of_interest)
                .delete(points_of_interest::delete_point_of_interest),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
