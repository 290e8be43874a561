use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use service::restaurant::{NewRestaurant, Restaurant, RestaurantList, RestaurantPatch};
use tracing::info;

use crate::{errors::ApiError, routes::ServerState};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindQuery {
    /// Exact restaurant name
    pub name: Option<String>,
}

#[utoipa::path(
    get, path = "/restaurant", tag = "restaurant",
    responses(
        (status = 200, description = "All restaurants", body = crate::openapi::RestaurantListDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<RestaurantList>, ApiError> {
    let restaurants = state.store.list_all().await?;
    info!(count = restaurants.len(), "list restaurants");
    Ok(Json(RestaurantList { restaurants }))
}

/// Absent names answer `200 null`, not 404.
#[utoipa::path(
    get, path = "/restaurant/find", tag = "restaurant",
    params(FindQuery),
    responses(
        (status = 200, description = "Matching restaurant or null", body = crate::openapi::RestaurantDoc),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn find(
    State(state): State<ServerState>,
    Query(q): Query<FindQuery>,
) -> Result<Json<Option<Restaurant>>, ApiError> {
    let Some(name) = q.name else { return Ok(Json(None)) };
    Ok(Json(state.store.get_by_name(&name).await?))
}

#[utoipa::path(
    post, path = "/restaurant", tag = "restaurant",
    request_body = crate::openapi::NewRestaurantDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::RestaurantDoc),
        (status = 400, description = "Invalid payload", body = crate::openapi::ErrorBody),
        (status = 409, description = "Name already taken", body = crate::openapi::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewRestaurant>, JsonRejection>,
) -> Result<(StatusCode, Json<Restaurant>), ApiError> {
    let Json(input) = payload?;
    input.validate()?;
    let created = state.store.insert(input).await?;
    info!(name = %created.name, "created restaurant");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    delete, path = "/restaurant/{name}", tag = "restaurant",
    params(("name" = String, Path, description = "Restaurant name")),
    responses(
        (status = 200, description = "Deleted restaurant", body = crate::openapi::RestaurantDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<Restaurant>, ApiError> {
    let removed = state.store.delete_by_name(&name).await?;
    info!(name = %removed.name, "deleted restaurant");
    Ok(Json(removed))
}

#[utoipa::path(
    patch, path = "/restaurant/{name}", tag = "restaurant",
    params(("name" = String, Path, description = "Restaurant name")),
    request_body = crate::openapi::RestaurantPatchDoc,
    responses(
        (status = 200, description = "Updated restaurant", body = crate::openapi::RestaurantDoc),
        (status = 400, description = "Invalid payload", body = crate::openapi::ErrorBody),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBody),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorBody)
    )
)]
pub async fn patch(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    payload: Result<Json<RestaurantPatch>, JsonRejection>,
) -> Result<Json<Restaurant>, ApiError> {
    let Json(input) = payload?;
    let updated = state.store.patch_by_name(&name, input).await?;
    info!(name = %updated.name, "patched restaurant");
    Ok(Json(updated))
}
