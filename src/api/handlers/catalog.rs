use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    api::state::AppState,
    domain::{
        CreateFixedDepartureRequest, CreateHotelRequest, CreateVehicleRequest, FixedDeparture,
        Hotel, Vehicle,
    },
    error::Result,
};

pub async fn list_hotels(State(state): State<AppState>) -> Result<Json<Vec<Hotel>>> {
    Ok(Json(state.service_context.catalog_repo.list_hotels().await?))
}

pub async fn create_hotel(
    State(state): State<AppState>,
    Json(request): Json<CreateHotelRequest>,
) -> Result<(StatusCode, Json<Hotel>)> {
    request.validate()?;
    let hotel = state.service_context.catalog_repo.create_hotel(request).await?;
    Ok((StatusCode::CREATED, Json(hotel)))
}

pub async fn delete_hotel(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.service_context.catalog_repo.delete_hotel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>> {
    Ok(Json(state.service_context.catalog_repo.list_vehicles().await?))
}

pub async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>)> {
    request.validate()?;
    let vehicle = state.service_context.catalog_repo.create_vehicle(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.service_context.catalog_repo.delete_vehicle(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_fixed_departures(
    State(state): State<AppState>,
) -> Result<Json<Vec<FixedDeparture>>> {
    Ok(Json(
        state.service_context.catalog_repo.list_fixed_departures().await?,
    ))
}

pub async fn create_fixed_departure(
    State(state): State<AppState>,
    Json(request): Json<CreateFixedDepartureRequest>,
) -> Result<(StatusCode, Json<FixedDeparture>)> {
    request.validate()?;
    let departure = state
        .service_context
        .catalog_repo
        .create_fixed_departure(request)
        .await?;
    Ok((StatusCode::CREATED, Json(departure)))
}

pub async fn delete_fixed_departure(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state
        .service_context
        .catalog_repo
        .delete_fixed_departure(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
