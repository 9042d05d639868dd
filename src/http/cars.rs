//! `/api/cars` handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use bytes::Bytes;

use super::response::{parse_body, ApiFailure, Operation};
use crate::error::CatalogError;
use crate::models::CarInput;
use crate::services::AppState;

fn car_input(op: Operation, body: &Bytes) -> Result<CarInput, ApiFailure> {
    parse_body(body).map_err(|e| ApiFailure::from_error(op, &CatalogError::from(e)))
}

pub async fn list_cars(State(state): State<AppState>) -> Response {
    match state.cars.list().await {
        Ok(cars) => Json(cars).into_response(),
        Err(e) => ApiFailure::from_error(Operation::ListCars, &e).into_response(),
    }
}

pub async fn get_car(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.cars.get(&id).await {
        Ok(car) => Json(car).into_response(),
        Err(e) => ApiFailure::from_error(Operation::GetCar, &e).into_response(),
    }
}

pub async fn create_car(State(state): State<AppState>, body: Bytes) -> Response {
    let input = match car_input(Operation::CreateCar, &body) {
        Ok(input) => input,
        Err(failure) => return failure.into_response(),
    };

    match state.cars.create(input).await {
        Ok(car) => (StatusCode::CREATED, Json(car)).into_response(),
        Err(e) => ApiFailure::from_error(Operation::CreateCar, &e).into_response(),
    }
}

pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let input = match car_input(Operation::UpdateCar, &body) {
        Ok(input) => input,
        Err(failure) => return failure.into_response(),
    };

    match state.cars.update(&id, input).await {
        Ok(car) => Json(car).into_response(),
        Err(e) => ApiFailure::from_error(Operation::UpdateCar, &e).into_response(),
    }
}

pub async fn delete_car(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.cars.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => ApiFailure::from_error(Operation::DeleteCar, &e).into_response(),
    }
}
