/*
 * Responsibility
 * - /products CRUD handlers
 * - Identity arrives via CurrentPrincipal (attached by the auth pipeline);
 *   handlers never re-derive it. The policy gate has already run: reaching a
 *   mutating handler implies the principal holds ADMIN.
 */
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header, header::HeaderName},
};
use uuid::Uuid;

use crate::{
    api::{
        dto::products::{CreateProductRequest, ProductResponse, UpdateProductRequest},
        extractors::CurrentPrincipal,
    },
    error::AppError,
    repos::product_repo::ProductRecord,
    state::AppState,
};

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let records = state.products.list_all().await?;
    let res = records.into_iter().map(ProductResponse::from).collect();
    Ok(Json(res))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProductResponse>, AppError> {
    let record = state
        .products
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("product"))?;

    Ok(Json(record.into()))
}

pub async fn create_product(
    State(state): State<AppState>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<ProductResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_PRODUCT", msg))?;

    let record = state
        .products
        .save(ProductRecord {
            id: Uuid::new_v4(),
            name: req.name,
            price: req.price,
            unit: req.unit,
        })
        .await?;

    tracing::info!(
        product_id = %record.id,
        subject = principal.subject.as_deref().unwrap_or("-"),
        "product created"
    );

    let location = format!("/products/{}", record.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record.into()),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_PRODUCT", msg))?;

    // 404 before write: an unknown id must never look like a denial
    if state.products.get(id).await?.is_none() {
        return Err(AppError::not_found("product"));
    }

    let record = state
        .products
        .save(ProductRecord {
            id,
            name: req.name,
            price: req.price,
            unit: req.unit,
        })
        .await?;

    Ok(Json(record.into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = state.products.delete(id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("product"))
    }
}
