use super::order_error::OrderError;
use crate::context::AppContext;
use crate::routes::fields::RequestFields;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{error, info, instrument};

pub const ORDER_PLACED: &str = "Order placed successfully";

/******************************************/
// Placing Order Route
/******************************************/
/**
 * @route   POST /place-order
 * @access  Public
 */
#[instrument(name = "Place an order", skip(context, body))]
pub async fn place_order(
    context: web::Data<AppContext>,
    body: RequestFields,
) -> Result<HttpResponse, OrderError> {
    let order = context.orders.create(&body.into_inner()).await.map_err(|err| {
        error!(error = %err, "Error placing order");
        OrderError::PlaceFailed(err)
    })?;

    info!(order_id = %order.id, status = %order.status, "Order placed");
    Ok(HttpResponse::Ok().json(json!({ "message": ORDER_PLACED, "order": order })))
}

/******************************************/
// Listing Orders Route
/******************************************/
/**
 * @route   GET /orders
 * @access  Public
 */
#[instrument(name = "List orders", skip(context))]
pub async fn list_orders(context: web::Data<AppContext>) -> Result<HttpResponse, OrderError> {
    let orders = context.orders.find_all().await.map_err(|err| {
        error!(error = %err, "Error fetching orders");
        OrderError::FetchFailed(err)
    })?;

    Ok(HttpResponse::Ok().json(orders))
}
