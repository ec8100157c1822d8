use super::product_error::ProductError;
use crate::context::AppContext;
use crate::routes::fields::RequestFields;
use actix_web::{web, HttpResponse};
use tracing::{error, info, instrument};

/******************************************/
// Adding Product Route
/******************************************/
/**
 * @route   POST /add-product
 * @access  Public
 */
#[instrument(name = "Add a product", skip(context, body))]
pub async fn add_product(
    context: web::Data<AppContext>,
    body: RequestFields,
) -> Result<HttpResponse, ProductError> {
    let product = context.products.create(&body.into_inner()).await.map_err(|err| {
        error!(error = %err, "Error saving product");
        ProductError::SaveFailed(err)
    })?;

    info!(product_id = %product.id, "Product saved");
    Ok(HttpResponse::Created().json(product))
}

/******************************************/
// Listing Products Route
/******************************************/
/**
 * @route   GET /products
 * @access  Public
 */
#[instrument(name = "List products", skip(context))]
pub async fn list_products(context: web::Data<AppContext>) -> Result<HttpResponse, ProductError> {
    let products = context.products.find_all().await.map_err(|err| {
        error!(error = %err, "Error fetching products");
        ProductError::FetchFailed(err)
    })?;

    Ok(HttpResponse::Ok().json(products))
}
