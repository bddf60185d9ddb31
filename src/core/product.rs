//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, updating and deleting
//! catalogue products. Input arrives as the allowlisted [`NewProduct`] and
//! [`ProductPatch`] types and is validated before the document is touched, so an
//! invalid request never causes a write.

use crate::{
    core::{audit, resource},
    entities::{
        AuditAction, DEFAULT_ACTOR, NewProduct, Product, ProductPatch, placeholder_image,
    },
    errors::{Error, Result},
    store::DocumentStore,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

/// Retrieves all products in insertion order.
///
/// # Errors
/// Returns an error if the document cannot be loaded.
#[instrument(skip(store))]
pub async fn list_products(store: &DocumentStore) -> Result<Vec<Product>> {
    resource::list_all(store).await
}

/// Retrieves a specific product by its identifier.
///
/// # Errors
/// Returns `Error::NotFound` if no product has this id.
#[instrument(skip(store))]
pub async fn get_product(store: &DocumentStore, id: &str) -> Result<Product> {
    resource::get_by_id(store, id).await
}

/// Creates a new product, performing input validation.
///
/// The product receives a fresh identifier and creation timestamp. A missing or
/// blank image is replaced by a placeholder showing the product name.
///
/// # Errors
/// Returns an error if:
/// - `name`, `category`, `price` or `stock` is missing
/// - The name is blank, the price is negative or not finite, or the stock is negative
/// - The document cannot be loaded or saved
#[instrument(skip(store, input))]
pub async fn create_product(store: &DocumentStore, input: NewProduct) -> Result<Product> {
    let mut product = build_product(input, Utc::now())?;

    let product = store
        .update(move |doc| {
            product.id = resource::fresh_id::<Product>(doc);
            doc.products.push(product.clone());
            Ok(product)
        })
        .await?;

    info!("Product created: {} ({})", product.id, product.name);
    audit::record_best_effort(
        store,
        AuditAction::ProductCreated,
        format!("Product created: {}", product.name),
        DEFAULT_ACTOR,
    )
    .await;
    Ok(product)
}

/// Merges `patch` over an existing product and stamps its update time.
///
/// # Errors
/// Returns `Error::Validation` if a supplied field is invalid, `Error::NotFound`
/// if the product does not exist, or a storage error.
#[instrument(skip(store, patch))]
pub async fn update_product(
    store: &DocumentStore,
    id: &str,
    patch: ProductPatch,
) -> Result<Product> {
    validate_patch(&patch)?;
    if patch.is_empty() {
        debug!("Empty patch for product {}, only updatedAt changes", id);
    }
    let now = Utc::now();

    let product = store
        .update(move |doc| {
            let product = doc
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| resource::not_found::<Product>(id))?;
            apply_patch(product, patch, now)?;
            Ok(product.clone())
        })
        .await?;

    info!("Product updated: {}", product.id);
    audit::record_best_effort(
        store,
        AuditAction::ProductUpdated,
        format!("Product updated: {}", product.name),
        DEFAULT_ACTOR,
    )
    .await;
    Ok(product)
}

/// Deletes a product and returns the removed record.
///
/// # Errors
/// Returns `Error::NotFound` if the product does not exist, or a storage error.
#[instrument(skip(store))]
pub async fn delete_product(store: &DocumentStore, id: &str) -> Result<Product> {
    let product: Product = resource::delete_by_id(store, id).await?;

    info!("Product deleted: {}", product.id);
    audit::record_best_effort(
        store,
        AuditAction::ProductDeleted,
        format!("Product deleted: {}", product.name),
        DEFAULT_ACTOR,
    )
    .await;
    Ok(product)
}

fn build_product(input: NewProduct, now: DateTime<Utc>) -> Result<Product> {
    let name = validate_name(input.name.as_deref().ok_or_else(|| missing("name"))?)?;
    let category = input.category.ok_or_else(|| missing("category"))?;
    let price = validate_price(input.price.ok_or_else(|| missing("price"))?)?;
    let stock = validate_stock(input.stock.ok_or_else(|| missing("stock"))?)?;
    let image = non_blank(input.image).unwrap_or_else(|| placeholder_image(&name));

    Ok(Product {
        id: String::new(),
        name,
        category,
        price,
        stock,
        description: non_blank(input.description),
        image,
        created_at: now,
        updated_at: None,
    })
}

fn validate_patch(patch: &ProductPatch) -> Result<()> {
    if let Some(name) = patch.name.as_deref() {
        validate_name(name)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(stock) = patch.stock {
        validate_stock(stock)?;
    }
    Ok(())
}

fn apply_patch(product: &mut Product, patch: ProductPatch, now: DateTime<Utc>) -> Result<()> {
    if let Some(name) = patch.name.as_deref() {
        product.name = validate_name(name)?;
    }
    if let Some(category) = patch.category {
        product.category = category;
    }
    if let Some(price) = patch.price {
        product.price = validate_price(price)?;
    }
    if let Some(stock) = patch.stock {
        product.stock = validate_stock(stock)?;
    }
    if patch.description.is_some() {
        product.description = non_blank(patch.description);
    }
    if let Some(image) = patch.image {
        product.image =
            non_blank(Some(image)).unwrap_or_else(|| placeholder_image(&product.name));
    }
    product.updated_at = Some(now);
    Ok(())
}

fn missing(field: &str) -> Error {
    Error::validation(format!("Field '{field}' is required"))
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Product name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::validation(format!(
            "Invalid price {price}: must be a non-negative number"
        )));
    }
    Ok(price)
}

fn validate_stock(stock: i64) -> Result<u32> {
    u32::try_from(stock).map_err(|_| {
        Error::validation(format!(
            "Invalid stock {stock}: must be a non-negative integer"
        ))
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::{Category, PLACEHOLDER_IMAGE_BASE};
    use crate::test_utils::{create_test_product, new_product, setup_test_store};

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;

        // Each required field missing in turn
        for field in ["name", "category", "price", "stock"] {
            let mut input = new_product("Pad");
            match field {
                "name" => input.name = None,
                "category" => input.category = None,
                "price" => input.price = None,
                _ => input.stock = None,
            }
            let err = create_product(&store, input).await.unwrap_err();
            assert!(
                matches!(&err, Error::Validation { message } if message.contains(field)),
                "unexpected error for missing {field}: {err:?}"
            );
        }

        // Blank name
        assert!(matches!(
            create_product(&store, new_product("   ")).await,
            Err(Error::Validation { .. })
        ));

        // Negative and non-finite price
        for price in [-1.0, f64::NAN, f64::INFINITY] {
            let mut input = new_product("Pad");
            input.price = Some(price);
            assert!(matches!(
                create_product(&store, input).await,
                Err(Error::Validation { .. })
            ));
        }

        // Negative stock
        let mut input = new_product("Pad");
        input.stock = Some(-3);
        assert!(matches!(
            create_product(&store, input).await,
            Err(Error::Validation { .. })
        ));

        // Nothing was written, not even audit entries
        let doc = store.load().await?;
        assert!(doc.products.is_empty());
        assert!(doc.logs.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input_plus_generated_fields() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;

        let input = NewProduct {
            name: Some("Pad".to_string()),
            category: Some(Category::Manettes),
            price: Some(29.99),
            stock: Some(5),
            description: Some("Wireless controller".to_string()),
            image: Some("https://img.example/pad.png".to_string()),
        };
        let created = create_product(&store, input).await?;
        let fetched = get_product(&store, &created.id).await?;

        assert_eq!(fetched, created);
        assert!(!fetched.id.is_empty());
        assert_eq!(fetched.name, "Pad");
        assert_eq!(fetched.category, Category::Manettes);
        assert_eq!(fetched.price, 29.99);
        assert_eq!(fetched.stock, 5);
        assert_eq!(fetched.description.as_deref(), Some("Wireless controller"));
        assert_eq!(fetched.image, "https://img.example/pad.png");
        assert!(fetched.updated_at.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_defaults_image_to_placeholder() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;

        let mut input = new_product("Pad Pro");
        input.image = Some("  ".to_string());
        let product = create_product(&store, input).await?;

        assert!(product.image.starts_with(PLACEHOLDER_IMAGE_BASE));
        assert!(product.image.contains("Pad+Pro"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_tracks_create_and_delete() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;

        let first = create_test_product(&store, "First").await?;
        let second = create_test_product(&store, "Second").await?;
        let names: Vec<String> = list_products(&store)
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);

        delete_product(&store, &first.id).await?;
        let remaining = list_products(&store).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);

        assert!(matches!(
            get_product(&store, &first.id).await,
            Err(Error::NotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_merges_fields_and_stamps_time() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;
        let product = create_test_product(&store, "Pad").await?;

        let patch = ProductPatch {
            price: Some(24.5),
            stock: Some(12),
            ..Default::default()
        };
        let updated = update_product(&store, &product.id, patch).await?;

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "Pad");
        assert_eq!(updated.category, product.category);
        assert_eq!(updated.price, 24.5);
        assert_eq!(updated.stock, 12);
        assert_eq!(updated.created_at, product.created_at);
        assert!(updated.updated_at.is_some());
        assert_eq!(get_product(&store, &product.id).await?, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_fields_without_writing() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;
        let product = create_test_product(&store, "Pad").await?;
        let logs_before = store.load().await?.logs.len();

        let patch = ProductPatch {
            price: Some(-5.0),
            ..Default::default()
        };
        assert!(matches!(
            update_product(&store, &product.id, patch).await,
            Err(Error::Validation { .. })
        ));

        let doc = store.load().await?;
        assert_eq!(doc.products[0], product);
        assert_eq!(doc.logs.len(), logs_before);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;

        assert!(matches!(
            update_product(&store, "missing", ProductPatch::default()).await,
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            delete_product(&store, "missing").await,
            Err(Error::NotFound { .. })
        ));
        assert!(store.load().await?.logs.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_each_mutation_logs_exactly_once() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;

        let product = create_test_product(&store, "Pad").await?;
        let logs = store.load().await?.logs;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, AuditAction::ProductCreated);
        assert!(logs[0].details.contains("Pad"));
        assert_eq!(logs[0].admin, DEFAULT_ACTOR);

        let patch = ProductPatch {
            name: Some("Pad v2".to_string()),
            ..Default::default()
        };
        update_product(&store, &product.id, patch).await?;
        let logs = store.load().await?.logs;
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[1].action, AuditAction::ProductUpdated);
        assert!(logs[1].details.contains("Pad v2"));

        delete_product(&store, &product.id).await?;
        let logs = store.load().await?.logs;
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[2].action, AuditAction::ProductDeleted);
        assert!(logs[2].details.contains("Pad v2"));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_audit_append_keeps_the_mutation() -> Result<()> {
        let (_dir, store) = setup_test_store().await?;

        // The product save goes through, the audit save that follows fails.
        store.fail_saves_after(1);
        let product = create_test_product(&store, "Pad").await?;
        let doc = store.load().await?;
        assert_eq!(doc.products, vec![product.clone()]);
        assert!(doc.logs.is_empty());

        store.fail_saves_after(1);
        delete_product(&store, &product.id).await?;
        let doc = store.load().await?;
        assert!(doc.products.is_empty());
        assert!(doc.logs.is_empty());

        // A failing primary save is still reported.
        store.fail_saves_after(0);
        assert!(matches!(
            create_test_product(&store, "Stick").await,
            Err(Error::Io(_))
        ));
        Ok(())
    }
}
