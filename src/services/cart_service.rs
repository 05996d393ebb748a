//! Shopping cart operations.
//!
//! Carts are anonymous: a client asks for an id once and passes it back on
//! every call. Line edits go through the `shopping_cart_*` routines.

use uuid::Uuid;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{CartItem, CartLine, CartTotal, SavedItem};
use crate::repositories::{CartRepository, ProductRepository};

#[derive(Clone)]
pub struct CartService {
    repo: CartRepository,
    products: ProductRepository,
}

impl CartService {
    pub fn new(repo: CartRepository, products: ProductRepository) -> Self {
        Self { repo, products }
    }

    /// Hands out and persists a fresh cart id.
    pub async fn generate_unique_id(&self) -> AppResult<String> {
        let cart_id = new_cart_id();
        self.repo.create(&cart_id).await?;
        tracing::debug!(%cart_id, "Cart created");
        Ok(cart_id)
    }

    /// Fails with `CAR_01` unless the cart exists.
    pub async fn ensure_cart(&self, cart_id: &str) -> AppResult<()> {
        if self.repo.exists(cart_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(ErrorCode::CartNotFound, "cart_id", cart_id))
        }
    }

    /// Looks a cart line up, failing with `ITM_01` when it is gone.
    pub async fn ensure_item(&self, item_id: i32) -> AppResult<CartLine> {
        self.repo
            .find_line(item_id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::ItemNotFound, "item_id", item_id))
    }

    /// Adds a product, or bumps the quantity of an identical line.
    ///
    /// The cart must already have passed [`CartService::ensure_cart`].
    pub async fn add(
        &self,
        cart_id: &str,
        product_id: i32,
        attributes: &str,
    ) -> AppResult<Vec<CartItem>> {
        if !self.products.exists(product_id).await? {
            return Err(AppError::not_found(
                ErrorCode::ProductNotFound,
                "product_id",
                product_id,
            ));
        }

        self.repo.add_product(cart_id, product_id, attributes).await?;
        self.repo.items(cart_id).await
    }

    /// Changes the quantity of a line and lists the cart it belongs to.
    pub async fn update(&self, line: &CartLine, quantity: i32) -> AppResult<Vec<CartItem>> {
        self.repo.update_quantity(line.item_id, quantity).await?;
        self.repo.items(&line.cart_id).await
    }

    pub async fn remove(&self, item_id: i32) -> AppResult<()> {
        self.ensure_item(item_id).await?;
        self.repo.remove_product(item_id).await
    }

    pub async fn save_for_later(&self, item_id: i32) -> AppResult<()> {
        self.ensure_item(item_id).await?;
        self.repo.save_for_later(item_id).await
    }

    pub async fn move_to_cart(&self, item_id: i32) -> AppResult<()> {
        self.ensure_item(item_id).await?;
        self.repo.move_to_cart(item_id).await
    }

    pub async fn items(&self, cart_id: &str) -> AppResult<Vec<CartItem>> {
        self.ensure_cart(cart_id).await?;
        self.repo.items(cart_id).await
    }

    pub async fn saved(&self, cart_id: &str) -> AppResult<Vec<SavedItem>> {
        self.ensure_cart(cart_id).await?;
        self.repo.saved_items(cart_id).await
    }

    pub async fn total(&self, cart_id: &str) -> AppResult<CartTotal> {
        self.ensure_cart(cart_id).await?;
        self.repo.total_amount(cart_id).await
    }

    /// Drops every line of the cart; the cart id stays valid.
    pub async fn empty(&self, cart_id: &str) -> AppResult<Vec<CartItem>> {
        self.ensure_cart(cart_id).await?;
        self.repo.empty(cart_id).await?;
        Ok(Vec::new())
    }
}

fn new_cart_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_id_is_32_lowercase_hex_chars() {
        let id = new_cart_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_cart_ids_differ() {
        assert_ne!(new_cart_id(), new_cart_id());
    }
}
