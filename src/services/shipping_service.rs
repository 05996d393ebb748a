//! Shipping regions, shipping options and tax rates.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{ShippingOption, ShippingRegion, Tax};
use crate::repositories::ShippingRepository;

/// The "Please Select" placeholder region, which has no options.
const PLACEHOLDER_REGION_ID: i32 = 1;

#[derive(Clone)]
pub struct ShippingService {
    repo: ShippingRepository,
}

impl ShippingService {
    pub fn new(repo: ShippingRepository) -> Self {
        Self { repo }
    }

    pub async fn regions(&self) -> AppResult<Vec<ShippingRegion>> {
        self.repo.regions().await
    }

    /// Shipping options of a region.
    ///
    /// # Returns
    /// The options, or `USR_09` when a region other than the placeholder has none
    pub async fn options(&self, region_id: i32) -> AppResult<Vec<ShippingOption>> {
        let options = self.repo.options_in_region(region_id).await?;
        if options.is_empty() && region_id != PLACEHOLDER_REGION_ID {
            return Err(AppError::not_found(
                ErrorCode::InvalidShippingRegion,
                "id",
                region_id,
            ));
        }
        Ok(options)
    }

    pub async fn taxes(&self) -> AppResult<Vec<Tax>> {
        self.repo.list_taxes().await
    }

    pub async fn tax(&self, id: i32) -> AppResult<Tax> {
        self.repo
            .find_tax(id)
            .await?
            .ok_or_else(|| AppError::not_found(ErrorCode::TaxNotFound, "id", id))
    }
}
