//! Listing query strings and paged responses.
//!
//! Query values arrive as text, so numbers are checked as digit strings
//! before they are parsed.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::services::PageRequest;
use crate::utils::validate::{Field, FieldOrder, digits, on_off, required, sort_order};

/// Query parameters of `GET /categories`.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
pub struct CategoryListQuery {
    /// `asc` or `desc`, by `category_id`
    #[serde(default)]
    #[param(value_type = Option<String>, example = "desc")]
    #[validate(custom(function = "sort_order", code = "PAG_01", message = "Invalid order"))]
    pub order: Field<String>,

    /// Page size, every category when absent
    #[serde(default)]
    #[param(value_type = Option<String>, example = "10")]
    #[validate(custom(function = "digits", code = "USR_10", message = "Invalid limit"))]
    pub limit: Field<String>,

    /// Page number (1-based)
    #[serde(default)]
    #[param(value_type = Option<String>, example = "1")]
    #[validate(custom(function = "digits", code = "USR_10", message = "Invalid page"))]
    pub page: Field<String>,
}

impl FieldOrder for CategoryListQuery {
    const FIELDS: &'static [&'static str] = &["order", "limit", "page"];
}

impl CategoryListQuery {
    pub fn descending(&self) -> bool {
        self.order
            .value()
            .is_some_and(|order| order.eq_ignore_ascii_case("desc"))
    }

    pub fn page(&self) -> i64 {
        number(&self.page).unwrap_or(1)
    }

    pub fn limit(&self) -> Option<i64> {
        number(&self.limit)
    }
}

/// Query parameters of the product listings.
///
/// Products are always listed by `display`; `order` is only checked.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
pub struct ProductListQuery {
    #[serde(default)]
    #[param(value_type = Option<String>, example = "asc")]
    #[validate(custom(function = "sort_order", code = "PAG_01", message = "Invalid order"))]
    pub order: Field<String>,

    #[serde(default)]
    #[param(value_type = Option<String>, example = "1")]
    #[validate(custom(function = "digits", code = "USR_10", message = "Invalid page"))]
    pub page: Field<String>,

    #[serde(default)]
    #[param(value_type = Option<String>, example = "20")]
    #[validate(custom(function = "digits", code = "USR_10", message = "Invalid limit"))]
    pub limit: Field<String>,

    /// Descriptions longer than this are cut and end with `...`
    #[serde(default)]
    #[param(value_type = Option<String>, example = "200")]
    #[validate(custom(
        function = "digits",
        code = "USR_10",
        message = "Invalid description length"
    ))]
    pub description_length: Field<String>,

    #[serde(default)]
    #[param(value_type = Option<String>, example = "on")]
    #[validate(custom(
        function = "on_off",
        code = "USR_10",
        message = "Invalid all words query parameter"
    ))]
    pub all_words: Field<String>,
}

impl FieldOrder for ProductListQuery {
    const FIELDS: &'static [&'static str] =
        &["order", "limit", "page", "description_length", "all_words"];
}

impl ProductListQuery {
    pub fn page_request(&self, default_limit: i64) -> PageRequest {
        page_request(
            &self.page,
            &self.limit,
            &self.description_length,
            default_limit,
        )
    }
}

/// Query parameters of `GET /products/search`.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
pub struct SearchQuery {
    /// Words to search for
    #[serde(default)]
    #[param(value_type = String, example = "arc")]
    #[validate(custom(
        function = "required",
        code = "USR_02",
        message = "Query string is required"
    ))]
    pub query_string: Field<String>,

    #[serde(default)]
    #[param(value_type = Option<String>, example = "asc")]
    #[validate(custom(function = "sort_order", code = "PAG_01", message = "Invalid order"))]
    pub order: Field<String>,

    /// `on` matches every word, `off` any word
    #[serde(default)]
    #[param(value_type = Option<String>, example = "on")]
    #[validate(custom(
        function = "on_off",
        code = "USR_10",
        message = "Invalid all words query parameter"
    ))]
    pub all_words: Field<String>,

    #[serde(default)]
    #[param(value_type = Option<String>, example = "1")]
    #[validate(custom(function = "digits", code = "USR_10", message = "Invalid page"))]
    pub page: Field<String>,

    #[serde(default)]
    #[param(value_type = Option<String>, example = "20")]
    #[validate(custom(function = "digits", code = "USR_10", message = "Invalid limit"))]
    pub limit: Field<String>,

    #[serde(default)]
    #[param(value_type = Option<String>, example = "200")]
    #[validate(custom(
        function = "digits",
        code = "USR_10",
        message = "Invalid description length"
    ))]
    pub description_length: Field<String>,
}

impl FieldOrder for SearchQuery {
    const FIELDS: &'static [&'static str] = &[
        "query_string",
        "order",
        "limit",
        "page",
        "description_length",
        "all_words",
    ];
}

impl SearchQuery {
    pub fn query(&self) -> &str {
        self.query_string.value().map(String::as_str).unwrap_or_default()
    }

    pub fn all_words(&self) -> &str {
        self.all_words.value().map(String::as_str).unwrap_or("on")
    }

    pub fn page_request(&self) -> PageRequest {
        page_request(&self.page, &self.limit, &self.description_length, 20)
    }
}

const DEFAULT_DESCRIPTION_LENGTH: i64 = 200;

fn number(field: &Field<String>) -> Option<i64> {
    field.value().and_then(|raw| raw.parse().ok())
}

fn page_request(
    page: &Field<String>,
    limit: &Field<String>,
    description_length: &Field<String>,
    default_limit: i64,
) -> PageRequest {
    PageRequest {
        page: number(page).unwrap_or(1),
        limit: number(limit).unwrap_or(default_limit),
        description_length: number(description_length).unwrap_or(DEFAULT_DESCRIPTION_LENGTH),
    }
}

/// A page of rows with the total number of matches.
#[derive(Debug, Serialize, ToSchema)]
pub struct CountedRows<T> {
    pub count: i64,
    pub rows: Vec<T>,
}

/// A page of categories, echoing the effective page and limit.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPage<T> {
    pub count: i64,
    pub rows: Vec<T>,
    pub limit: i64,
    pub page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ErrorCode};
    use crate::utils::validate::check;

    fn query<T: serde::de::DeserializeOwned>(raw: &str) -> T {
        let uri: axum::http::Uri = format!("/test?{raw}").parse().unwrap();
        axum::extract::Query::<T>::try_from_uri(&uri).unwrap().0
    }

    fn failing_field<T: Validate + FieldOrder>(value: &T) -> (ErrorCode, String, String) {
        match check(value) {
            Err(AppError::Validation {
                code,
                field,
                message,
            }) => (code, field, message),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_category_defaults() {
        let q: CategoryListQuery = query("");
        assert!(check(&q).is_ok());
        assert!(!q.descending());
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), None);
    }

    #[test]
    fn test_category_order_is_case_insensitive() {
        let q: CategoryListQuery = query("order=DESC&limit=5&page=2");
        assert!(check(&q).is_ok());
        assert!(q.descending());
        assert_eq!(q.limit(), Some(5));
        assert_eq!(q.page(), 2);
    }

    #[test]
    fn test_order_is_checked_first() {
        let q: CategoryListQuery = query("order=sideways&limit=x");
        let (code, field, message) = failing_field(&q);
        assert_eq!(code, ErrorCode::PaginationOrderNotMatched);
        assert_eq!(field, "order");
        assert_eq!(message, "Invalid order");
    }

    #[test]
    fn test_limit_before_page() {
        let q: ProductListQuery = query("page=x&limit=y");
        let (code, field, message) = failing_field(&q);
        assert_eq!(code, ErrorCode::InvalidField);
        assert_eq!(field, "limit");
        assert_eq!(message, "Invalid limit");

        let q: ProductListQuery = query("description_length=-1");
        let (_, field, message) = failing_field(&q);
        assert_eq!(field, "description_length");
        assert_eq!(message, "Invalid description length");
    }

    #[test]
    fn test_product_listing_checks_order_and_all_words() {
        let q: ProductListQuery = query("order=sideways&all_words=maybe");
        let (code, field, message) = failing_field(&q);
        assert_eq!(code, ErrorCode::PaginationOrderNotMatched);
        assert_eq!(field, "order");
        assert_eq!(message, "Invalid order");

        let q: ProductListQuery = query("order=Asc&all_words=maybe");
        let (code, field, message) = failing_field(&q);
        assert_eq!(code, ErrorCode::InvalidField);
        assert_eq!(field, "all_words");
        assert_eq!(message, "Invalid all words query parameter");

        let q: ProductListQuery = query("order=desc&all_words=off&page=2");
        assert!(check(&q).is_ok());
    }

    #[test]
    fn test_search_checks_order_after_query_string() {
        let q: SearchQuery = query("query_string=arc&order=sideways&limit=x");
        let (code, field, _) = failing_field(&q);
        assert_eq!(code, ErrorCode::PaginationOrderNotMatched);
        assert_eq!(field, "order");
    }

    #[test]
    fn test_product_defaults() {
        let q: ProductListQuery = query("");
        assert_eq!(
            q.page_request(200),
            PageRequest {
                page: 1,
                limit: 200,
                description_length: 200
            }
        );
    }

    #[test]
    fn test_search_requires_query_string() {
        let q: SearchQuery = query("all_words=maybe");
        let (code, field, message) = failing_field(&q);
        assert_eq!(code, ErrorCode::RequiredField);
        assert_eq!(field, "query_string");
        assert_eq!(message, "Query string is required");

        let q: SearchQuery = query("query_string=arc&all_words=maybe");
        let (_, field, message) = failing_field(&q);
        assert_eq!(field, "all_words");
        assert_eq!(message, "Invalid all words query parameter");
    }

    #[test]
    fn test_search_defaults() {
        let q: SearchQuery = query("query_string=arc");
        assert!(check(&q).is_ok());
        assert_eq!(q.query(), "arc");
        assert_eq!(q.all_words(), "on");
        assert_eq!(q.page_request().limit, 20);
    }
}
