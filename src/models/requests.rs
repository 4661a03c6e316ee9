//! Request DTOs for the catalog service API
//!
//! Defines the structure of incoming HTTP request bodies. Validation happens
//! here, synchronously on the request path, before any store mutation.

use serde::Deserialize;

/// Request body for creating a product (POST /products)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    /// Name of an existing brand
    pub brand: String,
    /// Name of an existing category
    pub category: String,
    /// Non-negative price
    pub price: i64,
}

impl CreateProductRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.brand.trim().is_empty() {
            return Some("Brand name cannot be blank".to_string());
        }
        if self.category.trim().is_empty() {
            return Some("Category name cannot be blank".to_string());
        }
        if self.price < 0 {
            return Some("Price cannot be negative".to_string());
        }
        None
    }
}

/// Request body for changing a product's price (PUT /products/:id)
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    /// New non-negative price
    pub price: i64,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Option<String> {
        if self.price < 0 {
            return Some("Price cannot be negative".to_string());
        }
        None
    }
}

/// Request body for creating a brand (POST /brands)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBrandRequest {
    pub name: String,
}

impl CreateBrandRequest {
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Brand name cannot be blank".to_string());
        }
        None
    }
}

/// Request body for renaming a brand (PUT /brands/:name)
#[derive(Debug, Clone, Deserialize)]
pub struct RenameBrandRequest {
    pub new_name: String,
}

impl RenameBrandRequest {
    pub fn validate(&self) -> Option<String> {
        if self.new_name.trim().is_empty() {
            return Some("Brand name cannot be blank".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product_deserialize() {
        let json = r#"{"brand": "Nike", "category": "top", "price": 8000}"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.brand, "Nike");
        assert_eq!(req.category, "top");
        assert_eq!(req.price, 8000);
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_create_product_rejects_negative_price() {
        let req = CreateProductRequest {
            brand: "Nike".to_string(),
            category: "top".to_string(),
            price: -1,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_create_product_rejects_blank_names() {
        let req = CreateProductRequest {
            brand: "  ".to_string(),
            category: "top".to_string(),
            price: 8000,
        };
        assert!(req.validate().is_some());

        let req = CreateProductRequest {
            brand: "Nike".to_string(),
            category: "".to_string(),
            price: 8000,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_update_product_validation() {
        assert!(UpdateProductRequest { price: 0 }.validate().is_none());
        assert!(UpdateProductRequest { price: -500 }.validate().is_some());
    }

    #[test]
    fn test_brand_request_validation() {
        assert!(CreateBrandRequest {
            name: "Nike".to_string()
        }
        .validate()
        .is_none());
        assert!(CreateBrandRequest {
            name: "".to_string()
        }
        .validate()
        .is_some());
        assert!(RenameBrandRequest {
            new_name: " ".to_string()
        }
        .validate()
        .is_some());
    }
}
