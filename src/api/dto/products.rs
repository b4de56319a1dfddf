/*
 * Responsibility
 * - Product request/response DTOs
 * - validate() for shape checks (business rules stay out of DTOs)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::product_repo::ProductRecord;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub unit: String,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_fields(&self.name, self.price, &self.unit)
    }
}

/// Full replacement of a product's fields; the id comes from the path.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
    pub unit: String,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_fields(&self.name, self.price, &self.unit)
    }
}

fn validate_fields(name: &str, price: f64, unit: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name is required");
    }
    if !price.is_finite() || price < 0.0 {
        return Err("price must be a non-negative number");
    }
    if unit.trim().is_empty() {
        return Err("unit is required");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub unit: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(rec: ProductRecord) -> Self {
        Self {
            id: rec.id,
            name: rec.name,
            price: rec.price,
            unit: rec.unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_name_and_unit() {
        let req = CreateProductRequest {
            name: "  ".to_string(),
            price: 1.0,
            unit: "kg".to_string(),
        };
        assert!(req.validate().is_err());

        let req = CreateProductRequest {
            name: "rice".to_string(),
            price: 1.0,
            unit: "".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_negative_and_non_finite_prices() {
        for price in [-0.01, f64::NAN, f64::INFINITY] {
            let req = CreateProductRequest {
                name: "rice".to_string(),
                price,
                unit: "kg".to_string(),
            };
            assert!(req.validate().is_err(), "price {price} should be rejected");
        }
    }

    #[test]
    fn accepts_a_well_formed_request() {
        let req = CreateProductRequest {
            name: "rice".to_string(),
            price: 9.90,
            unit: "kg".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
