//! Catalog Store
//!
//! In-memory authoritative storage for the catalog. Every mutation is applied
//! atomically under the owning lock; a successful return means the mutation
//! is committed and may be announced to the cache layer.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{CatalogError, Result};

// == Product ==
/// A catalog product. The store holds the only authoritative copy; caches
/// keep derived projections at most.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Opaque store-assigned id
    pub id: u64,
    /// Brand name, always resolvable
    pub brand: String,
    /// Category name, always resolvable
    pub category: String,
    /// Non-negative price
    pub price: i64,
}

// == Brand Sum ==
/// One row of the per-brand price aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandSum {
    pub brand: String,
    pub total: i64,
}

// == Catalog Store ==
/// The persistent catalog: products keyed by id, plus the brand and category
/// registries. Categories are pre-seeded; brands have their own CRUD.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: HashMap<u64, Product>,
    brands: HashSet<String>,
    categories: Vec<String>,
    next_id: u64,
}

impl CatalogStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
            brands: HashSet::new(),
            categories: Vec::new(),
            next_id: 1,
        }
    }

    // == Brand Registry ==
    /// Registers a new brand name.
    pub fn create_brand(&mut self, name: &str) -> Result<()> {
        if self.brands.contains(name) {
            return Err(CatalogError::InvalidInput(format!(
                "brand already exists: {name}"
            )));
        }
        self.brands.insert(name.to_string());
        Ok(())
    }

    /// Renames a brand, rewriting the brand reference of its products.
    pub fn rename_brand(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if !self.brands.contains(old_name) {
            return Err(CatalogError::NotFound(format!("brand not found: {old_name}")));
        }
        if self.brands.contains(new_name) {
            return Err(CatalogError::InvalidInput(format!(
                "brand already exists: {new_name}"
            )));
        }
        self.brands.remove(old_name);
        self.brands.insert(new_name.to_string());
        for product in self.products.values_mut() {
            if product.brand == old_name {
                product.brand = new_name.to_string();
            }
        }
        Ok(())
    }

    /// Deletes a brand. Refused while the brand still has live products.
    pub fn delete_brand(&mut self, name: &str) -> Result<()> {
        if !self.brands.contains(name) {
            return Err(CatalogError::NotFound(format!("brand not found: {name}")));
        }
        if self.products.values().any(|p| p.brand == name) {
            return Err(CatalogError::InvalidInput(format!(
                "brand still has products: {name}"
            )));
        }
        self.brands.remove(name);
        Ok(())
    }

    pub fn brand_exists(&self, name: &str) -> bool {
        self.brands.contains(name)
    }

    // == Category Registry ==
    /// Registers a category. Categories are seeded at startup, not created by
    /// the core mutation flows.
    pub fn add_category(&mut self, name: &str) -> Result<()> {
        if self.categories.iter().any(|c| c == name) {
            return Err(CatalogError::InvalidInput(format!(
                "category already exists: {name}"
            )));
        }
        self.categories.push(name.to_string());
        Ok(())
    }

    /// All known categories, in seed order.
    pub fn find_all_categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    // == Product Mutations ==
    /// Creates a product. Both references must resolve.
    pub fn create_product(&mut self, brand: &str, category: &str, price: i64) -> Result<Product> {
        if !self.brands.contains(brand) {
            return Err(CatalogError::NotFound(format!("brand not found: {brand}")));
        }
        if !self.categories.iter().any(|c| c == category) {
            return Err(CatalogError::NotFound(format!(
                "category not found: {category}"
            )));
        }

        let product = Product {
            id: self.next_id,
            brand: brand.to_string(),
            category: category.to_string(),
            price,
        };
        self.next_id += 1;
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    /// Changes a product's price in place, returning (previous, current) state.
    pub fn update_price(&mut self, product_id: u64, new_price: i64) -> Result<(Product, Product)> {
        let product = self.products.get_mut(&product_id).ok_or_else(|| {
            CatalogError::NotFound(format!("product not found: {product_id}"))
        })?;
        let old = product.clone();
        product.price = new_price;
        Ok((old, product.clone()))
    }

    /// Deletes a product by id, returning its last committed state.
    pub fn delete_product(&mut self, product_id: u64) -> Result<Product> {
        self.products.remove(&product_id).ok_or_else(|| {
            CatalogError::NotFound(format!("product not found: {product_id}"))
        })
    }

    // == Point Lookups & Scans ==
    pub fn find_by_id(&self, product_id: u64) -> Result<Product> {
        self.products
            .get(&product_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("product not found: {product_id}")))
    }

    /// Products of one brand, ordered by category then id.
    pub fn find_products_by_brand(&self, brand: &str) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .values()
            .filter(|p| p.brand == brand)
            .cloned()
            .collect();
        products.sort_by(|a, b| (&a.category, a.id).cmp(&(&b.category, b.id)));
        products
    }

    // == Aggregate Queries ==
    /// The cheapest product in a category. Price ties break toward the
    /// lexicographically smaller brand name, then the smaller id.
    pub fn find_cheapest_in_category(&self, category: &str) -> Result<Product> {
        self.products
            .values()
            .filter(|p| p.category == category)
            .min_by(|a, b| (a.price, &a.brand, a.id).cmp(&(b.price, &b.brand, b.id)))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("no products in category: {category}")))
    }

    /// The most expensive product in a category. Price ties break toward the
    /// lexicographically larger brand name.
    pub fn find_most_expensive_in_category(&self, category: &str) -> Result<Product> {
        self.products
            .values()
            .filter(|p| p.category == category)
            .max_by(|a, b| (a.price, &a.brand, a.id).cmp(&(b.price, &b.brand, b.id)))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("no products in category: {category}")))
    }

    /// Both extremes of a category out of a single scan, so the pair always
    /// reflects one store state.
    pub fn category_price_extremes(&self, category: &str) -> Result<(Product, Product)> {
        let mut min: Option<&Product> = None;
        let mut max: Option<&Product> = None;

        for p in self.products.values().filter(|p| p.category == category) {
            min = match min {
                Some(m) if (p.price, &p.brand, p.id) >= (m.price, &m.brand, m.id) => Some(m),
                _ => Some(p),
            };
            max = match max {
                Some(m) if (p.price, &p.brand, p.id) <= (m.price, &m.brand, m.id) => Some(m),
                _ => Some(p),
            };
        }

        match (min, max) {
            (Some(min), Some(max)) => Ok((min.clone(), max.clone())),
            _ => Err(CatalogError::NotFound(format!(
                "no products in category: {category}"
            ))),
        }
    }

    /// Sum of live product prices per brand, ordered by brand name. Brands
    /// without products do not appear.
    pub fn sum_price_per_brand(&self) -> Vec<BrandSum> {
        let mut sums: BTreeMap<&str, i64> = BTreeMap::new();
        for p in self.products.values() {
            *sums.entry(p.brand.as_str()).or_insert(0) += p.price;
        }
        sums.into_iter()
            .map(|(brand, total)| BrandSum {
                brand: brand.to_string(),
                total,
            })
            .collect()
    }

    /// Number of live products.
    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}
