//! Startup Data Seeding
//!
//! Loads the demo catalog: nine brands, eight categories, one product per
//! brand/category pair.

use tracing::info;

use crate::error::Result;
use crate::store::CatalogStore;

const BRANDS: [&str; 9] = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];

const CATEGORIES: [&str; 8] = [
    "top",
    "outer",
    "pants",
    "sneakers",
    "bag",
    "hat",
    "socks",
    "accessory",
];

// Rows follow BRANDS, columns follow CATEGORIES.
const PRICES: [[i64; 8]; 9] = [
    [11200, 5500, 4200, 9000, 2000, 1700, 1800, 2300], // A
    [10500, 5900, 3800, 9100, 2100, 2000, 2000, 2200], // B
    [10000, 6200, 3300, 9200, 2200, 1900, 2200, 2100], // C
    [10100, 5100, 3000, 9500, 2500, 1500, 2400, 2000], // D
    [10700, 5000, 3800, 9900, 2300, 1800, 2100, 2100], // E
    [11200, 7200, 4000, 9300, 2100, 1600, 2300, 1900], // F
    [10500, 5800, 3900, 9000, 2200, 1700, 2100, 2000], // G
    [10800, 6300, 3100, 9700, 2100, 1600, 2000, 2000], // H
    [11400, 6700, 3200, 9500, 2400, 1700, 1700, 2400], // I
];

/// Seeds the demo catalog into an empty store.
pub fn seed_demo_catalog(store: &mut CatalogStore) -> Result<()> {
    for brand in BRANDS {
        store.create_brand(brand)?;
    }
    for category in CATEGORIES {
        store.add_category(category)?;
    }
    for (row, brand) in BRANDS.iter().enumerate() {
        for (col, category) in CATEGORIES.iter().enumerate() {
            store.create_product(brand, category, PRICES[row][col])?;
        }
    }

    info!(
        "Seeded demo catalog: {} brands, {} categories, {} products",
        BRANDS.len(),
        CATEGORIES.len(),
        store.product_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_loads_full_matrix() {
        let mut store = CatalogStore::new();
        seed_demo_catalog(&mut store).unwrap();

        assert_eq!(store.find_all_categories().len(), 8);
        assert_eq!(store.product_count(), 72);
        assert!(store.brand_exists("A"));
        assert!(store.brand_exists("I"));
    }

    #[test]
    fn test_seeded_top_extremes() {
        let mut store = CatalogStore::new();
        seed_demo_catalog(&mut store).unwrap();

        let (min, max) = store.category_price_extremes("top").unwrap();
        assert_eq!((min.brand.as_str(), min.price), ("C", 10000));
        assert_eq!((max.brand.as_str(), max.price), ("I", 11400));
    }

    #[test]
    fn test_seed_refuses_non_empty_store() {
        let mut store = CatalogStore::new();
        store.create_brand("A").unwrap();

        assert!(seed_demo_catalog(&mut store).is_err());
    }
}
