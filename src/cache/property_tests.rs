//! Property-Based Tests for the Derived Caches
//!
//! Uses proptest to drive random mutation sequences through the aggregate
//! update engine and check the warm-cache invariants against a plain model
//! of the live products.

use std::sync::Arc;

use proptest::prelude::*;

use crate::cache::DerivedCaches;
use crate::engine::AggregateUpdateEngine;
use crate::store::{CatalogStore, Product};

// == Test Configuration ==
const BRANDS: [&str; 5] = ["Alpha", "Bravo", "Charlie", "Delta", "Echo"];
const CATEGORIES: [&str; 3] = ["top", "pants", "hat"];

// == Strategies ==
/// A mutation against the catalog; indices are resolved modulo the live set.
#[derive(Debug, Clone)]
enum CatalogOp {
    Create {
        brand: usize,
        category: usize,
        price: i64,
    },
    Update {
        target: usize,
        price: i64,
    },
    Delete {
        target: usize,
    },
}

/// Prices start at 1: a zero-price product makes its brand total
/// indistinguishable from an empty brand, which the total-removal rule
/// deliberately treats as "no inventory".
fn price_strategy() -> impl Strategy<Value = i64> {
    1_i64..=20_000
}

fn create_strategy() -> impl Strategy<Value = CatalogOp> {
    (0..BRANDS.len(), 0..CATEGORIES.len(), price_strategy())
        .prop_map(|(brand, category, price)| CatalogOp::Create {
            brand,
            category,
            price,
        })
}

fn full_op_strategy() -> impl Strategy<Value = CatalogOp> {
    prop_oneof![
        create_strategy(),
        (any::<usize>(), price_strategy())
            .prop_map(|(target, price)| CatalogOp::Update { target, price }),
        any::<usize>().prop_map(|target| CatalogOp::Delete { target }),
    ]
}

fn create_delete_strategy() -> impl Strategy<Value = CatalogOp> {
    prop_oneof![
        3 => create_strategy(),
        1 => any::<usize>().prop_map(|target| CatalogOp::Delete { target }),
    ]
}

// == Model Application ==
struct Harness {
    engine: AggregateUpdateEngine,
    caches: Arc<DerivedCaches>,
    live: Vec<Product>,
    next_id: u64,
}

impl Harness {
    fn new() -> Self {
        let caches = Arc::new(DerivedCaches::with_settings(3600, 10_000, 10_000));
        Self {
            engine: AggregateUpdateEngine::new(caches.clone()),
            caches,
            live: Vec::new(),
            next_id: 1,
        }
    }

    async fn apply(&mut self, op: &CatalogOp) {
        match op {
            CatalogOp::Create {
                brand,
                category,
                price,
            } => {
                let product = Product {
                    id: self.next_id,
                    brand: BRANDS[*brand].to_string(),
                    category: CATEGORIES[*category].to_string(),
                    price: *price,
                };
                self.next_id += 1;
                self.engine.product_created(&product).await.unwrap();
                self.live.push(product);
            }
            CatalogOp::Update { target, price } => {
                if self.live.is_empty() {
                    return;
                }
                let idx = target % self.live.len();
                let old = self.live[idx].clone();
                let mut new = old.clone();
                new.price = *price;
                self.engine.product_updated(&old, &new).await.unwrap();
                self.live[idx] = new;
            }
            CatalogOp::Delete { target } => {
                if self.live.is_empty() {
                    return;
                }
                let idx = target % self.live.len();
                let product = self.live.remove(idx);
                self.engine.product_deleted(&product).await.unwrap();
            }
        }
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* sequence of creates and deletes, a warm cached min entry is a
    // lower bound on every live price in its category (and max an upper
    // bound), and always points at a live product.
    #[test]
    fn prop_warm_extremes_bound_live_prices(
        ops in prop::collection::vec(create_delete_strategy(), 1..60)
    ) {
        runtime().block_on(async {
            let mut h = Harness::new();
            for op in &ops {
                h.apply(op).await;

                for category in CATEGORIES {
                    let in_category: Vec<&Product> =
                        h.live.iter().filter(|p| p.category == category).collect();

                    if let Some(min) = h.caches.get_min_price(category).await.unwrap() {
                        for p in &in_category {
                            prop_assert!(min.price <= p.price);
                        }
                        prop_assert!(in_category
                            .iter()
                            .any(|p| p.id == min.product_id && p.price == min.price));
                    }
                    if let Some(max) = h.caches.get_max_price(category).await.unwrap() {
                        for p in &in_category {
                            prop_assert!(max.price >= p.price);
                        }
                        prop_assert!(in_category
                            .iter()
                            .any(|p| p.id == max.product_id && p.price == max.price));
                    }
                }
            }
            Ok(())
        })?;
    }

    // *For any* sequence of creates, updates, and deletes, a warm brand total
    // equals the sum of live prices for that brand, and vanishes exactly when
    // the brand has no priced inventory.
    #[test]
    fn prop_warm_brand_totals_match_live_sum(
        ops in prop::collection::vec(full_op_strategy(), 1..60)
    ) {
        runtime().block_on(async {
            let mut h = Harness::new();
            for op in &ops {
                h.apply(op).await;

                for brand in BRANDS {
                    let expected: i64 = h
                        .live
                        .iter()
                        .filter(|p| p.brand == brand)
                        .map(|p| p.price)
                        .sum();
                    let cached = h.caches.get_brand_total(brand).await.unwrap();
                    if expected > 0 {
                        prop_assert_eq!(cached, Some(expected));
                    } else {
                        prop_assert_eq!(cached, None);
                    }
                }
            }
            Ok(())
        })?;
    }

    // *For any* set of created products, a cold recomputation from the store
    // agrees with the model's true extremes for every non-empty category.
    #[test]
    fn prop_store_recomputation_matches_model(
        ops in prop::collection::vec(create_strategy(), 1..40)
    ) {
        let mut store = CatalogStore::new();
        for brand in BRANDS {
            store.create_brand(brand).unwrap();
        }
        for category in CATEGORIES {
            store.add_category(category).unwrap();
        }

        let mut live: Vec<Product> = Vec::new();
        for op in &ops {
            if let CatalogOp::Create { brand, category, price } = op {
                let product = store
                    .create_product(BRANDS[*brand], CATEGORIES[*category], *price)
                    .unwrap();
                live.push(product);
            }
        }

        for category in CATEGORIES {
            let prices: Vec<i64> = live
                .iter()
                .filter(|p| p.category == category)
                .map(|p| p.price)
                .collect();
            if prices.is_empty() {
                prop_assert!(store.category_price_extremes(category).is_err());
            } else {
                let (min, max) = store.category_price_extremes(category).unwrap();
                prop_assert_eq!(min.price, *prices.iter().min().unwrap());
                prop_assert_eq!(max.price, *prices.iter().max().unwrap());
            }
        }
    }
}
