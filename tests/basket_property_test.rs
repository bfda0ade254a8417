use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use std::collections::HashMap;
use storefront_client::domain::basket::Basket;
use storefront_client::domain::product::{Price, Product, ProductId};

fn catalog(size: i64) -> Vec<Product> {
    (1..=size)
        .map(|id| Product {
            product_id: ProductId(id),
            name: format!("Product {id}"),
            description: None,
            price: Price::new(Decimal::new(id * 125, 2)).unwrap(),
            stock: 100,
            image_path: None,
        })
        .collect()
}

#[test]
fn test_random_adds_aggregate_per_product() {
    let products = catalog(8);
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let mut basket = Basket::new();
        let mut expected: HashMap<ProductId, u32> = HashMap::new();

        let adds = rng.gen_range(0..200);
        for _ in 0..adds {
            let product = products.choose(&mut rng).unwrap();
            basket.add(product.clone());
            *expected.entry(product.product_id).or_insert(0) += 1;
        }

        assert_eq!(basket.len(), expected.len());
        for item in basket.items() {
            assert_eq!(Some(&item.quantity()), expected.get(&item.product_id()));
        }

        let total: Decimal = basket
            .items()
            .iter()
            .map(|item| item.product.price.value() * Decimal::from(item.quantity()))
            .sum();
        assert_eq!(basket.total().value(), total);
        assert_eq!(basket.total_items(), adds);
    }
}

#[test]
fn test_random_mutations_keep_invariants() {
    let products = catalog(5);
    let mut rng = rand::thread_rng();
    let mut basket = Basket::new();

    for _ in 0..1_000 {
        let id = ProductId(rng.gen_range(1..=5));
        match rng.gen_range(0..5) {
            0 | 1 => basket.add(products[(id.0 - 1) as usize].clone()),
            2 => {
                basket.increase(id);
            }
            3 => {
                let before = basket.get(id).map(|item| item.quantity());
                basket.decrease(id);
                let after = basket.get(id).map(|item| item.quantity());
                match before {
                    Some(quantity) => assert_eq!(after, Some(quantity.saturating_sub(1).max(1))),
                    None => assert_eq!(after, None),
                }
            }
            _ => {
                basket.remove(id);
                assert!(basket.get(id).is_none());
            }
        }

        let mut seen = std::collections::HashSet::new();
        for item in basket.items() {
            assert!(item.quantity() >= 1);
            assert!(seen.insert(item.product_id()), "duplicate basket entry");
        }
        let total: Price = basket.items().iter().map(|item| item.line_total()).sum();
        assert_eq!(basket.total(), total);
    }
}
