//! Property-based tests for pagination and price generation.
//!
//! These tests use proptest to verify invariants across a wide range of inputs,
//! helping to catch edge cases that unit tests might miss.

use catalog_api::services::catalog::{PageRequest, MAX_LIMIT};
use catalog_api::services::seeding::{generate_products, sample_price, SeedPlan};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Strategies for generating test data
fn valid_page_strategy() -> impl Strategy<Value = (u64, u64)> {
    (1u64..=1_000_000, 1u64..=MAX_LIMIT)
}

fn cents_strategy() -> impl Strategy<Value = i64> {
    0i64..10_000_000
}

// Property: only in-range page requests are constructible
proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn page_request_accepts_exactly_the_valid_range(page in 0u64..2_000, limit in 0u64..300) {
        let valid = page >= 1 && (1..=MAX_LIMIT).contains(&limit);
        prop_assert_eq!(PageRequest::new(page, limit).is_ok(), valid);
    }

    #[test]
    fn offset_is_previous_pages_times_limit((page, limit) in valid_page_strategy()) {
        let request = PageRequest::new(page, limit).unwrap();
        prop_assert_eq!(request.offset(), (page - 1) * limit);
        prop_assert_eq!(request.page(), page);
        prop_assert_eq!(request.limit(), limit);
    }

    #[test]
    fn consecutive_pages_tile_without_gaps((page, limit) in valid_page_strategy()) {
        let current = PageRequest::new(page, limit).unwrap();
        let next = PageRequest::new(page + 1, limit).unwrap();
        prop_assert_eq!(next.offset() - current.offset(), limit);
    }
}

// Property: sampled prices respect their bounds and precision
proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn sampled_price_stays_within_bounds(
        lo in cents_strategy(),
        span in cents_strategy(),
        seed in any::<u64>(),
    ) {
        let min = Decimal::new(lo, 2);
        let max = Decimal::new(lo + span, 2);
        let mut rng = StdRng::seed_from_u64(seed);

        let price = sample_price(min, max, &mut rng).unwrap();
        prop_assert!(price >= min && price <= max, "{} not in [{}, {}]", price, min, max);
        prop_assert!(price.scale() <= 2, "{} has more than two decimals", price);
    }

    #[test]
    fn generated_drafts_match_plan(count in 1usize..60, seed in any::<u64>()) {
        let plan = SeedPlan {
            product_count: count,
            out_of_stock_count: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let drafts = generate_products(&plan, &mut rng).unwrap();

        prop_assert_eq!(drafts.len(), count);
        for draft in drafts {
            prop_assert!(draft.category_index < plan.categories.len());
            prop_assert!(draft.price >= dec!(9.99) && draft.price <= dec!(999.99));
        }
    }
}
