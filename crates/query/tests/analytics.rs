//! Integration tests for the analytic queries.

use agora_core::{Buyer, EntityKind, Error, Good, Sale, Shop};
use agora_query::{AnalyticsConfig, AnalyticsEngine, Query};
use agora_storage::TableStore;
use proptest::prelude::*;

fn empty_store() -> TableStore {
    let mut store = TableStore::new();
    for kind in EntityKind::ALL {
        store.create_table_kind(kind).unwrap();
    }
    store
}

/// Two countries, three cities, a handful of sales.
///
/// Revenue per shop city: Paris 999 + 50 + 10, Berlin 20 + 999, Lyon 0.
fn market() -> TableStore {
    let mut store = empty_store();
    store.insert(Buyer::with_id(1, "Al", "Paris", "France")).unwrap();
    store.insert(Buyer::with_id(2, "Alexandra", "Berlin", "Germany")).unwrap();
    store.insert(Buyer::with_id(3, "Bob", "Paris", "France")).unwrap();
    store.insert(Buyer::with_id(4, "Cleo", "Lyon", "France")).unwrap();

    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Good::with_id(2, "Laptop", 999, "Electronics")).unwrap();
    store.insert(Good::with_id(3, "Mug", 10, "Kitchen")).unwrap();

    store.insert(Shop::with_id(1, "Corner", "Paris", "France")).unwrap();
    store.insert(Shop::with_id(2, "Kiosk", "Berlin", "Germany")).unwrap();
    store.insert(Shop::with_id(3, "Market", "Lyon", "France")).unwrap();

    // buyer, good, shop, count
    store.insert(Sale::with_id(1, 2, 2, 1, 1)).unwrap(); // Alexandra, Laptop, Paris
    store.insert(Sale::with_id(2, 2, 1, 1, 10)).unwrap(); // Alexandra, Pen x10, Paris
    store.insert(Sale::with_id(3, 1, 1, 2, 4)).unwrap(); // Al, Pen x4, Berlin
    store.insert(Sale::with_id(4, 3, 3, 1, 1)).unwrap(); // Bob, Mug, Paris
    store.insert(Sale::with_id(5, 2, 2, 2, 1)).unwrap(); // Alexandra, Laptop, Berlin
    store
}

fn names<'a>(buyers: impl IntoIterator<Item = &'a Buyer>) -> Vec<&'a str> {
    let mut names: Vec<&str> = buyers.into_iter().map(|b| b.name.as_str()).collect();
    names.sort_unstable();
    names
}

#[test]
fn queries_check_required_tables_first() {
    let store = TableStore::new();
    let engine = AnalyticsEngine::new();

    assert_eq!(
        engine.longest_name_buyer_goods(&store).unwrap_err(),
        Error::table_not_found(EntityKind::Buyer)
    );
    assert_eq!(
        engine.min_shops_per_country(&store).unwrap_err(),
        Error::table_not_found(EntityKind::Shop)
    );
    assert_eq!(
        engine.total_sales_value(&store).unwrap_err(),
        Error::table_not_found(EntityKind::Good)
    );

    let mut store = TableStore::new();
    store.create_table::<Buyer>().unwrap();
    store.create_table::<Sale>().unwrap();
    assert_eq!(
        engine.most_popular_good_buyers(&store).unwrap_err(),
        Error::table_not_found(EntityKind::Good)
    );
    assert_eq!(
        engine.other_city_sales(&store).unwrap_err(),
        Error::table_not_found(EntityKind::Shop)
    );
    assert!(engine.check_tables(&store, Query::MinSalesCity).is_err());
    assert!(engine.check_tables(&store, Query::MostExpensiveGoodCategory).is_err());
}

#[test]
fn longest_name_buyer_goods_returns_each_purchase() {
    let store = market();
    let goods = AnalyticsEngine::new().longest_name_buyer_goods(&store).unwrap();
    let names: Vec<&str> = goods.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Laptop", "Pen", "Laptop"]);
}

#[test]
fn longest_name_tie_goes_to_last_in_name_order() {
    let mut store = empty_store();
    store.insert(Buyer::with_id(1, "Zoe", "Rome", "Italy")).unwrap();
    store.insert(Buyer::with_id(2, "Amy", "Rome", "Italy")).unwrap();
    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Good::with_id(2, "Mug", 10, "Kitchen")).unwrap();
    store.insert(Sale::with_id(1, 1, 1, 1, 1)).unwrap();
    store.insert(Sale::with_id(2, 2, 2, 1, 1)).unwrap();

    let goods = AnalyticsEngine::new().longest_name_buyer_goods(&store).unwrap();
    assert_eq!(goods, vec![Good::with_id(1, "Pen", 5, "Office")]);
}

#[test]
fn longest_name_without_buyers_is_empty() {
    let store = empty_store();
    assert!(AnalyticsEngine::new().longest_name_buyer_goods(&store).unwrap().is_empty());
}

#[test]
fn min_shops_per_country_counts_shop_countries() {
    let mut store = TableStore::new();
    store.create_table::<Shop>().unwrap();
    store.insert(Shop::with_id(1, "One", "X", "A")).unwrap();
    store.insert(Shop::with_id(2, "Two", "Y", "A")).unwrap();
    store.insert(Shop::with_id(3, "Three", "Z", "B")).unwrap();

    let engine = AnalyticsEngine::new();
    assert_eq!(engine.min_shops_per_country(&store).unwrap(), Some(1));
    assert_eq!(engine.min_shops_per_country(&market()).unwrap(), Some(1));
}

#[test]
fn min_shops_per_country_without_shops() {
    let mut store = TableStore::new();
    store.create_table::<Shop>().unwrap();
    assert_eq!(AnalyticsEngine::new().min_shops_per_country(&store).unwrap(), None);
}

#[test]
fn min_sales_city_picks_lowest_revenue() {
    let store = market();
    assert_eq!(
        AnalyticsEngine::new().min_sales_city(&store).unwrap().as_deref(),
        Some("Lyon")
    );
}

#[test]
fn min_sales_city_tie_keeps_first_seen() {
    let mut store = empty_store();
    store.insert(Buyer::with_id(1, "A", "Oslo", "Norway")).unwrap();
    store.insert(Buyer::with_id(2, "B", "Bergen", "Norway")).unwrap();
    store.insert(Buyer::with_id(3, "C", "Oslo", "Norway")).unwrap();

    assert_eq!(
        AnalyticsEngine::new().min_sales_city(&store).unwrap().as_deref(),
        Some("Oslo")
    );
}

#[test]
fn min_sales_city_without_buyers() {
    let store = empty_store();
    assert_eq!(AnalyticsEngine::new().min_sales_city(&store).unwrap(), None);
}

#[test]
fn most_expensive_good_returns_name() {
    let mut store = TableStore::new();
    store.create_table::<Good>().unwrap();
    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Good::with_id(2, "Laptop", 999, "Electronics")).unwrap();

    assert_eq!(
        AnalyticsEngine::new().most_expensive_good_category(&store).unwrap().as_deref(),
        Some("Laptop")
    );
}

#[test]
fn most_expensive_good_tie_keeps_first() {
    let mut store = TableStore::new();
    store.create_table::<Good>().unwrap();
    store.insert(Good::with_id(1, "Gold", 100, "Metal")).unwrap();
    store.insert(Good::with_id(2, "Platinum", 100, "Metal")).unwrap();
    store.insert(Good::with_id(3, "Tin", 1, "Metal")).unwrap();

    let engine = AnalyticsEngine::new();
    assert_eq!(engine.most_expensive_good_category(&store).unwrap().as_deref(), Some("Gold"));

    let mut empty = TableStore::new();
    empty.create_table::<Good>().unwrap();
    assert_eq!(engine.most_expensive_good_category(&empty).unwrap(), None);
}

#[test]
fn most_popular_good_buyers_excludes_other_goods() {
    // Pen: 10 + 4 units, Laptop: 2 units, Mug: 1 unit.
    let store = market();
    let buyers = AnalyticsEngine::new().most_popular_good_buyers(&store).unwrap();
    assert_eq!(names(&buyers), vec!["Al", "Alexandra"]);
}

#[test]
fn most_popular_good_buyers_are_distinct() {
    let mut store = empty_store();
    store.insert(Buyer::with_id(1, "Al", "Paris", "France")).unwrap();
    store.insert(Buyer::with_id(2, "Bo", "Paris", "France")).unwrap();
    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Good::with_id(2, "Mug", 10, "Kitchen")).unwrap();
    store.insert(Sale::with_id(1, 1, 1, 1, 2)).unwrap();
    store.insert(Sale::with_id(2, 1, 1, 1, 2)).unwrap();
    store.insert(Sale::with_id(3, 2, 2, 1, 3)).unwrap();

    let buyers = AnalyticsEngine::new().most_popular_good_buyers(&store).unwrap();
    assert_eq!(buyers, vec![Buyer::with_id(1, "Al", "Paris", "France")]);
}

#[test]
fn most_popular_good_tie_keeps_first_good() {
    let mut store = empty_store();
    store.insert(Buyer::with_id(1, "Al", "Paris", "France")).unwrap();
    store.insert(Buyer::with_id(2, "Bo", "Paris", "France")).unwrap();
    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Good::with_id(2, "Mug", 10, "Kitchen")).unwrap();
    store.insert(Sale::with_id(1, 2, 2, 1, 3)).unwrap();
    store.insert(Sale::with_id(2, 1, 1, 1, 3)).unwrap();

    let buyers = AnalyticsEngine::new().most_popular_good_buyers(&store).unwrap();
    assert_eq!(names(&buyers), vec!["Al"]);
}

#[test]
fn other_city_sales_compares_countries() {
    let store = market();
    let sales = AnalyticsEngine::new().other_city_sales(&store).unwrap();
    let ids: Vec<u32> = sales.iter().map(|s| s.id).collect();
    // Alexandra (Germany) in Paris twice, Al (France) in Berlin.
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn total_sales_value_sums_price_times_count() {
    let engine = AnalyticsEngine::new();
    assert_eq!(engine.total_sales_value(&market()).unwrap(), 999 + 50 + 20 + 10 + 999);
    assert_eq!(engine.total_sales_value(&empty_store()).unwrap(), 0);
}

/// A store where sale 2 points at a buyer, good and shop that do not exist.
fn store_with_gap() -> TableStore {
    let mut store = empty_store();
    store.insert(Buyer::with_id(1, "Alexandra", "Paris", "France")).unwrap();
    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Shop::with_id(1, "Kiosk", "Berlin", "Germany")).unwrap();
    store.insert(Sale::with_id(1, 1, 1, 1, 2)).unwrap();
    store.insert(Sale::with_id(2, 99, 98, 97, 50)).unwrap();
    store
}

#[test]
fn unresolved_references_are_skipped_by_default() {
    let store = store_with_gap();
    let engine = AnalyticsEngine::new();

    assert_eq!(engine.total_sales_value(&store).unwrap(), 10);
    let sales = engine.other_city_sales(&store).unwrap();
    assert_eq!(sales.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(engine.min_sales_city(&store).unwrap().as_deref(), Some("Paris"));
    assert_eq!(names(&engine.most_popular_good_buyers(&store).unwrap()), vec!["Alexandra"]);
    assert_eq!(engine.longest_name_buyer_goods(&store).unwrap().len(), 1);
}

#[test]
fn strict_policy_fails_every_joining_query() {
    let store = store_with_gap();
    let engine = AnalyticsEngine::with_config(AnalyticsConfig::strict());

    let is_gap = |err: Error| matches!(err, Error::ReferentialGap { sale: 2, .. });
    assert!(is_gap(engine.total_sales_value(&store).unwrap_err()));
    assert!(is_gap(engine.other_city_sales(&store).unwrap_err()));
    assert!(is_gap(engine.min_sales_city(&store).unwrap_err()));
    assert!(is_gap(engine.most_popular_good_buyers(&store).unwrap_err()));

    // Queries without joins are unaffected.
    assert_eq!(engine.min_shops_per_country(&store).unwrap(), Some(1));
    assert_eq!(engine.most_expensive_good_category(&store).unwrap().as_deref(), Some("Pen"));
}

#[test]
fn longest_name_buyer_goods_applies_gap_policy() {
    let mut store = empty_store();
    store.insert(Buyer::with_id(1, "Alexandra", "Paris", "France")).unwrap();
    store.insert(Buyer::with_id(2, "Al", "Paris", "France")).unwrap();
    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Sale::with_id(1, 1, 1, 1, 1)).unwrap();
    store.insert(Sale::with_id(2, 1, 77, 1, 1)).unwrap();

    let goods = AnalyticsEngine::new().longest_name_buyer_goods(&store).unwrap();
    assert_eq!(goods, vec![Good::with_id(1, "Pen", 5, "Office")]);

    let strict = AnalyticsEngine::with_config(AnalyticsConfig::strict());
    assert_eq!(
        strict.longest_name_buyer_goods(&store).unwrap_err(),
        Error::referential_gap(2, EntityKind::Good, 77)
    );
}

#[test]
fn strict_min_sales_city_without_buyers_is_none() {
    let mut store = empty_store();
    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Sale::with_id(1, 1, 1, 99, 1)).unwrap();

    let strict = AnalyticsEngine::with_config(AnalyticsConfig::strict());
    assert_eq!(strict.min_sales_city(&store).unwrap(), None);
}

#[test]
fn strict_policy_reports_missing_good() {
    let mut store = empty_store();
    store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
    store.insert(Sale::with_id(7, 1, 42, 1, 1)).unwrap();

    let engine = AnalyticsEngine::with_config(AnalyticsConfig::strict());
    assert_eq!(
        engine.total_sales_value(&store).unwrap_err(),
        Error::referential_gap(7, EntityKind::Good, 42)
    );
}

#[test]
fn queries_do_not_mutate_the_store() {
    let store = market();
    let before = store.clone();
    let engine = AnalyticsEngine::new();

    engine.longest_name_buyer_goods(&store).unwrap();
    engine.min_sales_city(&store).unwrap();
    engine.most_popular_good_buyers(&store).unwrap();
    engine.other_city_sales(&store).unwrap();
    engine.total_sales_value(&store).unwrap();

    for kind in EntityKind::ALL {
        assert_eq!(store.table(kind).unwrap(), before.table(kind).unwrap());
    }
}

proptest! {
    /// The total equals a direct sum over sales whose good exists.
    #[test]
    fn total_matches_direct_sum(
        prices in prop::collection::vec(0u64..10_000, 0..20),
        sales in prop::collection::vec((1u32..30, 1u32..100), 0..50),
    ) {
        let mut store = empty_store();
        for (i, &price) in prices.iter().enumerate() {
            store.insert(Good::with_id(i as u32 + 1, format!("g{}", i), price, "c")).unwrap();
        }
        let mut expected = 0u64;
        for (i, &(good_id, count)) in sales.iter().enumerate() {
            store.insert(Sale::with_id(i as u32 + 1, 1, good_id, 1, count)).unwrap();
            if let Some(price) = prices.get(good_id as usize - 1) {
                expected += price * u64::from(count);
            }
        }
        prop_assert_eq!(AnalyticsEngine::new().total_sales_value(&store).unwrap(), expected);
    }

    /// The minimum is attained by some country and no country has fewer shops.
    #[test]
    fn min_shops_is_a_lower_bound(countries in prop::collection::vec(0u8..5, 1..40)) {
        let mut store = TableStore::new();
        store.create_table::<Shop>().unwrap();
        for (i, c) in countries.iter().enumerate() {
            store.insert(Shop::with_id(i as u32 + 1, "s", "city", format!("C{}", c))).unwrap();
        }
        let min = AnalyticsEngine::new().min_shops_per_country(&store).unwrap().unwrap();

        let counts: Vec<usize> = (0u8..5)
            .map(|c| countries.iter().filter(|&&x| x == c).count())
            .filter(|&n| n > 0)
            .collect();
        prop_assert_eq!(Some(min), counts.iter().copied().min());
    }
}
