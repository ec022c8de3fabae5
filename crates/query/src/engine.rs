//! Analytic queries.
//!
//! Every query checks that its tables exist before reading anything, then
//! computes its answer from the current snapshot of those tables. Queries
//! never mutate the store.
//!
//! Sales reference buyers, goods and shops by id. When such a reference does
//! not resolve, the engine's `GapPolicy` decides: `Skip` leaves the sale out
//! of the computation, `Fail` aborts with `Error::ReferentialGap`. The policy
//! is applied the same way in every query that joins.
//!
//! Tie-breaks follow a left fold over a fixed iteration order:
//!
//! - longest buyer name: buyers sorted by name, `>=` on length (last wins)
//! - cheapest city: buyer cities in first-seen order, `<` on revenue (first wins)
//! - most expensive good: table order, `>` on price (first wins)
//! - most popular good: table order, `>` on units sold (first wins)

use crate::config::{AnalyticsConfig, GapPolicy};
use crate::lookup::IdLookup;
use crate::query::Query;
use agora_core::{Buyer, Entity, EntityId, Error, Good, Result, Sale, Shop};
use agora_storage::TableStore;
use hashbrown::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Stateless query layer over a `TableStore`.
#[derive(Clone, Debug, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,
}

impl AnalyticsEngine {
    /// Creates an engine that skips unresolved references.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given options.
    pub fn with_config(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Fails with `TableNotFound` for the first required table that is absent.
    pub fn check_tables(&self, store: &TableStore, query: Query) -> Result<()> {
        for &kind in query.required_tables() {
            if !store.is_created(kind) {
                debug!(%query, %kind, "required table missing");
                return Err(Error::table_not_found(kind));
            }
        }
        Ok(())
    }

    /// Goods bought by the buyer with the longest name.
    ///
    /// Buyers are scanned in ascending name order and a later buyer replaces
    /// the current one when its name is at least as long, so among equally
    /// long names the last in sort order wins. One good is returned per
    /// matching sale; repeated purchases repeat the good.
    #[instrument(name = "analytics::longest_name_buyer_goods", level = "debug", skip_all)]
    pub fn longest_name_buyer_goods(&self, store: &TableStore) -> Result<Vec<Good>> {
        self.check_tables(store, Query::LongestNameBuyerGoods)?;
        let buyers = store.get_table::<Buyer>()?;
        let goods = store.get_table::<Good>()?;
        let sales = store.get_table::<Sale>()?;

        let mut by_name: Vec<&Buyer> = buyers.iter().collect();
        by_name.sort_by(|a, b| a.name.cmp(&b.name));
        let champion = by_name.into_iter().reduce(|best, next| {
            if name_len(next) >= name_len(best) {
                next
            } else {
                best
            }
        });
        let Some(champion) = champion else {
            return Ok(Vec::new());
        };

        let goods = IdLookup::new(goods);
        let mut bought = Vec::new();
        for sale in sales.iter().filter(|sale| sale.buyer_id == champion.id) {
            if self.resolve(&goods, sale, sale.good_id)?.is_some() {
                bought.extend(goods.all(sale.good_id).iter().map(|&good| good.clone()));
            }
        }
        debug!(buyer = champion.id, goods = bought.len(), "longest name buyer");
        Ok(bought)
    }

    /// Smallest number of shops located in a single country.
    ///
    /// Countries are taken from the shop table. Returns `None` when there are
    /// no shops.
    #[instrument(name = "analytics::min_shops_per_country", level = "debug", skip_all)]
    pub fn min_shops_per_country(&self, store: &TableStore) -> Result<Option<usize>> {
        self.check_tables(store, Query::MinShopsPerCountry)?;
        let shops = store.get_table::<Shop>()?;

        let mut per_country: HashMap<&str, usize> = HashMap::new();
        for shop in shops {
            *per_country.entry(shop.country.as_str()).or_default() += 1;
        }
        Ok(per_country.into_values().min())
    }

    /// Buyer city whose shops took the least revenue.
    ///
    /// Revenue of a city is the sum of `price * good_count` over sales made
    /// in shops located in it. Cities come from the buyer table, so a buyer
    /// city without shops has revenue 0. Ties keep the first city seen.
    #[instrument(name = "analytics::min_sales_city", level = "debug", skip_all)]
    pub fn min_sales_city(&self, store: &TableStore) -> Result<Option<String>> {
        self.check_tables(store, Query::MinSalesCity)?;
        let buyers = store.get_table::<Buyer>()?;
        let goods = IdLookup::new(store.get_table::<Good>()?);
        let sales = store.get_table::<Sale>()?;
        let shops = IdLookup::new(store.get_table::<Shop>()?);

        let mut seen = HashSet::new();
        let cities: Vec<&str> = buyers
            .iter()
            .map(|buyer| buyer.city.as_str())
            .filter(|city| seen.insert(*city))
            .collect();
        if cities.is_empty() {
            return Ok(None);
        }

        let mut revenue: HashMap<&str, u64> = cities.iter().map(|&city| (city, 0)).collect();
        for sale in sales {
            let Some(shop) = self.resolve(&shops, sale, sale.shop_id)? else {
                continue;
            };
            let Some(total) = revenue.get_mut(shop.city.as_str()) else {
                continue;
            };
            if let Some(good) = self.resolve(&goods, sale, sale.good_id)? {
                *total = total.saturating_add(sale_value(good, sale));
            }
        }

        let mut cheapest: Option<(&str, u64)> = None;
        for city in cities {
            let total = revenue.get(city).copied().unwrap_or(0);
            match cheapest {
                Some((_, min)) if total >= min => {}
                _ => cheapest = Some((city, total)),
            }
        }
        Ok(cheapest.map(|(city, _)| city.to_string()))
    }

    /// Name of the highest-priced good.
    ///
    /// Despite the query's name this returns the good's `name`, not its
    /// category. Ties keep the first good in table order.
    #[instrument(name = "analytics::most_expensive_good_category", level = "debug", skip_all)]
    pub fn most_expensive_good_category(&self, store: &TableStore) -> Result<Option<String>> {
        self.check_tables(store, Query::MostExpensiveGoodCategory)?;
        let goods = store.get_table::<Good>()?;

        let priciest = goods
            .iter()
            .reduce(|best, next| if next.price > best.price { next } else { best });
        Ok(priciest.map(|good| good.name.clone()))
    }

    /// Buyers who bought the most popular good.
    ///
    /// Popularity is the total `good_count` over the good's sales. Ties keep
    /// the first good in table order. Buyers are returned in table order,
    /// once per id.
    #[instrument(name = "analytics::most_popular_good_buyers", level = "debug", skip_all)]
    pub fn most_popular_good_buyers(&self, store: &TableStore) -> Result<Vec<Buyer>> {
        self.check_tables(store, Query::MostPopularGoodBuyers)?;
        let buyer_rows = store.get_table::<Buyer>()?;
        let good_rows = store.get_table::<Good>()?;
        let sales = store.get_table::<Sale>()?;
        let buyers = IdLookup::new(buyer_rows);
        let goods = IdLookup::new(good_rows);

        let mut units: HashMap<EntityId, u64> = HashMap::new();
        for sale in sales {
            if self.resolve(&goods, sale, sale.good_id)?.is_some() {
                let total = units.entry(sale.good_id).or_default();
                *total = total.saturating_add(u64::from(sale.good_count));
            }
        }
        let popularity = |good: &Good| units.get(&good.id).copied().unwrap_or(0);

        let Some(popular) = good_rows.iter().reduce(|best, next| {
            if popularity(next) > popularity(best) {
                next
            } else {
                best
            }
        }) else {
            return Ok(Vec::new());
        };

        let mut buyer_ids = HashSet::new();
        for sale in sales.iter().filter(|sale| sale.good_id == popular.id) {
            if self.resolve(&buyers, sale, sale.buyer_id)?.is_some() {
                buyer_ids.insert(sale.buyer_id);
            }
        }
        debug!(good = popular.id, buyers = buyer_ids.len(), "most popular good");

        let mut emitted = HashSet::new();
        Ok(buyer_rows
            .iter()
            .filter(|buyer| buyer_ids.contains(&buyer.id) && emitted.insert(buyer.id))
            .cloned()
            .collect())
    }

    /// Sales where the buyer's country differs from the shop's country.
    #[instrument(name = "analytics::other_city_sales", level = "debug", skip_all)]
    pub fn other_city_sales(&self, store: &TableStore) -> Result<Vec<Sale>> {
        self.check_tables(store, Query::OtherCitySales)?;
        let buyers = IdLookup::new(store.get_table::<Buyer>()?);
        let sales = store.get_table::<Sale>()?;
        let shops = IdLookup::new(store.get_table::<Shop>()?);

        let mut foreign = Vec::new();
        for sale in sales {
            let buyer = self.resolve(&buyers, sale, sale.buyer_id)?;
            let shop = self.resolve(&shops, sale, sale.shop_id)?;
            if let (Some(buyer), Some(shop)) = (buyer, shop) {
                if buyer.country != shop.country {
                    foreign.push(sale.clone());
                }
            }
        }
        Ok(foreign)
    }

    /// Sum of `price * good_count` over all sales.
    #[instrument(name = "analytics::total_sales_value", level = "debug", skip_all)]
    pub fn total_sales_value(&self, store: &TableStore) -> Result<u64> {
        self.check_tables(store, Query::TotalSalesValue)?;
        let goods = IdLookup::new(store.get_table::<Good>()?);
        let sales = store.get_table::<Sale>()?;

        let mut total: u64 = 0;
        for sale in sales {
            if let Some(good) = self.resolve(&goods, sale, sale.good_id)? {
                total = total.saturating_add(sale_value(good, sale));
            }
        }
        Ok(total)
    }

    /// Follows one reference of `sale`, applying the gap policy on a miss.
    fn resolve<'a, T: Entity>(
        &self,
        lookup: &IdLookup<'a, T>,
        sale: &Sale,
        id: EntityId,
    ) -> Result<Option<&'a T>> {
        if let Some(row) = lookup.first(id) {
            return Ok(Some(row));
        }
        let target = T::KIND;
        match self.config.missing_reference {
            GapPolicy::Skip => {
                debug!(sale = sale.id, %target, id, "skipping unresolved reference");
                Ok(None)
            }
            GapPolicy::Fail => Err(Error::referential_gap(sale.id, target, id)),
        }
    }
}

fn name_len(buyer: &Buyer) -> usize {
    buyer.name.chars().count()
}

fn sale_value(good: &Good, sale: &Sale) -> u64 {
    good.price.saturating_mul(u64::from(sale.good_count))
}
