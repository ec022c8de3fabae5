//! Query identifiers.

use agora_core::EntityKind;
use core::fmt;

/// One of the seven analytic queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    LongestNameBuyerGoods,
    MinShopsPerCountry,
    MinSalesCity,
    MostExpensiveGoodCategory,
    MostPopularGoodBuyers,
    OtherCitySales,
    TotalSalesValue,
}

impl Query {
    /// All queries.
    pub const ALL: [Query; 7] = [
        Query::LongestNameBuyerGoods,
        Query::MinShopsPerCountry,
        Query::MinSalesCity,
        Query::MostExpensiveGoodCategory,
        Query::MostPopularGoodBuyers,
        Query::OtherCitySales,
        Query::TotalSalesValue,
    ];

    /// Tables that must exist before the query runs.
    pub const fn required_tables(self) -> &'static [EntityKind] {
        use EntityKind::*;
        match self {
            Query::LongestNameBuyerGoods => &[Buyer, Good, Sale],
            Query::MinShopsPerCountry => &[Shop],
            Query::MinSalesCity => &[Buyer, Good, Sale, Shop],
            Query::MostExpensiveGoodCategory => &[Good],
            Query::MostPopularGoodBuyers => &[Buyer, Good, Sale],
            Query::OtherCitySales => &[Buyer, Sale, Shop],
            Query::TotalSalesValue => &[Good, Sale],
        }
    }

    /// Snake-case name, used in log spans.
    pub const fn name(self) -> &'static str {
        match self {
            Query::LongestNameBuyerGoods => "longest_name_buyer_goods",
            Query::MinShopsPerCountry => "min_shops_per_country",
            Query::MinSalesCity => "min_sales_city",
            Query::MostExpensiveGoodCategory => "most_expensive_good_category",
            Query::MostPopularGoodBuyers => "most_popular_good_buyers",
            Query::OtherCitySales => "other_city_sales",
            Query::TotalSalesValue => "total_sales_value",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
