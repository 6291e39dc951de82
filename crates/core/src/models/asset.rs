use serde::{Deserialize, Serialize};

/// Display grouping for a tracked symbol.
///
/// Only used downstream (bar colours, legend groups); the resolution
/// engine never branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    /// Precious/base metals and metal-backed funds (Gold, Silver, Copper)
    Commodity,
    /// Cryptocurrencies (BTC, ETH)
    Crypto,
    /// Home-market equities and indices (KOSPI, Samsung, TIGER 200)
    DomesticEquity,
    /// Overseas equities and indices (NVDA, NASDAQ, QQQ)
    ForeignEquity,
    /// Everything else, including unknown symbols (DXY, USD/KRW)
    #[default]
    Other,
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetCategory::Commodity => write!(f, "Commodity"),
            AssetCategory::Crypto => write!(f, "Crypto"),
            AssetCategory::DomesticEquity => write!(f, "Domestic Equity"),
            AssetCategory::ForeignEquity => write!(f, "Foreign Equity"),
            AssetCategory::Other => write!(f, "Other"),
        }
    }
}

/// A symbol of the static asset universe.
///
/// `name` is the display symbol callers use ("S&P 500", "Samsung"),
/// `ticker` is what a market-data provider understands ("^GSPC", "005930.KS").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetInfo {
    pub name: &'static str,
    pub ticker: &'static str,
    pub category: AssetCategory,
}

impl AssetInfo {
    pub const fn new(name: &'static str, ticker: &'static str, category: AssetCategory) -> Self {
        Self {
            name,
            ticker,
            category,
        }
    }
}
