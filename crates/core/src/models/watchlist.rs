use serde::{Deserialize, Serialize};

/// Preset symbol groups shown together on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Watchlist {
    /// Largest assets worldwide, plus the home-market leader.
    GlobalTop,
    /// Macro gauges: metals, crypto, major indices, dollar.
    KeyIndicators,
    /// The user's own holdings.
    MyPortfolio,
}

const GLOBAL_TOP: &[&str] = &[
    "Gold", "NVDA", "Silver", "AAPL", "MSFT", "AMZN", "GOOG", "TSMC", "AVGO", "TSLA", "META",
    "BTC", "Samsung",
];

const KEY_INDICATORS: &[&str] = &[
    "Gold", "Silver", "Copper", "BTC", "ETH", "KOSPI", "NASDAQ", "S&P 500", "DXY", "USD/KRW",
];

const MY_PORTFOLIO: &[&str] = &[
    "TIGER 200",
    "TIGER Heavy",
    "Samsung",
    "SK Hynix",
    "TIGER Nasdaq",
    "TIGER US Tech",
    "QQQ",
    "TSLA",
    "MSTR",
    "TIGER Gold",
    "BTC",
    "ETH",
];

impl Watchlist {
    pub const ALL: [Watchlist; 3] = [
        Watchlist::GlobalTop,
        Watchlist::KeyIndicators,
        Watchlist::MyPortfolio,
    ];

    /// Symbols in display order.
    pub fn symbols(&self) -> &'static [&'static str] {
        match self {
            Watchlist::GlobalTop => GLOBAL_TOP,
            Watchlist::KeyIndicators => KEY_INDICATORS,
            Watchlist::MyPortfolio => MY_PORTFOLIO,
        }
    }
}

impl std::fmt::Display for Watchlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Watchlist::GlobalTop => write!(f, "Global Top"),
            Watchlist::KeyIndicators => write!(f, "Key Indicators"),
            Watchlist::MyPortfolio => write!(f, "My Portfolio"),
        }
    }
}
