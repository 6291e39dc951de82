use crate::models::asset::{AssetCategory, AssetCategory::*, AssetInfo};

/// The static asset universe: display symbol → provider ticker → category.
const UNIVERSE: &[AssetInfo] = &[
    // Commodities
    AssetInfo::new("Gold", "GC=F", Commodity),
    AssetInfo::new("Silver", "SI=F", Commodity),
    AssetInfo::new("Copper", "HG=F", Commodity),
    AssetInfo::new("TIGER Gold", "411060.KS", Commodity),
    // Crypto
    AssetInfo::new("BTC", "BTC-USD", Crypto),
    AssetInfo::new("ETH", "ETH-USD", Crypto),
    // Domestic market
    AssetInfo::new("KOSPI", "^KS11", DomesticEquity),
    AssetInfo::new("Samsung", "005930.KS", DomesticEquity),
    AssetInfo::new("SK Hynix", "000660.KS", DomesticEquity),
    AssetInfo::new("TIGER 200", "102110.KS", DomesticEquity),
    AssetInfo::new("TIGER Heavy", "139260.KS", DomesticEquity),
    // Overseas equities and indices
    AssetInfo::new("NASDAQ", "^IXIC", ForeignEquity),
    AssetInfo::new("S&P 500", "^GSPC", ForeignEquity),
    AssetInfo::new("NVDA", "NVDA", ForeignEquity),
    AssetInfo::new("AAPL", "AAPL", ForeignEquity),
    AssetInfo::new("MSFT", "MSFT", ForeignEquity),
    AssetInfo::new("AMZN", "AMZN", ForeignEquity),
    AssetInfo::new("GOOG", "GOOG", ForeignEquity),
    AssetInfo::new("AVGO", "AVGO", ForeignEquity),
    AssetInfo::new("TSLA", "TSLA", ForeignEquity),
    AssetInfo::new("META", "META", ForeignEquity),
    AssetInfo::new("QQQ", "QQQ", ForeignEquity),
    AssetInfo::new("MSTR", "MSTR", ForeignEquity),
    AssetInfo::new("TIGER Nasdaq", "133690.KS", ForeignEquity),
    AssetInfo::new("TIGER US Tech", "381170.KS", ForeignEquity),
    // Other
    AssetInfo::new("DXY", "DX-Y.NYB", Other),
    AssetInfo::new("USD/KRW", "KRW=X", Other),
    AssetInfo::new("TSMC", "TSM", Other),
];

/// Static symbol lookups. Stateless; unknown symbols are `Other`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetClassifier;

impl AssetClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, symbol: &str) -> AssetCategory {
        self.info(symbol).map_or(AssetCategory::Other, |info| info.category)
    }

    pub fn ticker_for(&self, symbol: &str) -> Option<&'static str> {
        self.info(symbol).map(|info| info.ticker)
    }

    pub fn info(&self, symbol: &str) -> Option<&'static AssetInfo> {
        UNIVERSE.iter().find(|info| info.name == symbol)
    }

    pub fn is_known(&self, symbol: &str) -> bool {
        self.info(symbol).is_some()
    }

    pub fn all(&self) -> &'static [AssetInfo] {
        UNIVERSE
    }
}
