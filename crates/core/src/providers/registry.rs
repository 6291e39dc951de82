use crate::models::asset::AssetCategory;

use super::traits::SeriesProvider;

/// Registry of series providers.
///
/// Routes requests by `AssetCategory`; registration order is priority order.
#[derive(Default)]
pub struct SeriesProviderRegistry {
    providers: Vec<Box<dyn SeriesProvider>>,
}

impl std::fmt::Debug for SeriesProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesProviderRegistry")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl SeriesProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Box<dyn SeriesProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// First provider serving `category`.
    pub fn get_provider_for(&self, category: AssetCategory) -> Option<&dyn SeriesProvider> {
        self.providers
            .iter()
            .find(|p| p.supported_categories().contains(&category))
            .map(|p| p.as_ref())
    }

    /// All providers serving `category`, in priority order. Used for fallback.
    pub fn get_providers_for(&self, category: AssetCategory) -> Vec<&dyn SeriesProvider> {
        self.providers
            .iter()
            .filter(|p| p.supported_categories().contains(&category))
            .map(|p| p.as_ref())
            .collect()
    }
}
