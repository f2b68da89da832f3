use std::sync::Arc;

use crate::client_ports::ClientStorage;

/// Per-route list rendering preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    /// Tabular rows.
    List,
    /// Card grid.
    Card,
}

impl ViewType {
    /// Returns the storage string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Card => "card",
        }
    }

    /// Parses a storage string, if it names a known view type.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "list" => Some(Self::List),
            "card" => Some(Self::Card),
            _ => None,
        }
    }
}

/// Per-route screen preferences: page size and view type.
///
/// Keyed by a stable route string; page position is deliberately never
/// persisted here.
#[derive(Clone)]
pub struct RoutePreferenceStore {
    storage: Arc<dyn ClientStorage>,
}

impl RoutePreferenceStore {
    /// Creates a preference store over the client storage.
    #[must_use]
    pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
        Self { storage }
    }

    /// Returns the stored page size for a route, if any.
    #[must_use]
    pub fn page_size(&self, route: &str) -> Option<u32> {
        self.storage
            .get(&format!("{route}.pageSize"))
            .and_then(|value| value.parse().ok())
    }

    /// Stores the page size preference for a route.
    pub fn set_page_size(&self, route: &str, page_size: u32) {
        self.storage
            .set(&format!("{route}.pageSize"), &page_size.to_string());
    }

    /// Returns the stored view type for a route, if any.
    #[must_use]
    pub fn view_type(&self, route: &str) -> Option<ViewType> {
        self.storage
            .get(&format!("{route}.viewType"))
            .and_then(|value| ViewType::parse(&value))
    }

    /// Stores the view type preference for a route.
    pub fn set_view_type(&self, route: &str, view_type: ViewType) {
        self.storage
            .set(&format!("{route}.viewType"), view_type.as_str());
    }
}
