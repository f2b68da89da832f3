use serde::{Deserialize, Serialize};

/// Tenant-wide application settings, fetched best-effort after sign-in and
/// editable from the settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Company name shown across the panel.
    pub company_name: Option<String>,
    /// ISO currency code for amounts.
    pub currency: Option<String>,
    /// Preferred date format string.
    pub date_format: Option<String>,
    /// Default UI language code.
    pub language: Option<String>,
}
