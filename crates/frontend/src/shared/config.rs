//! Site configuration.
//!
//! Values are baked in at build time from the environment
//! (`GA_MEASUREMENT_ID`, `FB_PIXEL_ID`, `ORDER_PHONE`), so a plain
//! `trunk build` without them produces a page with tracking switched off.

use leptos::prelude::*;

/// WhatsApp number orders are sent to when `ORDER_PHONE` is not set.
pub const DEFAULT_ORDER_PHONE: &str = "+21626010403";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Google Analytics measurement id (`G-XXXXXXXXXX`)
    pub ga_measurement_id: Option<String>,
    /// Facebook Pixel id
    pub pixel_id: Option<String>,
    pub order_phone: String,
}

impl SiteConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("GA_MEASUREMENT_ID"),
            option_env!("FB_PIXEL_ID"),
            option_env!("ORDER_PHONE"),
        )
    }

    pub fn from_values(
        ga_measurement_id: Option<&str>,
        pixel_id: Option<&str>,
        order_phone: Option<&str>,
    ) -> Self {
        Self {
            ga_measurement_id: normalize_identifier(ga_measurement_id),
            pixel_id: normalize_identifier(pixel_id),
            order_phone: normalize_identifier(order_phone)
                .unwrap_or_else(|| DEFAULT_ORDER_PHONE.to_string()),
        }
    }
}

/// Blank identifiers count as absent.
pub fn normalize_identifier(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Config from context, or the build-time config if none was provided.
pub fn use_site_config() -> SiteConfig {
    use_context::<SiteConfig>().unwrap_or_else(SiteConfig::from_build_env)
}
