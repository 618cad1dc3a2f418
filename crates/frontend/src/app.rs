use crate::analytics::{Analytics, FacebookPixel, GoogleAnalytics};
use crate::pages::catalog::CatalogPage;
use crate::shared::config::SiteConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = SiteConfig::from_build_env();

    // Trackers check for their tag on every call, so a tag loaded from a
    // component prop is tracked as well as one from the config.
    provide_context(Analytics::browser());
    provide_context(config);

    view! {
        <GoogleAnalytics />
        <FacebookPixel />
        <CatalogPage />
    }
}
