//! Shared User-Agent string for outbound HTTP requests.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/astro-biblio";

/// Default User-Agent for country data requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("astro-biblio/{version} (research-tool; +{PROJECT_UA_URL})")
}
