//! `[site]`, `[contact]`, `[social]` and `[legal]` sections.
//!
//! These sections hold the values documents reference through
//! `{{namespace.key}}` placeholders.

use super::defaults;
use educe::Educe;
use serde::Deserialize;

/// `[site]` section in statue.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [site]
/// name = "Statue SSG"
/// description = "Markdown sites made simple"
/// url = "https://statuessg.com"
/// author = "Statue Team"
/// ```
#[derive(Debug, Clone, Educe, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteInfo {
    /// Site name, exposed as `site.name`.
    #[serde(default = "defaults::site::name")]
    #[educe(Default = defaults::site::name())]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Canonical base URL. Must start with `http` when set.
    #[serde(default)]
    pub url: String,

    #[serde(default = "defaults::site::author")]
    #[educe(Default = defaults::site::author())]
    pub author: String,
}

/// `[contact]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub email: String,
    pub privacy_email: String,
    pub support_email: String,
    pub phone: String,
    pub address: AddressConfig,
}

/// `[contact.address]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AddressConfig {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl AddressConfig {
    /// Single-line postal address: `street, city, state zip_code`.
    pub fn full(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.state, self.zip_code
        )
    }
}

/// `[social]` section - profile links.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    pub twitter: String,
    pub github: String,
    pub linkedin: String,
    pub facebook: String,
    pub instagram: String,
    pub youtube: String,
}

/// `[legal]` section - dates and notices used by legal pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegalConfig {
    pub privacy_policy_last_updated: String,
    pub terms_last_updated: String,
    pub do_not_sell: DoNotSellConfig,
}

/// `[legal.do_not_sell]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoNotSellConfig {
    /// Human readable processing time, e.g. "15 business days".
    pub processing_time: String,
}
