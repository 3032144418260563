//! `{{namespace.key}}` placeholder expansion.
//!
//! Documents reference site configuration through placeholders:
//!
//! ```text
//! Contact us at {{ contact.email }}. Last updated {{date.year}}.
//! ```
//!
//! Expansion is single-pass: substituted values are never rescanned.
//! Unknown keys are left verbatim and reported back to the caller.

use crate::config::SiteConfig;
use chrono::{Local, NaiveDate};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `{{ key }}` placeholder; the key is everything up to the first `}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").unwrap());

// ============================================================================
// Clock
// ============================================================================

/// Source of the current date for `date.*` variables.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

// ============================================================================
// Variable Table
// ============================================================================

/// Result of expanding one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    /// Keys of placeholders left unexpanded, in order of appearance
    pub unknown: Vec<String>,
}

/// Flat mapping from dotted keys to replacement values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableTable {
    vars: BTreeMap<String, String>,
}

impl VariableTable {
    /// Build a table from site configuration plus clock-derived entries.
    #[cfg(test)]
    pub fn new(config: &SiteConfig, today: NaiveDate) -> Self {
        let mut table = Self::from_config(config);
        table.insert_dates(today);
        table
    }

    /// Configuration-derived entries only (no `date.*` keys).
    pub fn from_config(config: &SiteConfig) -> Self {
        let site = &config.site;
        let contact = &config.contact;
        let address = &contact.address;
        let social = &config.social;
        let legal = &config.legal;

        let mut vars: BTreeMap<String, String> = [
            ("site.name", &site.name),
            ("site.description", &site.description),
            ("site.url", &site.url),
            ("site.author", &site.author),
            ("contact.email", &contact.email),
            ("contact.privacyEmail", &contact.privacy_email),
            ("contact.supportEmail", &contact.support_email),
            ("contact.phone", &contact.phone),
            ("contact.address.street", &address.street),
            ("contact.address.city", &address.city),
            ("contact.address.state", &address.state),
            ("contact.address.zipCode", &address.zip_code),
            ("contact.address.country", &address.country),
            ("social.twitter", &social.twitter),
            ("social.github", &social.github),
            ("social.linkedin", &social.linkedin),
            ("social.facebook", &social.facebook),
            ("social.instagram", &social.instagram),
            ("social.youtube", &social.youtube),
            ("legal.privacyPolicyLastUpdated", &legal.privacy_policy_last_updated),
            ("legal.termsLastUpdated", &legal.terms_last_updated),
            ("legal.doNotSell.processingTime", &legal.do_not_sell.processing_time),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value.clone()))
        .collect();

        vars.insert("contact.address.full".into(), address.full());

        for (key, value) in &config.extra {
            flatten_extra(&mut vars, &format!("extra.{key}"), value);
        }

        Self { vars }
    }

    /// Add `date.now`, `date.year`, `date.month` and `date.day`.
    pub fn insert_dates(&mut self, today: NaiveDate) {
        self.insert("date.now", today.format("%-m/%-d/%Y").to_string());
        self.insert("date.year", today.format("%Y").to_string());
        self.insert("date.month", today.format("%B").to_string());
        self.insert("date.day", today.format("%-d").to_string());
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every known placeholder in `input`.
    pub fn expand(&self, input: &str) -> Expansion {
        let mut unknown = Vec::new();
        let text = PLACEHOLDER.replace_all(input, |caps: &Captures| {
            let key = caps[1].trim();
            match self.vars.get(key) {
                Some(value) => value.clone(),
                None => {
                    unknown.push(key.to_owned());
                    caps[0].to_owned()
                }
            }
        });

        Expansion {
            text: text.into_owned(),
            unknown,
        }
    }
}

/// Flatten a TOML value into dotted keys. Arrays are skipped.
fn flatten_extra(vars: &mut BTreeMap<String, String>, key: &str, value: &toml::Value) {
    let text = match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Table(table) => {
            for (child, value) in table {
                flatten_extra(vars, &format!("{key}.{child}"), value);
            }
            return;
        }
        toml::Value::Array(_) => return,
    };
    vars.insert(key.to_owned(), text);
}
