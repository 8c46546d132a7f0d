//! Merchant categorization from an insertion-ordered keyword configuration.
//!
//! Config text format, one category per line:
//!
//! ```text
//! # comments are ignored
//! Amazon = amazon, amzn
//! Gpay = gpay, google pay, gpay network
//! ```
//!
//! Insertion order is the priority order: the first category with any
//! matching keyword wins. Callers wanting specific categories to take
//! precedence over generic ones must list them first.

use serde::{Deserialize, Serialize};

/// Sentinel category for descriptions no keyword matches.
pub const OTHER_CATEGORY: &str = "Other";

/// Immutable snapshot of the category → keywords mapping for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantConfig {
    categories: Vec<(String, Vec<String>)>,
}

impl MerchantConfig {
    /// Parse the `Category = kw1, kw2` text format. Blank lines, comment
    /// lines, and lines without `=` are skipped.
    pub fn parse(text: &str) -> Self {
        let mut categories: Vec<(String, Vec<String>)> = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((category, keywords)) = line.split_once('=') else {
                continue;
            };
            let category = category.trim();
            let keywords: Vec<String> = keywords
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
            if category.is_empty() || keywords.is_empty() {
                continue;
            }
            categories.push((category.to_string(), keywords));
        }
        MerchantConfig { categories }
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        MerchantConfig {
            categories: entries
                .into_iter()
                .map(|(c, kws)| (c.into(), kws.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// First category whose keyword set matches the description
    /// (case-insensitive substring), else "Other".
    pub fn categorize(&self, description: &str) -> &str {
        let description = description.to_lowercase();
        for (category, keywords) in &self.categories {
            for keyword in keywords {
                if description.contains(&keyword.to_lowercase()) {
                    return category;
                }
            }
        }
        OTHER_CATEGORY
    }

    /// Category names in priority order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(c, _)| c.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(c, kws)| (c.as_str(), kws.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for MerchantConfig {
    fn default() -> Self {
        MerchantConfig::from_entries([
            ("Adyen", vec!["adyen", "adyen payment"]),
            ("MYR", vec!["myr", "myr payment"]),
            ("Lalamove", vec!["lalamove", "lala move"]),
            ("Amazon", vec!["amazon", "amzn"]),
            ("Deliveroo", vec!["deliveroo", "deliveroo payment"]),
            ("Gpay", vec!["gpay", "google pay", "gpay network"]),
            ("Hero", vec!["hero", "delivery hero", "foodpanda"]),
        ])
    }
}
