//! Shared domain enumerations aligned with persisted database enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "content_type", rename_all = "snake_case")]
pub enum ContentType {
    Post,
    Page,
    Product,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Post => "post",
            ContentType::Page => "page",
            ContentType::Product => "product",
        }
    }
}

impl TryFrom<&str> for ContentType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "post" => Ok(ContentType::Post),
            "page" => Ok(ContentType::Page),
            "product" => Ok(ContentType::Product),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "content_status", rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "taxonomy", rename_all = "snake_case")]
pub enum Taxonomy {
    Category,
    ProductCategory,
}

impl Taxonomy {
    pub fn as_str(self) -> &'static str {
        match self {
            Taxonomy::Category => "category",
            Taxonomy::ProductCategory => "product_category",
        }
    }
}

/// An index/follow instruction for search-engine crawlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotsDirective {
    IndexFollow,
    IndexNofollow,
    NoindexFollow,
    NoindexNofollow,
}

impl RobotsDirective {
    pub fn as_str(self) -> &'static str {
        match self {
            RobotsDirective::IndexFollow => "index,follow",
            RobotsDirective::IndexNofollow => "index,nofollow",
            RobotsDirective::NoindexFollow => "noindex,follow",
            RobotsDirective::NoindexNofollow => "noindex,nofollow",
        }
    }

    /// Noindex variants exclude a URL from every sitemap document.
    pub fn is_noindex(self) -> bool {
        matches!(
            self,
            RobotsDirective::NoindexFollow | RobotsDirective::NoindexNofollow
        )
    }
}

impl fmt::Display for RobotsDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RobotsDirective {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "index,follow" => Ok(RobotsDirective::IndexFollow),
            "index,nofollow" => Ok(RobotsDirective::IndexNofollow),
            "noindex,follow" => Ok(RobotsDirective::NoindexFollow),
            "noindex,nofollow" => Ok(RobotsDirective::NoindexNofollow),
            _ => Err(()),
        }
    }
}

/// Sitemap `<changefreq>` values from the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "always" => Ok(ChangeFrequency::Always),
            "hourly" => Ok(ChangeFrequency::Hourly),
            "daily" => Ok(ChangeFrequency::Daily),
            "weekly" => Ok(ChangeFrequency::Weekly),
            "monthly" => Ok(ChangeFrequency::Monthly),
            "yearly" => Ok(ChangeFrequency::Yearly),
            "never" => Ok(ChangeFrequency::Never),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noindex_variants_are_detected() {
        assert!(RobotsDirective::NoindexFollow.is_noindex());
        assert!(RobotsDirective::NoindexNofollow.is_noindex());
        assert!(!RobotsDirective::IndexFollow.is_noindex());
        assert!(!RobotsDirective::IndexNofollow.is_noindex());
    }

    #[test]
    fn robots_directive_round_trips_through_str() {
        for directive in [
            RobotsDirective::IndexFollow,
            RobotsDirective::IndexNofollow,
            RobotsDirective::NoindexFollow,
            RobotsDirective::NoindexNofollow,
        ] {
            assert_eq!(directive.as_str().parse(), Ok(directive));
        }
    }

    #[test]
    fn unknown_change_frequency_is_rejected() {
        assert!("fortnightly".parse::<ChangeFrequency>().is_err());
        assert!("".parse::<ChangeFrequency>().is_err());
    }
}
