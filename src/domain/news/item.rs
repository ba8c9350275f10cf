use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dedup::fingerprint;

/// Coarse topic assigned to a news item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Weather,
    Health,
    Agriculture,
    Market,
    Education,
    Government,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Weather,
        Category::Health,
        Category::Agriculture,
        Category::Market,
        Category::Education,
        Category::Government,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Weather => "weather",
            Category::Health => "health",
            Category::Agriculture => "agriculture",
            Category::Market => "market",
            Category::Education => "education",
            Category::Government => "government",
            Category::General => "general",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let wanted = input.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == wanted)
    }
}

/// Category selection on the read path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// `"all"` and unknown values select everything
    pub fn resolve(input: &str) -> Self {
        Category::parse(input).map_or(CategoryFilter::All, CategoryFilter::Only)
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

/// Normalized unit of aggregated news content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: Category,
    pub url: String,
    pub source_name: String,
    pub timestamp: DateTime<Utc>,
}

impl Item {
    /// Builds an uncategorized item; the id is derived from the title
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
        source_name: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let title = title.into().trim().to_string();

        Self {
            id: fingerprint(&title),
            title,
            summary: summary.into(),
            category: Category::General,
            url: url.into(),
            source_name: source_name.into(),
            timestamp,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}
