//! News domain - items, deduplication and categorization

mod categorizer;
mod dedup;
mod item;

pub use categorizer::{Categorizer, CategoryRule, DEFAULT_RULES};
pub use dedup::{deduplicate, fingerprint};
pub use item::{Category, CategoryFilter, Item};

use chrono::{DateTime, Utc};

use crate::domain::locale::Language;

/// Default cap on articles kept per language partition
pub const DEFAULT_MAX_ARTICLES: usize = 10;

/// Dedup, categorize and cap a concatenated list of items from one source kind
pub fn normalize(items: Vec<Item>, categorizer: &Categorizer, max_articles: usize) -> Vec<Item> {
    deduplicate(items)
        .into_iter()
        .take(max_articles)
        .map(|item| categorizer.apply(item))
        .collect()
}

/// Static bulletin served when no feed for a language produced anything
pub fn offline_bulletin(language: Language, now: DateTime<Utc>) -> Vec<Item> {
    let (title, summary) = match language {
        Language::English => (
            "Live news is temporarily unavailable",
            "Showing the offline bulletin. Fresh headlines appear automatically once the feeds respond.",
        ),
        Language::Hindi => (
            "ताज़ा समाचार अभी उपलब्ध नहीं हैं",
            "ऑफ़लाइन बुलेटिन दिखाया जा रहा है। फ़ीड उपलब्ध होते ही नई खबरें अपने आप दिखेंगी।",
        ),
        Language::Telugu => (
            "తాజా వార్తలు ప్రస్తుతం అందుబాటులో లేవు",
            "ఆఫ్‌లైన్ బులెటిన్ చూపిస్తున్నాం. ఫీడ్‌లు స్పందించగానే కొత్త వార్తలు వస్తాయి.",
        ),
    };

    vec![
        Item::new(title, summary, "#", "Dashboard", now),
        Item::new(
            "Kisan Call Centre: dial 1800-180-1551 for free farming advice",
            "Toll-free, every day from 6 AM to 10 PM, in local languages.",
            "https://mkisan.gov.in",
            "Dashboard",
            now,
        )
        .with_category(Category::Agriculture),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dedups_before_capping() {
        let now = Utc::now();
        let items = vec![
            Item::new("Heavy rainfall expected in Guntur", "", "#", "a", now),
            Item::new("Heavy rainfall expected in Guntur", "", "#", "b", now),
            Item::new("Tomato price crashes at Madanapalle", "", "#", "a", now),
            Item::new("State exams postponed by a week", "", "#", "b", now),
        ];

        let normalized = normalize(items, &Categorizer::default(), 2);

        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].category, Category::Weather);
        assert_eq!(normalized[1].category, Category::Market);
    }

    #[test]
    fn test_offline_bulletin_is_never_empty() {
        for language in Language::ALL {
            let bulletin = offline_bulletin(language, Utc::now());
            assert!(!bulletin.is_empty());
            assert_ne!(bulletin[0].id, bulletin[1].id);
        }
    }
}
