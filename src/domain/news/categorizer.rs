//! Keyword rules assigning a category to each item

use super::item::{Category, Item};

/// One entry of the priority list: a category and the substrings that select it
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

/// Rules in priority order. The first rule with any matching keyword wins.
pub const DEFAULT_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Weather,
        keywords: &[
            "cyclone", "monsoon", "rainfall", "heavy rain", "flood", "drought", "heatwave",
            "heat wave", "thunderstorm", "weather", "मौसम", "बारिश", "चक्रवात", "వర్షం",
            "తుఫాను", "వాతావరణ",
        ],
    },
    CategoryRule {
        category: Category::Health,
        keywords: &[
            "hospital", "health", "vaccine", "disease", "dengue", "malaria", "covid", "medical",
            "doctor", "अस्पताल", "स्वास्थ्य", "ఆసుపత్రి", "ఆరోగ్య",
        ],
    },
    CategoryRule {
        category: Category::Agriculture,
        keywords: &[
            "farmer", "crop", "kharif", "rabi", "paddy", "harvest", "fertiliser", "fertilizer",
            "irrigation", "agricultur", "tractor", "किसान", "फसल", "खेती", "రైతు", "పంట",
        ],
    },
    CategoryRule {
        category: Category::Market,
        keywords: &[
            "price", "mandi", "inflation", "market", "rupee", "sensex", "nifty", "gold",
            "भाव", "मंडी", "बाजार", "ధర", "మార్కెట్",
        ],
    },
    CategoryRule {
        category: Category::Education,
        keywords: &[
            "school", "exams", "examination", "student", "education", "university",
            "scholarship", "college", "स्कूल", "परीक्षा", "छात्र", "పాఠశాల", "పరీక్ష", "విద్యార్థ",
        ],
    },
    CategoryRule {
        category: Category::Government,
        keywords: &[
            "scheme", "government", "minister", "cabinet", "yojana", "policy", "election",
            "assembly", "सरकार", "योजना", "मंत्री", "ప్రభుత్వ", "పథకం", "మంత్రి",
        ],
    },
];

/// Evaluates an ordered rule list against `title + summary`
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: &'static [CategoryRule],
    fallback: Category,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(DEFAULT_RULES)
    }
}

impl Categorizer {
    pub fn new(rules: &'static [CategoryRule]) -> Self {
        Self {
            rules,
            fallback: Category::General,
        }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        self.rules
    }

    pub fn categorize(&self, title: &str, summary: &str) -> Category {
        let haystack = format!("{} {}", title, summary).to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| haystack.contains(kw)))
            .map_or(self.fallback, |rule| rule.category)
    }

    pub fn apply(&self, item: Item) -> Item {
        let category = self.categorize(&item.title, &item.summary);
        item.with_category(category)
    }
}
