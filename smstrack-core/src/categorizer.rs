//! Keyword rules mapping a free-text message to a spending category.
//!
//! Rules are checked in order and the first hit wins, so a message that
//! mentions both "amazon" and "fuel" is Shopping.

use crate::record::Category;

/// Ordered (keywords, category) rules. Keywords are lower-case.
const RULES: &[(&[&str], Category)] = &[
    (&["amazon"], Category::Shopping),
    (&["swiggy", "zomato"], Category::Food),
    (&["petrol", "fuel"], Category::Fuel),
    (&["bill", "electricity"], Category::Utilities),
];

/// Categorize a message with case-insensitive substring matching.
pub fn categorize(message: &str) -> Category {
    let msg = message.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| msg.contains(k)))
        .map(|(_, category)| category.clone())
        .unwrap_or(Category::Others)
}
