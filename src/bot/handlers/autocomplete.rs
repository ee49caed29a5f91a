//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests product names as the user types so that command arguments match
//! catalog entries exactly.

use crate::{bot::BotData, core::product, errors::Error};

/// Discord shows at most this many suggestions
const MAX_SUGGESTIONS: usize = 25;

/// Filters product names by a case-insensitive substring, sorted and capped.
#[must_use]
pub fn matching_names(names: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .collect();

    // Sort alphabetically for consistent UX
    matching.sort();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}

/// Provides autocomplete suggestions for product names.
///
/// Returns just the name (not formatted with price) so it matches command
/// parameters exactly.
pub async fn autocomplete_product_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(products) = product::get_all_products(db).await else {
        return Vec::new();
    };

    matching_names(products.into_iter().map(|prod| prod.name), partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_names_case_insensitive_and_sorted() {
        let names = ["Mug", "mug warmer", "Headphones", "T-shirt"].map(String::from);
        assert_eq!(matching_names(names, "MUG"), vec!["Mug", "mug warmer"]);
    }

    #[test]
    fn test_matching_names_caps_results() {
        let names = (0..40).map(|i| format!("Sticker {i:02}"));
        let suggestions = matching_names(names, "");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "Sticker 00");
    }
}
