//! Summary sentence for the result screen and text-to-speech.

use labelscan_contracts::{
    scan::{FlaggedIngredient, RiskLevel},
    token::humanize,
};

pub const NO_CONFLICTS_SUMMARY: &str =
    "No conflicts detected. This product looks safe for your profile.";

/// Build the summary from a finished result.
///
/// `flagged` must already be in descending severity order; the first two
/// entries are named.
pub fn summarize(
    flagged: &[FlaggedIngredient],
    total_ingredients: usize,
    classification: RiskLevel,
) -> String {
    if flagged.is_empty() {
        return NO_CONFLICTS_SUMMARY.to_string();
    }

    let names: Vec<String> = flagged
        .iter()
        .take(2)
        .map(|f| humanize(&f.ingredient))
        .collect();

    format!(
        "Detected {} {}. Found {} {}, most notably {}. Overall risk: {}.",
        total_ingredients,
        plural(total_ingredients, "ingredient", "ingredients"),
        flagged.len(),
        plural(flagged.len(), "conflict", "conflicts"),
        names.join(" and "),
        classification,
    )
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}
