//! Search query shaping.

use zenith_core::error::AppError;
use zenith_core::result::AppResult;

/// Turn free text into a `to_tsquery('simple', ..)` expression.
///
/// Whitespace-separated words are split further on anything that is not
/// a letter or digit, lowercased and joined with `&`, so every word must
/// match. Names are indexed the same way, which makes `report.pdf`
/// match a file called `Q3 Report.pdf`. Input without a single word is
/// rejected before any store call.
pub fn to_tsquery(raw: &str) -> AppResult<String> {
    let terms: Vec<String> = raw
        .split_whitespace()
        .flat_map(|word| word.split(|c: char| !c.is_alphanumeric()))
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect();

    if terms.is_empty() {
        return Err(AppError::validation("Search query is required."));
    }
    Ok(terms.join(" & "))
}
