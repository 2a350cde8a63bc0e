//! URL utilities for extracting channel handles

use crate::error::ScrapeError;
use regex::Regex;

/// Extract the `@handle` token from a channel URL.
///
/// The handle runs from the first `@` up to the next `/`, `?` or `&`, or to
/// the end of the input.
pub fn extract_handle(url: &str) -> Result<String, ScrapeError> {
    let handle_regex = Regex::new(r"@([^/?&]+)")?;

    handle_regex
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|handle| handle.as_str().to_string())
        .ok_or_else(|| ScrapeError::InvalidChannelUrl(url.to_string()))
}
