//! `Accept-Language` header parsing.
//!
//! Parsing is deliberately forgiving. The header arrives on every page
//! request, bots send arbitrary garbage in it, and a malformed entry must
//! never fail the request; anything unusable is silently dropped.

/// One language range from an `Accept-Language` header, with its quality weight.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// The language tag as sent, lowercased (e.g. "en-us", "pl", "*").
    pub tag: String,
    /// Quality weight in `[0.0, 1.0]`; a missing `q` parameter means `1.0`.
    pub quality: f32,
}

/// Parse an `Accept-Language` value into preferences ordered by descending
/// quality. Ties keep header order.
///
/// Entries whose tag is not a plausible language range (`*`, or ASCII
/// alphanumerics separated by `-`/`_`), with an unparsable quality, or with
/// `q=0` ("not acceptable") are dropped. Never fails; the worst input yields
/// an empty list.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = Vec::new();

    for entry in header.split(',') {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or("").trim().to_lowercase();
        if !is_language_range(&tag) {
            continue;
        }

        let mut quality = 1.0_f32;
        let mut usable = true;
        for param in parts {
            let param = param.trim();
            let Some(value) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) else {
                // Unknown parameters are ignored per RFC 9110 leniency.
                continue;
            };
            match value.trim().parse::<f32>() {
                Ok(q) if q.is_finite() => quality = q.clamp(0.0, 1.0),
                _ => {
                    usable = false;
                    break;
                }
            }
        }

        if usable && quality > 0.0 {
            preferences.push(LanguagePreference { tag, quality });
        }
    }

    // Stable sort keeps header order for equal weights.
    preferences.sort_by(|a, b| {
        b.quality
            .partial_cmp(&a.quality)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    preferences
}

/// Primary language subtag of a parsed tag ("en-us" -> "en").
pub(crate) fn primary_subtag(tag: &str) -> &str {
    tag.split(|c| c == '-' || c == '_').next().unwrap_or(tag)
}

/// A usable language range is `*` or ASCII alphanumerics separated by
/// `-`/`_`. Anything else (control characters, punctuation, whitespace,
/// empty tags) is header garbage and never becomes a preference.
fn is_language_range(tag: &str) -> bool {
    tag == "*"
        || (!tag.is_empty()
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
}
