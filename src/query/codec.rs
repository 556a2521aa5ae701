//! Selected-categories segment of the URL query string

/// Query-string key holding the comma-separated category identifiers.
pub const CATEGORIES_KEY: &str = "categories";

/// Encode category identifiers as `categories=a,b,c`.
///
/// Each id is percent-encoded before joining, so ids containing `,`, `&`,
/// `=` or spaces come back intact from [`decode`]. Returns an empty string
/// when there is nothing to encode, so the key is omitted from the URL
/// entirely.
pub fn encode<I, S>(category_ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = category_ids
        .into_iter()
        .filter(|id| !id.as_ref().is_empty())
        .map(|id| urlencoding::encode(id.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(",");

    if joined.is_empty() {
        String::new()
    } else {
        format!("{}={}", CATEGORIES_KEY, joined)
    }
}

/// Percent-decode one piece, keeping the raw text when it does not decode
/// to UTF-8.
fn unescape(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Decode the category identifiers from a query string.
///
/// Accepts a leading `?` and unrelated parameters. An absent or empty value
/// means no filter. Values are split on raw commas and then percent-decoded;
/// nothing is validated, so whatever sits between commas comes back as an
/// opaque identifier.
pub fn decode(query: &str) -> Vec<String> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let Some(value) = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .find(|(key, _)| unescape(key) == CATEGORIES_KEY)
        .map(|(_, value)| value)
    else {
        return Vec::new();
    };

    value
        .split(',')
        .filter(|piece| !piece.is_empty())
        .map(unescape)
        .filter(|id| !id.is_empty())
        .collect()
}
