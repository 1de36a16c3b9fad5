//! JSON Pointer (RFC 6901) helpers for error sources.
//!
//! An [`ErrorSource`](crate::ErrorSource) locates the offending member of the
//! request document with a pointer such as `/data/attributes/title`. These
//! helpers build and split such pointers; they never resolve them.

/// Escapes one reference token: `~` becomes `~0`, `/` becomes `~1`.
///
/// ```
/// use jsonapi_codec::pointer::escape_token;
///
/// assert_eq!(escape_token("first/last"), "first~1last");
/// assert_eq!(escape_token("a~b"), "a~0b");
/// ```
pub fn escape_token(token: &str) -> String {
    if !token.contains(['/', '~']) {
        return token.to_string();
    }
    // `~` first, otherwise the `~` introduced for `/` would be escaped again
    token.replace('~', "~0").replace('/', "~1")
}

/// Reverses [`escape_token`].
pub fn unescape_token(token: &str) -> String {
    if !token.contains('~') {
        return token.to_string();
    }
    token.replace("~1", "/").replace("~0", "~")
}

/// Joins tokens into a pointer. The empty path is the whole document, `""`.
///
/// ```
/// use jsonapi_codec::pointer::format_pointer;
///
/// assert_eq!(format_pointer(["data", "attributes", "title"]), "/data/attributes/title");
/// assert_eq!(format_pointer(Vec::<String>::new()), "");
/// ```
pub fn format_pointer<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for token in tokens {
        out.push('/');
        out.push_str(&escape_token(token.as_ref()));
    }
    out
}

/// Splits a pointer into unescaped tokens.
///
/// Returns `None` when the pointer is neither empty nor starts with `/`.
///
/// ```
/// use jsonapi_codec::pointer::parse_pointer;
///
/// assert_eq!(parse_pointer("/data/attributes/title").unwrap(), ["data", "attributes", "title"]);
/// assert_eq!(parse_pointer("").unwrap(), Vec::<String>::new());
/// assert!(parse_pointer("data").is_none());
/// ```
pub fn parse_pointer(pointer: &str) -> Option<Vec<String>> {
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let rest = pointer.strip_prefix('/')?;
    Some(rest.split('/').map(unescape_token).collect())
}
