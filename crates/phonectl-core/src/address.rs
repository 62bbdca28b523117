// Address expansion: raw host tokens to fully-qualified base URLs.

use phonectl_api::Address;

/// Expand raw `host`, `host:port`, or full-URL tokens into base URLs for
/// the given scheme, preserving input order. Duplicates are kept; the
/// orchestrator does not deduplicate.
///
/// Accepted looseness: there is no validation here. A malformed token
/// passes through unchanged (modulo the scheme prefix) and surfaces later
/// as an address-scoped transport error, which keeps a bad entry in a
/// fleet list from blocking the rest.
pub fn expand(scheme: &str, tokens: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<Address> {
    tokens
        .into_iter()
        .map(|token| {
            let token = token.as_ref();
            if token.contains("://") {
                Address::new(token)
            } else {
                Address::new(format!("{scheme}://{token}"))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::expand;

    #[test]
    fn prepends_scheme_to_bare_hosts() {
        let addrs = expand("https", ["10.0.0.5", "phone-a.local:8443"]);
        assert_eq!(addrs[0].as_str(), "https://10.0.0.5");
        assert_eq!(addrs[1].as_str(), "https://phone-a.local:8443");
    }

    #[test]
    fn keeps_existing_scheme() {
        let addrs = expand("https", ["http://10.0.0.5"]);
        assert_eq!(addrs[0].as_str(), "http://10.0.0.5");
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let addrs = expand("http", ["b", "a", "b"]);
        let raw: Vec<&str> = addrs.iter().map(phonectl_api::Address::as_str).collect();
        assert_eq!(raw, vec!["http://b", "http://a", "http://b"]);
    }

    #[test]
    fn malformed_tokens_pass_through() {
        let addrs = expand("https", ["not a host!?"]);
        assert_eq!(addrs[0].as_str(), "https://not a host!?");
    }

    #[test]
    fn trailing_slash_is_normalized_away() {
        let addrs = expand("https", ["https://10.0.0.5/"]);
        assert_eq!(addrs[0].as_str(), "https://10.0.0.5");
    }
}
