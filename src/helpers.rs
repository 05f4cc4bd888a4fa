/// Prune fragment (#hash) from URL string
/// Returns (`url_without_fragment`, `fragment_without_hash`)
/// Only the first fragment is kept: "a#b#c" yields fragment "b"
pub fn prune_fragment(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'#', input.as_bytes()).map_or((input, None), |pos| {
        let fragment = &input[pos + 1..];
        let fragment = memchr::memchr(b'#', fragment.as_bytes())
            .map_or(fragment, |end| &fragment[..end]);
        (&input[..pos], Some(fragment))
    })
}

/// Split the query (after the first `?`) off the URL string
/// Returns (`url_without_query`, `query_without_question_mark`)
pub fn prune_query(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'?', input.as_bytes()).map_or((input, None), |pos| {
        (&input[..pos], Some(&input[pos + 1..]))
    })
}

/// Split an authority at the last `@` into (`userinfo`, `host_and_port`)
pub fn split_userinfo(authority: &str) -> (Option<&str>, &str) {
    memchr::memrchr(b'@', authority.as_bytes()).map_or((None, authority), |pos| {
        (Some(&authority[..pos]), &authority[pos + 1..])
    })
}

/// Parse host string into hostname and optional port parts.
pub fn split_host_port(host: &str) -> (&str, Option<&str>) {
    if host.starts_with('[') {
        // IPv6 address
        if let Some(bracket_end) = host.find(']') {
            let ipv6_part = &host[0..=bracket_end];
            let port_part = &host[bracket_end + 1..];
            let port = port_part.strip_prefix(':');
            return (ipv6_part, port);
        }
        return (host, None);
    }

    // Regular host or IPv4
    match host.rfind(':') {
        Some(colon_pos) => (&host[0..colon_pos], Some(&host[colon_pos + 1..])),
        None => (host, None),
    }
}

/// Trim every leading and trailing `delimiter`
pub fn trim_delimiter(input: &str, delimiter: char) -> &str {
    input.trim_matches(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_fragment() {
        assert_eq!(prune_fragment("http://a/b#top"), ("http://a/b", Some("top")));
        assert_eq!(prune_fragment("http://a/b#top#more"), ("http://a/b", Some("top")));
        assert_eq!(prune_fragment("http://a/b#"), ("http://a/b", Some("")));
        assert_eq!(prune_fragment("http://a/b"), ("http://a/b", None));
    }

    #[test]
    fn test_prune_query() {
        assert_eq!(prune_query("http://a/b?x=1?y"), ("http://a/b", Some("x=1?y")));
        assert_eq!(prune_query("http://a/b"), ("http://a/b", None));
    }

    #[test]
    fn test_split_userinfo() {
        assert_eq!(split_userinfo("user:pass@host"), (Some("user:pass"), "host"));
        assert_eq!(split_userinfo("a@b@host:80"), (Some("a@b"), "host:80"));
        assert_eq!(split_userinfo("host"), (None, "host"));
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("example.com:8080"), ("example.com", Some("8080")));
        assert_eq!(split_host_port("example.com"), ("example.com", None));
        assert_eq!(split_host_port("[::1]:443"), ("[::1]", Some("443")));
        assert_eq!(split_host_port("[::1]"), ("[::1]", None));
    }

    #[test]
    fn test_trim_delimiter() {
        assert_eq!(trim_delimiter("/forum/questions/", '/'), "forum/questions");
        assert_eq!(trim_delimiter("//", '/'), "");
        assert_eq!(trim_delimiter(",a@b.c,", ','), "a@b.c");
    }
}
