use crate::checkers::parse_port;
use crate::error::{Result, UrlError};
use crate::helpers::{prune_fragment, prune_query, split_host_port, split_userinfo};
use crate::scheme::resolve_scheme;
use crate::url_components::UrlComponents;

/// Split a URL string into its raw components without decoding anything.
///
/// Malformed but splittable input is accepted as-is; only a missing scheme,
/// a scheme outside the allow-list, or a bad port are rejected.
pub fn split_url(input: &str) -> Result<UrlComponents<'_>> {
    if input.is_empty() {
        return Err(UrlError::MalformedUrl);
    }

    let (rest, fragment) = prune_fragment(input);
    let (rest, query) = prune_query(rest);

    let colon = memchr::memchr(b':', rest.as_bytes()).ok_or(UrlError::MalformedUrl)?;
    let scheme = resolve_scheme(&rest[..colon])?;
    let rest = &rest[colon + 1..];

    let mut components = UrlComponents::new(scheme);
    components.query = query;
    components.fragment = fragment;

    let Some(after_slashes) = rest.strip_prefix("//") else {
        components.path = rest;
        return Ok(components);
    };

    let authority_end =
        memchr::memchr(b'/', after_slashes.as_bytes()).unwrap_or(after_slashes.len());
    let (authority, path) = after_slashes.split_at(authority_end);
    components.path = path;

    let (userinfo, host_port) = split_userinfo(authority);
    if let Some(userinfo) = userinfo {
        match userinfo.split_once(':') {
            Some((user, pass)) => {
                components.username = Some(user);
                components.password = Some(pass);
            }
            None => components.username = Some(userinfo),
        }
    }

    let (host, port) = split_host_port(host_port);
    if !host.is_empty() {
        components.host = Some(host);
    }
    if let Some(port) = port {
        components.port = Some(parse_port(port).ok_or(UrlError::MalformedUrl)?);
    }

    Ok(components)
}
