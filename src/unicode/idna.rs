use crate::compat::Cow;

/// Convert a host to its ASCII form for the encoded rendering.
///
/// ASCII hosts and bracketed IP literals pass through untouched. Unicode
/// hosts go through IDNA `ToASCII`; a host IDNA rejects is kept as given,
/// since rendering never fails.
pub fn host_to_ascii(host: &str) -> Cow<'_, str> {
    if host.is_ascii() || host.starts_with('[') {
        return Cow::Borrowed(host);
    }

    idna::domain_to_ascii(host).map_or(Cow::Borrowed(host), Cow::Owned)
}
