use crate::compat::String;
use percent_encoding::{
    AsciiSet, CONTROLS, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode,
};

/// C0 control percent-encode set
pub const C0_CONTROL_SET: &AsciiSet = CONTROLS;

/// Fragment percent-encode set
/// C0 control + space, ", <, >, \`
pub const FRAGMENT_SET: &AsciiSet = &C0_CONTROL_SET
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Path percent-encode set
/// Fragment + #, ?, ^, {, }
const PATH_SET: &AsciiSet = &FRAGMENT_SET
    .add(b'#')
    .add(b'?')
    .add(b'^')
    .add(b'{')
    .add(b'}');

/// Userinfo percent-encode set
/// Path + /, :, ;, =, @, [, \, ], |
pub const USERINFO_SET: &AsciiSet = &PATH_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'|');

/// Path segment set: everything except RFC 3986 unreserved characters
pub const SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Mailto recipient set: segment set, but addresses keep their `@`
pub const RECIPIENT_SET: &AsciiSet = &SEGMENT_SET.remove(b'@');

/// Raw query set: only what would change how the query splits or decodes.
/// Brackets, `@`, `,` and non-ASCII text are written as they are.
pub const RAW_QUERY_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

/// Write percent-encoded string directly to buffer
/// Manually iterates to avoid write! macro overhead
pub fn percent_encode_into(buffer: &mut String, input: &str, encode_set: &'static AsciiSet) {
    // Reserve space to reduce reallocations
    buffer.reserve(input.len());

    for chunk in utf8_percent_encode(input, encode_set) {
        buffer.push_str(chunk);
    }
}

/// Percent-encode userinfo directly into buffer
pub fn percent_encode_userinfo_into(buffer: &mut String, input: &str) {
    percent_encode_into(buffer, input, USERINFO_SET);
}

/// Percent-encode fragment directly into buffer
pub fn percent_encode_fragment_into(buffer: &mut String, input: &str) {
    percent_encode_into(buffer, input, FRAGMENT_SET);
}

/// Form-encode a query key or value into buffer.
/// Space becomes `+`; everything outside `A-Za-z0-9-_.~` becomes `%XX`.
pub fn form_encode_into(buffer: &mut String, input: &str) {
    use core::fmt::Write;

    buffer.reserve(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                buffer.push(byte as char);
            }
            b' ' => buffer.push('+'),
            _ => {
                let _ = write!(buffer, "%{byte:02X}");
            }
        }
    }
}

/// Decode a form-encoded query key or value.
/// `+` becomes a space, valid `%XX` escapes are decoded, invalid ones kept.
pub fn form_decode(input: &str) -> String {
    if input.contains('+') {
        let spaced = input.replace('+', " ");
        percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
    } else {
        percent_decode_str(input).decode_utf8_lossy().into_owned()
    }
}
