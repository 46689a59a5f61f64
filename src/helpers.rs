use std::fmt::Write;

/// Return a quoted JSON string (including the surrounding `"`).
/// - `"` and `\` are escaped.
/// - C0 controls (U+0000..U+001F) and C1 controls (U+007F..U+009F)
///   are encoded as `\uXXXX` (hex, 4 digits).
/// - All other valid Unicode scalar values are left as-is.
///
/// Example:
///   json_quote("Hello\x1B\n\"x\\") -> "\"Hello\\u001b\\u000a\\\"x\\\\\""
pub(crate) fn json_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}' => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Return a quoted C/C++ string literal (including the surrounding `"`).
/// C0 and C1 controls and DEL become `\xHH`; when a hex digit follows such an
/// escape the literal is split (`"\x1b" "A"`) so the escape stays two digits.
pub(crate) fn c_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut after_hex = false;
    for ch in s.chars() {
        if after_hex && ch.is_ascii_hexdigit() {
            out.push_str("\" \"");
        }
        after_hex = false;
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}' => {
                let _ = write!(out, "\\x{:02x}", ch as u32);
                after_hex = true;
            }
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
