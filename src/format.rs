//! Field formatting for listings: sizes, permission strings, timestamps

use std::time::SystemTime;

use chrono::{DateTime, Local};

const SIZE_PREFIXES: [&str; 9] = ["b", "K", "M", "G", "T", "P", "E", "Z", "Y"];
const SIZE_MULTIPLE: f64 = 1024.0;

/// `ctime(3)` layout, e.g. `Mon Oct 19 09:05:00 2026`.
const TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Scale a byte count to a 4-wide number plus a unit prefix.
///
/// # Examples
///
/// ```
/// use colorls::format::human_size;
///
/// assert_eq!(human_size(1023), "1023b");
/// assert_eq!(human_size(1024), "   1K");
/// assert_eq!(human_size(5 * 1024 * 1024), "   5M");
/// ```
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= SIZE_MULTIPLE && unit < SIZE_PREFIXES.len() - 1 {
        size /= SIZE_MULTIPLE;
        unit += 1;
    }
    format!("{:4.0}{}", size, SIZE_PREFIXES[unit])
}

/// `ls -l` style mode string, e.g. `drwxr-xr-x`.
pub fn format_mode(mode: u32) -> String {
    let kind = match mode & 0o170000 {
        0o040000 => 'd',
        0o120000 => 'l',
        0o020000 => 'c',
        0o060000 => 'b',
        0o010000 => 'p',
        0o140000 => 's',
        _ => '-',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for (shift, special, special_char) in [(6, 0o4000, 's'), (3, 0o2000, 's'), (0, 0o1000, 't')] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        let exec = bits & 0o1 != 0;
        out.push(match (mode & special != 0, exec) {
            (true, true) => special_char,
            (true, false) => special_char.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        });
    }
    out
}

/// Modification time in local time, `ctime` layout. Unknown times render as
/// a blank field of the same width.
pub fn format_mtime(time: Option<SystemTime>) -> String {
    match time {
        Some(t) => DateTime::<Local>::from(t).format(TIME_FORMAT).to_string(),
        None => " ".repeat(24),
    }
}
