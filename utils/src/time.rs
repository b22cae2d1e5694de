//! Time formatting helpers.

/// Format a countdown in seconds as `HH:MM:SS`.
///
/// Every field is zero-padded to two digits; hours are not wrapped, so a
/// cooldown longer than 99 hours renders with three hour digits.
pub fn format_countdown(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
