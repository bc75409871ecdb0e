//! Line code display.

/// Prefix for suburban (S-Bahn) lines published as bare digits.
const SUBURBAN_PREFIX: char = 'S';

/// Render a line code for display.
///
/// The feeds publish suburban lines as a bare digit (`"3"`), while riders
/// know them as `S3`. A single digit 1-9 therefore gets the `S` prefix;
/// every other code is returned unchanged.
///
/// # Examples
///
/// ```
/// use timetable_board::domain::display_line;
///
/// assert_eq!(display_line("3"), "S3");
/// assert_eq!(display_line("10"), "10");
/// assert_eq!(display_line("S3"), "S3");
/// assert_eq!(display_line("RE5"), "RE5");
/// ```
pub fn display_line(code: &str) -> String {
    match code.as_bytes() {
        [d @ b'1'..=b'9'] => format!("{SUBURBAN_PREFIX}{}", *d as char),
        _ => code.to_string(),
    }
}
