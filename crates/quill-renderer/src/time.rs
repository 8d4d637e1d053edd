//! Publish date fragment.

use std::fmt::Write;

use chrono::NaiveDate;

/// Default display format, e.g. `Jan 2, 2024`.
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Render `<time datetime="YYYY-MM-DD">display</time>`.
///
/// `format` is a chrono strftime string. An invalid format surfaces as
/// `fmt::Error` instead of a panic.
pub fn render_time(date: NaiveDate, format: &str) -> Result<String, std::fmt::Error> {
    let mut out = String::with_capacity(64);
    write!(
        out,
        r#"<time datetime="{}">{}</time>"#,
        date.format("%Y-%m-%d"),
        date.format(format)
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_render_time_default_format() {
        let html = render_time(date(2024, 1, 2), DEFAULT_DATE_FORMAT).unwrap();
        assert_eq!(html, r#"<time datetime="2024-01-02">Jan 2, 2024</time>"#);
    }

    #[test]
    fn test_render_time_custom_format() {
        let html = render_time(date(2023, 11, 30), "%d.%m.%Y").unwrap();
        assert_eq!(html, r#"<time datetime="2023-11-30">30.11.2023</time>"#);
    }

    #[test]
    fn test_render_time_invalid_format() {
        assert!(render_time(date(2024, 1, 2), "%Q").is_err());
    }
}
