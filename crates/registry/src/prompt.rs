//! Prompt compilation.
//!
//! Templates recognize exactly two placeholders:
//!
//! - `{DATE}` becomes the calendar date of `now` as `DD/MM/YYYY`.
//! - `{INPUT_DATA}` becomes the caller's input as indented JSON.
//!
//! Substitution is purely textual. Inserted content is never scanned again,
//! so placeholder text inside the input stays literal.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

pub const DATE_TOKEN: &str = "{DATE}";
pub const INPUT_TOKEN: &str = "{INPUT_DATA}";

/// Substitute every placeholder in `template`.
pub fn compile(template: &str, input: &Value, now: DateTime<Utc>) -> Result<String> {
    if template.trim().is_empty() {
        return Err(Error::InvalidTemplate("template is empty".into()));
    }

    let date = format_date(now);
    let data = render_input(input)?;

    let mut out = String::with_capacity(template.len() + data.len());
    let mut rest = template;
    while let Some((pos, token, replacement)) = next_token(rest, &date, &data) {
        out.push_str(&rest[..pos]);
        out.push_str(replacement);
        rest = &rest[pos + token.len()..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Format a date the way Australian clinical documents show it.
pub fn format_date(now: DateTime<Utc>) -> String {
    now.format("%d/%m/%Y").to_string()
}

/// Serialize input data deterministically with two-space indentation.
///
/// `serde_json` keeps object keys in a fixed order, so equal values always
/// render identically.
pub fn render_input(input: &Value) -> Result<String> {
    serde_json::to_string_pretty(input)
        .map_err(|e| Error::InvalidTemplate(format!("input data cannot be rendered: {e}")))
}

fn next_token<'a>(
    haystack: &str,
    date: &'a str,
    data: &'a str,
) -> Option<(usize, &'static str, &'a str)> {
    let date_at = haystack.find(DATE_TOKEN).map(|i| (i, DATE_TOKEN, date));
    let input_at = haystack.find(INPUT_TOKEN).map(|i| (i, INPUT_TOKEN, data));
    match (date_at, input_at) {
        (Some(d), Some(i)) => Some(if d.0 < i.0 { d } else { i }),
        (d, i) => d.or(i),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn march_fifth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 5, 9, 30, 0).unwrap()
    }

    #[test]
    fn date_is_zero_padded_day_month_year() {
        assert_eq!(format_date(march_fifth()), "05/03/2025");
    }

    #[test]
    fn replaces_every_date_occurrence() {
        let prompt = compile("{DATE} - {DATE} - {DATE}", &json!({}), march_fifth()).unwrap();
        assert_eq!(prompt, "05/03/2025 - 05/03/2025 - 05/03/2025");
    }

    #[test]
    fn replaces_every_input_occurrence() {
        let input = json!({"condition": "anxiety"});
        let prompt = compile("A {INPUT_DATA} B {INPUT_DATA}", &input, march_fifth()).unwrap();
        let rendered = render_input(&input).unwrap();
        assert_eq!(prompt, format!("A {rendered} B {rendered}"));
    }

    #[test]
    fn input_is_indented_json() {
        let prompt = compile(
            "Patient Information: {INPUT_DATA}",
            &json!({"condition": "anxiety"}),
            march_fifth(),
        )
        .unwrap();
        assert_eq!(
            prompt,
            "Patient Information: {\n  \"condition\": \"anxiety\"\n}"
        );
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let prompt = compile("{NAME} [keep] {date}", &json!({}), march_fifth()).unwrap();
        assert_eq!(prompt, "{NAME} [keep] {date}");
    }

    #[test]
    fn template_without_tokens_is_unchanged() {
        let prompt = compile("Summarize the notes.", &json!({"a": 1}), march_fifth()).unwrap();
        assert_eq!(prompt, "Summarize the notes.");
    }

    #[test]
    fn placeholders_inside_input_stay_literal() {
        let input = json!({"note": "{DATE} and {INPUT_DATA}"});
        let prompt = compile("{INPUT_DATA}", &input, march_fifth()).unwrap();
        assert!(prompt.contains("{DATE} and {INPUT_DATA}"));
        assert!(!prompt.contains("05/03/2025"));
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(matches!(
            compile("", &json!({}), march_fifth()).unwrap_err(),
            Error::InvalidTemplate(_)
        ));
        assert!(matches!(
            compile("  \n", &json!({}), march_fifth()).unwrap_err(),
            Error::InvalidTemplate(_)
        ));
    }

    #[test]
    fn rendering_is_deterministic_and_round_trips() {
        let input = json!({
            "zeta": [1, 2, {"nested": true}],
            "alpha": "x",
            "mid": {"b": null, "a": 1.5}
        });
        let first = render_input(&input).unwrap();
        let second = render_input(&input).unwrap();
        assert_eq!(first, second);

        let parsed: Value = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed, input);
    }
}
