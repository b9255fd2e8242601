//! Chapter upload dates in the SimpleDateFormat-style patterns sites are
//! configured with (`MMM d, yyyy`, `MM/dd/yy`, `dd/MM/yyyy`, ...).

use crate::error::{Result, ScrapeError};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct DateParser {
    pattern: String,
    chrono_format: String,
    has_time: bool,
}

impl DateParser {
    pub fn new(pattern: &str) -> Self {
        let (chrono_format, has_time) = translate_pattern(pattern);
        Self {
            pattern: pattern.to_string(),
            chrono_format,
            has_time,
        }
    }

    /// Epoch milliseconds, interpreting the date as midnight UTC when the
    /// pattern carries no time of day.
    pub fn try_parse(&self, input: &str) -> Result<i64> {
        let input = input.trim();
        let failed = || ScrapeError::DateParseFailed {
            input: input.to_string(),
            pattern: self.pattern.clone(),
        };

        let datetime = if self.has_time {
            NaiveDateTime::parse_from_str(input, &self.chrono_format).map_err(|_| failed())?
        } else {
            NaiveDate::parse_from_str(input, &self.chrono_format)
                .map_err(|_| failed())?
                .and_hms_opt(0, 0, 0)
                .ok_or_else(failed)?
        };

        Ok(datetime.and_utc().timestamp_millis())
    }

    /// Total version of [`try_parse`](Self::try_parse): 0 on any failure.
    pub fn parse_or_zero(&self, input: &str) -> i64 {
        match self.try_parse(input) {
            Ok(ms) => ms,
            Err(e) => {
                log::debug!("{}", e);
                0
            }
        }
    }
}

fn translate_pattern(pattern: &str) -> (String, bool) {
    let token_re = Regex::new(r"'[^']*'|y+|M+|d+|H+|h+|m+|s+|a+|E+|.").expect("static regex");

    let mut out = String::new();
    let mut has_time = false;

    for token in token_re.find_iter(pattern).map(|m| m.as_str()) {
        let first = token.chars().next().unwrap_or(' ');
        let len = token.chars().count();
        let piece = match first {
            '\'' => {
                let literal = token.trim_matches('\'');
                if literal.is_empty() {
                    "'".to_string()
                } else {
                    literal.replace('%', "%%")
                }
            }
            'y' if len == 2 => "%y".to_string(),
            'y' => "%Y".to_string(),
            'M' if len >= 4 => "%B".to_string(),
            'M' if len == 3 => "%b".to_string(),
            'M' => "%m".to_string(),
            'd' => "%d".to_string(),
            'E' if len >= 4 => "%A".to_string(),
            'E' => "%a".to_string(),
            'H' | 'h' | 'm' | 's' | 'a' => {
                has_time = true;
                match first {
                    'H' => "%H",
                    'h' => "%I",
                    'm' => "%M",
                    's' => "%S",
                    _ => "%p",
                }
                .to_string()
            }
            '%' => "%%".to_string(),
            _ => token.to_string(),
        };
        out.push_str(&piece);
    }

    (out, has_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_patterns() {
        assert_eq!(translate_pattern("MMM d, yyyy"), ("%b %d, %Y".to_string(), false));
        assert_eq!(translate_pattern("MM/dd/yy"), ("%m/%d/%y".to_string(), false));
        assert_eq!(translate_pattern("dd/MM/yyyy"), ("%d/%m/%Y".to_string(), false));
        assert_eq!(
            translate_pattern("yyyy-MM-dd'T'HH:mm"),
            ("%Y-%m-%dT%H:%M".to_string(), true)
        );
    }

    #[test]
    fn test_parse_month_name() {
        let parser = DateParser::new("MMM d, yyyy");
        // 2023-01-05T00:00:00Z
        assert_eq!(parser.try_parse("Jan 5, 2023").unwrap(), 1_672_876_800_000);
    }

    #[test]
    fn test_parse_two_digit_year() {
        let parser = DateParser::new("MM/dd/yy");
        assert_eq!(parser.try_parse("01/05/23").unwrap(), 1_672_876_800_000);
    }

    #[test]
    fn test_parse_day_first() {
        let parser = DateParser::new("dd/MM/yyyy");
        assert_eq!(parser.try_parse(" 05/01/2023 ").unwrap(), 1_672_876_800_000);
    }

    #[test]
    fn test_malformed_degrades_to_zero() {
        let parser = DateParser::new("MMM d, yyyy");
        assert_eq!(parser.parse_or_zero("2 days ago"), 0);
        assert_eq!(parser.parse_or_zero(""), 0);
        assert_eq!(parser.parse_or_zero("Foo 99, 20x3"), 0);
        assert!(matches!(
            parser.try_parse("yesterday"),
            Err(ScrapeError::DateParseFailed { .. })
        ));
    }
}
