use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Opening hours as captured by curation or scraping. The raw text is kept
/// verbatim; parsing is best-effort and callers must treat `None` as
/// "unknown", not "closed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct OpeningHours {
    pub raw: String,
}

/// Minutes-of-day span. `close < open` wraps past midnight; `close == open`
/// is treated as open around the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSpan {
    pub open: u32,
    pub close: u32,
}

impl HourSpan {
    pub fn contains_minute(&self, minute_of_day: u32) -> bool {
        if self.open == self.close {
            true
        } else if self.open < self.close {
            self.open <= minute_of_day && minute_of_day < self.close
        } else {
            minute_of_day >= self.open || minute_of_day < self.close
        }
    }
}

impl OpeningHours {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Parsed spans in the order they appear, or `None` when the text yields
    /// no usable time range.
    pub fn spans(&self) -> Option<Vec<HourSpan>> {
        let text = self.raw.to_lowercase();
        for marker in ["24 hours", "24 hrs", "24hrs", "24h", "24/7"] {
            if text.contains(marker) {
                return Some(vec![HourSpan { open: 0, close: 0 }]);
            }
        }

        let mut spans = Vec::new();
        for segment in text.split([',', ';', '&']) {
            let times = extract_times(segment);
            match times.as_slice() {
                [] | [_] => {}
                [first, .., last] => spans.push(HourSpan {
                    open: *first,
                    close: *last,
                }),
            }
        }

        if spans.is_empty() {
            None
        } else {
            Some(spans)
        }
    }

    /// Whether the venue is open at the given wall-clock hour. `None` when
    /// the raw text is unparseable.
    pub fn is_open_at_hour(&self, hour: u32) -> Option<bool> {
        let minute = (hour % 24) * 60;
        self.spans()
            .map(|spans| spans.iter().any(|span| span.contains_minute(minute)))
    }
}

/// Scans a segment for clock times ("18:00", "6pm", "11.30am", "1130") and
/// returns them as minutes of day, in order of appearance.
fn extract_times(segment: &str) -> Vec<u32> {
    let chars: Vec<char> = segment.chars().collect();
    let mut times = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let digit_start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let digits: String = chars[digit_start..i].iter().collect();

        let (mut hour, mut minute) = match digits.len() {
            1 | 2 => (digits.parse::<u32>().unwrap_or(99), 0),
            // military style, "930" or "1130"
            3 | 4 => {
                let split = digits.len() - 2;
                (
                    digits[..split].parse::<u32>().unwrap_or(99),
                    digits[split..].parse::<u32>().unwrap_or(99),
                )
            }
            _ => continue,
        };

        // "11:30" / "11.30"
        if digits.len() <= 2
            && i < chars.len()
            && (chars[i] == ':' || chars[i] == '.')
            && chars.get(i + 1).is_some_and(char::is_ascii_digit)
            && chars.get(i + 2).is_some_and(char::is_ascii_digit)
        {
            minute = chars[i + 1..i + 3]
                .iter()
                .collect::<String>()
                .parse()
                .unwrap_or(99);
            i += 3;
        }

        // optional meridiem, tolerating "a.m." style dots
        let mut j = i;
        while j < chars.len() && (chars[j] == ' ' || chars[j] == '.') {
            j += 1;
        }
        let meridiem = match chars.get(j) {
            Some('a') | Some('p') => {
                let is_pm = chars[j] == 'p';
                let mut k = j + 1;
                while k < chars.len() && chars[k] == '.' {
                    k += 1;
                }
                if chars.get(k) == Some(&'m') {
                    i = k + 1;
                    Some(is_pm)
                } else {
                    None
                }
            }
            _ => None,
        };

        match meridiem {
            Some(is_pm) => {
                if !(1..=12).contains(&hour) || minute >= 60 {
                    continue;
                }
                hour %= 12;
                if is_pm {
                    hour += 12;
                }
            }
            None => {
                if hour > 24 || minute >= 60 || (hour == 24 && minute != 0) {
                    continue;
                }
                hour %= 24;
            }
        }

        times.push(hour * 60 + minute);
    }

    times
}

impl ExampleData for OpeningHours {
    fn example_data() -> Self {
        OpeningHours::new("Mon-Sun: 11:30 - 22:00")
    }
}
