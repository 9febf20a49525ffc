use chrono::NaiveDate;

/// A feed entry derived from a single filename.
///
/// Produced by [`parse_filename`]; never mutated afterwards. The filename
/// itself carries all the metadata: a leading `alert`/`post` tag, an
/// 8-digit MMDDYYYY date block, and an optional free-text identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    /// True when the filename starts with the `alert` tag, false for `post`.
    pub is_alert: bool,
    /// The date decoded from the 8-digit block. Always a valid calendar date.
    pub date: NaiveDate,
    /// Free-text remainder after the tag and date, trimmed of surrounding
    /// whitespace. May be empty.
    pub identifier: String,
    /// The untouched filename. Unique per scan, used as the item guid and
    /// as the link suffix.
    pub original_name: String,
}

/// Parses a filename into a [`ParsedEntry`], or `None` if it does not
/// qualify for the feed.
///
/// Matching happens in two stages, deliberately kept separate:
///
/// 1. **Structure**: a case-insensitive `alert` or `post` tag immediately
///    followed by exactly 8 ASCII digits, then optional trailing text. No
///    separator is required between tag, digits, and text.
/// 2. **Date validity**: the 8 digits are read strictly as
///    month(2)-day(2)-year(4). Digit runs that pass stage 1 but do not form
///    a real calendar date (e.g. month 13) reject the whole filename.
///
/// Rejection is always silent: a `None` here means the file is simply not
/// feed content.
pub fn parse_filename(name: &str) -> Option<ParsedEntry> {
    let (is_alert, rest) = split_tag(name)?;

    if rest.len() < 8 || !rest.as_bytes()[..8].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let (digits, identifier) = rest.split_at(8);
    let date = decode_date(digits)?;

    Some(ParsedEntry {
        is_alert,
        date,
        identifier: identifier.trim().to_string(),
        original_name: name.to_string(),
    })
}

/// Splits off the leading tag, returning the priority flag and the remainder.
fn split_tag(name: &str) -> Option<(bool, &str)> {
    for (tag, is_alert) in [("alert", true), ("post", false)] {
        if name.len() >= tag.len()
            && name.is_char_boundary(tag.len())
            && name[..tag.len()].eq_ignore_ascii_case(tag)
        {
            return Some((is_alert, &name[tag.len()..]));
        }
    }
    None
}

/// Decodes an 8-ASCII-digit MMDDYYYY block into a calendar date.
fn decode_date(digits: &str) -> Option<NaiveDate> {
    let month: u32 = digits[..2].parse().ok()?;
    let day: u32 = digits[2..4].parse().ok()?;
    let year: i32 = digits[4..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
