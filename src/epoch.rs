//! Location time normalization.
use hifitime::{Duration, Epoch};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("expecting \"yyyy-mm-dd[ hh[:mm[:ss[.ffffff]]][Z|+hh:mm]]\" format, got \"{0}\"")]
    FormatError(String),
    #[error("failed to parse years from \"{0}\"")]
    YearField(String),
    #[error("failed to parse months from \"{0}\"")]
    MonthField(String),
    #[error("failed to parse days from \"{0}\"")]
    DayField(String),
    #[error("failed to parse hours from \"{0}\"")]
    HoursField(String),
    #[error("failed to parse minutes field from \"{0}\"")]
    MinutesField(String),
    #[error("failed to parse seconds field from \"{0}\"")]
    SecondsField(String),
    #[error("failed to parse fractional seconds from \"{0}\"")]
    NanosecondsField(String),
    #[error("failed to parse utc offset from \"{0}\"")]
    OffsetField(String),
    #[error("\"{0}\" is not a valid calendar date")]
    InvalidDate(String),
}

/// A location time, both as calendar value (used when plotting)
/// and as UNIX seconds (used when filtering).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NormalizedTime {
    pub epoch: Epoch,
    pub epoch_seconds: f64,
}

impl NormalizedTime {
    pub fn from_epoch(epoch: Epoch) -> Self {
        Self {
            epoch,
            epoch_seconds: epoch.to_unix_seconds(),
        }
    }
}

impl std::str::FromStr for NormalizedTime {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let epoch = parse_iso(s)?;
        Ok(Self::from_epoch(epoch))
    }
}

fn parse_field<T: std::str::FromStr>(
    item: &str,
    width: usize,
    err: fn(String) -> ParsingError,
) -> Result<T, ParsingError> {
    if item.len() != width || !item.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err(item.to_string()));
    }
    item.parse::<T>().map_err(|_| err(item.to_string()))
}

/*
 * Parses an ISO-8601 datetime. Accepted forms:
 *   yyyy-mm-dd
 *   yyyy-mm-dd hh
 *   yyyy-mm-dd hh:mm
 *   yyyy-mm-dd hh:mm:ss
 *   yyyy-mm-dd hh:mm:ss.ffffff
 * where the date/time separator may either be ' ' or 'T'.
 * Time of day may be followed by 'Z' or a utc offset (+hh:mm, -hhmm, +hh).
 * Naive datetimes are interpreted in UTC.
 */
pub fn parse_iso(content: &str) -> Result<Epoch, ParsingError> {
    let content = content.trim();
    let trimmed = content.strip_suffix('Z').unwrap_or(content);

    if trimmed.len() < 10 || !trimmed.is_char_boundary(10) {
        return Err(ParsingError::FormatError(content.to_string()));
    }

    let (date, time) = trimmed.split_at(10);

    let mut date_items = date.split('-');
    let (y, m, d) = match (date_items.next(), date_items.next(), date_items.next()) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return Err(ParsingError::FormatError(content.to_string())),
    };

    let y = parse_field::<i32>(y, 4, ParsingError::YearField)?;
    let m = parse_field::<u8>(m, 2, ParsingError::MonthField)?;
    let d = parse_field::<u8>(d, 2, ParsingError::DayField)?;

    let (mut hh, mut mm, mut ss, mut ns) = (0_u8, 0_u8, 0_u8, 0_u32);
    let mut offset_seconds = 0_i32;

    if !time.is_empty() {
        let time = match time.strip_prefix('T').or_else(|| time.strip_prefix(' ')) {
            Some(time) => time,
            None => return Err(ParsingError::FormatError(content.to_string())),
        };

        let time = match time.find(|c: char| c == '+' || c == '-') {
            Some(pos) => {
                if trimmed.len() != content.len() {
                    // 'Z' and offset are mutually exclusive
                    return Err(ParsingError::FormatError(content.to_string()));
                }
                offset_seconds = parse_offset(&time[pos..])?;
                &time[..pos]
            },
            None => time,
        };

        let mut items = time.split(':');

        hh = parse_field::<u8>(items.next().unwrap_or(""), 2, ParsingError::HoursField)?;

        if let Some(minutes) = items.next() {
            mm = parse_field::<u8>(minutes, 2, ParsingError::MinutesField)?;
        }

        if let Some(seconds) = items.next() {
            if let Some(dot) = seconds.find('.') {
                ss = parse_field::<u8>(&seconds[..dot], 2, ParsingError::SecondsField)?;

                let fraction = &seconds[dot + 1..];
                if fraction.is_empty()
                    || fraction.len() > 9
                    || !fraction.bytes().all(|b| b.is_ascii_digit())
                {
                    return Err(ParsingError::NanosecondsField(seconds.to_string()));
                }
                // right pad to nanosecond resolution
                ns = format!("{:0<9}", fraction)
                    .parse::<u32>()
                    .map_err(|_| ParsingError::NanosecondsField(seconds.to_string()))?;
            } else {
                ss = parse_field::<u8>(seconds, 2, ParsingError::SecondsField)?;
            }
        }

        if items.next().is_some() {
            return Err(ParsingError::FormatError(content.to_string()));
        }
    }

    if hh > 23 || mm > 59 || ss > 59 {
        return Err(ParsingError::InvalidDate(content.to_string()));
    }

    let epoch = Epoch::maybe_from_gregorian_utc(y, m, d, hh, mm, ss, ns)
        .map_err(|_| ParsingError::InvalidDate(content.to_string()))?;

    Ok(epoch - Duration::from_seconds(offset_seconds as f64))
}

/// Parses "+hh:mm", "+hhmm" or "+hh" (or '-' signed) into seconds east of UTC
fn parse_offset(content: &str) -> Result<i32, ParsingError> {
    let err = || ParsingError::OffsetField(content.to_string());
    let sign = match content.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(err()),
    };
    let body = &content[1..];
    if !body.is_ascii() {
        return Err(err());
    }
    let (hh, mm) = match body.len() {
        2 => (body, "00"),
        4 => body.split_at(2),
        5 if body.as_bytes()[2] == b':' => (&body[..2], &body[3..]),
        _ => return Err(err()),
    };
    let hh = parse_field::<i32>(hh, 2, ParsingError::OffsetField).map_err(|_| err())?;
    let mm = parse_field::<i32>(mm, 2, ParsingError::OffsetField).map_err(|_| err())?;
    if hh > 23 || mm > 59 {
        return Err(err());
    }
    Ok(sign * (hh * 3600 + mm * 60))
}

/// Formats an [Epoch] as "yyyy-mm-dd hh:mm:ss",
/// which is also how plotly expects date axis coordinates.
pub fn format_iso(epoch: Epoch) -> String {
    let (y, m, d, hh, mm, ss, _) = epoch.to_gregorian_utc();
    format!("{:04}-{:02}-{:02} {:02}:{:02}:{:02}", y, m, d, hh, mm, ss)
}

/// Normalizes a sequence of location times, in order.
/// The first faulty entry is reported along with its position.
pub fn normalize<'a, I: IntoIterator<Item = &'a str>>(
    content: I,
) -> Result<Vec<NormalizedTime>, (usize, ParsingError)> {
    content
        .into_iter()
        .enumerate()
        .map(|(index, item)| item.parse::<NormalizedTime>().map_err(|e| (index, e)))
        .collect()
}
