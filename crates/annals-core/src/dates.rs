//! Day-month-year date strings: ordering, normalisation and mention scanning.
//!
//! Event dates are plain strings in `d-m-y` form and are never validated
//! against a calendar. Ordering goes through [`sort_key`], which rewrites the
//! date as `yyyy-mm-dd`; strings that do not have three `-`-separated parts
//! sort by their raw text.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Error, Result, event::Event};

// ─── Ordering ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
  /// Oldest first.
  #[default]
  Ascending,
  /// Newest first.
  Descending,
}

/// A string that orders `d-m-y` dates chronologically.
pub fn sort_key(date: &str) -> String {
  let parts: Vec<&str> = date.split('-').collect();
  match parts.as_slice() {
    [day, month, year] => format!("{year}-{month:0>2}-{day:0>2}"),
    _ => date.to_owned(),
  }
}

/// Stable sort by date; events sharing a date keep their store order.
pub fn sort_by_date(events: &mut [Event], order: Order) {
  match order {
    Order::Ascending => events.sort_by_cached_key(|e| sort_key(&e.date)),
    Order::Descending => events.sort_by_cached_key(|e| Reverse(sort_key(&e.date))),
  }
}

// ─── Normalisation ───────────────────────────────────────────────────────────

/// Canonical form used for date equality: `/` becomes `-` and leading zeros
/// are dropped, so `12/06/2023` and `12-6-2023` compare equal. Anything that
/// is not three numeric parts is returned unchanged.
pub fn normalize(date: &str) -> String {
  let cleaned = date.trim().replace('/', "-");
  let parts: Vec<&str> = cleaned.split('-').collect();
  if let [d, m, y] = parts.as_slice()
    && let (Ok(d), Ok(m), Ok(y)) = (d.parse::<u32>(), m.parse::<u32>(), y.parse::<u32>())
  {
    return format!("{d}-{m}-{y}");
  }
  date.to_owned()
}

/// Turn user date entry into the stored `dd-mm-yyyy` form. Accepts either an
/// ISO `yyyy-mm-dd` date (as produced by date pickers) or `dd-mm-yyyy`.
pub fn entry_date(input: &str) -> Result<String> {
  let input = input.trim();
  NaiveDate::parse_from_str(input, "%Y-%m-%d")
    .or_else(|_| NaiveDate::parse_from_str(input, "%d-%m-%Y"))
    .map(|d| d.format("%d-%m-%Y").to_string())
    .map_err(|_| Error::InvalidDate(input.to_owned()))
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

/// The first event (in the given order) whose normalised date equals the
/// normalised `date`.
pub fn find_event_by_date<'a>(events: &'a [Event], date: &str) -> Option<&'a Event> {
  let wanted = normalize(date);
  events.iter().find(|e| normalize(&e.date) == wanted)
}

// ─── Mentions ────────────────────────────────────────────────────────────────

/// A date-like substring found in free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateMention {
  /// Byte offset of the first character.
  pub start: usize,
  /// Byte offset one past the last character.
  pub end:   usize,
  pub text:  String,
}

/// Find every `d{1,2}[-/]d{1,2}[-/]dddd` substring that is not part of a
/// longer run of digits.
///
/// The digit boundaries on both sides need lookaround, which the `regex`
/// crate does not support, so the text is scanned by hand.
pub fn find_mentions(text: &str) -> Vec<DateMention> {
  let bytes = text.as_bytes();
  let mut mentions = Vec::new();
  let mut i = 0;

  while i < bytes.len() {
    let at_boundary = i == 0 || !bytes[i - 1].is_ascii_digit();
    if at_boundary
      && bytes[i].is_ascii_digit()
      && let Some(end) = match_date_at(bytes, i)
    {
      mentions.push(DateMention { start: i, end, text: text[i..end].to_owned() });
      i = end;
      continue;
    }
    i += 1;
  }

  mentions
}

fn digit_run(bytes: &[u8], from: usize) -> usize {
  bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count()
}

fn is_separator(bytes: &[u8], at: usize) -> bool {
  matches!(bytes.get(at), Some(b'-' | b'/'))
}

/// Returns the end offset of a date starting at `start`, if there is one.
/// ASCII-only matching is safe on UTF-8: multi-byte sequences never contain
/// ASCII bytes.
fn match_date_at(bytes: &[u8], start: usize) -> Option<usize> {
  let mut pos = start;

  for _ in 0..2 {
    let run = digit_run(bytes, pos);
    if !(1..=2).contains(&run) || !is_separator(bytes, pos + run) {
      return None;
    }
    pos += run + 1;
  }

  (digit_run(bytes, pos) == 4).then_some(pos + 4)
}
