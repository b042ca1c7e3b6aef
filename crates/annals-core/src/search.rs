//! Free-text and taxonomy search over events.
//!
//! Text matching is case-insensitive and folds the Arabic spelling variants
//! users commonly type interchangeably: diacritics are stripped and the hamza
//! carriers and taa marbuta are mapped onto their base letters.

use serde::{Deserialize, Serialize};

use crate::{
  dates::{Order, sort_by_date},
  event::Event,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
  pub text:         String,
  /// Exact tag to require; empty means any.
  pub tag:          String,
  /// Exact condemnation label to require; empty means any.
  pub condemnation: String,
}

impl SearchQuery {
  pub fn is_empty(&self) -> bool {
    self.text.trim().is_empty() && self.tag.is_empty() && self.condemnation.is_empty()
  }

  fn matches(&self, event: &Event, needle: &str) -> bool {
    let text_match = needle.is_empty()
      || normalize_arabic(&event.description).contains(needle)
      || event.date.to_lowercase().contains(needle)
      || normalize_arabic(&event.condemnation_description).contains(needle);

    let tag_match = self.tag.is_empty() || event.tag == self.tag;
    let condemnation_match =
      self.condemnation.is_empty() || event.condemnation == self.condemnation;

    text_match && tag_match && condemnation_match
  }
}

/// Tashkeel and the superscript alef.
fn is_diacritic(c: char) -> bool {
  matches!(c, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

fn fold_letter(c: char) -> char {
  match c {
    'أ' | 'إ' | 'آ' => 'ا',
    'ؤ' => 'و',
    'ئ' => 'ي',
    'ة' => 'ه',
    other => other,
  }
}

/// Lowercase, strip diacritics and fold letter variants.
pub fn normalize_arabic(text: &str) -> String {
  text
    .chars()
    .flat_map(char::to_lowercase)
    .filter(|c| !is_diacritic(*c))
    .map(fold_letter)
    .collect()
}

/// Events matching `query`, newest first. An empty query matches nothing.
pub fn search(events: &[Event], query: &SearchQuery) -> Vec<Event> {
  if query.is_empty() {
    return Vec::new();
  }

  let needle = normalize_arabic(query.text.trim());
  let mut results: Vec<Event> = events
    .iter()
    .filter(|e| query.matches(e, &needle))
    .cloned()
    .collect();
  sort_by_date(&mut results, Order::Descending);
  results
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::event::{EventId, NewEvent};

  fn ev(id: i64, date: &str, description: &str, tag: &str) -> Event {
    NewEvent { tag: tag.into(), ..NewEvent::new(date, description) }.with_id(EventId(id))
  }

  #[test]
  fn normalize_folds_arabic_variants() {
    assert_eq!(normalize_arabic("أحمد"), "احمد");
    assert_eq!(normalize_arabic("مَدْرَسَة"), "مدرسه");
    assert_eq!(normalize_arabic("مسؤول"), "مسوول");
    assert_eq!(normalize_arabic("Hello"), "hello");
  }

  #[test]
  fn empty_query_returns_nothing() {
    let events = vec![ev(1, "1-1-2024", "x", "")];
    assert!(search(&events, &SearchQuery::default()).is_empty());
    let blank = SearchQuery { text: "   ".into(), ..SearchQuery::default() };
    assert!(search(&events, &blank).is_empty());
  }

  #[test]
  fn text_matches_description_without_diacritics() {
    let events = vec![
      ev(1, "01-01-2024", "زيارة المدرسة", ""),
      ev(2, "02-01-2024", "اجتماع", ""),
    ];
    let q = SearchQuery { text: "مدرسه".into(), ..SearchQuery::default() };
    let found = search(&events, &q);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, EventId(1));
  }

  #[test]
  fn text_matches_dates_and_filters_by_tag() {
    let events = vec![
      ev(1, "01-03-2024", "a", "strong"),
      ev(2, "05-03-2024", "b", "weak"),
      ev(3, "09-03-2024", "c", "strong"),
    ];

    let by_date = SearchQuery { text: "03-2024".into(), ..SearchQuery::default() };
    let ids: Vec<_> = search(&events, &by_date).iter().map(|e| e.id.0).collect();
    assert_eq!(ids, [3, 2, 1], "newest first");

    let by_tag = SearchQuery { tag: "strong".into(), ..SearchQuery::default() };
    let ids: Vec<_> = search(&events, &by_tag).iter().map(|e| e.id.0).collect();
    assert_eq!(ids, [3, 1]);
  }
}
