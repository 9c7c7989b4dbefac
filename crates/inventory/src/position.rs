//! Shelf position labels.
//!
//! A position is a named physical slot ("RUA 2 COLUNA 10 POSICAO B") holding
//! at most one active product. Labels are compared by value for occupancy
//! checks; for selector population they order naturally, with embedded
//! numbers compared numerically rather than lexically (so "RUA 2" sorts
//! before "RUA 10").

use serde::{Deserialize, Serialize};

/// Named shelf slot, compared by value equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionLabel(String);

impl PositionLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        SegmentIter { rest: &self.0 }
    }
}

impl core::fmt::Display for PositionLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for PositionLabel {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PositionLabel {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Number(u64),
    Text(&'a str),
}

struct SegmentIter<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let is_digit = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;

        if is_digit {
            // Digit runs longer than u64 fall back to text comparison.
            match head.parse::<u64>() {
                Ok(n) => Some(Segment::Number(n)),
                Err(_) => Some(Segment::Text(head)),
            }
        } else {
            Some(Segment::Text(head))
        }
    }
}

impl PartialOrd for PositionLabel {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PositionLabel {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        use core::cmp::Ordering;

        let mut lhs = self.segments();
        let mut rhs = other.segments();
        loop {
            match (lhs.next(), rhs.next()) {
                (None, None) => break,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some(a), Some(b)) => {
                    let ord = match (a, b) {
                        (Segment::Number(a), Segment::Number(b)) => a.cmp(&b),
                        (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
                        // Numbers sort before text at the same offset.
                        (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
                        (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }

        // Segment-equal labels (e.g. "A01" vs "A1") tie-break on raw text so
        // ordering stays consistent with equality.
        self.0.cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> PositionLabel {
        PositionLabel::new(s)
    }

    #[test]
    fn numeric_segments_sort_numerically() {
        let mut labels = vec![
            label("RUA 10 COLUNA 1 POSICAO A"),
            label("RUA 2 COLUNA 1 POSICAO A"),
            label("RUA 2 COLUNA 10 POSICAO A"),
            label("RUA 2 COLUNA 2 POSICAO B"),
        ];
        labels.sort();
        let ordered: Vec<_> = labels.iter().map(PositionLabel::as_str).collect();
        assert_eq!(
            ordered,
            vec![
                "RUA 2 COLUNA 1 POSICAO A",
                "RUA 2 COLUNA 2 POSICAO B",
                "RUA 2 COLUNA 10 POSICAO A",
                "RUA 10 COLUNA 1 POSICAO A",
            ]
        );
    }

    #[test]
    fn slot_letter_breaks_ties() {
        assert!(label("RUA 1 COLUNA 1 POSICAO A") < label("RUA 1 COLUNA 1 POSICAO B"));
    }

    #[test]
    fn unstructured_labels_still_order() {
        assert!(label("DOCK-2") < label("DOCK-11"));
        // Same numeric value, different spelling: raw text breaks the tie.
        assert!(label("A01") < label("A1"));
    }

    #[test]
    fn equality_is_by_value() {
        assert_eq!(label("RUA 1"), label("RUA 1"));
        assert_ne!(label("RUA 1"), label("RUA 01"));
    }
}
