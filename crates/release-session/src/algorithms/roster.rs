//! # Session Roster
//!
//! Ordered, read-only view of the beneficiaries a session scans against.

use std::cmp::Ordering;

use crate::domain::{BeneficiaryId, Progress, RosterEntry};

/// Roster loaded for one allotment, sorted by last then first name.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

/// One page of the roster table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterPage<'a> {
    /// Entries on this page.
    pub entries: &'a [RosterEntry],
    /// 1-based page number, clamped into range.
    pub page: usize,
    /// Page count, at least 1.
    pub total_pages: usize,
    /// Total rows across all pages.
    pub total_records: usize,
}

impl RosterPage<'_> {
    /// "Found N records".
    pub fn found_text(&self) -> String {
        format!("Found {} records", self.total_records)
    }
}

fn by_name(a: &RosterEntry, b: &RosterEntry) -> Ordering {
    a.last_name
        .to_lowercase()
        .cmp(&b.last_name.to_lowercase())
        .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
}

impl Roster {
    /// Build a roster; entries are stably sorted by last name, first name.
    pub fn new(mut entries: Vec<RosterEntry>) -> Self {
        entries.sort_by(by_name);
        Self { entries }
    }

    /// All entries in display order.
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-insensitive lookup by beneficiary code.
    pub fn find_by_code(&self, scanned: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.code.matches(scanned))
    }

    /// Position of an entry in display order.
    pub fn position(&self, id: BeneficiaryId) -> Option<usize> {
        self.entries.iter().position(|e| e.beneficiary_id == id)
    }

    /// Flag one entry released locally. Used only when a reload after a
    /// committed release fails.
    pub(crate) fn mark_released(&mut self, id: BeneficiaryId) -> bool {
        match self.entries.iter_mut().find(|e| e.beneficiary_id == id) {
            Some(entry) if !entry.released => {
                entry.released = true;
                true
            }
            _ => false,
        }
    }

    /// Released / total.
    pub fn progress(&self) -> Progress {
        Progress {
            released: self.entries.iter().filter(|e| e.released).count(),
            total: self.entries.len(),
        }
    }

    /// Page count for a page size (at least 1).
    pub fn total_pages(&self, page_size: usize) -> usize {
        let page_size = page_size.max(1);
        self.entries.len().div_ceil(page_size).max(1)
    }

    /// Slice out a 1-based page; out-of-range pages are clamped.
    pub fn page(&self, page: usize, page_size: usize) -> RosterPage<'_> {
        let page_size = page_size.max(1);
        let total_pages = self.total_pages(page_size);
        let page = page.clamp(1, total_pages);
        let start = ((page - 1) * page_size).min(self.entries.len());
        let end = (start + page_size).min(self.entries.len());
        RosterPage {
            entries: &self.entries[start..end],
            page,
            total_pages,
            total_records: self.entries.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, BeneficiaryCode, Money};

    fn entry(id: u64, first: &str, last: &str, released: bool) -> RosterEntry {
        RosterEntry {
            beneficiary_id: BeneficiaryId(id),
            code: BeneficiaryCode::new(format!("BENE-{id:03}")),
            first_name: first.to_string(),
            last_name: last.to_string(),
            barangay: "Poblacion".to_string(),
            classification: "None".to_string(),
            share: Amount::money(Money::from_pesos(500)),
            released,
        }
    }

    #[test]
    fn test_sorted_by_last_then_first() {
        let roster = Roster::new(vec![
            entry(1, "Jose", "Reyes", false),
            entry(2, "Ana", "Cruz", false),
            entry(3, "Ben", "cruz", false),
            entry(4, "Aaron", "Reyes", false),
        ]);
        let ids: Vec<u64> = roster.entries().iter().map(|e| e.beneficiary_id.0).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_find_by_code_case_insensitive() {
        let roster = Roster::new(vec![entry(1, "Jose", "Reyes", false)]);
        assert!(roster.find_by_code("bene-001").is_some());
        assert!(roster.find_by_code("BENE-01").is_none());
        assert!(roster.find_by_code("1").is_none());
    }

    #[test]
    fn test_progress() {
        let roster = Roster::new(vec![
            entry(1, "A", "A", true),
            entry(2, "B", "B", false),
            entry(3, "C", "C", true),
        ]);
        assert_eq!(roster.progress(), Progress { released: 2, total: 3 });
    }

    #[test]
    fn test_paging_clamps() {
        let entries = (1..=10).map(|i| entry(i, "F", &format!("L{i:02}"), false)).collect();
        let roster = Roster::new(entries);

        let first = roster.page(0, 8);
        assert_eq!(first.page, 1);
        assert_eq!(first.entries.len(), 8);
        assert_eq!(first.total_pages, 2);

        let last = roster.page(99, 8);
        assert_eq!(last.page, 2);
        assert_eq!(last.entries.len(), 2);
        assert_eq!(last.found_text(), "Found 10 records");
    }

    #[test]
    fn test_empty_roster_has_one_page() {
        let roster = Roster::default();
        let page = roster.page(1, 8);
        assert_eq!(page.total_pages, 1);
        assert!(page.entries.is_empty());
    }
}
