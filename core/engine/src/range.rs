//! FILENAME: core/engine/src/range.rs
//! PURPOSE: The sparse cell span produced by GET_RANGE.
//! CONTEXT: A range covers every address between its two ends but only stores the
//! occupied cells, so `$0:999999999` costs as much as the cells actually set. Unset
//! addresses read as Empty when the range is walked.

use crate::cell::{CellAddress, CellValue};

/// Addresses from `start` to `end` inclusive, walking in whichever direction `end` lies.
pub(crate) fn walk(start: CellAddress, end: CellAddress) -> impl Iterator<Item = CellAddress> {
    (0..=start.abs_diff(end)).map(move |i| step(start, end, i))
}

/// The address `offset` steps from `start` toward `end`.
pub(crate) fn step(start: CellAddress, end: CellAddress, offset: u32) -> CellAddress {
    if start <= end {
        start + offset
    } else {
        start - offset
    }
}

/// Number of addresses between `start` and `end` inclusive.
pub fn span_len(start: CellAddress, end: CellAddress) -> u64 {
    u64::from(start.abs_diff(end)) + 1
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellRange {
    start: CellAddress,
    end: CellAddress,
    /// Occupied cells sorted by address.
    occupied: Vec<(CellAddress, CellValue)>,
}

impl CellRange {
    /// Builds a range from whatever cells the caller has. Empty values and
    /// addresses outside the span are dropped.
    pub fn new(
        start: CellAddress,
        end: CellAddress,
        cells: impl IntoIterator<Item = (CellAddress, CellValue)>,
    ) -> Self {
        let (low, high) = (start.min(end), start.max(end));
        let mut occupied: Vec<_> = cells
            .into_iter()
            .filter(|(addr, value)| (low..=high).contains(addr) && !value.is_empty())
            .collect();
        occupied.sort_by_key(|(addr, _)| *addr);
        occupied.dedup_by_key(|(addr, _)| *addr);
        CellRange {
            start,
            end,
            occupied,
        }
    }

    pub fn start(&self) -> CellAddress {
        self.start
    }

    pub fn end(&self) -> CellAddress {
        self.end
    }

    /// Number of addresses covered, occupied or not. Never zero.
    pub fn span(&self) -> u64 {
        span_len(self.start, self.end)
    }

    /// True when no cell in the span holds a value.
    pub fn is_blank(&self) -> bool {
        self.occupied.is_empty()
    }

    /// The occupied cells in address order.
    pub fn occupied(&self) -> &[(CellAddress, CellValue)] {
        &self.occupied
    }

    pub fn get(&self, address: CellAddress) -> CellValue {
        self.occupied
            .binary_search_by_key(&address, |(addr, _)| *addr)
            .map(|i| self.occupied[i].1.clone())
            .unwrap_or_default()
    }

    /// Every address from `start` toward `end` with its value, Empty included.
    pub fn cells(&self) -> impl Iterator<Item = (CellAddress, CellValue)> + '_ {
        walk(self.start, self.end).map(move |addr| (addr, self.get(addr)))
    }

    /// Occupied values stringified and joined in address order.
    pub fn to_text(&self) -> String {
        self.occupied
            .iter()
            .map(|(_, value)| value.display_value())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_goes_toward_end() {
        assert_eq!(walk(2, 4).collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(walk(4, 2).collect::<Vec<_>>(), vec![4, 3, 2]);
        assert_eq!(walk(7, 7).collect::<Vec<_>>(), vec![7]);
        assert_eq!(step(9, 0, 3), 6);
    }

    #[test]
    fn new_keeps_only_occupied_cells_in_span() {
        let range = CellRange::new(
            5,
            1,
            vec![
                (4, CellValue::Number(4.0)),
                (2, CellValue::Empty),
                (9, CellValue::Number(9.0)),
                (1, CellValue::from("a")),
            ],
        );
        assert_eq!(
            range.occupied(),
            &[(1, CellValue::from("a")), (4, CellValue::Number(4.0))]
        );
        assert_eq!(range.span(), 5);
        assert_eq!(range.get(4), CellValue::Number(4.0));
        assert_eq!(range.get(3), CellValue::Empty);
    }

    #[test]
    fn cells_fill_gaps_with_empty() {
        let range = CellRange::new(3, 1, vec![(2, CellValue::Boolean(true))]);
        assert_eq!(
            range.cells().collect::<Vec<_>>(),
            vec![
                (3, CellValue::Empty),
                (2, CellValue::Boolean(true)),
                (1, CellValue::Empty)
            ]
        );
    }

    #[test]
    fn huge_span_costs_only_occupied_cells() {
        let range = CellRange::new(999_999_999, 0, vec![(42, CellValue::Number(1.0))]);
        assert_eq!(range.span(), 1_000_000_000);
        assert_eq!(range.occupied().len(), 1);
        assert!(!range.is_blank());
        assert_eq!(range.to_text(), "1");
    }

    #[test]
    fn to_text_uses_address_order() {
        let range = CellRange::new(
            3,
            1,
            vec![
                (3, CellValue::from("c")),
                (1, CellValue::from("a")),
                (2, CellValue::from("b")),
            ],
        );
        assert_eq!(range.to_text(), "abc");
    }
}
