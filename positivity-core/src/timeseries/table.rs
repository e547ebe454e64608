use std::collections::BTreeMap;
use std::collections::btree_map;

use positivity_types::PositivityError;

use super::axis::DateAxis;

/// Dense matrix of optional values: one row per key, one column per axis date.
///
/// Rows are kept in key order so iteration (and anything derived from it) is
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct WideTable<K: Ord> {
    axis: DateAxis,
    rows: BTreeMap<K, Vec<Option<f64>>>,
}

impl<K: Ord> WideTable<K> {
    /// Create an empty table over `axis`.
    #[must_use]
    pub const fn new(axis: DateAxis) -> Self {
        Self {
            axis,
            rows: BTreeMap::new(),
        }
    }

    /// Date axis shared by every row.
    #[must_use]
    pub const fn axis(&self) -> &DateAxis {
        &self.axis
    }

    /// Insert or replace the row for `key`, returning the previous row.
    ///
    /// # Errors
    /// Returns `Data` if the row length differs from the axis length.
    pub fn insert(
        &mut self,
        key: K,
        row: Vec<Option<f64>>,
    ) -> Result<Option<Vec<Option<f64>>>, PositivityError> {
        if row.len() != self.axis.len() {
            return Err(PositivityError::data(format!(
                "row has {} cells but the axis spans {} dates",
                row.len(),
                self.axis.len()
            )));
        }
        Ok(self.rows.insert(key, row))
    }

    /// Row for `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&[Option<f64>]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    /// Cells of the row for `key` that fall inside `window`.
    #[must_use]
    pub fn window(&self, key: &K, window: &DateAxis) -> Option<&[Option<f64>]> {
        let row = self.rows.get(key)?;
        window_slice(row, &self.axis, window)
    }

    /// Iterate rows in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, Vec<Option<f64>>> {
        self.rows.iter()
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> btree_map::Keys<'_, K, Vec<Option<f64>>> {
        self.rows.keys()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only rows for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &[Option<f64>]) -> bool,
    {
        self.rows.retain(|k, row| keep(k, row));
    }

    /// Build a new table over the same axis by transforming every row.
    #[must_use]
    pub fn map_rows<F>(&self, mut f: F) -> Self
    where
        K: Clone,
        F: FnMut(&[Option<f64>]) -> Vec<Option<f64>>,
    {
        Self {
            axis: self.axis,
            rows: self.rows.iter().map(|(k, row)| (k.clone(), f(row))).collect(),
        }
    }
}

impl<K: Ord> IntoIterator for WideTable<K> {
    type Item = (K, Vec<Option<f64>>);
    type IntoIter = btree_map::IntoIter<K, Vec<Option<f64>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, K: Ord> IntoIterator for &'a WideTable<K> {
    type Item = (&'a K, &'a Vec<Option<f64>>);
    type IntoIter = btree_map::Iter<'a, K, Vec<Option<f64>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Cells of `row` (laid out on `axis`) that fall inside `window`.
#[must_use]
pub fn window_slice<'a>(
    row: &'a [Option<f64>],
    axis: &DateAxis,
    window: &DateAxis,
) -> Option<&'a [Option<f64>]> {
    let overlap = axis.intersect(window)?;
    let lo = axis.index_of(overlap.start())?;
    let hi = axis.index_of(overlap.end())?;
    row.get(lo..=hi)
}

/// True if every cell of `row` is missing.
#[must_use]
pub fn is_all_missing(row: &[Option<f64>]) -> bool {
    row.iter().all(Option::is_none)
}

/// Position of the last non-missing cell of `row`.
#[must_use]
pub fn last_present(row: &[Option<f64>]) -> Option<usize> {
    row.iter().rposition(Option::is_some)
}
