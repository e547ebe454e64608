use chrono::{Days, NaiveDate};
use positivity_types::PositivityError;
use serde::{Deserialize, Serialize};

/// Contiguous, non-empty calendar date range `[start, end]`.
///
/// Every dense table in the workspace is indexed by one of these: position `i`
/// of a row holds the value for `start + i` days, and dates without an
/// observation are explicitly missing rather than absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AxisBounds")]
pub struct DateAxis {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct AxisBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<AxisBounds> for DateAxis {
    type Error = PositivityError;

    fn try_from(bounds: AxisBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl DateAxis {
    /// Build an axis from inclusive bounds.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PositivityError> {
        if start > end {
            return Err(PositivityError::invalid_arg(format!(
                "date axis start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Smallest axis covering every date in `dates`; `None` for an empty input.
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use positivity_core::DateAxis;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2020, 6, day).unwrap();
    /// let axis = DateAxis::spanning([d(9), d(2), d(5)]).unwrap();
    /// assert_eq!((axis.start(), axis.end(), axis.len()), (d(2), d(9), 8));
    /// assert!(DateAxis::spanning(std::iter::empty()).is_none());
    /// ```
    pub fn spanning<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for d in dates {
            bounds = Some(match bounds {
                None => (d, d),
                Some((lo, hi)) => (lo.min(d), hi.max(d)),
            });
        }
        bounds.map(|(start, end)| Self { start, end })
    }

    /// First date on the axis.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date on the axis.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates on the axis (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        let days = self.end.signed_duration_since(self.start).num_days();
        usize::try_from(days).map_or(1, |d| d + 1)
    }

    /// Always false; an axis holds at least one date.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// True if `date` lies on the axis.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Row position of `date`, if it lies on the axis.
    #[must_use]
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        usize::try_from(date.signed_duration_since(self.start).num_days()).ok()
    }

    /// Date at row position `idx`, if within the axis.
    #[must_use]
    pub fn date_at(&self, idx: usize) -> Option<NaiveDate> {
        if idx >= self.len() {
            return None;
        }
        self.start.checked_add_days(Days::new(u64::try_from(idx).ok()?))
    }

    /// Iterate every date on the axis in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        self.start.iter_days().take(self.len())
    }

    /// Trailing sub-axis of `days` dates ending at [`end`](Self::end),
    /// clipped to the axis start. Returns `None` when `days` is zero.
    #[must_use]
    pub fn trailing(&self, days: usize) -> Option<Self> {
        let back = u64::try_from(days.checked_sub(1)?).ok()?;
        let start = self
            .end
            .checked_sub_days(Days::new(back))
            .map_or(self.start, |s| s.max(self.start));
        Some(Self {
            start,
            end: self.end,
        })
    }

    /// Overlap of two axes, if any.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }
}
