//! Calculation methods and the ordered registry that ranks them.
//!
//! A [`Method`] names one way of computing test positivity: a numerator field
//! divided by a denominator field. A [`MethodRegistry`] is an ordered list of
//! methods where position is priority (index 0 is the most preferred). The
//! registry caches each method's rank so selectors can compare candidates
//! without scanning the list.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::PositivityError;
use crate::ids::{FieldId, fields};

/// A method of calculating test positivity: `numerator / denominator`, both
/// taken as period deltas of cumulative counters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    name: Cow<'static, str>,
    numerator: FieldId,
    denominator: FieldId,
}

impl Method {
    /// Construct a method from static parts, usable in `const` registries.
    #[must_use]
    pub const fn from_static(
        name: &'static str,
        numerator: FieldId,
        denominator: FieldId,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            numerator,
            denominator,
        }
    }

    /// Construct a method with an owned name.
    pub fn new(name: impl Into<String>, numerator: FieldId, denominator: FieldId) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            numerator,
            denominator,
        }
    }

    /// Unique method name, used as the provenance label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field whose deltas form the ratio numerator.
    #[must_use]
    pub const fn numerator(&self) -> &FieldId {
        &self.numerator
    }

    /// Field whose deltas form the ratio denominator.
    #[must_use]
    pub const fn denominator(&self) -> &FieldId {
        &self.denominator
    }

    /// Elementwise ratio of two aligned delta rows.
    ///
    /// A cell is missing when either operand is missing or the denominator is
    /// exactly zero. Other non-finite results are reported as missing too, so
    /// the output never holds NaN or an infinity. Out-of-range ratios (negative
    /// or above one) are returned unchanged.
    ///
    /// ```
    /// use positivity_types::{Method, fields};
    ///
    /// let m = Method::new("m", fields::POSITIVE_TESTS, fields::TOTAL_TESTS);
    /// let num = [Some(1.0), Some(2.0), None, Some(-3.0)];
    /// let den = [Some(4.0), Some(0.0), Some(5.0), Some(10.0)];
    /// assert_eq!(m.calculate(&num, &den), vec![Some(0.25), None, None, Some(-0.3)]);
    /// ```
    #[must_use]
    pub fn calculate(
        &self,
        numerator: &[Option<f64>],
        denominator: &[Option<f64>],
    ) -> Vec<Option<f64>> {
        numerator
            .iter()
            .zip(denominator)
            .map(|(n, d)| match (*n, *d) {
                (Some(n), Some(d)) if d != 0.0 => Some(n / d).filter(|r| r.is_finite()),
                _ => None,
            })
            .collect()
    }
}

/// Test positivity methods in priority order, most preferred first.
pub const TEST_POSITIVITY_METHODS: [Method; 6] = [
    Method::from_static(
        "positiveCasesViral_totalTestEncountersViral",
        fields::POSITIVE_CASES_VIRAL,
        fields::TOTAL_TEST_ENCOUNTERS_VIRAL,
    ),
    Method::from_static(
        "positiveTestsViral_totalTestsViral",
        fields::POSITIVE_TESTS_VIRAL,
        fields::TOTAL_TESTS_VIRAL,
    ),
    Method::from_static(
        "positiveCasesViral_totalTestsViral",
        fields::POSITIVE_CASES_VIRAL,
        fields::TOTAL_TESTS_VIRAL,
    ),
    Method::from_static(
        "positiveTests_totalTestsViral",
        fields::POSITIVE_TESTS,
        fields::TOTAL_TESTS_VIRAL,
    ),
    Method::from_static(
        "positiveCasesViral_totalTestsPeopleViral",
        fields::POSITIVE_CASES_VIRAL,
        fields::TOTAL_TESTS_PEOPLE_VIRAL,
    ),
    Method::from_static(
        "positiveCasesViral_totalTestResults",
        fields::POSITIVE_CASES_VIRAL,
        fields::TOTAL_TESTS,
    ),
];

/// Ordered, non-empty list of uniquely named methods with cached ranks.
///
/// Serializes as a plain sequence of methods; deserialization applies the same
/// validation as [`MethodRegistry::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Method>", into = "Vec<Method>")]
pub struct MethodRegistry {
    methods: Vec<Method>,
    ranks: HashMap<String, usize>,
}

impl MethodRegistry {
    /// Build a registry from methods in priority order.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `methods` is empty or two methods share a name.
    pub fn new(methods: Vec<Method>) -> Result<Self, PositivityError> {
        if methods.is_empty() {
            return Err(PositivityError::invalid_arg(
                "method registry must contain at least one method",
            ));
        }
        let mut ranks: HashMap<String, usize> = HashMap::with_capacity(methods.len());
        for (idx, method) in methods.iter().enumerate() {
            if ranks.insert(method.name().to_string(), idx).is_some() {
                return Err(PositivityError::invalid_arg(format!(
                    "duplicate method name `{}`",
                    method.name()
                )));
            }
        }
        Ok(Self { methods, ranks })
    }

    /// Priority rank of the method called `name` (0 = most preferred).
    #[must_use]
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.ranks.get(name).copied()
    }

    /// Method at priority `rank`.
    #[must_use]
    pub fn get(&self, rank: usize) -> Option<&Method> {
        self.methods.get(rank)
    }

    /// Method called `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Method> {
        self.rank(name).and_then(|r| self.methods.get(r))
    }

    /// Iterate methods in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, Method> {
        self.methods.iter()
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Always false for a constructed registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Every field referenced as a numerator or denominator, in sorted order.
    #[must_use]
    pub fn fields(&self) -> BTreeSet<FieldId> {
        self.methods
            .iter()
            .flat_map(|m| [m.numerator().clone(), m.denominator().clone()])
            .collect()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        let methods = TEST_POSITIVITY_METHODS.to_vec();
        let ranks = methods
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.name().to_string(), idx))
            .collect();
        Self { methods, ranks }
    }
}

impl TryFrom<Vec<Method>> for MethodRegistry {
    type Error = PositivityError;

    fn try_from(methods: Vec<Method>) -> Result<Self, Self::Error> {
        Self::new(methods)
    }
}

impl From<MethodRegistry> for Vec<Method> {
    fn from(registry: MethodRegistry) -> Self {
        registry.methods
    }
}

impl<'a> IntoIterator for &'a MethodRegistry {
    type Item = &'a Method;
    type IntoIter = std::slice::Iter<'a, Method>;

    fn into_iter(self) -> Self::IntoIter {
        self.methods.iter()
    }
}
