//! Conditional Probability Tables, and the shortcuts for writing them.

use crate::dist::{ProbDist, WeightSpec};
use crate::util::{BayesError, Result};
use crate::variable::{render_row, Outcome, Row};

use indexmap::{IndexMap, IndexSet};


/// The ways a `CPTable` may be written down.
#[derive(Clone, Debug, PartialEq)]
pub enum CptSpec {
    /// A bare distribution. Only valid for a variable with no parents, where it means
    /// `{(): dist}`.
    Dist(WeightSpec),

    /// Rows keyed by a bare outcome. Only valid for a variable with exactly one parent, where each
    /// key `val` means the row `(val,)`.
    Keyed(Vec<(Outcome, WeightSpec)>),

    /// Rows keyed by the full tuple of parent values, in parent order.
    Rows(Vec<(Row, WeightSpec)>)
}

impl CptSpec {

    /// Shorthand for `CptSpec::Keyed`
    pub fn keyed<K, W>(pairs: Vec<(K, W)>) -> Self
        where K: Into<Outcome>,
              W: Into<WeightSpec>
    {
        CptSpec::Keyed(pairs.into_iter().map(|(k, w)| (k.into(), w.into())).collect())
    }

    /// Shorthand for `CptSpec::Rows`
    pub fn rows<K, W>(pairs: Vec<(Vec<K>, W)>) -> Self
        where K: Into<Outcome>,
              W: Into<WeightSpec>
    {
        CptSpec::Rows(
            pairs.into_iter()
                 .map(|(row, w)| (row.into_iter().map(|k| k.into()).collect(), w.into()))
                 .collect()
        )
    }
}

impl From<f64> for CptSpec {
    fn from(p: f64) -> Self {
        CptSpec::Dist(WeightSpec::Scalar(p))
    }
}

impl From<WeightSpec> for CptSpec {
    fn from(w: WeightSpec) -> Self {
        CptSpec::Dist(w)
    }
}


/// A mapping of `{row: ProbDist}` where each row is a tuple of values of the parent variables.
///
/// Rows keep the order they were written in. Completeness (one row for every combination of
/// parent values) is not checked.
#[derive(Clone, Debug, PartialEq)]
pub struct CPTable {
    rows: IndexMap<Row, ProbDist>
}

impl CPTable {

    /// Resolve `spec` into a table for a variable with `parent_count` parents.
    ///
    /// # Errors
    /// * `BayesError::MalformedTable` if the shape of `spec` does not fit `parent_count`, or a row
    ///   is given twice
    /// * `BayesError::MalformedDistribution` if any row's weights cannot be normalized
    pub fn new<S: Into<CptSpec>>(spec: S, parent_count: usize) -> Result<Self> {
        let rows: Vec<(Row, WeightSpec)> = match spec.into() {
            CptSpec::Dist(w) => {
                if parent_count != 0 {
                    return Err(BayesError::MalformedTable(
                        format!("a bare distribution requires no parents, found {}", parent_count)
                    ));
                }
                vec![(Row::new(), w)]
            },
            CptSpec::Keyed(pairs) => {
                if parent_count != 1 {
                    return Err(BayesError::MalformedTable(
                        format!("rows keyed by a single value require exactly one parent, found {}", parent_count)
                    ));
                }
                pairs.into_iter().map(|(k, w)| (vec![k], w)).collect()
            },
            CptSpec::Rows(pairs) => pairs
        };

        let mut table = IndexMap::new();
        for (row, w) in rows {
            if row.len() != parent_count {
                return Err(BayesError::MalformedTable(
                    format!("row {} has {} values but there are {} parents", render_row(&row), row.len(), parent_count)
                ));
            }
            if table.contains_key(&row) {
                return Err(BayesError::MalformedTable(format!("row {} is given twice", render_row(&row))));
            }

            let dist = ProbDist::new(w)?;
            table.insert(row, dist);
        }

        Ok(CPTable { rows: table })
    }

    /// The distribution for a row of parent values
    pub fn get(&self, row: &[Outcome]) -> Option<&ProbDist> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> indexmap::map::Keys<'_, Row, ProbDist> {
        self.rows.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Row, ProbDist> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every outcome appearing in any row, in the order first seen
    pub fn domain(&self) -> IndexSet<Outcome> {
        self.rows.values().flat_map(|d| d.outcomes().cloned()).collect()
    }
}
