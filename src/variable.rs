//! Definition of the variable module
//!
//! A `Variable` represents a discrete random variable in a Bayesian network. This module also
//! holds the `Evidence` type and the helpers that enumerate the events consistent with some
//! evidence, which drive every `Factor` operation.

use crate::cpt::CPTable;
use crate::util::{BayesError, Result};

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use std::fmt;


/// A single value in the domain of a `Variable`.
///
/// Boolean variables use the closed pair `Outcome::True` / `Outcome::False`. Other finite domains
/// are built from labels or integer levels.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    True,
    False,
    Label(String),
    Level(i64)
}

impl From<bool> for Outcome {
    fn from(b: bool) -> Self {
        if b { Outcome::True } else { Outcome::False }
    }
}

impl<'a> From<&'a str> for Outcome {
    fn from(s: &'a str) -> Self {
        Outcome::Label(String::from(s))
    }
}

impl From<String> for Outcome {
    fn from(s: String) -> Self {
        Outcome::Label(s)
    }
}

impl From<i64> for Outcome {
    fn from(l: i64) -> Self {
        Outcome::Level(l)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::True => write!(f, "T"),
            Outcome::False => write!(f, "F"),
            Outcome::Label(s) => write!(f, "{}", s),
            Outcome::Level(l) => write!(f, "{}", l)
        }
    }
}


/// An assignment of outcomes to an ordered list of `Variable`s, aligned by position.
pub type Row = Vec<Outcome>;

/// Render a `Row` as a tuple, e.g. `(T, F)`
pub fn render_row(row: &[Outcome]) -> String {
    format!("({})", row.iter().join(", "))
}


/// Index of a `Variable` inside the network that owns it.
///
/// Ids are only meaningful within that network: the same index names an unrelated `Variable` in
/// any other `BayesNet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub(crate) usize);

impl VarId {
    pub fn index(&self) -> usize {
        self.0
    }
}


/// A discrete random variable, conditioned on zero or more parent `Variable`s.
///
/// The parents are held by id; the network owns every `Variable`. The domain is every outcome
/// that appears in the CPT, in the order it first appears.
#[derive(Clone, Debug)]
pub struct Variable {
    id: VarId,
    name: String,
    parents: Vec<VarId>,
    cpt: CPTable,
    domain: IndexSet<Outcome>
}

impl Variable {

    pub(crate) fn new(id: VarId, name: &str, parents: Vec<VarId>, cpt: CPTable) -> Self {
        let domain = cpt.domain();
        Variable { id, name: String::from(name), parents, cpt, domain }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    /// Get the name of the `Variable`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ids of the parents, in the order the CPT rows are keyed by
    pub fn parents(&self) -> &[VarId] {
        &self.parents
    }

    pub fn cpt(&self) -> &CPTable {
        &self.cpt
    }

    pub fn domain(&self) -> &IndexSet<Outcome> {
        &self.domain
    }

    /// Number of values in the domain
    pub fn cardinality(&self) -> usize {
        self.domain.len()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Variable) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}


/// A partial assignment `{variable: outcome}` describing what we know for sure.
///
/// `Evidence` is keyed by `VarId`, so it belongs to the network whose `Variable`s built it. Passed
/// to an engine over a different `BayesNet`, it constrains whichever variables share those ids.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evidence {
    values: IndexMap<VarId, Outcome>
}

impl Evidence {

    /// Construct empty `Evidence`
    pub fn new() -> Self {
        Evidence { values: IndexMap::new() }
    }

    /// Pair each of `variables` with the value at the same position in `row`
    pub fn from_event(variables: &[&Variable], row: &[Outcome]) -> Self {
        variables.iter().map(|v| v.id()).zip(row.iter().cloned()).collect()
    }

    /// Observe `var` to take the value `value`, replacing any previous observation.
    pub fn set<O: Into<Outcome>>(&mut self, var: &Variable, value: O) {
        self.values.insert(var.id(), value.into());
    }

    pub fn insert(&mut self, id: VarId, value: Outcome) {
        self.values.insert(id, value);
    }

    /// A copy of this `Evidence` that additionally observes `var = value`
    pub fn extended(&self, var: &Variable, value: Outcome) -> Self {
        let mut e = self.clone();
        e.insert(var.id(), value);
        e
    }

    pub fn get(&self, var: &Variable) -> Option<&Outcome> {
        self.values.get(&var.id())
    }

    pub fn get_id(&self, id: VarId) -> Option<&Outcome> {
        self.values.get(&id)
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.values.contains_key(&var.id())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, VarId, Outcome> {
        self.values.iter()
    }
}

impl std::iter::FromIterator<(VarId, Outcome)> for Evidence {
    fn from_iter<I: IntoIterator<Item = (VarId, Outcome)>>(iter: I) -> Self {
        Evidence { values: iter.into_iter().collect() }
    }
}


/// Does `row` agree with `evidence`, given that `row` is ordered by `var_ordering`?
///
/// Only evidence on variables in `var_ordering` constrains the row; empty evidence always
/// matches.
pub fn matches_evidence(row: &[Outcome], evidence: &Evidence, var_ordering: &[&Variable]) -> bool {
    evidence.iter().all(|(&id, value)| {
        match var_ordering.iter().position(|v| v.id() == id) {
            Some(idx) => row.get(idx) == Some(value),
            None => true
        }
    })
}


/// Filter and reorder the values of `event` to line up with `variable_list`.
///
/// # Errors
/// * `BayesError::IncompleteEvidenceLookup`, if `event` is missing any of the variables
pub fn filter_event_values(variable_list: &[&Variable], event: &Evidence) -> Result<Row> {
    let missing: Vec<String> = variable_list.iter()
                                            .filter(|v| !event.contains(v))
                                            .map(|v| v.name().to_string())
                                            .collect();
    if !missing.is_empty() {
        return Err(BayesError::IncompleteEvidenceLookup(missing));
    }

    Ok(variable_list.iter().filter_map(|v| event.get(v).cloned()).collect())
}


/// Lazy iterator over every event of the joint domain of some variables that is consistent with
/// some evidence.
///
/// Events come out in the order of the Cartesian product of the domains, with the last variable
/// varying fastest. An observed variable only ever takes its observed value, so filtering happens
/// before enumeration rather than after it.
///
/// The number of events is the product of the (unobserved) domain sizes. This is the dominant
/// cost of every `Factor` operation, and materializing it for large networks exhausts memory.
pub struct ConsistentEvents {
    candidates: Vec<Vec<Outcome>>,
    indices: Vec<usize>,
    done: bool
}

impl Iterator for ConsistentEvents {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.done {
            return None;
        }

        let row = self.indices.iter()
                              .zip(self.candidates.iter())
                              .map(|(&i, values)| values[i].clone())
                              .collect();

        // advance the odometer
        self.done = true;
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.candidates[pos].len() {
                self.done = false;
                break;
            }
            self.indices[pos] = 0;
        }

        Some(row)
    }
}


/// All events over `variables` consistent with `evidence`, as a lazy iterator.
pub fn consistent_events(variables: &[&Variable], evidence: &Evidence) -> ConsistentEvents {
    let candidates: Vec<Vec<Outcome>> = variables.iter().map(|v| {
        match evidence.get(v) {
            Some(value) if v.domain().contains(value) => vec![value.clone()],
            Some(_) => vec![],
            None => v.domain().iter().cloned().collect()
        }
    }).collect();

    let done = candidates.iter().any(|c| c.is_empty());
    let indices = vec![0; candidates.len()];

    ConsistentEvents { candidates, indices, done }
}


/// All events over `variables` consistent with `evidence`.
///
/// With no variables, the only event is the empty row.
pub fn all_consistent_events(variables: &[&Variable], evidence: &Evidence) -> Vec<Row> {
    consistent_events(variables, evidence).collect()
}
