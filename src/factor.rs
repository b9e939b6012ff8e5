//! Definition of the factor module
//!
//! A `Factor` is a table of values over the joint assignments of an ordered list of
//! `Variable`s. Pointwise product and summing out are the two operations that make up variable
//! elimination.

use crate::model::BayesNet;
use crate::util::{BayesError, Result};
use crate::variable::{
    consistent_events, filter_event_values, matches_evidence, render_row, Evidence, Outcome, Row,
    VarId, Variable,
};

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::{debug, trace, warn};


/// The ways a `Factor` may be indexed.
#[derive(Clone, Copy, Debug)]
pub enum FactorKey<'k> {
    /// A row, aligned with the `Factor`'s variables
    Row(&'k [Outcome]),

    /// An event covering (at least) every variable of the `Factor`, in any order
    Event(&'k Evidence)
}


/// A `Factor` over some ordered scope of variables, borrowed from the network that owns them.
///
/// A `Factor` is never modified once built: every operation produces a new one.
#[derive(Clone, Debug)]
pub struct Factor<'a> {
    /// The scope of the `Factor`
    variables: Vec<&'a Variable>,

    /// The values of the `Factor`, keyed by rows aligned with `variables`
    table: IndexMap<Row, f64>
}


impl<'a> Factor<'a> {

    /// Create a new `Factor`
    ///
    /// # Errors
    /// * `BayesError::MalformedTable` if a variable appears twice in the scope, a row does not
    ///   have one value per variable, or a value lies outside of its variable's domain
    pub fn new(variables: Vec<&'a Variable>, table: IndexMap<Row, f64>) -> Result<Self> {
        if let Some(v) = variables.iter().duplicates_by(|v| v.id()).next() {
            return Err(BayesError::MalformedTable(format!("{} appears twice in the scope", v)));
        }

        for row in table.keys() {
            if row.len() != variables.len() {
                return Err(BayesError::MalformedTable(
                    format!("row {} does not match a scope of {} variables", render_row(row), variables.len())
                ));
            }

            if let Some((v, o)) = variables.iter().zip(row.iter()).find(|&(v, o)| !v.domain().contains(o)) {
                return Err(BayesError::MalformedTable(format!("{} is not in the domain of {}", o, v)));
            }
        }

        Ok(Factor { variables, table })
    }


    /// The `Factor` over no variables with the single value 1. This is the identity of
    /// `pointwise_product`.
    pub fn unit() -> Self {
        let mut table = IndexMap::new();
        table.insert(Row::new(), 1.0);
        Factor { variables: vec![], table }
    }


    /// The scope of the `Factor`, in row order
    pub fn variables(&self) -> &[&'a Variable] {
        &self.variables
    }


    /// The ids of the scope of the `Factor`
    pub fn scope(&self) -> Vec<VarId> {
        self.variables.iter().map(|v| v.id()).collect()
    }


    /// Check if `var` is in the scope of this `Factor`
    pub fn contains(&self, var: &Variable) -> bool {
        self.variables.iter().any(|v| v.id() == var.id())
    }


    pub fn len(&self) -> usize {
        self.table.len()
    }


    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }


    pub fn iter(&self) -> indexmap::map::Iter<'_, Row, f64> {
        self.table.iter()
    }


    pub fn values(&self) -> indexmap::map::Values<'_, Row, f64> {
        self.table.values()
    }


    /// Sum of every value in the table
    pub fn total(&self) -> f64 {
        self.table.values().sum()
    }


    /// Retrieve the value stored for `key`.
    ///
    /// # Errors
    /// * `BayesError::IncompleteEvidenceLookup` if an event does not cover every variable
    /// * `BayesError::MissingRow` if there is no value for the row
    pub fn get(&self, key: FactorKey) -> Result<f64> {
        match key {
            FactorKey::Row(row) => self.lookup(row),
            FactorKey::Event(event) => self.lookup(&filter_event_values(&self.variables, event)?)
        }
    }


    fn lookup(&self, row: &[Outcome]) -> Result<f64> {
        self.table
            .get(row)
            .cloned()
            .ok_or_else(|| BayesError::MissingRow(render_row(row)))
    }


    /// Multiply two `Factor`s, combining their variables.
    ///
    /// The scope of the product is the scope of `self` followed by the variables of `other` that
    /// `self` does not have. Each event over that scope which is consistent with `evidence` gets
    /// the product of the values of both `Factor`s at that event. Shared variables always agree,
    /// as both lookups project the same event; disjoint scopes give the outer product.
    ///
    /// # Errors
    /// * `BayesError::MissingRow` if either `Factor` lacks a row for a consistent event, e.g. when
    ///   it was built with evidence that `evidence` does not include
    pub fn pointwise_product(&self, other: &Factor<'a>, evidence: &Evidence) -> Result<Factor<'a>> {
        let variables: Vec<&'a Variable> = self.variables.iter()
                                                         .chain(other.variables.iter())
                                                         .cloned()
                                                         .unique_by(|v| v.id())
                                                         .collect();

        let mine = positions(&variables, &self.variables);
        let theirs = positions(&variables, &other.variables);

        let mut table = IndexMap::new();
        for row in consistent_events(&variables, evidence) {
            let p = self.lookup(&project(&row, &mine))? * other.lookup(&project(&row, &theirs))?;
            table.insert(row, p);
        }

        debug!(
            variables = %variables.iter().join(", "),
            rows = table.len(),
            "pointwise product"
        );

        Ok(Factor { variables, table })
    }


    /// Make a `Factor` eliminating `var` by summing over its values.
    ///
    /// Each event over the remaining variables which is consistent with `evidence` gets the sum
    /// of every row of `self` that agrees with it. Rows are grouped in one pass rather than
    /// re-filtered for every event.
    pub fn sum_out(&self, var: &Variable, evidence: &Evidence) -> Result<Factor<'a>> {
        let remaining: Vec<&'a Variable> = self.variables.iter()
                                                         .filter(|v| v.id() != var.id())
                                                         .cloned()
                                                         .collect();

        if remaining.len() == self.variables.len() {
            warn!(var = %var, "summing out a variable that is not in the factor");
        }

        let keep = positions(&self.variables, &remaining);

        let mut table: IndexMap<Row, f64> = consistent_events(&remaining, evidence).map(|row| (row, 0.0)).collect();
        for (row, p) in self.table.iter() {
            if let Some(total) = table.get_mut(&project(row, &keep)) {
                *total += p;
            }
        }

        debug!(var = %var, rows = table.len(), "summed out");

        Ok(Factor { variables: remaining, table })
    }
}


/// Position in `variables` of each of `subset`, in the order of `subset`.
fn positions(variables: &[&Variable], subset: &[&Variable]) -> Vec<usize> {
    subset.iter()
          .filter_map(|s| variables.iter().position(|v| v.id() == s.id()))
          .collect()
}


fn project(row: &[Outcome], positions: &[usize]) -> Row {
    positions.iter().map(|&i| row[i].clone()).collect()
}


/// Convert the CPT of `var` into a `Factor`, keeping only the rows consistent with `evidence`.
///
/// The scope of the `Factor` is the parents of `var`, followed by `var` itself. By convention
/// the variable is always last. Every CPT row gets an entry for each value in the domain of
/// `var`, with 0 for the values that row does not list.
///
/// # Errors
/// * `BayesError::UnknownVariable` if a parent of `var` is not in `network`
pub fn variable_to_factor<'a>(network: &'a BayesNet, var: &'a Variable, evidence: &Evidence) -> Result<Factor<'a>> {
    let mut variables = network.parents(var)?;
    variables.push(var);

    let mut table = IndexMap::new();
    for (row, dist) in var.cpt().iter() {
        // outcomes a row leaves out are impossible under it
        for value in var.domain() {
            let mut new_row = row.clone();
            new_row.push(value.clone());

            if matches_evidence(&new_row, evidence, &variables) {
                table.insert(new_row, dist.get(value).unwrap_or(0.0));
            }
        }
    }

    trace!(var = %var, rows = table.len(), "converted variable to factor");

    Ok(Factor { variables, table })
}
