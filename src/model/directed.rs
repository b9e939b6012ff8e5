//! Defines a `BayesNet`, a directed model representing the factorization of a probability
//! distribution P into one conditional distribution per variable.

use crate::cpt::{CPTable, CptSpec};
use crate::util::{BayesError, Result};
use crate::variable::{filter_event_values, render_row, Evidence, Outcome, VarId, Variable};

use bidir_map::BidirMap;
use tracing::debug;


/// Represents a Bayesian Network - a Directed Probabilistic Graphical Model.
///
/// # Representation
/// A traditional graph data structure is not used; instead, the parents of each `Variable`
/// implicitly define the edges of the graph. The `Variable`s are held in an append-only list in
/// the order they were added. Since parents must be added before their children, that order is
/// always a topological order.
pub struct BayesNet {

    /// The `Variable`s of the network, in topological order. A `VarId` is an index into this list.
    variables: Vec<Variable>,

    /// The user-defined names of each `Variable`. This is a two way lookup ```(VarId->Name)```
    /// and ```(Name->VarId)```
    names: BidirMap<VarId, String>

}

impl BayesNet {

    /// Start building a `BayesNet`
    pub fn builder() -> BayesNetBuilder {
        BayesNetBuilder::new()
    }

    /// Get a `Variable` by name.
    ///
    /// # Errors
    /// * `BayesError::UnknownVariable` if there is no `Variable` with this name
    pub fn variable(&self, name: &str) -> Result<&Variable> {
        self.lookup_variable(name).ok_or_else(|| BayesError::UnknownVariable(String::from(name)))
    }

    /// Lookup a `Variable` in the `BayesNet` based on the name
    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.names.get_by_second(&String::from(name)).and_then(|&id| self.get(id))
    }

    /// Lookup a `Variable`'s name in the `BayesNet`.
    pub fn lookup_name(&self, id: VarId) -> Option<&String> {
        self.names.get_by_first(&id)
    }

    pub fn get(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    /// Get all `Variable`s in the model, in topological order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Get the number of `Variable`s in the `BayesNet`
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// The parents of `var`, in the order its CPT rows are keyed by.
    ///
    /// # Errors
    /// * `BayesError::UnknownVariable` if a parent is not part of this network
    pub fn parents(&self, var: &Variable) -> Result<Vec<&Variable>> {
        var.parents()
           .iter()
           .map(|&id| self.get(id).ok_or_else(|| BayesError::UnknownVariable(format!("parent #{} of {}", id.index(), var))))
           .collect()
    }

    /// Build `Evidence` from `(name, value)` observations.
    ///
    /// The `Evidence` refers to this network's `Variable`s by id and is only meaningful for
    /// queries against this `BayesNet`.
    ///
    /// # Errors
    /// * `BayesError::UnknownVariable` if a name is not in the network
    pub fn evidence<'s, I, O>(&self, observations: I) -> Result<Evidence>
        where I: IntoIterator<Item = (&'s str, O)>,
              O: Into<Outcome>
    {
        observations.into_iter()
                    .map(|(name, value)| self.variable(name).map(|v| (v.id(), value.into())))
                    .collect()
    }

    /// Determine the probability of a full assignment to the `Variable`s in the `BayesNet`, by
    /// the chain rule.
    ///
    /// An outcome that is in a `Variable`'s domain but absent from the distribution of its row
    /// has probability 0.
    ///
    /// # Errors
    /// * `BayesError::IncompleteEvidenceLookup` if `event` does not assign every `Variable`
    /// * `BayesError::MissingRow` if the CPT of a `Variable` has no row for its parents' values
    pub fn probability(&self, event: &Evidence) -> Result<f64> {
        let mut p = 1.0;

        for var in self.variables.iter() {
            let mut scope = self.parents(var)?;
            scope.push(var);

            let mut row = filter_event_values(&scope, event)?;
            let value = row.pop();
            let dist = var.cpt().get(&row).ok_or_else(|| BayesError::MissingRow(render_row(&row)))?;

            p *= value.and_then(|v| dist.get(&v)).unwrap_or(0.0);
        }

        Ok(p)
    }
}


/// An implementation of the [builder pattern] for creating a `BayesNet`.
///
/// Networks must be assembled in topological order: every parent is added before its children.
/// The first error encountered is held, and reported by `build`.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
pub struct BayesNetBuilder {

    /// The `Variable`s added so far
    variables: Vec<Variable>,

    /// The names of each `Variable`
    names: BidirMap<VarId, String>,

    /// The error state of the builder
    err: Option<BayesError>

}


impl BayesNetBuilder {

    /// Construct a new `BayesNetBuilder` representing an empty `BayesNet`
    pub fn new() -> Self {
        BayesNetBuilder {
            variables: Vec::new(),
            names: BidirMap::new(),
            err: None
        }
    }


    /// Add a `Variable` to the `BayesNet`.
    ///
    /// # Args
    /// * `name`: the name for the variable. Names are unique within a network.
    /// * `parents`: the names of the parent variables. The parents must already be in the model.
    /// * `cpt`: the conditional probability table, in any of the `CptSpec` shorthands.
    pub fn add<S: Into<CptSpec>>(self, name: &str, parents: &[&str], cpt: S) -> Self {
        self.add_variable(name, parents, cpt.into())
    }


    /// Complete building the model.
    ///
    /// # Returns
    /// the `BayesNet`, or the first error generated during the building process
    pub fn build(self) -> Result<BayesNet> {
        if let Some(e) = self.err {
            Err(e)
        } else {
            Ok(BayesNet { variables: self.variables, names: self.names })
        }
    }

    /// Internal function that actually does the variable addition to the model
    fn add_variable(mut self, name: &str, parents: &[&str], cpt: CptSpec) -> Self {
        ///////////////////////////////////////////////////////////////////////
        // 1) if we are in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) Check for error conditions
        let name = String::from(name);
        if self.names.get_by_second(&name).is_some() {
            self.err = Some(BayesError::DuplicateVariable(name));
            return self;
        }

        let mut parent_ids = Vec::with_capacity(parents.len());
        for &p in parents {
            match self.names.get_by_second(&String::from(p)) {
                Some(&id) => parent_ids.push(id),
                None => {
                    self.err = Some(BayesError::UnknownVariable(String::from(p)));
                    return self;
                }
            }
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) Build the CPT
        let cpt = match CPTable::new(cpt, parent_ids.len()) {
            Ok(cpt) => cpt,
            Err(e) => {
                self.err = Some(e);
                return self;
            }
        };

        ///////////////////////////////////////////////////////////////////////
        // 4) Add to current model
        let id = VarId(self.variables.len());
        let var = Variable::new(id, &name, parent_ids, cpt);
        debug!(var = %var, parents = parents.len(), domain = var.cardinality(), "added variable");

        self.variables.push(var);
        self.names.insert(id, name);

        self
    }
}

impl Default for BayesNetBuilder {
    fn default() -> Self {
        BayesNetBuilder::new()
    }
}
