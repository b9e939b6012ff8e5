//! Defines a `ConditionalInferenceEngine` that uses exact inference by variable elimination to
//! answer conditional inference queries.
//!
//! Implementation of Koller & Friedman Algorithm 9.1 - Sum-Product-VE, eliminating in reverse
//! topological order.

use crate::dist::ProbDist;
use crate::factor::{variable_to_factor, Factor};
use crate::model::BayesNet;
use crate::util::Result;
use crate::variable::{Evidence, Variable};
use super::{ConditionalInferenceEngine, distribution_over};

use tracing::{debug, trace};


pub struct VariableEliminationEngine<'a> {

    /// the network to answer queries against
    network: &'a BayesNet

}


impl<'a> VariableEliminationEngine<'a> {

    pub fn new(network: &'a BayesNet) -> Self {
        VariableEliminationEngine { network }
    }

}


/// Multiply together all of `factors`, starting from the unit `Factor`
fn product_of<'a>(factors: &[Factor<'a>], evidence: &Evidence) -> Result<Factor<'a>> {
    factors.iter().try_fold(Factor::unit(), |acc, phi| acc.pointwise_product(phi, evidence))
}


impl<'a> ConditionalInferenceEngine for VariableEliminationEngine<'a> {

    fn infer(&self, query: &Variable, evidence: &Evidence) -> Result<ProbDist> {
        let network: &'a BayesNet = self.network;
        let mut phis: Vec<Factor<'a>> = Vec::new();

        for var in network.variables().iter().rev() {
            phis.push(variable_to_factor(network, var, evidence)?);

            if var == query || evidence.contains(var) {
                // we are computing P(query | evidence), so neither is eliminated
                continue;
            }

            // Otherwise, time to get rid of var
            let (phi_1prime, phi_2prime): (Vec<Factor>, Vec<Factor>) = phis.into_iter()
                                                                          .partition(|f| f.contains(var));

            // product step - multiply factors with var
            let psi = product_of(&phi_1prime, evidence)?;

            // sum step - marginalize psi over var
            let tau = psi.sum_out(var, evidence)?;
            trace!(var = %var, factors = phi_2prime.len() + 1, "eliminated");

            phis = phi_2prime;
            phis.push(tau);
        }

        // multiply together remaining phis
        let phi_star = product_of(&phis, evidence)?;
        debug!(query = %query, rows = phi_star.len(), "variable elimination complete");

        // now we have an unnormalized distribution, which still needs normalizing
        distribution_over(&phi_star, query, evidence)
    }

}
