//! Property tests for the factor algebra and event enumeration

use bayes_ve::{
    all_consistent_events, matches_evidence, normalize_weights, BayesNet, BayesNetBuilder,
    Evidence, Factor, FactorKey, Outcome, Variable, WeightSpec,
};
use proptest::prelude::*;

/// Three independent roots A, B and C with `sizes` integer levels each
fn network(sizes: &[i64]) -> BayesNet {
    let levels = |n: i64| WeightSpec::Mapping((0..n).map(|l| (Outcome::Level(l), 1.0)).collect());

    BayesNetBuilder::new()
        .add("A", &[], levels(sizes[0]))
        .add("B", &[], levels(sizes[1]))
        .add("C", &[], levels(sizes[2]))
        .build()
        .unwrap()
}

/// A factor with a value for every event over `variables`, taken from `values` in order
fn dense<'a>(variables: Vec<&'a Variable>, values: &[f64]) -> Factor<'a> {
    let table = all_consistent_events(&variables, &Evidence::new())
        .into_iter()
        .zip(values.iter().cycle().cloned())
        .collect();
    Factor::new(variables, table).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn normalized_weights_sum_to_one(weights in prop::collection::vec(0.01f64..100.0, 1..8)) {
        let normalized = normalize_weights(&weights).unwrap();
        prop_assert_eq!(weights.len(), normalized.len());
        prop_assert!(close(1.0, normalized.iter().sum()));
        prop_assert!(normalized.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn event_count_is_product_of_domains(sizes in prop::collection::vec(1i64..=3, 3)) {
        let net = network(&sizes);
        let vars: Vec<&Variable> = net.variables().iter().collect();

        let events = all_consistent_events(&vars, &Evidence::new());
        prop_assert_eq!(sizes.iter().product::<i64>() as usize, events.len());
        prop_assert!(events.iter().all(|row| matches_evidence(row, &Evidence::new(), &vars)));

        let mut e = Evidence::new();
        e.set(vars[1], 0i64);
        let observed = all_consistent_events(&vars, &e);
        prop_assert_eq!(events.len() / sizes[1] as usize, observed.len());
        prop_assert!(observed.iter().all(|row| matches_evidence(row, &e, &vars)));
    }

    #[test]
    fn product_commutes(
        sizes in prop::collection::vec(1i64..=3, 3),
        values in prop::collection::vec(0.0f64..10.0, 18)
    ) {
        let net = network(&sizes);
        let (a, b, c) = (&net.variables()[0], &net.variables()[1], &net.variables()[2]);
        let none = Evidence::new();

        let f = dense(vec![a, b], &values[..9]);
        let g = dense(vec![b, c], &values[9..]);

        let fg = f.pointwise_product(&g, &none).unwrap();
        let gf = g.pointwise_product(&f, &none).unwrap();
        prop_assert_eq!(fg.len(), gf.len());

        // same values, although the scopes are ordered differently
        let all = vec![a, b, c];
        for row in all_consistent_events(&all, &none) {
            let event = Evidence::from_event(&all, &row);
            prop_assert_eq!(fg.get(FactorKey::Event(&event)).unwrap(), gf.get(FactorKey::Event(&event)).unwrap());
        }
    }

    #[test]
    fn product_associates(
        sizes in prop::collection::vec(1i64..=3, 3),
        values in prop::collection::vec(0.0f64..10.0, 9)
    ) {
        let net = network(&sizes);
        let (a, b, c) = (&net.variables()[0], &net.variables()[1], &net.variables()[2]);
        let none = Evidence::new();

        let f = dense(vec![a, b], &values);
        let g = dense(vec![b, c], &values);
        let h = dense(vec![c, a], &values);

        let left = f.pointwise_product(&g, &none).unwrap().pointwise_product(&h, &none).unwrap();
        let right = f.pointwise_product(&g.pointwise_product(&h, &none).unwrap(), &none).unwrap();

        prop_assert_eq!(left.scope(), right.scope());
        for (row, &p) in left.iter() {
            prop_assert!(close(p, right.get(FactorKey::Row(row)).unwrap()));
        }
    }

    #[test]
    fn sum_out_preserves_mass(
        sizes in prop::collection::vec(1i64..=3, 3),
        values in prop::collection::vec(0.0f64..10.0, 27),
        which in 0usize..3
    ) {
        let net = network(&sizes);
        let vars: Vec<&Variable> = net.variables().iter().collect();

        let phi = dense(vars.clone(), &values);
        let tau = phi.sum_out(vars[which], &Evidence::new()).unwrap();

        prop_assert!(!tau.contains(vars[which]));
        prop_assert_eq!(phi.len() / sizes[which] as usize, tau.len());
        prop_assert!(close(phi.total(), tau.total()));
    }

    #[test]
    fn self_product_squares(
        sizes in prop::collection::vec(1i64..=3, 3),
        values in prop::collection::vec(0.0f64..10.0, 9)
    ) {
        let net = network(&sizes);
        let (a, c) = (&net.variables()[0], &net.variables()[2]);

        let phi = dense(vec![a, c], &values);
        let square = phi.pointwise_product(&phi, &Evidence::new()).unwrap();

        prop_assert_eq!(phi.scope(), square.scope());
        for (row, &p) in phi.iter() {
            prop_assert_eq!(p * p, square.get(FactorKey::Row(row)).unwrap());
        }
    }
}
