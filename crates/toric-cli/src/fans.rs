//! Example fans and divisors shipped with the CLI.

use toric_cech::{Divisor, Fan};

/// A named fan with some divisors of interest.
pub struct ExampleFan {
    pub name: &'static str,
    pub description: &'static str,
    pub fan: Fan,
    pub divisors: Vec<(&'static str, Divisor)>,
}

impl ExampleFan {
    /// Look up a named divisor; `canonical` is always available.
    pub fn divisor(&self, name: &str) -> Option<Divisor> {
        if name == "canonical" {
            return Some(Divisor::canonical(self.fan.num_rays()));
        }
        self.divisors
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, d)| d.clone())
    }
}

pub fn builtin() -> Vec<ExampleFan> {
    vec![p2(), dp1(), weierstrass_p3(), fibration_6d()]
}

pub fn find(name: &str) -> Option<ExampleFan> {
    builtin().into_iter().find(|f| f.name == name)
}

fn p2() -> ExampleFan {
    ExampleFan {
        name: "p2",
        description: "projective plane",
        fan: Fan::new(
            vec![vec![1, 0], vec![0, 1], vec![-1, -1]],
            vec![vec![0, 1], vec![1, 2], vec![2, 0]],
        ),
        divisors: vec![("d", Divisor::new(vec![7, 1, -1]))],
    }
}

fn dp1() -> ExampleFan {
    ExampleFan {
        name: "dp1",
        description: "del Pezzo dP1, P^2 blown up at a point",
        fan: Fan::new(
            vec![vec![1, 0], vec![0, 1], vec![-1, -1], vec![0, -1]],
            vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 0]],
        ),
        // 5 D_1 - 2 D_4
        divisors: vec![("d", Divisor::new(vec![5, 0, 0, -2]))],
    }
}

fn weierstrass_p3() -> ExampleFan {
    ExampleFan {
        name: "weierstrass-p3",
        description: "five-dimensional elliptic fibration (arXiv:1002.1894, eq. 48)",
        fan: Fan::new(
            vec![
                vec![0, 0, 0, 1, 0],
                vec![0, 0, 0, 0, 1],
                vec![0, 0, 0, -2, -3],
                vec![-1, -1, -1, -8, -12],
                vec![1, 0, 0, 0, 0],
                vec![0, 1, 0, 0, 0],
                vec![0, 0, 1, 0, 0],
            ],
            vec![
                vec![0, 1, 3, 4, 5],
                vec![0, 1, 3, 4, 6],
                vec![0, 1, 3, 5, 6],
                vec![0, 1, 4, 5, 6],
                vec![0, 2, 3, 4, 5],
                vec![0, 2, 3, 4, 6],
                vec![0, 2, 3, 5, 6],
                vec![0, 2, 4, 5, 6],
                vec![1, 2, 3, 4, 5],
                vec![1, 2, 3, 4, 6],
                vec![1, 2, 3, 5, 6],
                vec![1, 2, 4, 5, 6],
            ],
        ),
        divisors: vec![("d", Divisor::new(vec![-1, -1, -1, -1, -1, -1, -5]))],
    }
}

fn fibration_6d() -> ExampleFan {
    // Base cones are 1-indexed; every one is extended by two of rays 9, 10, 11.
    const BASE: [[usize; 4]; 15] = [
        [1, 2, 3, 4],
        [1, 2, 3, 8],
        [1, 2, 4, 7],
        [1, 2, 5, 7],
        [1, 2, 5, 8],
        [1, 3, 4, 6],
        [1, 3, 6, 8],
        [1, 4, 6, 7],
        [1, 5, 6, 7],
        [1, 5, 6, 8],
        [2, 3, 4, 6],
        [2, 3, 6, 8],
        [2, 4, 6, 7],
        [2, 5, 6, 7],
        [2, 5, 6, 8],
    ];
    const EXTENSIONS: [[usize; 2]; 3] = [[9, 10], [9, 11], [10, 11]];

    let cones: Vec<Vec<usize>> = BASE
        .iter()
        .flat_map(|base| {
            EXTENSIONS
                .iter()
                .map(move |ext| base.iter().chain(ext).map(|n| n - 1).collect::<Vec<_>>())
        })
        .collect();

    let nstar_base = Divisor::new(vec![-1, -1, -1, -1, 0, -1, 0, -1, 0, 0, 0]);
    let nstar_base_short = Divisor::new(vec![-2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let nstar_div = Divisor::new(vec![0, 0, 0, 0, -1, 0, 0, 0, 0, 0, 0]);
    let nstar_fiber = Divisor::new(vec![0, 0, 0, 0, 0, 0, 0, 0, 0, -2, 0]);
    // K - N*_base,short - N*_fiber - N*_div, for H^4 of wedge^2 N* by Serre duality.
    let serre_dual = Divisor::canonical(11) - &nstar_base_short - &nstar_fiber - &nstar_div;

    ExampleFan {
        name: "fibration-6d",
        description: "six-dimensional fibration with 11 rays and 45 cones",
        fan: Fan::new(
            vec![
                vec![1, 0, 0, 0, 0, 0],
                vec![0, 1, 0, 0, 0, 0],
                vec![0, 0, 1, 0, 0, 0],
                vec![0, 0, 0, 1, 0, 0],
                vec![0, 0, 0, 0, 1, 0],
                vec![-3, -2, 0, 0, 0, 0],
                vec![6, 4, 1, 1, 1, 0],
                vec![-6, -4, 0, -1, 0, 0],
                vec![0, 0, 2, 1, 1, 3],
                vec![-3, -2, -2, -1, -1, -2],
                vec![9, 6, 2, 1, 1, 0],
            ],
            cones,
        ),
        divisors: vec![
            ("base-fiber", &nstar_base + &nstar_fiber),
            ("div-fiber", &nstar_div + &nstar_fiber),
            ("base-div", &nstar_base + &nstar_div),
            ("serre-dual", serre_dual),
            ("nstar-base", nstar_base),
            ("nstar-base-short", nstar_base_short),
            ("nstar-div", nstar_div),
            ("nstar-fiber", nstar_fiber),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toric_cech::CohomologyRequest;

    #[test]
    fn test_builtin_divisors_fit_their_fans() {
        for example in builtin() {
            for (name, d) in &example.divisors {
                CohomologyRequest::new(&example.fan, d).unwrap_or_else(|e| {
                    panic!("{}/{} is not a valid request: {e}", example.name, name)
                });
            }
        }
    }

    #[test]
    fn test_fibration_has_45_six_ray_cones() {
        let f = find("fibration-6d").unwrap();
        assert_eq!(f.fan.cones.len(), 45);
        assert!(f.fan.cones.iter().all(|c| c.len() == 6));
        assert_eq!(f.fan.cones[0], vec![0, 1, 2, 3, 8, 9]);
        assert_eq!(f.fan.dim(), 6);
    }

    #[test]
    fn test_divisor_lookup() {
        let f = find("fibration-6d").unwrap();
        assert_eq!(
            f.divisor("base-fiber").unwrap().coefficients(),
            &[-1, -1, -1, -1, 0, -1, 0, -1, 0, -2, 0]
        );
        assert_eq!(
            f.divisor("serre-dual").unwrap().coefficients(),
            &[1, -1, -1, -1, 0, -1, -1, -1, -1, 1, -1]
        );
        assert_eq!(f.divisor("canonical").unwrap().len(), 11);
        assert!(f.divisor("missing").is_none());
        assert!(find("p3").is_none());
    }
}
