//! Cohomology requests and their text artifact.
//!
//! The engine reads a positional, whitespace-delimited description of the
//! box, the rays, the divisor and the cones:
//!
//! ```text
//! <dim>
//! <min_1> <max_1>
//! ...
//! <num_rays>
//! <ray coordinates>
//! ...
//! <divisor coefficients>
//! <num_cones>
//! <cone size>
//! <cone ray indices>
//! ...
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use toric_box::{compute_box_with, BoxError, Interval, LatticeBox, SolveMethod};
use toric_lattice::Ray;
use tracing::debug;

use crate::error::{CechError, Result};
use crate::fan::Fan;

/// Counts read from an artifact are not trusted for preallocation beyond this.
const PREALLOC_LIMIT: usize = 1024;

/// Everything the cohomology engine needs apart from the degree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohomologyRequest {
    bounds: LatticeBox,
    rays: Vec<Ray>,
    divisor: Vec<i64>,
    cones: Vec<BTreeSet<usize>>,
}

impl CohomologyRequest {
    /// Validate the inputs and compute the box exactly.
    pub fn new(fan: &Fan, divisor: &[i64]) -> Result<Self> {
        Self::with_method(fan, divisor, SolveMethod::Exact)
    }

    /// Validate the inputs and compute the box with the given method.
    ///
    /// Fails with [`CechError::ShapeMismatch`] if the divisor length does
    /// not match the rays, a cone references a missing ray, or there are
    /// not more cones than the lattice dimension.
    pub fn with_method(fan: &Fan, divisor: &[i64], method: SolveMethod) -> Result<Self> {
        let cones = fan.cone_sets();
        validate(&fan.rays, divisor, &cones)?;

        let bounds = compute_box_with(&fan.rays, divisor, method).map_err(|e| match e {
            BoxError::Lattice(err) => CechError::Lattice(err),
            other => CechError::ShapeMismatch(other.to_string()),
        })?;
        debug!(
            dim = bounds.dim(),
            points = %bounds.lattice_points(),
            cones = cones.len(),
            "cohomology request built"
        );

        Ok(Self {
            bounds,
            rays: fan.rays.clone(),
            divisor: divisor.to_vec(),
            cones,
        })
    }

    /// The box of candidate lattice points.
    pub fn bounds(&self) -> &LatticeBox {
        &self.bounds
    }

    /// The rays.
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// The divisor coefficients.
    pub fn divisor(&self) -> &[i64] {
        &self.divisor
    }

    /// The cones, deduplicated.
    pub fn cones(&self) -> &[BTreeSet<usize>] {
        &self.cones
    }

    /// Lattice dimension.
    pub fn dim(&self) -> usize {
        self.bounds.dim()
    }

    /// Render the request artifact.
    pub fn to_artifact(&self) -> String {
        self.to_string()
    }

    /// Read a request artifact back.
    pub fn parse(text: &str) -> Result<Self> {
        let mut r = TokenReader::new(text);

        let dim: usize = r.next("box dimension")?;
        let mut intervals = Vec::with_capacity(dim.min(PREALLOC_LIMIT));
        for axis in 0..dim {
            let min: i64 = r.next("interval minimum")?;
            let max: i64 = r.next("interval maximum")?;
            if min > max {
                return Err(CechError::parse(
                    r.line,
                    format!("interval {axis} is inverted: {min} > {max}"),
                ));
            }
            intervals.push(Interval::new(min, max));
        }

        let num_rays: usize = r.next("ray count")?;
        let mut rays: Vec<Ray> = Vec::with_capacity(num_rays.min(PREALLOC_LIMIT));
        for _ in 0..num_rays {
            rays.push(r.next_many(dim, "ray coordinate")?);
        }
        let divisor: Vec<i64> = r.next_many(num_rays, "divisor coefficient")?;

        let num_cones: usize = r.next("cone count")?;
        let mut cones = Vec::with_capacity(num_cones.min(PREALLOC_LIMIT));
        for _ in 0..num_cones {
            let size: usize = r.next("cone size")?;
            let indices: Vec<usize> = r.next_many(size, "ray index")?;
            cones.push(indices.into_iter().collect::<BTreeSet<_>>());
        }
        r.finish()?;

        validate(&rays, &divisor, &cones)?;
        Ok(Self {
            bounds: LatticeBox::from_intervals(intervals),
            rays,
            divisor,
            cones,
        })
    }
}

impl fmt::Display for CohomologyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.bounds.dim())?;
        for interval in self.bounds.intervals() {
            writeln!(f, "{} {}", interval.min, interval.max)?;
        }

        writeln!(f, "{}", self.rays.len())?;
        for ray in &self.rays {
            for x in ray {
                write!(f, "{x} ")?;
            }
            writeln!(f)?;
        }

        for a in &self.divisor {
            write!(f, "{a} ")?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.cones.len())?;
        for cone in &self.cones {
            writeln!(f, "{}", cone.len())?;
            for ray in cone {
                write!(f, "{ray} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn validate(rays: &[Ray], divisor: &[i64], cones: &[BTreeSet<usize>]) -> Result<()> {
    if divisor.len() != rays.len() {
        return Err(CechError::ShapeMismatch(format!(
            "divisor has {} coefficients but the fan has {} rays",
            divisor.len(),
            rays.len()
        )));
    }
    for (c, cone) in cones.iter().enumerate() {
        if let Some(bad) = cone.iter().find(|&&i| i >= rays.len()) {
            return Err(CechError::ShapeMismatch(format!(
                "cone {c} references ray {bad}, but the fan has {} rays",
                rays.len()
            )));
        }
    }
    let dim = rays.first().map_or(0, Vec::len);
    if cones.len() <= dim {
        return Err(CechError::ShapeMismatch(format!(
            "{} cones is too few for a {dim}-dimensional fan",
            cones.len()
        )));
    }
    Ok(())
}

/// Whitespace tokens with their line numbers.
struct TokenReader<'a> {
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
    line: usize,
}

impl<'a> TokenReader<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .enumerate()
            .flat_map(|(n, l)| l.split_whitespace().map(move |t| (n + 1, t)))
            .collect();
        Self {
            tokens,
            pos: 0,
            line: 1,
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let Some(&(line, token)) = self.tokens.get(self.pos) else {
            return Err(CechError::parse(
                self.line,
                format!("unexpected end of input, expected {what}"),
            ));
        };
        self.pos += 1;
        self.line = line;
        token
            .parse()
            .map_err(|_| CechError::parse(line, format!("expected {what}, got `{token}`")))
    }

    fn next_many<T: FromStr>(&mut self, n: usize, what: &str) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(n.min(PREALLOC_LIMIT));
        for _ in 0..n {
            out.push(self.next(what)?);
        }
        Ok(out)
    }

    fn finish(&self) -> Result<()> {
        match self.tokens.get(self.pos) {
            Some(&(line, token)) => Err(CechError::parse(
                line,
                format!("unexpected trailing token `{token}`"),
            )),
            None => Ok(()),
        }
    }
}
