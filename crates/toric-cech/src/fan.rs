//! Fans: rays plus maximal cones.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use toric_lattice::Ray;

use crate::error::{CechError, Result};

/// A fan given by its rays and maximal cones.
///
/// Cones list ray indices. Nothing here checks that the cones actually
/// form a complete or simplicial fan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fan {
    /// Ray generators, index-addressed.
    pub rays: Vec<Ray>,
    /// Maximal cones as lists of ray indices.
    pub cones: Vec<Vec<usize>>,
}

impl Fan {
    /// Create a fan from rays and cones.
    pub fn new(rays: Vec<Ray>, cones: Vec<Vec<usize>>) -> Self {
        Self { rays, cones }
    }

    /// Dimension of the lattice, taken from the first ray.
    pub fn dim(&self) -> usize {
        self.rays.first().map_or(0, Vec::len)
    }

    /// Number of rays.
    pub fn num_rays(&self) -> usize {
        self.rays.len()
    }

    /// Cones with duplicate indices removed, in ascending index order.
    pub fn cone_sets(&self) -> Vec<BTreeSet<usize>> {
        self.cones
            .iter()
            .map(|c| c.iter().copied().collect())
            .collect()
    }

    /// Parse a fan from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| CechError::format("fan", e))
    }

    /// Parse a fan from TOML.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CechError::format("fan", e))
    }

    /// Read a fan file; `.toml` files are TOML, everything else JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml(&text),
            _ => Self::from_json(&text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dp1() -> Fan {
        Fan::new(
            vec![vec![1, 0], vec![0, 1], vec![-1, -1], vec![0, -1]],
            vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 0]],
        )
    }

    #[test]
    fn test_dim_and_counts() {
        let fan = dp1();
        assert_eq!(fan.dim(), 2);
        assert_eq!(fan.num_rays(), 4);
        assert_eq!(Fan::new(vec![], vec![]).dim(), 0);
    }

    #[test]
    fn test_cone_sets_dedup_and_sort() {
        let fan = Fan::new(vec![vec![1]], vec![vec![3, 0, 3], vec![1]]);
        let sets = fan.cone_sets();
        assert_eq!(sets[0].iter().copied().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(sets[1].len(), 1);
    }

    #[test]
    fn test_from_json() {
        let fan = Fan::from_json(
            r#"{"rays": [[1,0],[0,1],[-1,-1],[0,-1]], "cones": [[0,1],[1,2],[2,3],[3,0]]}"#,
        )
        .unwrap();
        assert_eq!(fan, dp1());
    }

    #[test]
    fn test_from_toml() {
        let fan = Fan::from_toml(
            "rays = [[1, 0], [0, 1], [-1, -1], [0, -1]]\ncones = [[0, 1], [1, 2], [2, 3], [3, 0]]\n",
        )
        .unwrap();
        assert_eq!(fan, dp1());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = Fan::from_json(r#"{"rays": 3}"#).unwrap_err();
        assert!(matches!(err, CechError::Format { kind: "fan", .. }));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("dp1.json");
        std::fs::write(&json, serde_json::to_string(&dp1()).unwrap()).unwrap();
        assert_eq!(Fan::load(&json).unwrap(), dp1());

        let toml_path = dir.path().join("dp1.TOML");
        std::fs::write(&toml_path, toml::to_string(&dp1()).unwrap()).unwrap();
        assert_eq!(Fan::load(&toml_path).unwrap(), dp1());
    }
}
