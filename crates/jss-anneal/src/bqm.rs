use std::collections::BTreeMap;

use indexmap::IndexSet;
use jss_core::errors::{ErrorInfo, JssError};

/// Binary quadratic model over labelled 0/1 variables.
///
/// `E(x) = offset + sum_i a_i x_i + sum_{i<j} b_ij x_i x_j`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinaryQuadraticModel {
    labels: IndexSet<String>,
    linear: Vec<f64>,
    quadratic: BTreeMap<(usize, usize), f64>,
    offset: f64,
}

impl BinaryQuadraticModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `label` if absent and returns its index.
    pub fn add_variable(&mut self, label: impl Into<String>) -> usize {
        let (index, inserted) = self.labels.insert_full(label.into());
        if inserted {
            self.linear.push(0.0);
        }
        index
    }

    /// Index of `label`, if present.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }

    /// Adds `bias` to the linear coefficient of variable `u`.
    pub fn add_linear(&mut self, u: usize, bias: f64) -> Result<(), JssError> {
        self.check_index(u)?;
        self.linear[u] += bias;
        Ok(())
    }

    /// Adds `bias` to the coupling between `u` and `v`.
    ///
    /// A self-coupling folds into the linear term since `x * x = x` for binaries.
    pub fn add_quadratic(&mut self, u: usize, v: usize, bias: f64) -> Result<(), JssError> {
        self.check_index(u)?;
        self.check_index(v)?;
        if u == v {
            self.linear[u] += bias;
            return Ok(());
        }
        *self.quadratic.entry((u.min(v), u.max(v))).or_insert(0.0) += bias;
        Ok(())
    }

    /// Adds a constant energy offset.
    pub fn add_offset(&mut self, offset: f64) {
        self.offset += offset;
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.labels.len()
    }

    /// Number of non-zero couplings.
    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Variable labels in index order.
    pub fn labels(&self) -> Vec<String> {
        self.labels.iter().cloned().collect()
    }

    /// Linear coefficient of variable `u`.
    pub fn linear(&self, u: usize) -> Option<f64> {
        self.linear.get(u).copied()
    }

    /// Coupling between `u` and `v` (0 when absent).
    pub fn quadratic(&self, u: usize, v: usize) -> f64 {
        self.quadratic
            .get(&(u.min(v), u.max(v)))
            .copied()
            .unwrap_or(0.0)
    }

    /// Linear coefficients in index order.
    pub fn linear_biases(&self) -> &[f64] {
        &self.linear
    }

    /// Neighbour lists with coupling strengths, one per variable.
    pub fn adjacency(&self) -> Vec<Vec<(usize, f64)>> {
        let mut adjacency = vec![Vec::new(); self.num_variables()];
        for (&(u, v), &bias) in &self.quadratic {
            adjacency[u].push((v, bias));
            adjacency[v].push((u, bias));
        }
        adjacency
    }

    /// Energy of a full 0/1 state given in index order.
    pub fn energy(&self, state: &[u8]) -> Result<f64, JssError> {
        if state.len() != self.num_variables() {
            return Err(JssError::MalformedModel(
                ErrorInfo::new("state-width", "state width does not match the model")
                    .with_context("variables", self.num_variables().to_string())
                    .with_context("state", state.len().to_string()),
            ));
        }
        let mut energy = self.offset;
        for (bias, &x) in self.linear.iter().zip(state) {
            if x == 1 {
                energy += bias;
            }
        }
        for (&(u, v), &bias) in &self.quadratic {
            if state[u] == 1 && state[v] == 1 {
                energy += bias;
            }
        }
        Ok(energy)
    }

    fn check_index(&self, u: usize) -> Result<(), JssError> {
        if u < self.num_variables() {
            Ok(())
        } else {
            Err(JssError::MalformedModel(
                ErrorInfo::new("variable-index", "variable index out of range")
                    .with_context("index", u.to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_coupling_folds_into_linear() {
        let mut bqm = BinaryQuadraticModel::new();
        let a = bqm.add_variable("a");
        bqm.add_quadratic(a, a, 1.5).unwrap();
        assert_eq!(bqm.linear(a), Some(1.5));
        assert_eq!(bqm.num_interactions(), 0);
    }

    #[test]
    fn energy_sums_active_terms() {
        let mut bqm = BinaryQuadraticModel::new();
        let a = bqm.add_variable("a");
        let b = bqm.add_variable("b");
        bqm.add_linear(a, -1.0).unwrap();
        bqm.add_linear(b, -1.0).unwrap();
        bqm.add_quadratic(b, a, 2.0).unwrap();
        bqm.add_offset(1.0);
        assert_eq!(bqm.energy(&[0, 0]).unwrap(), 1.0);
        assert_eq!(bqm.energy(&[1, 0]).unwrap(), 0.0);
        assert_eq!(bqm.energy(&[1, 1]).unwrap(), 1.0);
        assert!(bqm.energy(&[1]).is_err());
    }

    #[test]
    fn re_adding_a_label_keeps_its_index() {
        let mut bqm = BinaryQuadraticModel::new();
        let a = bqm.add_variable("a");
        bqm.add_variable("b");
        assert_eq!(bqm.add_variable("a"), a);
        assert_eq!(bqm.num_variables(), 2);
    }
}
