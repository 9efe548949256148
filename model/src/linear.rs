use ndarray::prelude::*;
use rand::Rng;
use rand_distr::Distribution;

use crate::{
    error::{ModelErr, Result},
    param_gen::RandParamGen,
};

/// An affine map `y = W·x + b`.
///
/// `weights` has shape `out_features x in_features` and `bias` has `out_features` entries.
/// Both dimensions are non-zero and the model can't be modified once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    weights: Array2<f32>,
    bias: Array1<f32>,
}

impl LinearModel {
    /// Creates a new linear model.
    ///
    /// # Arguments
    /// * `weights` - The weight matrix, one row per output.
    /// * `bias` - The bias vector, one entry per output.
    ///
    /// # Returns
    /// An error if a dimension is empty or the bias doesn't match the weight rows.
    pub fn new(weights: Array2<f32>, bias: Array1<f32>) -> Result<Self> {
        let (out_features, in_features) = weights.dim();

        if out_features == 0 || in_features == 0 {
            return Err(ModelErr::EmptyModel {
                out_features,
                in_features,
            });
        }

        if bias.len() != out_features {
            return Err(ModelErr::BiasMismatch {
                got: bias.len(),
                expected: out_features,
            });
        }

        Ok(Self { weights, bias })
    }

    /// Creates a new linear model from flat row-major weights.
    ///
    /// # Arguments
    /// * `dim` - The `(out_features, in_features)` pair.
    /// * `weights` - The row-major weights, `out_features * in_features` of them.
    /// * `bias` - The bias vector.
    pub fn from_vecs(dim: (usize, usize), weights: Vec<f32>, bias: Vec<f32>) -> Result<Self> {
        let weights = Array2::from_shape_vec(dim, weights)?;
        Self::new(weights, Array1::from(bias))
    }

    /// Creates a linear model with every parameter sampled uniformly from `[0, 1)`.
    ///
    /// # Arguments
    /// * `dim` - The `(out_features, in_features)` pair.
    /// * `rng` - A random number generator.
    pub fn random<R: Rng + ?Sized>(dim: (usize, usize), rng: &mut R) -> Result<Self> {
        Self::sampled(dim, &RandParamGen::standard(), rng)
    }

    /// Creates a linear model with every parameter drawn from `param_gen`.
    ///
    /// Weights are sampled first in row-major order, then the bias.
    pub fn sampled<D, R>(dim: (usize, usize), param_gen: &RandParamGen<D>, rng: &mut R) -> Result<Self>
    where
        D: Distribution<f32>,
        R: Rng + ?Sized,
    {
        let weights = param_gen.sample(rng, dim.0 * dim.1);
        let bias = param_gen.sample(rng, dim.0);
        Self::from_vecs(dim, weights, bias)
    }

    pub fn weights(&self) -> ArrayView2<'_, f32> {
        self.weights.view()
    }

    pub fn bias(&self) -> ArrayView1<'_, f32> {
        self.bias.view()
    }

    /// The length every input vector must have.
    pub fn in_features(&self) -> usize {
        self.weights.ncols()
    }

    /// The length of every output vector.
    pub fn out_features(&self) -> usize {
        self.weights.nrows()
    }

    /// Computes `weights · x + bias` for a single feature vector.
    ///
    /// # Arguments
    /// * `x` - A feature vector of length `in_features`.
    ///
    /// # Returns
    /// The `out_features` long prediction, or `ShapeMismatch` if `x` has the wrong length.
    pub fn predict_one(&self, x: ArrayView1<f32>) -> Result<Array1<f32>> {
        if x.len() != self.in_features() {
            return Err(ModelErr::ShapeMismatch {
                got: x.len(),
                expected: self.in_features(),
            });
        }

        Ok(self.weights.dot(&x) + &self.bias)
    }

    pub fn into_parts(self) -> (Array2<f32>, Array1<f32>) {
        (self.weights, self.bias)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn assert_all_close(a: ArrayView1<f32>, b: ArrayView1<f32>) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5, "{a:?} != {b:?}");
        }
    }

    fn model() -> LinearModel {
        LinearModel::new(
            array![[1.0, 2.0, 3.0], [-1.0, 0.0, 0.5]],
            array![0.5, -0.5],
        )
        .unwrap()
    }

    #[test]
    fn predict_one_is_affine() {
        let y = model().predict_one(array![1.0, 1.0, 2.0].view()).unwrap();
        assert_all_close(y.view(), array![9.5, -0.5].view());
    }

    #[test]
    fn predict_one_of_zero_is_bias() {
        let y = model().predict_one(Array1::zeros(3).view()).unwrap();
        assert_all_close(y.view(), array![0.5, -0.5].view());
    }

    #[test]
    fn predict_one_rejects_wrong_length() {
        let err = model().predict_one(array![1.0, 2.0].view()).unwrap_err();
        assert!(matches!(
            err,
            ModelErr::ShapeMismatch {
                got: 2,
                expected: 3
            }
        ));
    }

    #[test]
    fn new_rejects_bias_mismatch() {
        let err = LinearModel::new(Array2::zeros((3, 6)), Array1::zeros(2)).unwrap_err();
        assert!(matches!(
            err,
            ModelErr::BiasMismatch {
                got: 2,
                expected: 3
            }
        ));
    }

    #[test]
    fn new_rejects_empty_dimensions() {
        let err = LinearModel::new(Array2::zeros((3, 0)), Array1::zeros(3)).unwrap_err();
        assert!(matches!(err, ModelErr::EmptyModel { .. }));

        let err = LinearModel::new(Array2::zeros((0, 4)), Array1::zeros(0)).unwrap_err();
        assert!(matches!(err, ModelErr::EmptyModel { .. }));
    }

    #[test]
    fn from_vecs_rejects_wrong_weight_count() {
        let err = LinearModel::from_vecs((2, 3), vec![0.0; 5], vec![0.0; 2]).unwrap_err();
        assert!(matches!(err, ModelErr::Shape(_)));
    }

    #[test]
    fn from_vecs_is_row_major() {
        let model = LinearModel::from_vecs((2, 2), vec![1.0, 2.0, 3.0, 4.0], vec![0.0; 2]).unwrap();
        assert_eq!(model.weights(), array![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn random_has_requested_dims() {
        let mut rng = StdRng::seed_from_u64(1);
        let model = LinearModel::random((3, 6), &mut rng).unwrap();

        assert_eq!(model.out_features(), 3);
        assert_eq!(model.in_features(), 6);
        assert_eq!(model.bias().len(), 3);
        assert!(model.weights().iter().all(|w| (0.0..1.0).contains(w)));
    }

    #[test]
    fn nan_inputs_propagate() {
        let y = model()
            .predict_one(array![f32::NAN, 0.0, 0.0].view())
            .unwrap();
        assert!(y.iter().all(|v| v.is_nan()));
    }
}
