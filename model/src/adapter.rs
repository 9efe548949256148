use log::debug;
use ndarray::prelude::*;

use crate::{
    error::{InputShape, ModelErr, Result},
    linear::LinearModel,
};

/// An inference input, resolved by rank before it reaches the model.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionRequest {
    Single(Array1<f32>),
    Batch(Array2<f32>),
}

impl PredictionRequest {
    /// Builds a batch request out of nested rows.
    ///
    /// # Arguments
    /// * `rows` - The feature vectors, all of them the same length.
    ///
    /// # Returns
    /// `InvalidInputShape` if any row's length differs from the first one's.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let nrows = rows.len();
        let mut flat = Vec::with_capacity(nrows * cols);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(ModelErr::InvalidInputShape(InputShape::RaggedRows {
                    row,
                    got: values.len(),
                    expected: cols,
                }));
            }

            flat.extend(values);
        }

        Ok(Self::Batch(Array2::from_shape_vec((nrows, cols), flat)?))
    }
}

impl From<Array1<f32>> for PredictionRequest {
    fn from(value: Array1<f32>) -> Self {
        Self::Single(value)
    }
}

impl From<Array2<f32>> for PredictionRequest {
    fn from(value: Array2<f32>) -> Self {
        Self::Batch(value)
    }
}

impl TryFrom<ArrayD<f32>> for PredictionRequest {
    type Error = ModelErr;

    fn try_from(value: ArrayD<f32>) -> Result<Self> {
        match value.ndim() {
            1 => Ok(Self::Single(value.into_dimensionality()?)),
            2 => Ok(Self::Batch(value.into_dimensionality()?)),
            rank => Err(ModelErr::InvalidInputShape(InputShape::Rank(rank))),
        }
    }
}

/// An inference output, with the same rank as the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Single(Array1<f32>),
    Batch(Array2<f32>),
}

impl PredictionResult {
    /// Flattens the result into nested rows, a single prediction being one row.
    pub fn into_rows(self) -> Vec<Vec<f32>> {
        match self {
            PredictionResult::Single(y) => vec![y.to_vec()],
            PredictionResult::Batch(y) => y.outer_iter().map(|row| row.to_vec()).collect(),
        }
    }
}

/// Gives a host a single entrypoint for both single and batch inference over a `LinearModel`.
#[derive(Debug, Clone)]
pub struct InferenceAdapter {
    model: LinearModel,
}

impl InferenceAdapter {
    pub fn new(model: LinearModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn into_inner(self) -> LinearModel {
        self.model
    }

    /// Runs inference over a resolved request.
    ///
    /// A batch is predicted row by row, in order, each row going through
    /// `LinearModel::predict_one`. If any row fails no partial output is returned.
    ///
    /// # Arguments
    /// * `request` - A single feature vector or a batch of them.
    ///
    /// # Returns
    /// A prediction with the request's rank.
    pub fn predict(&self, request: PredictionRequest) -> Result<PredictionResult> {
        match request {
            PredictionRequest::Single(x) => {
                debug!("single inference");
                Ok(PredictionResult::Single(self.model.predict_one(x.view())?))
            }
            PredictionRequest::Batch(xs) => {
                debug!("batch inference of {} rows", xs.nrows());
                let mut ys = Array2::zeros((xs.nrows(), self.model.out_features()));

                for (x, mut y) in xs.outer_iter().zip(ys.outer_iter_mut()) {
                    y.assign(&self.model.predict_one(x)?);
                }

                Ok(PredictionResult::Batch(ys))
            }
        }
    }

    /// Resolves a dynamically shaped input by rank and runs inference over it.
    ///
    /// # Returns
    /// `InvalidInputShape` if `input` isn't a vector nor a matrix.
    pub fn predict_dyn(&self, input: ArrayD<f32>) -> Result<PredictionResult> {
        self.predict(input.try_into()?)
    }
}
