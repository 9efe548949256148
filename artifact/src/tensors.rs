use std::collections::HashMap;

use model::LinearModel;
use safetensors::{Dtype, SafeTensorError, SafeTensors, tensor::TensorView};

use crate::{
    codec::{self, Codec},
    error::{ArtifactErr, Corruption, Result},
};

const WEIGHTS: &str = "weights";
const BIAS: &str = "bias";

/// Stores the model as two f32 tensors, `weights` and `bias`.
pub(crate) struct SafeTensorsCodec;

impl SafeTensorsCodec {
    fn tensor<'a>(
        tensors: &'a SafeTensors<'a>,
        name: &'static str,
    ) -> std::result::Result<TensorView<'a>, Corruption> {
        let view = tensors.tensor(name).map_err(|e| match e {
            SafeTensorError::TensorNotFound(_) => Corruption::MissingTensor(name),
            e => Corruption::SafeTensors(e.to_string()),
        })?;

        if view.dtype() != Dtype::F32 {
            return Err(Corruption::TensorDtype(name));
        }

        Ok(view)
    }
}

impl Codec for SafeTensorsCodec {
    fn encode(model: &LinearModel, buf: &mut Vec<u8>) -> Result<()> {
        let (rows, cols) = model.weights().dim();

        let mut weights = Vec::new();
        codec::put_f32s(&mut weights, model.weights().iter());
        let mut bias = Vec::new();
        codec::put_f32s(&mut bias, model.bias().iter());

        let encode_err = |e: SafeTensorError| ArtifactErr::Encode(e.to_string());
        let views = [
            (
                WEIGHTS,
                TensorView::new(Dtype::F32, vec![rows, cols], &weights).map_err(encode_err)?,
            ),
            (
                BIAS,
                TensorView::new(Dtype::F32, vec![rows], &bias).map_err(encode_err)?,
            ),
        ];

        let info = HashMap::from([("architecture".to_string(), "linear".to_string())]);
        let bytes = safetensors::serialize(views, &Some(info)).map_err(encode_err)?;
        buf.extend_from_slice(&bytes);
        Ok(())
    }

    fn decode(buf: &[u8]) -> Result<LinearModel> {
        let tensors =
            SafeTensors::deserialize(buf).map_err(|e| Corruption::SafeTensors(e.to_string()))?;

        let weights = Self::tensor(&tensors, WEIGHTS)?;
        let bias = Self::tensor(&tensors, BIAS)?;

        let (rows, cols) = match *weights.shape() {
            [rows, cols] if rows > 0 && cols > 0 => (rows, cols),
            _ => {
                return Err(Corruption::TensorShape {
                    name: WEIGHTS,
                    shape: weights.shape().to_vec(),
                }
                .into());
            }
        };

        if bias.shape() != [rows] {
            return Err(Corruption::TensorShape {
                name: BIAS,
                shape: bias.shape().to_vec(),
            }
            .into());
        }

        let model = LinearModel::from_vecs(
            (rows, cols),
            codec::get_f32s(weights.data()),
            codec::get_f32s(bias.data()),
        )
        .map_err(|e| Corruption::InvalidModel(e.to_string()))?;
        Ok(model)
    }
}
