use crate::InferError;
use stance_base::Tensor;
use std::collections::HashMap;

/// A loaded model ready to run.
///
/// Runtime resources are owned by the implementor and released when the
/// session is dropped.
pub trait Session {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
