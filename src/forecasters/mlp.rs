use crate::data::WindowedDataset;
use crate::engines::evaluation::{EvaluationFailure, WindowedForecaster};
use crate::types::{ModelParams, SequenceParams};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Dense ReLU network trained by mini-batch SGD on lookback windows
///
/// Weight init, shuffling, and dropout masks come from an RNG seeded with
/// `seed`, so the same parameters always train the same network.
#[derive(Debug, Clone)]
pub struct MlpForecaster {
    pub seed: u64,
}

impl Default for MlpForecaster {
    fn default() -> Self {
        Self { seed: 7 }
    }
}

impl WindowedForecaster for MlpForecaster {
    fn fit_predict(
        &self,
        params: &ModelParams,
        dataset: &WindowedDataset,
    ) -> Result<Vec<f64>, EvaluationFailure> {
        let params = match params {
            ModelParams::Sequence(p) => *p,
            other => {
                return Err(EvaluationFailure::InvalidParameters(format!(
                    "MLP forecaster cannot fit {} parameters",
                    other.family()
                )))
            }
        };
        validate(&params)?;

        if dataset.train_x().is_empty() {
            return Err(EvaluationFailure::ShapeMismatch {
                expected: 1,
                actual: 0,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut network = Network::new(dataset.lookback(), &params, &mut rng);
        network.train(dataset.train_x(), dataset.train_y(), &params, &mut rng)?;

        let predictions: Vec<f64> =
            dataset.test_x().iter().map(|x| network.predict(x)).collect();
        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(EvaluationFailure::NonConvergence(
                "network produced non-finite predictions".to_string(),
            ));
        }
        Ok(predictions)
    }
}

fn validate(params: &SequenceParams) -> Result<(), EvaluationFailure> {
    if params.units == 0 || params.hidden_layers == 0 {
        return Err(EvaluationFailure::InvalidParameters(
            "network needs at least one hidden unit and layer".to_string(),
        ));
    }
    if params.batch_size == 0 || params.epochs == 0 {
        return Err(EvaluationFailure::InvalidParameters(
            "batch size and epochs must be positive".to_string(),
        ));
    }
    if !(0.0..1.0).contains(&params.dropout) {
        return Err(EvaluationFailure::InvalidParameters(format!(
            "dropout must be in [0, 1), got {}",
            params.dropout
        )));
    }
    if !params.learning_rate.is_finite() || params.learning_rate <= 0.0 {
        return Err(EvaluationFailure::InvalidParameters(format!(
            "learning rate must be positive, got {}",
            params.learning_rate
        )));
    }
    Ok(())
}

struct Layer {
    weights: Array2<f64>, // (outputs, inputs)
    bias: Array1<f64>,
}

impl Layer {
    fn new<R: Rng>(inputs: usize, outputs: usize, rng: &mut R) -> Self {
        let limit = (6.0 / (inputs + outputs) as f64).sqrt();
        Self {
            weights: Array2::from_shape_fn((outputs, inputs), |_| rng.gen_range(-limit..limit)),
            bias: Array1::zeros(outputs),
        }
    }

    fn forward(&self, input: ArrayView1<f64>) -> Array1<f64> {
        self.weights.dot(&input) + &self.bias
    }
}

struct Gradients {
    weights: Vec<Array2<f64>>,
    bias: Vec<Array1<f64>>,
}

impl Gradients {
    fn zeros(layers: &[Layer]) -> Self {
        Self {
            weights: layers.iter().map(|l| Array2::zeros(l.weights.raw_dim())).collect(),
            bias: layers.iter().map(|l| Array1::zeros(l.bias.len())).collect(),
        }
    }
}

struct Network {
    layers: Vec<Layer>,
}

impl Network {
    fn new<R: Rng>(inputs: usize, params: &SequenceParams, rng: &mut R) -> Self {
        let mut layers = Vec::with_capacity(params.hidden_layers + 1);
        let mut width = inputs;
        for _ in 0..params.hidden_layers {
            layers.push(Layer::new(width, params.units, rng));
            width = params.units;
        }
        layers.push(Layer::new(width, 1, rng));
        Self { layers }
    }

    fn predict(&self, x: &[f64]) -> f64 {
        let mut activation = ArrayView1::from(x).to_owned();
        let last = self.layers.len() - 1;
        for (i, layer) in self.layers.iter().enumerate() {
            activation = layer.forward(activation.view());
            if i < last {
                activation.mapv_inplace(|a| a.max(0.0));
            }
        }
        activation[0]
    }

    fn train<R: Rng>(
        &mut self,
        xs: &[Vec<f64>],
        ys: &[f64],
        params: &SequenceParams,
        rng: &mut R,
    ) -> Result<(), EvaluationFailure> {
        let keep = 1.0 - params.dropout;
        let mut order: Vec<usize> = (0..xs.len()).collect();

        for epoch in 0..params.epochs {
            order.shuffle(rng);

            for batch in order.chunks(params.batch_size) {
                let mut grads = Gradients::zeros(&self.layers);
                for &i in batch {
                    self.accumulate(ArrayView1::from(&xs[i][..]), ys[i], keep, rng, &mut grads);
                }
                self.apply(&grads, params.learning_rate / batch.len() as f64);
            }

            let diverged = self
                .layers
                .iter()
                .any(|l| l.bias.iter().chain(l.weights.iter()).any(|w| !w.is_finite()));
            if diverged {
                return Err(EvaluationFailure::NonConvergence(format!(
                    "weights diverged in epoch {}",
                    epoch
                )));
            }
        }
        Ok(())
    }

    /// Backpropagate squared error of one sample with inverted dropout
    fn accumulate<R: Rng>(
        &self,
        x: ArrayView1<f64>,
        y: f64,
        keep: f64,
        rng: &mut R,
        grads: &mut Gradients,
    ) {
        let last = self.layers.len() - 1;
        let mut activations = vec![x.to_owned()];
        // Per hidden unit: d(activation)/d(pre-activation), dropout included
        let mut gates: Vec<Array1<f64>> = Vec::with_capacity(last);

        for (i, layer) in self.layers.iter().enumerate() {
            let pre = layer.forward(activations[i].view());
            if i < last {
                let gate = pre.mapv(|z| {
                    if z > 0.0 && rng.gen::<f64>() < keep {
                        1.0 / keep
                    } else {
                        0.0
                    }
                });
                activations.push(&pre * &gate);
                gates.push(gate);
            } else {
                activations.push(pre);
            }
        }

        let mut delta = Array1::from_elem(1, 2.0 * (activations[last + 1][0] - y));

        for l in (0..=last).rev() {
            grads.bias[l] += &delta;
            let outer = delta
                .view()
                .insert_axis(Axis(1))
                .dot(&activations[l].view().insert_axis(Axis(0)));
            grads.weights[l] += &outer;

            if l > 0 {
                delta = self.layers[l].weights.t().dot(&delta) * &gates[l - 1];
            }
        }
    }

    fn apply(&mut self, grads: &Gradients, step: f64) {
        for (l, layer) in self.layers.iter_mut().enumerate() {
            layer.weights.scaled_add(-step, &grads.weights[l]);
            layer.bias.scaled_add(-step, &grads.bias[l]);
        }
    }
}
