use crate::metric::Metric;
use ahash::AHashMap;
use std::fmt;

/// Result of `Model::evaluate`: the mean loss and every requested metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    loss: f64,
    metrics: AHashMap<Metric, f64>,
}

impl Evaluation {
    pub(crate) fn new(loss: f64, metrics: AHashMap<Metric, f64>) -> Self {
        Self { loss, metrics }
    }

    get_field!(loss, loss, f64);

    /// Returns the value of one metric, if it was requested at compile time.
    pub fn metric(&self, metric: Metric) -> Option<f64> {
        self.metrics.get(&metric).copied()
    }

    /// Returns every computed metric.
    pub fn metrics(&self) -> &AHashMap<Metric, f64> {
        &self.metrics
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loss: {:.6}", self.loss)?;

        let mut metrics: Vec<_> = self.metrics.iter().collect();
        metrics.sort_by_key(|(metric, _)| metric.name());
        for (metric, value) in metrics {
            write!(f, " - {}: {:.6}", metric, value)?;
        }
        Ok(())
    }
}

/// Record of a training run: the mean loss of every epoch, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    epoch_losses: Vec<f64>,
}

impl History {
    pub(crate) fn record_epoch(&mut self, loss: f64) {
        self.epoch_losses.push(loss);
    }

    /// Mean loss of every epoch.
    pub fn epoch_losses(&self) -> &[f64] {
        &self.epoch_losses
    }

    /// Mean loss of the last epoch.
    pub fn final_loss(&self) -> Option<f64> {
        self.epoch_losses.last().copied()
    }

    /// Number of completed epochs.
    pub fn epochs(&self) -> usize {
        self.epoch_losses.len()
    }
}
