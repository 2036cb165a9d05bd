//! Per-family genome schemas and the genome decoder.

use crate::engines::generation::genome::Genome;
use crate::error::{EvoForecastError, Result};
use crate::types::{
    ArimaOrder, ModelFamily, ModelParams, RidgeParams, SequenceParams, SmoothingParams,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Domain of a single gene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeneKind {
    Continuous,
    Integer,
    Discrete(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneSpec {
    pub name: String,
    pub kind: GeneKind,
    pub low: f64,
    pub high: f64,
    /// Genes with a threshold decode to a boolean (`value >= threshold`)
    pub threshold: Option<f64>,
}

impl GeneSpec {
    pub fn continuous(name: &str, low: f64, high: f64) -> Self {
        Self {
            name: name.to_string(),
            kind: GeneKind::Continuous,
            low,
            high,
            threshold: None,
        }
    }

    pub fn integer(name: &str, low: i64, high: i64) -> Self {
        Self {
            name: name.to_string(),
            kind: GeneKind::Integer,
            low: low as f64,
            high: high as f64,
            threshold: None,
        }
    }

    /// Bounds are the smallest and largest choice
    pub fn discrete(name: &str, choices: &[f64]) -> Self {
        let low = choices.iter().copied().fold(f64::INFINITY, f64::min);
        let high = choices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            name: name.to_string(),
            kind: GeneKind::Discrete(choices.to_vec()),
            low,
            high,
            threshold: None,
        }
    }

    /// Continuous gene in [0, 1] read as a flag
    pub fn flag(name: &str) -> Self {
        Self {
            threshold: Some(0.5),
            ..Self::continuous(name, 0.0, 1.0)
        }
    }

    /// Clamp to range and cast to the declared kind
    pub fn repair(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.cast(self.low);
        }
        self.cast(value.clamp(self.low, self.high))
    }

    fn cast(&self, value: f64) -> f64 {
        match &self.kind {
            GeneKind::Continuous => value,
            // Rounding stays in range because the bounds are integral
            GeneKind::Integer => value.round(),
            GeneKind::Discrete(choices) => choices
                .iter()
                .copied()
                .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
                .unwrap_or(value),
        }
    }

    /// Uniform draw from the gene's domain
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match &self.kind {
            GeneKind::Continuous => rng.gen_range(self.low..=self.high),
            GeneKind::Integer => rng.gen_range(self.low as i64..=self.high as i64) as f64,
            GeneKind::Discrete(choices) => choices.choose(rng).copied().unwrap_or(self.low),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(EvoForecastError::Schema("Gene name must not be empty".to_string()));
        }
        if !self.low.is_finite() || !self.high.is_finite() || self.low > self.high {
            return Err(EvoForecastError::Schema(format!(
                "Gene '{}' has invalid bounds [{}, {}]",
                self.name, self.low, self.high
            )));
        }
        match &self.kind {
            GeneKind::Integer if self.low.fract() != 0.0 || self.high.fract() != 0.0 => {
                Err(EvoForecastError::Schema(format!(
                    "Integer gene '{}' needs integral bounds",
                    self.name
                )))
            }
            GeneKind::Discrete(choices) if choices.is_empty() => Err(EvoForecastError::Schema(
                format!("Discrete gene '{}' has no choices", self.name),
            )),
            GeneKind::Discrete(choices) if choices.iter().any(|c| !c.is_finite()) => {
                Err(EvoForecastError::Schema(format!(
                    "Discrete gene '{}' has a non-finite choice",
                    self.name
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Ordered gene layout of one model family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeSchema {
    family: ModelFamily,
    genes: Vec<GeneSpec>,
}

impl GenomeSchema {
    pub fn new(family: ModelFamily, genes: Vec<GeneSpec>) -> Result<Self> {
        if genes.is_empty() {
            return Err(EvoForecastError::Schema(format!(
                "Schema for {} has zero genes",
                family
            )));
        }

        let mut names = HashSet::new();
        for gene in &genes {
            gene.validate()?;
            if !names.insert(gene.name.as_str()) {
                return Err(EvoForecastError::Schema(format!(
                    "Duplicate gene '{}' in {} schema",
                    gene.name, family
                )));
            }
        }

        for required in family.required_genes() {
            if !names.contains(required) {
                return Err(EvoForecastError::Schema(format!(
                    "Schema for {} is missing gene '{}'",
                    family, required
                )));
            }
        }

        Ok(Self { family, genes })
    }

    /// Built-in search space of each family
    pub fn for_family(family: ModelFamily) -> Self {
        let genes = match family {
            ModelFamily::SequenceModel => vec![
                GeneSpec::integer("units", 16, 128),
                GeneSpec::continuous("dropout", 0.0, 0.5),
                GeneSpec::continuous("learning_rate", 1e-4, 1e-2),
                GeneSpec::discrete("batch_size", &[16.0, 32.0, 64.0, 128.0]),
                GeneSpec::integer("epochs", 10, 100),
                GeneSpec::integer("hidden_layers", 1, 3),
            ],
            ModelFamily::Autoregressive => vec![
                GeneSpec::integer("p", 0, 5),
                GeneSpec::integer("d", 0, 2),
                GeneSpec::integer("q", 0, 5),
            ],
            ModelFamily::ExponentialSmoothing => vec![
                GeneSpec::flag("trend"),
                GeneSpec::flag("seasonal"),
                GeneSpec::integer("seasonal_periods", 2, 24),
            ],
            ModelFamily::Ridge => vec![GeneSpec::continuous("alpha", 0.0, 10.0)],
        };
        Self { family, genes }
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    pub fn genes(&self) -> &[GeneSpec] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.genes.iter().position(|g| g.name == name)
    }

    pub fn clamp_gene(&self, index: usize, value: f64) -> f64 {
        self.genes[index].repair(value)
    }

    /// Clamp and cast every gene in place
    pub fn repair(&self, genome: &mut Genome) {
        for (gene, spec) in genome.iter_mut().zip(&self.genes) {
            *gene = spec.repair(*gene);
        }
    }

    pub fn random_genome<R: Rng>(&self, rng: &mut R) -> Genome {
        self.genes.iter().map(|g| g.sample(rng)).collect()
    }

    /// Named view of a genome
    pub fn describe<'a>(&'a self, genome: &Genome) -> Vec<(&'a str, f64)> {
        self.genes
            .iter()
            .zip(genome)
            .map(|(spec, value)| (spec.name.as_str(), *value))
            .collect()
    }

    /// Map a genome to the family's typed parameters
    pub fn decode(&self, genome: &Genome) -> Result<ModelParams> {
        if genome.len() != self.genes.len() {
            return Err(EvoForecastError::Schema(format!(
                "Genome length {} does not match {} schema length {}",
                genome.len(),
                self.family,
                self.genes.len()
            )));
        }

        let decoder = Decoder { schema: self, genome };

        let params = match self.family {
            ModelFamily::SequenceModel => ModelParams::Sequence(SequenceParams {
                units: decoder.count("units")?,
                dropout: decoder.real("dropout")?,
                learning_rate: decoder.real("learning_rate")?,
                batch_size: decoder.count("batch_size")?,
                epochs: decoder.count("epochs")?,
                hidden_layers: decoder.count("hidden_layers")?,
            }),
            ModelFamily::Autoregressive => ModelParams::Autoregressive(ArimaOrder {
                p: decoder.int("p")?,
                d: decoder.int("d")?,
                q: decoder.int("q")?,
            }),
            ModelFamily::ExponentialSmoothing => {
                ModelParams::ExponentialSmoothing(SmoothingParams {
                    trend: decoder.flag("trend")?,
                    seasonal: decoder.flag("seasonal")?,
                    seasonal_periods: decoder.count("seasonal_periods")?,
                })
            }
            ModelFamily::Ridge => ModelParams::Ridge(RidgeParams {
                alpha: decoder.real("alpha")?,
            }),
        };

        Ok(params)
    }
}

struct Decoder<'a> {
    schema: &'a GenomeSchema,
    genome: &'a Genome,
}

impl Decoder<'_> {
    fn real(&self, name: &str) -> Result<f64> {
        let index = self.schema.index_of(name).ok_or_else(|| {
            EvoForecastError::Schema(format!(
                "Gene '{}' not found in {} schema",
                name, self.schema.family
            ))
        })?;
        Ok(self.schema.clamp_gene(index, self.genome[index]))
    }

    fn int(&self, name: &str) -> Result<i64> {
        Ok(self.real(name)?.round() as i64)
    }

    fn count(&self, name: &str) -> Result<usize> {
        Ok(self.int(name)?.max(0) as usize)
    }

    fn flag(&self, name: &str) -> Result<bool> {
        let index = self.schema.index_of(name).ok_or_else(|| {
            EvoForecastError::Schema(format!(
                "Gene '{}' not found in {} schema",
                name, self.schema.family
            ))
        })?;
        let threshold = self.schema.genes[index].threshold.unwrap_or(0.5);
        Ok(self.real(name)? >= threshold)
    }
}
