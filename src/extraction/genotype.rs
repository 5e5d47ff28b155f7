//! Genotypes and transformer counting.
//!
//! A genotype is the ordered list of metamorphic transformers applied to a program. Result files
//! carry it in one of two shapes:
//!
//! - a list of `{"transformer": <name>, "seed": <any>}` objects ([`Genotype::StructuredEntries`])
//! - a single string where quoting was lost on write, e.g.
//!   `"[{ transformer: RenameVariableTransformer, seed: 1 }{ transformer: IfTrue... }]"`
//!   ([`Genotype::RawText`])
//!
//! Both shapes are counted as they are, without normalizing one into the other. For raw text the
//! total is the number of literal `transformer` tokens and each kind is a substring count, which
//! can overcount when a kind name happens to occur inside other text.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ExtractionError, ExtractionResult};

/// Token counted in raw-text genotypes to get the total number of transformations.
pub const TRANSFORMER_TOKEN: &str = "transformer";

/// The closed catalog of transformer kinds, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransformerKind {
    RenameVariable,
    IfFalseElse,
    AddNeutralElement,
    AddUnusedVariable,
    LambdaIdentity,
    IfTrue,
    RandomParameterName,
}

impl TransformerKind {
    /// All kinds, in catalog order.
    pub const ALL: [TransformerKind; 7] = [
        TransformerKind::RenameVariable,
        TransformerKind::IfFalseElse,
        TransformerKind::AddNeutralElement,
        TransformerKind::AddUnusedVariable,
        TransformerKind::LambdaIdentity,
        TransformerKind::IfTrue,
        TransformerKind::RandomParameterName,
    ];

    /// The transformer's name as written in genotypes (and used as the count column name).
    pub fn name(&self) -> &'static str {
        match self {
            TransformerKind::RenameVariable => "RenameVariableTransformer",
            TransformerKind::IfFalseElse => "IfFalseElseTransformer",
            TransformerKind::AddNeutralElement => "AddNeutralElementTransformer",
            TransformerKind::AddUnusedVariable => "AddUnusedVariableTransformer",
            TransformerKind::LambdaIdentity => "LambdaIdentityTransformer",
            TransformerKind::IfTrue => "IfTrueTransformer",
            TransformerKind::RandomParameterName => "RandomParameterNameTransformer",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TransformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformerKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown transformer '{s}'"))
    }
}

/// Names of all known transformers, in catalog order.
pub fn known_transformers() -> [&'static str; 7] {
    TransformerKind::ALL.map(|k| k.name())
}

/// One applied transformer in a structured genotype.
///
/// The seed is kept as stored: it never affects counting, so any JSON value (or none) is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenotypeEntry {
    pub transformer: String,
    #[serde(default)]
    pub seed: Option<serde_json::Value>,
}

/// A genotype in either of its two stored shapes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Genotype {
    RawText(String),
    StructuredEntries(Vec<GenotypeEntry>),
}

impl Genotype {
    /// Read a genotype from the `genotype` field of a result file.
    pub fn from_json(value: &serde_json::Value) -> ExtractionResult<Self> {
        Genotype::deserialize(value).map_err(|_| ExtractionError::SchemaMismatch {
            message: format!(
                "genotype must be a string or a list of transformer objects, got {}",
                value
            ),
        })
    }

    /// Total number of applied transformations, including unknown kinds.
    pub fn transformation_count(&self) -> usize {
        match self {
            Genotype::RawText(raw) => raw.matches(TRANSFORMER_TOKEN).count(),
            Genotype::StructuredEntries(entries) => entries.len(),
        }
    }

    /// How often `kind` was applied.
    pub fn count_kind(&self, kind: TransformerKind) -> usize {
        match self {
            Genotype::RawText(raw) => raw.matches(kind.name()).count(),
            Genotype::StructuredEntries(entries) => entries
                .iter()
                .filter(|e| e.transformer == kind.name())
                .count(),
        }
    }

    /// Total and per-kind counts in one pass over the catalog.
    pub fn tally(&self) -> TransformerTally {
        TransformerTally {
            total: self.transformation_count(),
            per_kind: TransformerKind::ALL.map(|k| self.count_kind(k)),
        }
    }
}

/// Transformation counts of one genotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformerTally {
    /// Value of the `TRANSFORMATIONS` column.
    pub total: usize,
    per_kind: [usize; 7],
}

impl TransformerTally {
    /// Count for a single kind.
    pub fn get(&self, kind: TransformerKind) -> usize {
        self.per_kind[kind.index()]
    }

    /// Per-kind counts in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (TransformerKind, usize)> + '_ {
        TransformerKind::ALL.into_iter().zip(self.per_kind)
    }
}
