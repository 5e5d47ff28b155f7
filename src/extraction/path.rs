//! Path decomposition.
//!
//! Result files are expected at `{root}/{experiment}/seed-{N}/gen{M}/{file}.json`. Every
//! path-derived field is computed here, so the layout assumptions live in one place:
//!
//! - `seed`: digits of the first `seed-<digits>` anywhere in the path
//! - `generation`: digits of the first `gen<digits>` anywhere in the path
//! - `experiment`: the text between `{root}/` and the next `/seed`
//! - `algorithm`: `random` if the experiment name contains `random`, else `genetic`
//!
//! A path that does not follow the layout silently yields a wrong experiment name; missing seed or
//! generation segments are errors.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ExtractionError, ExtractionResult};

static SEED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"seed-([0-9]+)").expect("seed pattern is valid"));

static GENERATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gen([0-9]+)").expect("generation pattern is valid"));

/// The segment that terminates the experiment name.
const SEED_SEGMENT: &str = "/seed";

/// Search strategy used to produce new genotypes in an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Random search baseline.
    Random,
    /// Genetic search.
    Genetic,
}

impl Algorithm {
    /// Classify an experiment by name: anything containing `random` is a random-search run.
    pub fn from_experiment(experiment: &str) -> Self {
        if experiment.contains("random") {
            Algorithm::Random
        } else {
            Algorithm::Genetic
        }
    }

    /// Column value for this algorithm.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Random => "random",
            Algorithm::Genetic => "genetic",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata derived from a result file's location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMetadata {
    pub seed: i64,
    pub experiment: String,
    pub generation: i64,
    pub algorithm: Algorithm,
}

impl PathMetadata {
    /// Decompose `path` (a file somewhere below `root`) into its metadata fields.
    ///
    /// Builds a one-off [`PathLayout`]; runs over many files should build the layout once.
    pub fn decompose(root: &str, path: &str) -> ExtractionResult<Self> {
        PathLayout::new(root)?.decompose(path)
    }
}

/// The directory layout below one result root.
///
/// Holds the experiment pattern for the root, compiled once and reused for every file of a run.
#[derive(Debug, Clone)]
pub struct PathLayout {
    root: String,
    experiment: Regex,
}

impl PathLayout {
    /// Layout for result files below `root`. The root is matched literally.
    pub fn new(root: &str) -> ExtractionResult<Self> {
        let experiment = Regex::new(&format!("{}.*?{}", regex::escape(root), SEED_SEGMENT))?;
        Ok(Self {
            root: root.to_string(),
            experiment,
        })
    }

    /// Like [`Self::new`], for a filesystem root.
    pub fn from_root(root: &Path) -> ExtractionResult<Self> {
        Self::new(path_str(root)?)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Decompose `path` into its metadata fields.
    pub fn decompose(&self, path: &str) -> ExtractionResult<PathMetadata> {
        let seed = extract_seed(path)?;
        let experiment = self.experiment(path)?;
        let generation = extract_generation(path)?;
        let algorithm = Algorithm::from_experiment(&experiment);
        Ok(PathMetadata {
            seed,
            experiment,
            generation,
            algorithm,
        })
    }

    /// Experiment name: the shortest span after the root that runs up to a `/seed` segment.
    ///
    /// The span is trimmed by the root plus one separator at the front and by `/seed` at the
    /// back. A root given with a trailing separator therefore loses the first character of the
    /// name; a span too short to trim yields an empty name.
    pub fn experiment(&self, path: &str) -> ExtractionResult<String> {
        let span = self
            .experiment
            .find(path)
            .ok_or_else(|| ExtractionError::PatternNotFound {
                field: "experiment",
                path: path.to_string(),
            })?
            .as_str();

        // The span starts with the root verbatim, so this is a char boundary.
        let mut rest = span[self.root.len()..].chars();
        rest.next();
        let inner = rest.as_str();

        // `span` ends with the ASCII `/seed`, so any suffix at least that long ends with it too.
        let name = match inner.len().checked_sub(SEED_SEGMENT.len()) {
            Some(end) => &inner[..end],
            None => "",
        };
        Ok(name.to_string())
    }
}

/// Borrow a path as UTF-8, failing for paths the patterns cannot see.
pub fn path_str(path: &Path) -> ExtractionResult<&str> {
    path.to_str().ok_or_else(|| ExtractionError::InvalidPath {
        path: path.to_string_lossy().into_owned(),
    })
}

/// Digits of the first `seed-<digits>` in `path`.
pub fn extract_seed(path: &str) -> ExtractionResult<i64> {
    extract_number(&SEED_PATTERN, "seed", path)
}

/// Digits of the first `gen<digits>` in `path`.
pub fn extract_generation(path: &str) -> ExtractionResult<i64> {
    extract_number(&GENERATION_PATTERN, "generation", path)
}

fn extract_number(pattern: &Regex, field: &'static str, path: &str) -> ExtractionResult<i64> {
    let digits = pattern
        .captures(path)
        .and_then(|c| c.get(1))
        .ok_or_else(|| ExtractionError::PatternNotFound {
            field,
            path: path.to_string(),
        })?
        .as_str();

    digits.parse::<i64>().map_err(|e| ExtractionError::ParseError {
        field,
        path: path.to_string(),
        raw: digits.to_string(),
        message: e.to_string(),
    })
}

/// Experiment name of `path` below `root`. See [`PathLayout::experiment`].
pub fn extract_experiment(root: &str, path: &str) -> ExtractionResult<String> {
    PathLayout::new(root)?.experiment(path)
}
