//! GOA Configuration Management
//!
//! Handles configuration from environment variables and TOML files,
//! with defaults matching the curated-evidence UniProt protein queries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::term::RelationType;

/// Evidence codes backed by direct experimental or curator support
pub const CURATED_EVIDENCE_CODES: [&str; 7] = ["EXP", "IDA", "IPI", "IMP", "IGI", "IEP", "IC"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Annotation filtering defaults
    pub annotation: AnnotationConfig,

    /// Ontology graph construction
    pub ontology: OntologyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        self.apply_env()?;
        Ok(self)
    }

    /// Overwrite every setting whose environment variable is set
    fn apply_env(&mut self) -> Result<(), ConfigError> {
        // Annotation
        if let Ok(codes) = std::env::var("GOA_EVIDENCE_CODES") {
            self.annotation.evidence_codes = parse_code_list("GOA_EVIDENCE_CODES", &codes)?;
        }
        if let Ok(prefix) = std::env::var("GOA_DATABASE_PREFIX") {
            self.annotation.database_prefix = prefix;
        }
        if let Ok(object_type) = std::env::var("GOA_OBJECT_TYPE") {
            self.annotation.object_type = object_type;
        }

        // Ontology
        if let Ok(relation) = std::env::var("GOA_RELATION_TYPE") {
            let relation = relation.trim();
            if relation.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "GOA_RELATION_TYPE".to_string(),
                    value: relation.to_string(),
                });
            }
            self.ontology.relation_type = RelationType::new(relation);
        }
        if let Ok(direction) = std::env::var("GOA_CLOSURE_DIRECTION") {
            self.ontology.closure_direction = direction.parse()?;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }
}

/// Annotation filtering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Evidence codes accepted by the standard pipelines
    pub evidence_codes: BTreeSet<String>,

    /// Required prefix of the source database column
    pub database_prefix: String,

    /// Required object type
    pub object_type: String,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            evidence_codes: CURATED_EVIDENCE_CODES
                .iter()
                .map(|code| code.to_string())
                .collect(),
            database_prefix: "UniProt".to_string(),
            object_type: "protein".to_string(),
        }
    }
}

/// Ontology graph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyConfig {
    /// Relation label used to build the relationship graph
    pub relation_type: RelationType,

    /// Direction in which descendant closures follow graph edges
    pub closure_direction: ClosureDirection,
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            relation_type: RelationType::is_a(),
            closure_direction: ClosureDirection::Forward,
        }
    }
}

/// Direction of reachability in a descendant closure
///
/// - `Forward`: a term belongs to the closure of `A` when a path `A -> term` exists
/// - `Reverse`: a term belongs to the closure of `A` when a path `term -> A` exists,
///   i.e. the term specializes `A` through `is_a` edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosureDirection {
    #[default]
    Forward,
    Reverse,
}

impl std::str::FromStr for ClosureDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "reverse" => Ok(Self::Reverse),
            _ => Err(ConfigError::InvalidValue {
                key: "GOA_CLOSURE_DIRECTION".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ClosureDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Reverse => write!(f, "reverse"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Parse a comma-separated list of codes, rejecting an empty result
fn parse_code_list(key: &str, value: &str) -> Result<BTreeSet<String>, ConfigError> {
    let codes: BTreeSet<String> = value
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if codes.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    Ok(codes)
}
