//! GOA Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout the GOA workspace:
//! - Ontology terms and the read-only `TermStore` contract
//! - Annotation records in GAF column layout
//! - Common error types
//! - Configuration management
//! - Tracing subscriber setup

pub mod config;
pub mod gaf;
pub mod telemetry;
pub mod term;

pub use config::{
    AnnotationConfig, AppConfig, ClosureDirection, ConfigError, LoggingConfig, OntologyConfig,
    CURATED_EVIDENCE_CODES,
};
pub use gaf::{AnnotationRecord, GAF_COLUMNS, NOT_QUALIFIER};
pub use term::{RelationType, Term, TermCollection, TermStore};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for GOA operations
#[derive(Error, Debug)]
pub enum GoaError {
    #[error("Term record has no identifier")]
    MissingIdentifier,

    #[error("Invalid annotation record: expected {expected} columns, found {found}")]
    InvalidRecord { expected: usize, found: usize },

    #[error("Invalid taxon token: {0:?}")]
    InvalidTaxon(String),

    #[error("Invalid term data: {0}")]
    InvalidTermData(String),

    #[error("Line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<GoaError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GoaError {
    /// Attach a 1-based input line number to this error
    pub fn at_line(self, line: usize) -> Self {
        Self::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GoaError>;

// ============================================================================
// Tests
// ============================================================================
