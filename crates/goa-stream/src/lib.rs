//! GOA Stream - Lazy filtering of annotation records
//!
//! An [`AnnotationStream`] is a pull-based chain of filter stages. Each stage
//! wraps exactly one upstream stage and asks it for the next record only when
//! it is asked for one itself, so nothing is materialized and stopping early
//! does no extra work.
//!
//! ```text
//! GafReader -> evidence -> database/type -> NOT qualifier -> transitive term -> simplified()
//! ```
//!
//! Errors from the record source travel through every stage untouched.

pub mod export;
pub mod filter;
pub mod pipeline;
pub mod reader;
pub mod stream;

pub use export::{write_tsv, SimplifiedAnnotation};
pub use filter::{
    DatabaseTypeFilter, EvidenceCodeFilter, FnFilter, ObjectIdFilter, PositiveQualifierFilter,
    RecordPredicate, SpeciesFilter, TransitiveTermFilter,
};
pub use pipeline::{direct_object_pipeline, transitive_term_pipeline, PipelineOptions};
pub use reader::GafReader;
pub use stream::{AnnotationStream, Filter};
