//! Document assemblers
//!
//! Each driver is a single load -> transform -> save pass. The transforms
//! are plain functions over in-memory documents; file paths are always
//! passed in by the caller.
//!
//! - [`entity_files`]: split a monolithic ontology into per-entity files and
//!   merge them back
//! - [`unify`]: combine the Time & Attendance and Absence ontologies
//! - [`fix`]: install catalog entities, normalize, stamp maintenance notes
//! - [`analyze`]: report entities lacking audit or versioning fields

pub mod analyze;
pub mod entity_files;
pub mod fix;
pub mod unify;

pub use analyze::{analyze_entities, analyze_ontology, percent, AuditReport};
pub use entity_files::{
    entity_file_name, merge_entity_files, split_ontology, split_ontology_file, MergeOutcome, SplitEntity,
};
pub use fix::{fix_ontology, fix_ontology_file, FixOutcome};
pub use unify::{unify_ontologies, unify_ontology_files, UnifyOutcome};
