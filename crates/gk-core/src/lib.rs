#![deny(missing_docs)]
#![doc = "Shared error, provenance and canonical serialisation helpers for the Genz-Keister workspace."]

pub mod errors;
/// Canonical hashing helpers.
pub mod hash;
pub mod provenance;
/// Canonical JSON and YAML helpers.
#[path = "serde.rs"]
pub mod serde_io;

pub use errors::{precision_error, range_error, ErrorInfo, GkError};
pub use hash::{round_f64, stable_hash_string};
pub use provenance::{RunProvenance, SchemaVersion};
pub use serde_io::{
    from_json_slice, from_yaml_slice, load_document, to_canonical_json_bytes, to_yaml_string,
    write_canonical_json,
};
