//! Hash-based identifiers for store records

pub mod id;

pub use id::{IdGenerator, ID_HEX_LEN, LINK_ID_LEN, REFERENCE_PREFIX};
