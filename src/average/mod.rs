//! Track averaging.
//!
//! Records of a tracked molecule list are chained through their `LINK`
//! slot. Each chain is folded into one record: positions, width, aspect,
//! background and z are averaged with sqrt(height) weights, height and area
//! are summed, and every other slot is taken from the chain's head. Records
//! are stamped in the input list as they are consumed, so each belongs to
//! exactly one output track. Noise records (negative category) are stamped
//! but never emitted.

mod options;
mod policy;
mod run;
mod track;

pub use options::*;
pub use policy::*;
pub use run::*;
pub use track::*;
