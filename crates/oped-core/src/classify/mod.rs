//! Page classification: keyword fallback and the per-page policy.

mod keyword;
mod policy;

pub use keyword::*;
pub use policy::*;
