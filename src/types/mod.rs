pub mod id;

pub use id::{ProofId, ShortId};
