pub mod fingerprint;
pub mod state_differ;

pub use fingerprint::{fingerprint, Fingerprint};
pub use state_differ::{diff, DiffResult};
