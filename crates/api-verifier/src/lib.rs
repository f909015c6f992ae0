//! NebulaCode API smoke verifier
//!
//! Confirms against a running backend that:
//! - a file written to a workspace reads back with identical content
//!   (optionally, that it also shows up in the workspace listing)
//! - the run endpoints create, report, cancel and time out runs
//!
//! Every check is a short chain of fallible steps; the first failure ends
//! it and surfaces as a [`VerifyError`].
//!
//! # Usage
//!
//! ```bash
//! # Write then read back test-file.txt on http://localhost:4000
//! verify-api
//!
//! # Different backend, distinct content per run, also check the listing
//! NEBULA_API_URL=http://staging:4000 verify-api files --timestamped --check-listing
//!
//! # Run lifecycle endpoints
//! verify-api runs --settle-secs 2
//! ```

pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod round_trip;
pub mod run_lifecycle;
pub mod types;

pub use client::BackendClient;
pub use config::VerifierConfig;
pub use console::Console;
pub use error::{Step, VerifyError, VerifyResult};
pub use round_trip::{verify_round_trip, Payload, RoundTripPlan, RoundTripReport};
pub use run_lifecycle::{verify_run_lifecycle, RunPlan, RunReport, Transition};
pub use types::{contains_node, FileNode, NodeKind, RunInfo, RunStatus, WorkspaceFile};
