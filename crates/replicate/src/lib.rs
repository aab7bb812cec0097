//! Replicate REST client library.
//!
//! Typed submission and status retrieval for the image-to-image model
//! ([`api`]), normalization of the service's heterogeneous output shapes
//! ([`output`]), and a bounded, cancellable polling loop that drives a
//! prediction to a terminal outcome ([`poller`]).

pub mod api;
pub mod output;
pub mod poller;

pub use api::{Prediction, PredictionInput, PredictionStatus, ReplicateApi, ReplicateError};
pub use output::PredictionOutput;
pub use poller::{poll_until_terminal, JobOutcome, PollConfig, PredictionSource};
