//! `roomlift-client` -- client-side orchestration for room redesigns.
//!
//! Wraps the backend HTTP API behind [`api::BackendClient`], persists a
//! device identity to disk, and drives the full redesign flow (quota
//! pre-flight, photo upload with inline fallback, prompt synthesis,
//! generation, best-effort usage increment) in
//! [`orchestrator::Orchestrator`].

pub mod api;
pub mod identity;
pub mod orchestrator;
