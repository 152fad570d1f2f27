//! Revision review engine for redline.
//!
//! A *revision pair* is a baseline document (`current`) and a proposed
//! alternative (`updated`) tracked under one service name. The engine owns
//! the pair's whole lifecycle: proposing updates, serving the review state,
//! committing or discarding individual diff hunks or contiguous blocks, and
//! retiring the pair once both documents converge.
//!
//! All persistence goes through the
//! [`DocumentStore`](redline_store::DocumentStore) gateway; the engine never
//! touches storage directly. Mutating operations run under a per-pair
//! exclusive slot and fail fast with [`EngineError::Conflict`] when the slot
//! is held.
//!
//! # Key Types
//!
//! - [`RevisionEngine`] -- the operation surface
//! - [`AssessmentView`] / [`ApplyOutcome`] -- read and mutation results
//! - [`EngineConfig`] -- tunables, injected at construction
//! - [`EngineError`] -- the error taxonomy

pub mod config;
pub mod engine;
pub mod error;
mod locks;
pub mod names;
pub mod view;

pub use config::EngineConfig;
pub use engine::RevisionEngine;
pub use error::{EngineError, EngineResult};
pub use view::{ApplyOutcome, AssessmentView};
