// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Instance batching and slot-lifecycle engine for audio-reactive 3D
//! worlds, built on wgpu.
//!
//! Glade batches decorative instances (flowers, grass, berries, lanterns,
//! cloud puffs) into fixed-capacity GPU-facing pools — one draw call per
//! pool — and owns slot allocation, reclamation, dirty tracking, and the
//! per-frame synchronization of audio/weather-driven attributes. Short-lived
//! transients (impact sparks, rain, mist) go through a circular-buffer
//! emitter that never refuses a spawn.
//!
//! # Key entry points
//!
//! - [`engine::GladeEngine`] - the context object owning decors, batches,
//!   and the emitter
//! - [`batch::DecorBatch`] - one visual category: pool + slot registry
//! - [`emitter::BurstEmitter`] - ring-buffer transient particles
//! - [`frame::FrameState`] - the read-only per-frame snapshot (audio bands,
//!   weather, wind, player position) the embedder supplies
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything is single-threaded and frame-synchronous: the embedder calls
//! [`engine::GladeEngine::update`] once per frame, then hands the dirty
//! pools to the [`gpu`] upload layer. Pool storage is allocated once at
//! construction and never grows, so instance buffers and bind groups stay
//! valid for the lifetime of the pool. The draw only ever samples buffers
//! the upload layer has finished writing — single writer, single reader,
//! strictly in frame order.

pub mod batch;
pub mod decor;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod gpu;
pub mod options;
pub mod reactive;
pub mod util;
