//! # polylogos
//!
//! A multi-paradigm natural-language reasoning core. Eight paradigm engines
//! (classical, fuzzy, modal, temporal, probabilistic, quantum-inspired,
//! decision-theoretic, problem-solving) specialize one shared pipeline:
//! extract units and operators from text, match inference rules by keyword
//! compatibility, synthesize conclusions, score confidence and uncertainty
//! on two independent axes, and record an auditable proof trace.
//!
//! ## Architecture
//!
//! - **Extraction** (`extract`): sentence splitting + keyword-family typing
//! - **Rules** (`rule`): per-engine tables, coarse slot binding, matching
//! - **Synthesis** (`synth`): positional P/Q/R instantiation + mixed chains
//! - **Scoring** (`score`): weighted confidence, uncertainty descriptor
//! - **Paradigms** (`paradigm`): the eight specializations and their structures
//! - **Registry** (`registry`): runtime dispatch over paradigm-erased engines
//!
//! ## Library usage
//!
//! ```no_run
//! use polylogos::engine::Engine;
//! use polylogos::paradigm::Classical;
//!
//! let engine = Engine::new(Classical::new());
//! engine.initialize().unwrap();
//! let result = engine
//!     .reason("If it rains then the ground is wet. It rains.", None)
//!     .unwrap();
//! assert!(!result.conclusions.is_empty());
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod extract;
pub mod metrics;
pub mod operator;
pub mod outcome;
pub mod paradigm;
pub mod registry;
pub mod rule;
pub mod score;
pub mod synth;
pub mod trace;
pub mod unit;

pub use context::{ContextUnit, ReasonContext};
pub use engine::{Engine, EngineConfig};
pub use error::{PolyError, PolyResult};
pub use outcome::{Alternative, Conclusion, Reasoning, ReasoningResult, Uncertainty};
pub use paradigm::{Paradigm, ParadigmKind};
pub use registry::{EngineRegistry, ReasonEngine};
