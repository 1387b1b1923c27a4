//! Pathway Filter Engine
//!
//! Drives the four-stage pathway (Worldview → Outcome → Problem → Project)
//! from an explicit selection state.
//!
//! # Overview
//!
//! - **Selection**: chosen ids per stage, changed only through consuming
//!   transitions
//! - **Cascade policy**: whether emptying a stage clears the stages to its
//!   right (guided mode) or keeps them (explorer mode)
//! - **Derivation**: pure functions from selection to candidate sets
//! - **Project filter**: text, category and organization, intersected with
//!   the pathway result
//! - **Engine**: dataset, index, configuration and a moka-backed view cache
//!
//! # Example
//!
//! ```rust
//! use pathway_engine::prelude::*;
//! use pathway_model::{Dataset, Outcome, Problem, Project, RelevanceGrade, Worldview};
//! use std::sync::Arc;
//!
//! let dataset = Dataset::new(
//!     vec![Worldview::new("w1", "Stewards")],
//!     vec![Outcome::new("o1", "Clean rivers").with_grade("w1", RelevanceGrade::High)],
//!     vec![Problem::new("p1", "Runoff").affecting("o1")],
//!     vec![Project::new("r1", "Buffer strips").addressing("p1")],
//! );
//!
//! let engine = PathwayEngine::with_defaults(Arc::new(dataset));
//! let selection = SelectionState::new().toggle_worldview("w1", CascadePolicy::Clear);
//! let view = engine.view(&selection, &ProjectFilter::new());
//!
//! assert!(view.projects.contains("r1"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod config;
pub mod derive;
pub mod engine;
pub mod error;
pub mod filter;
pub mod selection;
pub mod session;
pub mod view;

// Re-exports
pub use cache::{CacheStats, ViewCache};
pub use config::{EngineConfig, ExplorerMode};
pub use engine::PathwayEngine;
pub use error::ConfigError;
pub use filter::{Facets, ProjectFilter};
pub use selection::{CascadePolicy, SelectionStage, SelectionState};
pub use session::Session;
pub use view::{OutcomeCandidate, PathwayView, StageCounts};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the pathway
    pub use crate::{
        CascadePolicy, EngineConfig, ExplorerMode, PathwayEngine, PathwayView, ProjectFilter,
        SelectionStage, SelectionState, Session,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
