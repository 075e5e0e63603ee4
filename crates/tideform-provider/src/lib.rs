//! Tideform provider abstraction
//!
//! This crate holds the pieces every Tideform resource implementation shares
//! with the host runtime that drives it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  Host runtime                    │
//! │         (plan / apply, state persistence)        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               tideform-provider                  │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   trait Resource { create/read/... }      │   │
//! │  │   trait DataSource { read }               │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ ResourceData │  │  Plan / Mask │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼───────┐
//! │ tideform-apps │
//! │  (App Platform)│
//! └───────────────┘
//! ```

pub mod action;
pub mod data;
pub mod diagnostic;
pub mod error;
pub mod provider;
pub mod sensitive;

// Re-exports
pub use action::{ActionType, Plan};
pub use data::ResourceData;
pub use diagnostic::Diagnostic;
pub use error::{ProviderError, Result};
pub use provider::{DataSource, OperationContext, Resource, Timeouts};
pub use sensitive::{MASK, mask_sensitive};
