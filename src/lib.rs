//! Core library for the bom-sync command line application.
//!
//! The library exposes high-level orchestration helpers that power the
//! command-line interface as well as the tests. The modules are structured to
//! keep responsibilities narrow and composable: IO adapters live under
//! [`io`], data representations inside [`model`] and [`store`], the value and
//! footprint normalizers in [`normalize`], component grouping in [`group`],
//! the reconciliation engine in [`reconcile`], and the end-to-end
//! orchestration under [`sync`].

pub mod error;
pub mod group;
pub mod io;
pub mod model;
pub mod normalize;
pub mod reconcile;
pub mod store;
pub mod sync;

pub use error::{BomError, Result};
