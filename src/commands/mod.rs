//! CLI command implementations for umi-collapse.
//!
//! Each submodule implements one subcommand.
//!
//! # Command Categories
//!
//! ## Collapsing
//! - [`collapse_umis`] - Correct UMIs and collapse read-level records per (cell, UMI)
//! - [`collapse_pooled`] - Collapse records per (UMI, cluster id)
//! - [`collapse_cells`] - Collapse per-UMI records per cell
//!
//! ## Filtering
//! - [`filter_cells`] - Keep cells supported by exactly one well-covered outcome
//!
//! ## Workflows
//! - [`pipeline`] - Run per-UMI collapsing, per-cell collapsing and filtering in one pass

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod collapse_cells;
pub mod collapse_pooled;
pub mod collapse_umis;
pub mod command;
pub mod common;
pub mod filter_cells;
pub mod pipeline;
