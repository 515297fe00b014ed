//! Integration tests for umi-collapse.
//!
//! These tests run the `umi-collapse` binary end to end and exercise library error paths that
//! span several modules.

mod helpers;
mod test_collapse_cells_command;
mod test_collapse_pooled_command;
mod test_collapse_umis_command;
mod test_error_paths;
mod test_filter_cells_command;
mod test_pipeline_command;
mod test_streaming_input;
