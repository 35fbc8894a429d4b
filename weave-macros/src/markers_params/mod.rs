pub mod extracts_marker_params;
pub mod get_marker_params;
pub mod remove_marker_controller_fn;
