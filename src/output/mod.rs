mod format;
mod json;
mod summary;

pub(crate) use format::NumberFormat;
pub(crate) use json::output_wrapped_json;
pub(crate) use summary::{SummaryOptions, render_summary};
