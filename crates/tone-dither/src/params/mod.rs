//! Pipeline parameters.
//!
//! [`PipelineParams`] is the validated, typed parameter set the passes
//! consume. [`ParamInput`] is the loose form that arrives from users
//! (strings for style and colors, every field optional) and is resolved
//! against a set of defaults.

mod input;
mod params;

pub use input::ParamInput;
pub use params::PipelineParams;
