//! Parameter System
//!
//! Runtime-adjustable configuration following ArduPilot naming. Parameter
//! groups register their defaults into a [`ParameterStore`] and build driver
//! configuration from it.
//!
//! # Parameter Types
//!
//! - `Bool` - Boolean value
//! - `Int` - 32-bit signed integer

pub mod compass;
pub mod storage;

pub use compass::CompassParams;
pub use storage::{
    ParamFlags, ParamMetadata, ParamValue, ParameterError, ParameterStore, MAX_PARAMS,
    PARAM_NAME_LEN,
};
