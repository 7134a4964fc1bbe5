//! Compass drivers

pub mod ak8963;

pub use ak8963::Ak8963;
