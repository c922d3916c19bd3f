//! A gallery of creational and behavioural design patterns.
//!
//! Each pattern lives in its own module under [`patterns`] and can be run as
//! a self-narrating demo through [`core::engine::DemoEngine`].
pub mod core;
pub mod patterns;
pub mod utils;

pub use crate::core::error::{PatternError, Result};
