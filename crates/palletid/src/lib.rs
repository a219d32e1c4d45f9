#![doc = include_str!("../README.md")]

mod error;
mod generator;
mod id;
mod rand;
mod random_native;
mod retry;
mod service;
mod sleep;
mod store;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::random_native::*;
pub use crate::retry::*;
pub use crate::service::*;
pub use crate::sleep::*;
pub use crate::store::*;
pub use crate::time::*;
