mod date_part;
mod error;
mod pallet;
#[cfg(feature = "serde")]
mod serde;
mod series;

pub use date_part::*;
pub use error::*;
pub use pallet::*;
pub use series::*;
