mod allocator;
mod series;

pub use allocator::*;
pub use series::*;
