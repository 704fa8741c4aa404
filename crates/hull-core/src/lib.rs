pub mod error;
pub mod fs;
pub mod tolerance;
pub mod traits;
pub mod units;

pub use error::{HullError, Result};
pub use fs::write_atomic;
pub use tolerance::Tolerance;
pub use traits::Validate;
