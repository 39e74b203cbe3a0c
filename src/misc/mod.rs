pub mod error;
pub mod floating_point;
pub mod invertible;
pub mod tolerance;

pub use error::*;
pub use floating_point::*;
pub use invertible::*;
pub use tolerance::*;
