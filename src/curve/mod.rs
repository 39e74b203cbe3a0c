pub mod bisect;
pub mod chord_lengths;
pub mod evaluation;
pub mod length;
pub mod spline;
pub use bisect::*;
pub use chord_lengths::*;
pub use evaluation::*;
pub use spline::*;
