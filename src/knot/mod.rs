pub mod knot_multiplicity;
pub mod knot_span;
pub mod knot_type;
pub mod knot_vector;
pub use knot_multiplicity::*;
pub use knot_span::*;
pub use knot_type::*;
pub use knot_vector::*;
