mod curve;
mod decompose;
mod derivative;
mod frame;
mod interpolation;
mod knot;
mod misc;
mod morph;
mod refine;
mod reshape;

pub mod prelude {
    pub use crate::curve::*;
    pub use crate::decompose::*;
    pub use crate::frame::*;
    pub use crate::interpolation::*;
    pub use crate::knot::*;
    pub use crate::misc::*;
    pub use crate::morph::*;
    pub use crate::refine::*;
}
