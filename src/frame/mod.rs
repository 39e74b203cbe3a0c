pub mod frame_sequence;
pub mod moving_frame;
pub mod rotation_minimizing;

pub use frame_sequence::*;
pub use moving_frame::*;
