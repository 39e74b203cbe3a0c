pub mod insert_knot;
pub mod split;

pub use split::*;

#[cfg(test)]
mod tests;
