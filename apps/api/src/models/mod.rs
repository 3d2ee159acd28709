pub mod cv;
pub mod wire;
