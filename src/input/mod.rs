pub use map::KeyBindings;
pub use sources::{Axis, Direction, KeyAction, Rotation};

mod map;
mod sources;
