use winit::event::{ElementState, KeyEvent};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Positive => 1.0,
            Direction::Negative => -1.0,
        }
    }
}

/// A rotation about one axis, bound to a key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Rotation {
    pub axis: Axis,
    pub direction: Direction,
}

impl Rotation {
    pub fn new(axis: Axis, direction: Direction) -> Self {
        Rotation { axis, direction }
    }

    /// Euler angles `(z, x, y)` for turning `degrees` about this rotation's axis.
    pub fn euler(self, degrees: f32) -> (f32, f32, f32) {
        let angle = self.direction.sign() * degrees;
        match self.axis {
            Axis::Z => (angle, 0.0, 0.0),
            Axis::X => (0.0, angle, 0.0),
            Axis::Y => (0.0, 0.0, angle),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyAction {
    Release,
    Press,
    Repeat,
}

impl KeyAction {
    /// How many rotation steps the action is worth: a press turns once, auto-repeat twice.
    pub fn steps(self) -> u32 {
        match self {
            KeyAction::Release => 0,
            KeyAction::Press => 1,
            KeyAction::Repeat => 2,
        }
    }
}

impl From<&KeyEvent> for KeyAction {
    fn from(event: &KeyEvent) -> Self {
        match (event.state, event.repeat) {
            (ElementState::Released, _) => KeyAction::Release,
            (ElementState::Pressed, false) => KeyAction::Press,
            (ElementState::Pressed, true) => KeyAction::Repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euler_places_angle_on_axis() {
        assert_eq!(
            Rotation::new(Axis::Z, Direction::Positive).euler(2.0),
            (2.0, 0.0, 0.0)
        );
        assert_eq!(
            Rotation::new(Axis::X, Direction::Negative).euler(1.0),
            (0.0, -1.0, 0.0)
        );
        assert_eq!(
            Rotation::new(Axis::Y, Direction::Positive).euler(0.5),
            (0.0, 0.0, 0.5)
        );
    }

    #[test]
    fn action_steps() {
        assert_eq!(KeyAction::Release.steps(), 0);
        assert_eq!(KeyAction::Press.steps(), 1);
        assert_eq!(KeyAction::Repeat.steps(), 2);
    }
}
