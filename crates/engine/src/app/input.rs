#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    WalkLeft,
    WalkRight,
    Interact,
    Confirm,
    Cancel,
}

const ACTION_COUNT: usize = 5;

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::WalkLeft => 0,
            InputAction::WalkRight => 1,
            InputAction::Interact => 2,
            InputAction::Confirm => 3,
            InputAction::Cancel => 4,
        }
    }

    pub const fn is_movement(self) -> bool {
        matches!(self, InputAction::WalkLeft | InputAction::WalkRight)
    }
}

/// Which actions are currently held down, as seen by one scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldActions {
    down: [bool; ACTION_COUNT],
}

impl HeldActions {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub fn any_movement_down(&self) -> bool {
        self.is_down(InputAction::WalkLeft) || self.is_down(InputAction::WalkRight)
    }

    pub fn clear(&mut self) {
        self.down = [false; ACTION_COUNT];
    }
}
