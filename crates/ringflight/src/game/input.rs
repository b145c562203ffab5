//! Maps raw host input to the game's single gesture: the primary tap.

use crate::input::queue::{InputEvent, InputQueue};

const KEY_ENTER: u32 = 13;
const KEY_SPACE: u32 = 32;
const KEY_ARROW_UP: u32 = 38;

/// Pointer down, or Enter / Space / ArrowUp pressed.
pub fn is_primary(event: &InputEvent) -> bool {
    match *event {
        InputEvent::PointerDown { .. } => true,
        InputEvent::KeyDown { key_code } => {
            matches!(key_code, KEY_ENTER | KEY_SPACE | KEY_ARROW_UP)
        }
        InputEvent::PointerUp { .. } | InputEvent::KeyUp { .. } => false,
    }
}

/// Number of primary taps waiting in the queue.
pub fn primary_taps(input: &InputQueue) -> usize {
    input.iter().filter(|e| is_primary(e)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_presses_count() {
        let input = InputQueue::from(vec![
            InputEvent::PointerDown { x: 5.0, y: 5.0 },
            InputEvent::PointerUp { x: 5.0, y: 5.0 },
            InputEvent::KeyDown { key_code: KEY_SPACE },
            InputEvent::KeyUp { key_code: KEY_SPACE },
            InputEvent::KeyDown { key_code: 65 },
        ]);
        assert_eq!(primary_taps(&input), 2);
    }

    #[test]
    fn enter_and_arrow_up_are_taps() {
        assert!(is_primary(&InputEvent::KeyDown { key_code: KEY_ENTER }));
        assert!(is_primary(&InputEvent::KeyDown { key_code: KEY_ARROW_UP }));
        assert!(!is_primary(&InputEvent::KeyDown { key_code: 40 }));
    }
}
