//! Conversion from winit platform events to LinkSpan touch input.
//!
//! Hosts driving a winit event loop can feed `WindowEvent::Touch` payloads
//! straight through [`touch_input`]; everything else about event delivery
//! stays the host's concern.

use winit::event::{Touch, TouchPhase as WinitTouchPhase};

use crate::events::{TouchInput, TouchPhase};
use crate::geometry::Point;

/// Converts a winit `TouchPhase` to a LinkSpan [`TouchPhase`].
pub fn from_winit_touch_phase(phase: WinitTouchPhase) -> TouchPhase {
    match phase {
        WinitTouchPhase::Started => TouchPhase::Started,
        WinitTouchPhase::Moved => TouchPhase::Moved,
        WinitTouchPhase::Ended => TouchPhase::Ended,
        WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

/// Converts a winit touch event into a [`TouchInput`] sample.
///
/// The position is taken in window coordinates; hosts whose labels do not
/// sit at the window origin should translate it into label-local space
/// first.
pub fn touch_input(touch: &Touch) -> TouchInput {
    TouchInput::new(
        Point::new(touch.location.x as f32, touch.location.y as f32),
        from_winit_touch_phase(touch.phase),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_phase_conversion() {
        assert_eq!(
            from_winit_touch_phase(WinitTouchPhase::Started),
            TouchPhase::Started
        );
        assert_eq!(
            from_winit_touch_phase(WinitTouchPhase::Moved),
            TouchPhase::Moved
        );
        assert_eq!(
            from_winit_touch_phase(WinitTouchPhase::Ended),
            TouchPhase::Ended
        );
        assert_eq!(
            from_winit_touch_phase(WinitTouchPhase::Cancelled),
            TouchPhase::Cancelled
        );
    }
}
