/*
 * Hover/press tracker for the custom caption buttons. Transient per-pointer
 * state only: it is reset by pointer-leave and cleared whenever a press
 * completes, and is mutated exclusively by the engine in response to
 * non-client pointer notifications.
 */
use crate::types::CaptionButton;

#[derive(Debug, Default)]
pub(crate) struct CaptionButtonTracker {
    hovered: Option<CaptionButton>,
    pressed: Option<CaptionButton>,
    left_pressed_button: bool,
}

impl CaptionButtonTracker {
    pub(crate) fn hovered(&self) -> Option<CaptionButton> {
        self.hovered
    }

    pub(crate) fn pressed(&self) -> Option<CaptionButton> {
        self.pressed
    }

    /// True while a press is held and the pointer has moved off the pressed
    /// button; the visual layer uses this to suppress hover feedback until
    /// the pointer returns or the press ends.
    pub(crate) fn left_pressed_button(&self) -> bool {
        self.left_pressed_button
    }

    pub(crate) fn pointer_moved(&mut self, over: Option<CaptionButton>) {
        self.hovered = over;
        self.left_pressed_button = false;

        if self.pressed.is_some() && self.hovered != self.pressed {
            self.hovered = None;
            self.left_pressed_button = true;
        }
    }

    /// Records a press on whichever button the pointer is over. Returns true
    /// when a button captured the press, in which case the caller reports the
    /// notification as handled to suppress the default caption behavior.
    pub(crate) fn press(&mut self, over: Option<CaptionButton>) -> bool {
        self.pressed = over;
        self.pressed.is_some()
    }

    /// Completes a press. The released button is activated only when the
    /// pointer is still over the button the press started on; the pressed
    /// state clears regardless.
    pub(crate) fn release(&mut self, over: Option<CaptionButton>) -> Option<CaptionButton> {
        self.hovered = over;
        let activated = if over.is_some() && over == self.pressed {
            over
        } else {
            None
        };
        self.pressed = None;
        activated
    }

    pub(crate) fn pointer_left(&mut self) {
        self.hovered = None;
        self.pressed = None;
    }
}
