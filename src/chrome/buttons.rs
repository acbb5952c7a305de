/*
 * Custom caption-button location. Stateless: reads the template parts exposed
 * by the host and reports which button, if any, a logical point lies over.
 */
use crate::geometry::{PartBounds, PointDip};
use crate::types::{CaptionButton, ChromeHost};

/// Returns the first enabled button whose bounds contain the point, testing
/// in fixed minimize, maximize, close priority regardless of visual order.
/// Buttons the template does not provide are skipped.
pub(crate) fn locate_caption_button(
    point: PointDip,
    host: &impl ChromeHost,
) -> Option<CaptionButton> {
    const PRIORITY: [CaptionButton; 3] = [
        CaptionButton::Minimize,
        CaptionButton::Maximize,
        CaptionButton::Close,
    ];

    PRIORITY.into_iter().find(|&button| {
        host.caption_button(button)
            .is_some_and(|part| part.enabled && button_contains(point, part.bounds))
    })
}

/*
 * Containment test for one button. Horizontal containment is inclusive on
 * both edges. Vertically only the row height bounds the zone: there is no
 * lower bound against the button's top, so each button's hit zone runs all
 * the way to the top edge of the window. Changing this to strict containment
 * alters click behavior near the top edge.
 */
fn button_contains(point: PointDip, bounds: PartBounds) -> bool {
    point.x >= bounds.x && point.x <= bounds.x + bounds.width && point.y <= bounds.height
}
