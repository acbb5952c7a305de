/*
 * Region classification for non-client hit-testing. Given a screen point and
 * the current window geometry, decides whether the point falls on a resize
 * edge, a top corner, the caption drag band, or none of these. The caller
 * layers custom-button and content-visibility overrides on top.
 */
use crate::geometry::{PointPx, RectPx};
use crate::types::HitRegion;

/*
 * Classifies a device-pixel screen point against the window rectangle.
 *
 * The checks run in a fixed order and later checks overwrite earlier ones on
 * purpose: a point inside the caption band that is also within the border of
 * a side edge resolves to that edge, and a point within the top border band
 * supersedes both, so the window stays resizable from the strip the caption
 * would otherwise swallow. Corners use twice the edge thickness, which gives
 * a larger grab target where two edges meet.
 */
pub(crate) fn classify_region(
    screen: PointPx,
    window: RectPx,
    border_px: i32,
    caption_px: i32,
) -> HitRegion {
    let rel_x = screen.x - window.left;
    let rel_y = screen.y - window.top;

    let mut region = HitRegion::Nowhere;

    if rel_y <= caption_px {
        region = HitRegion::Caption;

        if rel_x <= border_px {
            region = HitRegion::ResizeLeft;
        } else if window.right - screen.x <= border_px {
            region = HitRegion::ResizeRight;
        }
    }

    if rel_y <= border_px {
        region = HitRegion::ResizeTop;

        if rel_x <= border_px * 2 {
            region = HitRegion::ResizeTopLeft;
        } else if window.right - screen.x <= border_px * 2 {
            region = HitRegion::ResizeTopRight;
        }
    }

    region
}

/// Shrinks the proposed client rectangle for the non-client size calculation:
/// left, right and bottom are inset by the border thickness while the top is
/// left untouched, so content reaches the top window edge and the caption row
/// replaces the OS title bar.
pub(crate) fn shrink_for_frame(client: RectPx, border_px: i32) -> RectPx {
    RectPx {
        left: client.left + border_px,
        top: client.top,
        right: client.right - border_px,
        bottom: client.bottom - border_px,
    }
}
