//! Destination geometry for a snap.
//!
//! Some applications draw their own window chrome and report an outer
//! rectangle that is exactly the size of their client area.  When that
//! happens the target rectangle is nudged by fixed amounts so the visible
//! frame lands where the user asked.

use crate::action::Rect;

/// Added to `left` for custom-chrome windows.
pub const CHROME_LEFT_INSET: i32 = 7;
/// Subtracted from `width` for custom-chrome windows.
pub const CHROME_WIDTH_SHRINK: i32 = 14;
/// Subtracted from `height` for custom-chrome windows.
pub const CHROME_HEIGHT_SHRINK: i32 = 7;

/// The four integers handed to the window manager's move call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMove {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl From<Rect> for ResolvedMove {
    fn from(r: Rect) -> Self {
        Self {
            left: r.x,
            top: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

/// `true` if the window reports an outer rect the same size as its client
/// rect, i.e. it draws its own borders.
pub fn has_custom_chrome(outer: &Rect, client: &Rect) -> bool {
    outer.same_size(client)
}

/// Compute where to move a window so it covers `target`.
///
/// Pure: the caller fetches the window's `outer` and `client` rects and
/// performs the move.
pub fn resolve(target: Rect, outer: Rect, client: Rect) -> ResolvedMove {
    let mut mv = ResolvedMove::from(target);
    if has_custom_chrome(&outer, &client) {
        mv.left = mv.left.saturating_add(CHROME_LEFT_INSET);
        mv.width = mv.width.saturating_sub(CHROME_WIDTH_SHRINK);
        mv.height = mv.height.saturating_sub(CHROME_HEIGHT_SHRINK);
    }
    mv
}

/// Render `rect` as a config line that can be pasted into the `actions`
/// array.
pub fn config_snippet(rect: &Rect) -> String {
    format!(
        r#"{{ "key": "alt win up", "rect": [{}, {}, {}, {}] }},"#,
        rect.x, rect.y, rect.width, rect.height
    )
}
