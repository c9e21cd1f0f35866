pub mod add_to_plan;
pub mod help;
pub mod remove_tot_confirmation;
pub mod tot_form;

use ratatui::layout::Rect;

/// A `width` x `height` rectangle centred in `area`, clipped to it.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
