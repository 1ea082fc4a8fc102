//! Custom Ratatui widget that renders one carousel deck: the swipe status
//! line, the card band and the deck's card list.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::core::{CarouselView, StatusLabel};

use super::layout::card_band;
use super::theme::Theme;

pub struct CarouselWidget<'a> {
    view: CarouselView<'a, String>,
    /// Pixels per terminal column; converts widths and offsets to cells.
    cell_width_px: f64,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(view: CarouselView<'a, String>, cell_width_px: f64) -> Self {
        Self {
            view,
            cell_width_px,
        }
    }

    fn status_text(&self) -> (&'static str, Style) {
        match self.view.status {
            StatusLabel::Auto => ("AUTO TRANSITION", Theme::auto_label_style()),
            StatusLabel::Left => ("LEFT SWIPE", Theme::swipe_label_style()),
            StatusLabel::Right => ("RIGHT SWIPE", Theme::swipe_label_style()),
        }
    }
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width == 0 {
            return;
        }

        let (status, style) = self.status_text();
        buf.set_stringn(area.x, area.y, status, area.width as usize, style);

        let band = card_band(area);
        let card_cols = (self.view.card_width / self.cell_width_px).round().max(1.0) as i32;
        let rest_left = i32::from(band.x) + (i32::from(band.width) - card_cols) / 2;

        // The next card sits at rest underneath and only shows once the
        // current one has moved.
        if self.view.offset != 0.0 {
            let next = self.view.next_card();
            paint_card(buf, band, rest_left, card_cols, next, 1.0);
        }

        let shift = (self.view.offset / self.cell_width_px).round() as i32;
        let current = self.view.current_card();
        paint_card(
            buf,
            band,
            rest_left + shift,
            card_cols,
            current,
            1.0 - self.view.progress,
        );

        let list = format!("{:?}", self.view.cards);
        let list_y = band.bottom();
        if list_y < area.bottom() {
            buf.set_stringn(area.x, list_y, list, area.width as usize, Theme::deck_list_style());
        }
    }
}

/// Visible part of a `cols`-wide card whose left edge is at `left`.
fn clip_to_band(band: Rect, left: i32, cols: i32) -> Option<Rect> {
    let start = left.max(i32::from(band.x));
    let end = (left + cols).min(i32::from(band.right()));
    if start >= end {
        return None;
    }
    Some(Rect {
        x: start as u16,
        width: (end - start) as u16,
        ..band
    })
}

/// Fill a card at `opacity` over what is already in the buffer and centre
/// its label.  The label is dropped once the card is mostly transparent.
fn paint_card(buf: &mut Buffer, band: Rect, left: i32, cols: i32, label: &str, opacity: f64) {
    let Some(visible) = clip_to_band(band, left, cols) else {
        return;
    };
    let rgb = Theme::card_rgb(label);

    for y in visible.top()..visible.bottom() {
        for x in visible.left()..visible.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let under = cell.bg;
                cell.set_bg(Theme::blend(rgb, under, opacity));
                if opacity >= 0.5 {
                    cell.set_char(' ');
                }
            }
        }
    }

    if opacity < 0.5 {
        return;
    }
    let label_row = band.y + band.height / 2;
    let label_left = left + (cols - label.chars().count() as i32) / 2;
    let text_style = Theme::card_text_style();
    for (i, ch) in label.chars().enumerate() {
        let x = label_left + i as i32;
        if x < i32::from(visible.left()) || x >= i32::from(visible.right()) {
            continue;
        }
        if let Some(cell) = buf.cell_mut((x as u16, label_row)) {
            cell.set_char(ch);
            cell.set_fg(text_style.fg.unwrap_or_default());
            cell.modifier.insert(text_style.add_modifier);
        }
    }
}
