pub mod button;
pub mod countdown;
pub mod input;
pub mod menu;
pub mod rect;
pub mod supplement;

use std::io;

pub use rect::Rect;

use crate::{
    dims::Dims,
    helpers::box_center,
    renderer::Frame,
    settings::theme::{Style, Theme},
};

/// Anything the app loop can draw for the active activity.
pub trait Screen {
    fn draw(&self, frame: &mut Frame, theme: &Theme) -> Result<(), io::Error>;
}

pub fn center_box_in_screen(screen: Dims, box_dims: Dims) -> Dims {
    box_center(Dims(0, 0), screen - Dims(1, 1), box_dims)
}

pub fn draw_line(frame: &mut Frame, pos: Dims, vertical: bool, len: usize, style: Style) {
    let d = if vertical { Dims(0, 1) } else { Dims(1, 0) };
    let chr = if vertical { '│' } else { '─' };

    for i in 0..len {
        let pos = pos + d * i as i32;
        frame.draw_char(pos, chr, style);
    }
}

pub fn draw_box(frame: &mut Frame, pos: Dims, size: Dims, style: Style) {
    if size.0 == 1 && size.1 > 1 {
        draw_line(frame, pos, true, size.1 as usize, style);
        return;
    }

    if size.1 == 1 && size.0 > 1 {
        draw_line(frame, pos, false, size.0 as usize, style);
        return;
    }

    frame.draw_char(pos, '╭', style);
    draw_line(frame, Dims(pos.0 + 1, pos.1), false, size.0 as usize - 2, style);
    frame.draw_char(Dims(pos.0 + size.0 - 1, pos.1), '╮', style);

    for y in pos.1 + 1..pos.1 + size.1 - 1 {
        frame.draw_char(Dims(pos.0, y), '│', style);
        frame.draw_char(Dims(pos.0 + size.0 - 1, y), '│', style);
    }

    let bottom = pos.1 + size.1 - 1;
    frame.draw_char(Dims(pos.0, bottom), '╰', style);
    draw_line(frame, Dims(pos.0 + 1, bottom), false, size.0 as usize - 2, style);
    frame.draw_char(Dims(pos.0 + size.0 - 1, bottom), '╯', style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_outline() {
        let mut frame = Frame::new(Dims(5, 3));
        draw_box(&mut frame, Dims(0, 0), Dims(4, 3), Style::default());
        assert_eq!(frame.to_text(), "╭──╮ \n│  │ \n╰──╯ \n");
    }
}
