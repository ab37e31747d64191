use crossterm::event::KeyEventKind;
use substring::Substring;
use unicode_width::UnicodeWidthStr as _;

use crate::dims::Dims;

pub fn line_center(container_start: i32, container_end: i32, item_width: i32) -> i32 {
    (container_end - container_start - item_width) / 2 + container_start
}

pub fn box_center(container_start: Dims, container_end: Dims, box_dims: Dims) -> Dims {
    Dims(
        line_center(container_start.0, container_end.0, box_dims.0),
        line_center(container_start.1, container_end.1, box_dims.1),
    )
}

pub fn is_release(kind: KeyEventKind) -> bool {
    kind == KeyEventKind::Release
}

pub fn trim_center(text: &str, width: usize) -> &str {
    let str_width = text.width();
    if str_width <= width {
        return text;
    }

    let offset = (str_width - width) / 2;
    text.substring(offset, offset + width)
}
