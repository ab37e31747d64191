use std::{
    io::{self, stdout, Write},
    panic, thread,
};

use crossterm::{execute, style::ContentStyle, terminal, QueueableCommand};
use unicode_width::UnicodeWidthChar;

use crate::{dims::Dims, settings::theme::Style, ui::Rect};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    pub character: char,
    pub width: u8,
    pub style: Style,
}

impl Cell {
    pub fn styled(character: char, style: Style) -> Self {
        Cell {
            character,
            width: character.width().unwrap_or(1) as u8,
            style,
        }
    }

    pub fn empty() -> Self {
        Cell {
            character: ' ',
            width: 1,
            style: Style::default(),
        }
    }

    // trailing half of a wide character, skipped when flushing
    fn follower(style: Style) -> Self {
        Cell {
            character: '\0',
            width: 0,
            style,
        }
    }
}

/// Off-screen cell grid the UI draws into. Out-of-bounds draws are
/// clipped per character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    size: Dims,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(size: Dims) -> Self {
        Frame {
            size,
            cells: vec![Cell::empty(); (size.0 * size.1).max(0) as usize],
        }
    }

    pub fn size(&self) -> Dims {
        self.size
    }

    pub fn contains(&self, pos: Dims) -> bool {
        Rect::sized(self.size).contains(pos)
    }

    pub fn resize(&mut self, new_size: Dims) {
        if self.size != new_size {
            *self = Frame::new(new_size);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::empty());
    }

    fn idx(&self, pos: Dims) -> usize {
        (pos.1 * self.size.0 + pos.0) as usize
    }

    pub fn set(&mut self, pos: Dims, cell: Cell) {
        if self.contains(pos) {
            let idx = self.idx(pos);
            self.cells[idx] = cell;
        }
    }

    pub fn draw_char(&mut self, pos: Dims, character: char, style: Style) {
        let cell = Cell::styled(character, style);
        let width = cell.width as i32;
        self.set(pos, cell);
        for x in 1..width {
            self.set(pos + Dims(x, 0), Cell::follower(style));
        }
    }

    pub fn draw(&mut self, pos: Dims, text: impl AsRef<str>, style: Style) {
        let mut x = pos.0;
        for character in text.as_ref().chars() {
            let width = character.width().unwrap_or(1) as i32;
            self.draw_char(Dims(x, pos.1), character, style);
            x += width;
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, cell: Cell) {
        for y in rect.start.1..=rect.end.1 {
            for x in rect.start.0..=rect.end.0 {
                self.set(Dims(x, y), cell);
            }
        }
    }

    fn row(&self, y: i32) -> &[Cell] {
        let start = (y * self.size.0) as usize;
        &self.cells[start..start + self.size.0 as usize]
    }

    /// Plain-text dump, one line per row. Used by tests to assert on
    /// rendered output without a terminal.
    pub fn write(&self, to: &mut impl Write) -> io::Result<()> {
        for y in 0..self.size.1 {
            for cell in self.row(y) {
                if cell.width > 0 {
                    write!(to, "{}", cell.character)?;
                }
            }
            writeln!(to)?;
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        self.write(&mut buf).expect("writing to a Vec cannot fail");
        String::from_utf8(buf).expect("frame contains valid utf-8")
    }
}

/// Double-buffered terminal renderer. Owns the terminal state: raw
/// mode, alternate screen and mouse capture are enabled on creation
/// and restored on drop or panic.
pub struct Renderer {
    size: Dims,
    shown: Frame,
    hidden: Frame,
    full_redraw: bool,
}

impl Renderer {
    pub fn new() -> io::Result<Self> {
        let size: Dims = terminal::size()?.into();

        let mut ren = Renderer {
            size,
            shown: Frame::new(size),
            hidden: Frame::new(size),
            full_redraw: true,
        };

        ren.turn_on()?;

        Ok(ren)
    }

    fn turn_on(&mut self) -> io::Result<()> {
        self.register_panic_hook();

        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            crossterm::cursor::Hide,
            terminal::EnterAlternateScreen,
            crossterm::event::EnableMouseCapture,
        )?;

        Ok(())
    }

    fn turn_off(&mut self) -> io::Result<()> {
        self.unregister_panic_hook();

        execute!(
            stdout(),
            crossterm::cursor::Show,
            terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn register_panic_hook(&self) {
        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let mut stdout = stdout();

            let _ = execute!(
                stdout,
                terminal::LeaveAlternateScreen,
                crossterm::cursor::Show,
                crossterm::event::DisableMouseCapture,
            );
            let _ = terminal::disable_raw_mode();

            prev(info)
        }));
    }

    fn unregister_panic_hook(&self) {
        if !thread::panicking() {
            let _ = panic::take_hook();
        }
    }

    fn on_resize(&mut self, size: Dims) {
        self.size = size;
        self.shown.resize(size);
        self.hidden.resize(size);
        self.full_redraw = true;
    }

    pub fn on_event(&mut self, event: &crossterm::event::Event) {
        if let crossterm::event::Event::Resize(x, y) = event {
            self.on_resize((*x, *y).into());
        }
    }

    pub fn frame(&mut self) -> &mut Frame {
        &mut self.hidden
    }

    pub fn frame_size(&self) -> Dims {
        self.size
    }

    pub fn show(&mut self) -> io::Result<()> {
        let mut tty = stdout();

        use crossterm::style;

        let mut current = ContentStyle::default();
        tty.queue(style::ResetColor)?;

        for y in 0..self.size.1 {
            if self.hidden.row(y) == self.shown.row(y) && !self.full_redraw {
                continue;
            }

            tty.queue(crossterm::cursor::MoveTo(0, y as u16))?;

            for cell in self.hidden.row(y) {
                if cell.width == 0 {
                    continue;
                }

                let cell_style: ContentStyle = cell.style.into();
                if current != cell_style {
                    tty.queue(style::SetAttribute(style::Attribute::Reset))?;
                    tty.queue(style::SetForegroundColor(
                        cell_style.foreground_color.unwrap_or(style::Color::Reset),
                    ))?;
                    tty.queue(style::SetBackgroundColor(
                        cell_style.background_color.unwrap_or(style::Color::Reset),
                    ))?;
                    tty.queue(style::SetAttributes(cell_style.attributes))?;
                    current = cell_style;
                }
                tty.queue(style::Print(cell.character))?;
            }
        }

        tty.flush()?;
        self.full_redraw = false;

        std::mem::swap(&mut self.shown, &mut self.hidden);
        self.hidden.clear();

        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.turn_off();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_clips_to_frame() {
        let mut frame = Frame::new(Dims(5, 2));
        frame.draw(Dims(3, 0), "abcd", Style::default());
        frame.draw(Dims(0, 5), "out", Style::default());

        assert_eq!(frame.to_text(), "   ab\n     \n");
    }

    #[test]
    fn wide_chars_occupy_two_cells() {
        let mut frame = Frame::new(Dims(5, 1));
        frame.draw(Dims(0, 0), "界x", Style::default());
        assert_eq!(frame.to_text(), "界x  \n");
    }

    #[test]
    fn fill_rect_covers_inclusive_bounds() {
        let mut frame = Frame::new(Dims(4, 3));
        frame.fill_rect(
            Rect::sized_at(Dims(1, 1), Dims(2, 2)),
            Cell::styled('#', Style::default()),
        );
        assert_eq!(frame.to_text(), "    \n ## \n ## \n");
    }
}
