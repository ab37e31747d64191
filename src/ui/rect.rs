use substring::Substring as _;

use crate::{dims::Dims, helpers::box_center};

/// Rectangle with inclusive `start` and `end` corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub start: Dims,
    pub end: Dims,
}

impl Rect {
    pub fn new(start: Dims, end: Dims) -> Self {
        Self { start, end }
    }

    pub fn sized_at(start: Dims, size: Dims) -> Self {
        Self::new(start, Dims(start.0 + size.0, start.1 + size.1) - Dims(1, 1))
    }

    pub fn sized(size: Dims) -> Self {
        Self::sized_at(Dims(0, 0), size)
    }

    pub fn size(&self) -> Dims {
        Dims(self.end.0 - self.start.0, self.end.1 - self.start.1) + Dims(1, 1)
    }

    pub fn contains(&self, pos: Dims) -> bool {
        (self.start.0..=self.end.0).contains(&pos.0) && (self.start.1..=self.end.1).contains(&pos.1)
    }

    pub fn centered(&self, inner: Dims) -> Self {
        let pos = box_center(self.start, self.end, inner);
        Self::sized_at(pos, inner)
    }

    pub fn margin(&self, margin: Dims) -> Self {
        Self {
            start: self.start + margin,
            end: self.end - margin,
        }
    }

    pub fn offset(&self, offset: Dims) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Clips `text` drawn at absolute `pos` to this rect, returning the
    /// visible part and its adjusted position.
    pub fn trim_absolute<'a>(
        &'a self,
        text: &'a impl AsRef<str>,
        mut pos: Dims,
    ) -> (&'a str, Dims) {
        let mut text = text.as_ref();
        let size = self.size();

        if pos.1 < self.start.1 || pos.1 > self.end.1 {
            return ("", pos);
        }

        if pos.0 < self.start.0 {
            let offset = self.start.0 - pos.0;
            text = text.substring(offset as usize, text.chars().count());
            pos = Dims(self.start.0, pos.1);
        }

        if text.chars().count() as i32 + pos.0 > self.end.0 {
            let x = size.0 - (pos.0 - self.start.0);
            let x = x.max(0) as usize;
            text = text.substring(0, x);
        }

        (text, pos)
    }

    pub fn trim_relative<'a>(&'a self, text: &'a impl AsRef<str>, pos: Dims) -> (&'a str, Dims) {
        let (text, pos) = self.trim_absolute(text, pos + self.start);
        (text, pos - self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::{Dims, Rect};

    #[test]
    fn frame_trim_absolute() {
        let frame = Rect::sized(Dims(3, 1));
        let (text, ..) = frame.trim_absolute(&"123456", Dims(0, 0));
        assert_eq!(text, "123");

        let (text, ..) = frame.trim_absolute(&"123456", Dims(1, 0));
        assert_eq!(text, "12");

        let (text, ..) = frame.trim_absolute(&"123456", Dims(-1, 0));
        assert_eq!(text, "234");

        let (text, ..) = frame.trim_absolute(&"123456", Dims(-4, 0));
        assert_eq!(text, "56");

        let (text, ..) = frame.trim_absolute(&"123456", Dims(-3, 0));
        assert_eq!(text, "456");
    }

    #[test]
    fn sized_rect_roundtrips() {
        let rect = Rect::sized_at(Dims(2, 3), Dims(4, 5));
        assert_eq!(rect.size(), Dims(4, 5));
        assert!(rect.contains(Dims(5, 7)));
        assert!(!rect.contains(Dims(6, 7)));
    }

    #[test]
    fn centered_inside() {
        let outer = Rect::sized(Dims(10, 5));
        let inner = outer.centered(Dims(4, 1));
        assert_eq!(inner.start, Dims(3, 2));
        assert_eq!(inner.size(), Dims(4, 1));
    }
}
