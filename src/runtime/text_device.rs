//! Memory-mapped character grid

/// A peripheral that claims a fixed window of machine memory
pub trait MemoryMappedDevice {
    /// Size of the claimed window in bytes
    const NUM_MAPPED_BYTES: usize;
    /// Required alignment of the window's base address
    const ALIGNMENT: usize;
}

/// Read-only view of the text screen
///
/// The view borrows the first [`TextDevice::NUM_MAPPED_BYTES`] bytes of
/// machine memory, so it always reflects the current memory contents. Each
/// byte is one cell; cell `(x, y)` lives at `x + y * NUM_COLUMNS`.
#[derive(Debug, Clone, Copy)]
pub struct TextDevice<'a> {
    mapped: &'a [u8],
}

impl MemoryMappedDevice for TextDevice<'_> {
    const NUM_MAPPED_BYTES: usize = Self::NUM_ROWS * Self::NUM_COLUMNS;
    const ALIGNMENT: usize = 1;
}

impl<'a> TextDevice<'a> {
    /// Screen height in cells
    pub const NUM_ROWS: usize = 24;
    /// Screen width in cells
    pub const NUM_COLUMNS: usize = 80;

    /// Wraps the device window
    ///
    /// Returns `None` unless `mapped` is exactly the window size.
    pub fn new(mapped: &'a [u8]) -> Option<Self> {
        (mapped.len() == Self::NUM_MAPPED_BYTES).then_some(TextDevice { mapped })
    }

    /// Views the window at the start of machine memory
    ///
    /// `memory` must be at least the window size.
    pub(crate) fn from_memory(memory: &'a [u8]) -> Self {
        TextDevice {
            mapped: &memory[..Self::NUM_MAPPED_BYTES],
        }
    }

    /// Raw window bytes
    pub fn bytes(&self) -> &'a [u8] {
        self.mapped
    }

    /// Character in column `x` of row `y`
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        if x >= Self::NUM_COLUMNS || y >= Self::NUM_ROWS {
            return None;
        }
        Some(char::from(self.mapped[x + y * Self::NUM_COLUMNS]))
    }

    /// Raw bytes of row `y`
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        self.mapped.chunks_exact(Self::NUM_COLUMNS).nth(y)
    }

    /// Every row at full width, joined by `\n`; null cells are kept
    pub fn text(&self) -> String {
        self.render(char::from)
    }

    /// Like [`TextDevice::text`] with null cells shown as spaces
    pub fn printable_text(&self) -> String {
        self.render(|byte| match byte {
            0 => ' ',
            other => char::from(other),
        })
    }

    fn render(&self, cell: impl Fn(u8) -> char) -> String {
        let mut text = String::with_capacity(Self::NUM_MAPPED_BYTES + Self::NUM_ROWS - 1);
        for (y, row) in self.mapped.chunks_exact(Self::NUM_COLUMNS).enumerate() {
            if y > 0 {
                text.push('\n');
            }
            text.extend(row.iter().copied().map(&cell));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Vec<u8> {
        vec![0; TextDevice::NUM_MAPPED_BYTES]
    }

    #[test]
    fn test_geometry() {
        assert_eq!(TextDevice::NUM_MAPPED_BYTES, 1920);
        assert_eq!(<TextDevice as MemoryMappedDevice>::ALIGNMENT, 1);
        assert!(TextDevice::new(&[0; 10]).is_none());
    }

    #[test]
    fn test_cell_addressing() {
        let mut memory = window();
        memory[0] = b'H';
        memory[81] = b'i';
        let device = TextDevice::new(&memory).unwrap();

        assert_eq!(device.char_at(0, 0), Some('H'));
        assert_eq!(device.char_at(1, 1), Some('i'));
        assert_eq!(device.char_at(79, 23), Some('\0'));
        assert_eq!(device.char_at(80, 0), None);
        assert_eq!(device.char_at(0, 24), None);
        assert_eq!(device.row(1).map(|row| row[1]), Some(b'i'));
        assert!(device.row(24).is_none());
    }

    #[test]
    fn test_text_projection() {
        let mut memory = window();
        memory[..5].copy_from_slice(b"Hello");
        let device = TextDevice::new(&memory).unwrap();

        let text = device.text();
        assert_eq!(text.len(), 1920 + 23);
        assert_eq!(text.lines().count(), 24);
        assert!(text.starts_with("Hello\0"));

        let printable = device.printable_text();
        assert!(printable.lines().all(|line| line.len() == 80));
        assert!(printable.starts_with("Hello "));
        assert!(!printable.contains('\0'));
    }
}
