//! Cursor state machine over a text or binary buffer.

use crate::data::{DataKind, FileData};
use crate::error::Error;

/// Byte index of the `char_pos`-th character, or the end of the string
/// when `char_pos` is at or past the last character.
fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map_or(s.len(), |(i, _)| i)
}

/// An owned buffer plus the read/write cursor into it.
///
/// Offsets count characters for text buffers and bytes for binary ones.
/// The cursor may sit past the end: reads there return empty, writes pad
/// the gap with NUL and then extend the buffer.
#[derive(Debug, Clone)]
pub(crate) struct Buffer {
    data: FileData,
    cursor: usize,
}

impl Buffer {
    pub(crate) fn new(data: FileData) -> Self {
        Self { data, cursor: 0 }
    }

    pub(crate) fn kind(&self) -> DataKind {
        self.data.kind()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn seek(&mut self, offset: usize) {
        self.cursor = offset;
    }

    /// Full contents regardless of cursor position.
    pub(crate) fn snapshot(&self) -> FileData {
        self.data.clone()
    }

    /// Replaces the contents wholesale, leaving the cursor where it is.
    pub(crate) fn replace(&mut self, data: FileData) {
        self.data = data;
    }

    /// Converts the buffer to the given kind. A kind change resets the
    /// cursor to 0 because its unit changes with the kind.
    pub(crate) fn convert(&mut self, kind: DataKind) {
        if self.data.kind() != kind {
            self.data = self.data.clone().convert(kind);
            self.cursor = 0;
        }
    }

    /// Reads up to `limit` units from the cursor (all remaining when
    /// `None`), advancing the cursor by the amount returned.
    pub(crate) fn read(&mut self, limit: Option<usize>) -> FileData {
        match &self.data {
            FileData::Text(s) => {
                let start = byte_index(s, self.cursor);
                let rest = &s[start..];
                let taken: String = match limit {
                    Some(n) => rest.chars().take(n).collect(),
                    None => rest.to_string(),
                };
                self.cursor += taken.chars().count();
                FileData::Text(taken)
            }
            FileData::Bytes(b) => {
                let start = self.cursor.min(b.len());
                let end = match limit {
                    Some(n) => (start + n).min(b.len()),
                    None => b.len(),
                };
                let taken = b[start..end].to_vec();
                self.cursor += taken.len();
                FileData::Bytes(taken)
            }
        }
    }

    /// Reads the next line including its terminator, advancing the cursor
    /// past it. Empty at end-of-buffer.
    pub(crate) fn read_line(&mut self) -> FileData {
        match &self.data {
            FileData::Text(s) => {
                let start = byte_index(s, self.cursor);
                let rest = &s[start..];
                let line = match rest.find('\n') {
                    Some(pos) => &rest[..=pos],
                    None => rest,
                };
                let taken = line.to_string();
                self.cursor += taken.chars().count();
                FileData::Text(taken)
            }
            FileData::Bytes(b) => {
                let start = self.cursor.min(b.len());
                let rest = &b[start..];
                let line = match rest.iter().position(|&c| c == b'\n') {
                    Some(pos) => &rest[..=pos],
                    None => rest,
                };
                let taken = line.to_vec();
                self.cursor += taken.len();
                FileData::Bytes(taken)
            }
        }
    }

    /// Reads all remaining lines, leaving the cursor at the end.
    pub(crate) fn read_lines(&mut self) -> Vec<FileData> {
        let mut lines = Vec::new();
        loop {
            let line = self.read_line();
            if line.is_empty() {
                break;
            }
            lines.push(line);
        }
        lines
    }

    /// Writes `data` at the cursor, overwriting and extending as needed,
    /// and advances the cursor by `data.len()`.
    pub(crate) fn write(&mut self, data: &FileData) -> Result<usize, Error> {
        if data.kind() != self.data.kind() {
            return Err(Error::TypeMismatch { data: data.kind(), buffer: self.data.kind() });
        }

        match (&mut self.data, data) {
            (FileData::Text(s), FileData::Text(incoming)) => {
                let char_len = s.chars().count();
                if self.cursor > char_len {
                    s.extend(std::iter::repeat('\0').take(self.cursor - char_len));
                }
                let written = incoming.chars().count();
                let start = byte_index(s, self.cursor);
                let end = byte_index(s, self.cursor + written);
                s.replace_range(start..end, incoming);
                self.cursor += written;
                Ok(written)
            }
            (FileData::Bytes(b), FileData::Bytes(incoming)) => {
                let end = self.cursor + incoming.len();
                if end > b.len() {
                    b.resize(end, 0);
                }
                b[self.cursor..end].copy_from_slice(incoming);
                self.cursor = end;
                Ok(incoming.len())
            }
            _ => unreachable!("kinds checked above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Buffer {
        Buffer::new(FileData::from(s))
    }

    #[test]
    fn read_all_from_start() {
        let mut buf = text("no place like home");
        assert_eq!(buf.read(None), "no place like home");
        assert_eq!(buf.cursor(), 18);
        assert_eq!(buf.read(None), "");
    }

    #[test]
    fn bounded_reads_tile_the_buffer() {
        let mut buf = text("0123456789");
        assert_eq!(buf.read(Some(4)), "0123");
        assert_eq!(buf.read(Some(4)), "4567");
        assert_eq!(buf.read(None), "89");
    }

    #[test]
    fn read_line_includes_terminator() {
        let mut buf = text("foo\nbar\nbaz");
        assert_eq!(buf.read_line(), "foo\n");
        assert_eq!(buf.read_line(), "bar\n");
        assert_eq!(buf.read_line(), "baz");
        assert_eq!(buf.read_line(), "");
    }

    #[test]
    fn read_lines_drains_the_rest() {
        let mut buf = text("a\nb\nc\n");
        assert_eq!(buf.read_line(), "a\n");
        let rest = buf.read_lines();
        assert_eq!(rest, vec![FileData::from("b\n"), FileData::from("c\n")]);
        assert_eq!(buf.read_line(), "");
    }

    #[test]
    fn write_overwrites_at_cursor() {
        let mut buf = text("0123456789");
        buf.seek(2);
        assert_eq!(buf.write(&FileData::from("XY")).unwrap(), 2);
        assert_eq!(buf.cursor(), 4);
        assert_eq!(buf.snapshot(), "01XY456789");
    }

    #[test]
    fn write_past_end_pads_with_nul() {
        let mut buf = text("ab");
        buf.seek(4);
        buf.write(&FileData::from("cd")).unwrap();
        assert_eq!(buf.snapshot(), "ab\0\0cd");
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn write_extends_binary_buffer() {
        let mut buf = Buffer::new(FileData::from(vec![1u8, 2]));
        buf.seek(1);
        buf.write(&FileData::from(vec![9u8, 9, 9])).unwrap();
        assert_eq!(buf.snapshot(), &[1u8, 9, 9, 9][..]);
        assert_eq!(buf.cursor(), 4);
    }

    #[test]
    fn kind_mismatch_leaves_buffer_untouched() {
        let mut buf = text("abc");
        let err = buf.write(&FileData::from(vec![1u8])).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch { data: DataKind::Binary, buffer: DataKind::Text }
        );
        assert_eq!(buf.snapshot(), "abc");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn replace_keeps_cursor() {
        let mut buf = text("abcdef");
        buf.seek(3);
        buf.replace(FileData::from("xyz123"));
        assert_eq!(buf.cursor(), 3);
        assert_eq!(buf.read(None), "123");
    }

    #[test]
    fn convert_resets_cursor() {
        let mut buf = text("abc");
        buf.seek(2);
        buf.convert(DataKind::Binary);
        assert_eq!(buf.cursor(), 0);
        assert_eq!(buf.read(None), &b"abc"[..]);
    }

    #[test]
    fn multibyte_text_cursor_counts_characters() {
        let mut buf = text("é\nü\n");
        assert_eq!(buf.read_line(), "é\n");
        assert_eq!(buf.cursor(), 2);
        assert_eq!(buf.read_line(), "ü\n");
        assert_eq!(buf.read_line(), "");
    }
}
