//! Resident input text with a lazily built line index.

use std::cell::OnceCell;

use hime_ir::{TextContext, TextPosition, TextSpan};

/// Whether `c` ends a line on its own.
///
/// CR is handled separately since it may pair with a following LF.
#[inline]
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

#[inline]
fn is_line_ending_char(c: char) -> bool {
    c == '\r' || is_line_break(c)
}

/// Start index of every line.
///
/// CRLF counts as one line ending. A CR not followed by LF ends its line
/// as well, which can only be seen on the next character (or at the end).
fn find_lines(content: &[char]) -> Vec<usize> {
    let mut lines = vec![0];
    let mut previous = '\0';
    for (i, &c) in content.iter().enumerate() {
        if previous == '\r' && c != '\n' {
            lines.push(i);
        }
        if is_line_break(c) {
            lines.push(i + 1);
        }
        previous = c;
    }
    if previous == '\r' {
        lines.push(content.len());
    }
    lines
}

/// The input of a parser, fully resident in memory.
///
/// Line numbers and columns are 1-based; indices are 0-based and count
/// characters.
#[derive(Debug, Clone)]
pub struct Text {
    content: Vec<char>,
    /// Built on the first line or position query.
    lines: OnceCell<Vec<usize>>,
}

impl Text {
    pub fn new(input: &str) -> Self {
        Text {
            content: input.chars().collect(),
            lines: OnceCell::new(),
        }
    }

    #[inline]
    fn lines(&self) -> &[usize] {
        self.lines.get_or_init(|| find_lines(&self.content))
    }

    /// The content as characters.
    #[inline]
    pub fn as_chars(&self) -> &[char] {
        &self.content
    }

    /// Number of characters.
    #[inline]
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Whether `index` is at or past the end of the text.
    #[inline]
    pub fn is_end(&self, index: usize) -> bool {
        index >= self.content.len()
    }

    /// # Panics
    /// Panics if `index` is past the end.
    #[inline]
    pub fn char_at(&self, index: usize) -> char {
        self.content[index]
    }

    /// The `length` characters starting at `index`.
    pub fn value(&self, index: usize, length: usize) -> String {
        self.content[index..index + length].iter().collect()
    }

    pub fn value_for(&self, span: TextSpan) -> String {
        self.value(span.index, span.length)
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }

    /// Index of the first character of `line`.
    ///
    /// # Panics
    /// Panics if `line` is 0 or greater than [`Text::line_count`].
    pub fn line_index(&self, line: usize) -> usize {
        self.lines()[line - 1]
    }

    /// Length of `line`, including its line ending.
    pub fn line_length(&self, line: usize) -> usize {
        let lines = self.lines();
        match lines.get(line) {
            Some(&next) => next - lines[line - 1],
            None => self.content.len() - lines[line - 1],
        }
    }

    /// Content of `line`, including its line ending.
    pub fn line_content(&self, line: usize) -> String {
        self.value(self.line_index(line), self.line_length(line))
    }

    /// Line and column of the character at `index`.
    ///
    /// `index` may be the size of the text, for the end position.
    pub fn position_at(&self, index: usize) -> TextPosition {
        let lines = self.lines();
        // lines[0] == 0, so at least one start is <= index
        let line = lines.partition_point(|&start| start <= index) - 1;
        TextPosition::new(line + 1, index - lines[line] + 1)
    }

    /// Context pointing at a single character.
    pub fn context_at(&self, position: TextPosition) -> TextContext {
        self.context_for(position, 1)
    }

    /// Context pointing at `length` characters from `position`.
    ///
    /// The line is shown without its line ending, and without its leading
    /// whitespace unless the position falls inside it. Tabs before the
    /// position are kept in the pointer so it lines up when displayed.
    pub fn context_for(&self, position: TextPosition, length: usize) -> TextContext {
        let carets = "^".repeat(length.max(1));
        let first = self.line_index(position.line);
        let line = &self.content[first..first + self.line_length(position.line)];
        if line.is_empty() {
            return TextContext {
                content: String::new(),
                pointer: carets,
            };
        }

        let column = (position.column.saturating_sub(1)).min(line.len());
        let mut end = line.len();
        while end > 0 && is_line_ending_char(line[end - 1]) {
            end -= 1;
        }
        let mut start = line[..end].iter().take_while(|c| c.is_whitespace()).count();
        if column < start {
            start = 0;
        }

        let mut pointer: String = line[start..column]
            .iter()
            .map(|&c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        pointer.push_str(&carets);
        TextContext {
            content: line[start..end].iter().collect(),
            pointer,
        }
    }

    /// Context pointing at a span.
    pub fn context_of(&self, span: TextSpan) -> TextContext {
        self.context_for(self.position_at(span.index), span.length)
    }
}

impl From<&str> for Text {
    fn from(input: &str) -> Self {
        Text::new(input)
    }
}
