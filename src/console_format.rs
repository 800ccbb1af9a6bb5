//! Console formatting module - pure rendering concerns
//!
//! This module handles:
//! - Boxed table layout and borders
//! - Color terminal output
//! - Text truncation and padding
//! - Number and money formatting
//!
//! It accepts pre-formatted cells from the report module and renders them.
//!
//! ## Output Flexibility
//!
//! `TableWriter` writes to any `std::io::Write` destination: stdout with
//! optional colors, a `Vec<u8>` for Markdown export, or a file.

use std::io::{self, Write};
use std::sync::OnceLock;
use term::color::Color;
use term::Terminal;
use term::terminfo::TerminfoTerminal;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Narrowest a shrinkable column is allowed to get
const MIN_FLEX_WIDTH: usize = 12;

/// Horizontal alignment of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Column definition for `TableWriter::write_table`
#[derive(Debug, Clone)]
pub struct Column {
    pub title: &'static str,
    pub align: Align,
    /// Column gives up width first when the table is wider than the console
    pub flexible: bool,
}

impl Column {
    pub fn left(title: &'static str) -> Self {
        Self { title, align: Align::Left, flexible: false }
    }

    pub fn right(title: &'static str) -> Self {
        Self { title, align: Align::Right, flexible: false }
    }

    pub fn flexible(title: &'static str) -> Self {
        Self { title, align: Align::Left, flexible: true }
    }
}

/// Writer for report output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
    max_width: usize,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer sized to the console width
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self::with_width(writer, use_colors, get_console_width())
    }

    /// Create a table writer with an explicit maximum line width
    pub fn with_width(writer: W, use_colors: bool, max_width: usize) -> Self {
        Self { writer, use_colors, max_width }
    }

    /// Write formatted text, optionally with color
    pub fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors {
            if let Some(mut t) = TerminfoTerminal::new(&mut self.writer) {
                let _ = t.fg(color);
                let _ = t.attr(term::Attr::Bold);
                write!(t, "{}", text)?;
                let _ = t.reset();
                return Ok(());
            }
        }
        write!(self.writer, "{}", text)
    }

    /// Write a plain line
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Write an empty line
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Write a colored line
    pub fn colored_line(&mut self, text: &str, color: Color) -> io::Result<()> {
        self.write_colored(text, color)?;
        writeln!(self.writer)
    }

    /// Write `ch` repeated `count` times on its own line
    pub fn rule(&mut self, ch: char, count: usize) -> io::Result<()> {
        writeln!(self.writer, "{}", ch.to_string().repeat(count))
    }

    /// Write a boxed table; flexible columns shrink to fit `max_width`
    pub fn write_table(&mut self, columns: &[Column], rows: &[Vec<String>]) -> io::Result<()> {
        let widths = column_widths(columns, rows, self.max_width);

        self.write_border('┌', '┬', '┐', &widths)?;
        let titles: Vec<String> = columns.iter().map(|c| c.title.to_string()).collect();
        self.write_cells(columns, &titles, &widths)?;
        self.write_border('├', '┼', '┤', &widths)?;
        for row in rows {
            self.write_cells(columns, row, &widths)?;
        }
        self.write_border('└', '┴', '┘', &widths)
    }

    fn write_border(&mut self, left: char, mid: char, right: char, widths: &[usize]) -> io::Result<()> {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        writeln!(self.writer, "{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn write_cells(&mut self, columns: &[Column], cells: &[String], widths: &[usize]) -> io::Result<()> {
        let rendered: Vec<String> = columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (col, width))| {
                let cell = cells.get(i).map(|s| s.as_str()).unwrap_or("");
                match col.align {
                    Align::Left => truncate_with_padding(cell, *width),
                    Align::Right => pad_left(cell, *width),
                }
            })
            .collect();
        writeln!(self.writer, "│ {} │", rendered.join(" │ "))
    }

    /// Consume the writer, returning the destination
    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Width of each column: widest cell, with flexible columns shrunk to fit
pub fn column_widths(columns: &[Column], rows: &[Vec<String>], max_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|cell| display_width(cell))
                .chain(std::iter::once(display_width(col.title)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    // "│ " + " │ " between columns + " │"
    let borders = columns.len() * 3 + 1;
    let total = widths.iter().sum::<usize>() + borders;
    if total > max_width {
        let mut excess = total - max_width;
        for (i, col) in columns.iter().enumerate() {
            if excess == 0 {
                break;
            }
            if col.flexible && widths[i] > MIN_FLEX_WIDTH {
                let give = (widths[i] - MIN_FLEX_WIDTH).min(excess);
                widths[i] -= give;
                excess -= give;
            }
        }
    }

    widths
}

//
// Console width
//

/// Get terminal width or default to 120
fn get_terminal_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        w as usize
    } else {
        120
    }
}

static CONSOLE_WIDTH: OnceLock<usize> = OnceLock::new();

/// Override console width (from --console-width). First call wins.
pub fn set_console_width(width: usize) {
    let _ = CONSOLE_WIDTH.set(width);
}

/// Console width: override if set, else detected terminal width
pub fn get_console_width() -> usize {
    *CONSOLE_WIDTH.get_or_init(get_terminal_width)
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Right-align `s` in `width` columns (never truncates)
pub fn pad_left(s: &str, width: usize) -> String {
    let display_w = display_width(s);
    if display_w >= width { s.to_string() } else { format!("{}{}", " ".repeat(width - display_w), s) }
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        let mut result = String::new();
        let mut current_width = 0;

        // Reserve space for "..."
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
            if current_width + c_width > target_width {
                break;
            }
            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        format!("{}{}", s, " ".repeat(width - display_w))
    }
}

/// Insert thousands separators into a run of ASCII digits
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Integer with thousands separators: -11033 -> "-11,033"
pub fn format_count(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 { format!("-{}", grouped) } else { grouped }
}

/// Two-decimal amount with separators: -49648.5 -> "-49,648.50"
///
/// Rounds the exact binary value with ties to even, so 0.125 -> "0.12"
/// and 2.675 (stored just below) -> "2.67". Amounts that round to zero
/// are never signed.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(whole), cents)
}

/// Dollar amount: 52023.5 -> "$52,023.50", negatives as "$-8,213.65"
pub fn format_money(value: f64) -> String {
    format!("${}", format_amount(value))
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
