//! Text building blocks shared by the generators.

/// Column at which `#define` values start.
const DEFINE_NAME_WIDTH: usize = 27;

/// License banner placed at the top of generated C sources.
pub(crate) fn banner(year: i32) -> String {
    format!(
        "// This file is part of the CircuitPython project: https://circuitpython.org\n\
         //\n\
         // SPDX-FileCopyrightText: Copyright (c) {year} CircuitPython Contributors\n\
         //\n\
         // SPDX-License-Identifier: MIT\n\
         \n"
    )
}

/// `#define NAME value`, with values aligned in a column.
pub(crate) fn define(name: &str, value: &str) -> String {
    format!("#define {name:<width$} {value}\n", width = DEFINE_NAME_WIDTH)
}

/// `#define NAME value` with a single space, for lines existing boards write
/// unaligned.
pub(crate) fn define_unaligned(name: &str, value: &str) -> String {
    format!("#define {name} {value}\n")
}

/// `NAME = value` build-variable assignment.
pub(crate) fn assign(name: &str, value: &str) -> String {
    format!("{name} = {value}\n")
}

/// Double-quoted string literal with `\` and `"` escaped.
pub(crate) fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Reference to a physical pin object: `&pin_<id>`.
pub(crate) fn pin_ref(physical: &str) -> String {
    format!("&pin_{physical}")
}

/// Parenthesized pin reference, as used by header constants.
pub(crate) fn pin_expr(physical: &str) -> String {
    format!("({})", pin_ref(physical))
}

/// Interned-string identifier for a logical name: `MP_QSTR_<name>`.
pub(crate) fn qstr(name: &str) -> String {
    format!("MP_QSTR_{name}")
}

/// Accumulates blank-line separated blocks, dropping empty ones.
#[derive(Debug, Default)]
pub(crate) struct Blocks {
    blocks: Vec<String>,
    current: String,
}

impl Blocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a complete line (including its newline) to the current block.
    pub(crate) fn push(&mut self, line: impl AsRef<str>) {
        self.current.push_str(line.as_ref());
    }

    /// Close the current block. Does nothing if it is empty.
    pub(crate) fn end_block(&mut self) {
        if !self.current.is_empty() {
            self.blocks.push(std::mem::take(&mut self.current));
        }
    }

    /// Join all blocks with a blank line between them.
    pub(crate) fn finish(mut self) -> String {
        self.end_block();
        self.blocks.join("\n")
    }

    /// Every block followed by a blank line, ready for trailing lines to be
    /// appended without a separator of their own.
    pub(crate) fn finish_separated(mut self) -> String {
        self.end_block();
        self.blocks.iter().map(|b| format!("{b}\n")).collect()
    }
}
