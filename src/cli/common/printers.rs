// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Pretty printers for reporting information.
use std::{borrow::Cow, sync::Mutex};

const VERTICAL: char = '│';
const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref WARNING_PRINTER: Mutex<WarningPrinter> = Mutex::new(WarningPrinter::new());
}

/// Tree-like symbols for each line of some blocks of text.
fn symbols(blocks: &[Vec<Cow<'static, str>>]) -> Vec<Vec<char>> {
    let num_blocks = blocks.len();
    blocks
        .iter()
        .enumerate()
        .map(|(i_block, block)| {
            let num_lines = block.len();
            (0..num_lines)
                .map(
                    |i_line| match (i_line, i_line + 1 == num_lines, i_block + 1 == num_blocks) {
                        (0, false, _) => VERTICAL_AND_RIGHT,
                        (0, _, false) => VERTICAL_AND_RIGHT,
                        (0, true, true) => UP_AND_RIGHT,
                        _ => VERTICAL,
                    },
                )
                .collect()
        })
        .collect()
}

pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            blocks: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    pub(crate) fn push_block(&mut self, block: Vec<Cow<'static, str>>) {
        self.blocks.push(block);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        let symbols = symbols(&self.blocks);
        for (block, block_symbols) in self.blocks.into_iter().zip(symbols) {
            for (line, symbol) in block.into_iter().zip(block_symbols) {
                log::info!("{symbol} {line}");
            }
        }
        log::info!("");
    }
}

struct WarningPrinter {
    blocks: Vec<Vec<Cow<'static, str>>>,
}

impl WarningPrinter {
    fn new() -> Self {
        Self { blocks: vec![] }
    }

    fn push_line(&mut self, line: Cow<'static, str>) {
        self.blocks.push(vec![line]);
    }

    fn display(&mut self) {
        log::debug!("Displaying warnings");
        if self.blocks.is_empty() {
            return;
        }

        log::warn!("{}", console::style("Warnings").bold());
        let symbols = symbols(&self.blocks);
        for (block, block_symbols) in self.blocks.iter().zip(symbols) {
            for (line, symbol) in block.iter().zip(block_symbols) {
                log::warn!("{symbol} {line}");
            }
        }
        log::warn!("");
        self.blocks.clear();
    }
}

pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for &'static str {
    fn warn(self) {
        if let Ok(mut p) = WARNING_PRINTER.lock() {
            p.push_line(self.into());
        }
    }
}

impl Warn for String {
    fn warn(self) {
        if let Ok(mut p) = WARNING_PRINTER.lock() {
            p.push_line(self.into());
        }
    }
}

/// Print out any warnings that have been collected while arguments were
/// parsed. This should be called once, before any results are written.
pub(crate) fn display_warnings() {
    if let Ok(mut p) = WARNING_PRINTER.lock() {
        p.display();
    }
}
