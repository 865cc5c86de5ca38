use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_lookahead::{Board, Checker, Symbols};

/// Draws the board in colour, followed by the rule and column labels
pub fn draw(board: &Board, symbols: &Symbols) -> Result<()> {
    let mut stdout = stdout();

    for row in 0..board.height() {
        stdout.queue(PrintStyledContent(style('|')))?;
        for column in 0..board.width() {
            let cell = board.cell(row, column);
            stdout
                .queue(PrintStyledContent(
                    style(symbols.cell(cell))
                        .attribute(Attribute::Bold)
                        .with(match cell {
                            Some(Checker::X) => Color::Red,
                            Some(Checker::O) => Color::Yellow,
                            None => Color::Reset,
                        }),
                ))?
                .queue(PrintStyledContent(style('|')))?;
        }
        stdout.queue(PrintStyledContent(style('\n')))?;
    }

    let rule: String = std::iter::repeat(symbols.rule)
        .take(2 * board.width() + 1)
        .collect();
    stdout
        .queue(PrintStyledContent(style(rule + "\n")))?
        .queue(PrintStyledContent(style(board.column_labels() + "\n")))?;
    stdout.flush()?;
    Ok(())
}
