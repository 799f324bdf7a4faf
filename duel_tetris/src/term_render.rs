use crate::{board::Board, shapes::CellType, state::MatchState, state::SessionState};

#[derive(Debug, Clone, PartialEq)]
pub enum TermCell {
    FieldCell(CellType),
    BorderVertical,
    BorderHorizontal,
    BorderBottomLeft,
    BorderBottomRight,
    Space,
    Message(String),
}

pub trait TermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str;
    fn width(&self, cell: &TermCell) -> usize;
}

pub trait TermRender {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>>;
    fn render(&self, style: &impl TermStyle) -> Vec<String> {
        let mut lines = Vec::new();
        for row in self.output(style) {
            let mut line = String::new();
            for cell in &row {
                line.push_str(style.display(cell));
            }
            lines.push(line);
        }
        lines
    }
}

fn line_width(line: &[TermCell], style: &impl TermStyle) -> usize {
    line.iter().map(|cell| style.width(cell)).sum()
}

// Make all lines in block the same width by padding with TermCell::Space
pub fn pad_block_right(block: &mut [Vec<TermCell>], style: &impl TermStyle) {
    // Requite that the width of TermCell::Space display is 1
    assert_eq!(style.width(&TermCell::Space), 1);
    let widths: Vec<usize> = block.iter().map(|row| line_width(row, style)).collect();
    let width = widths.iter().copied().max().unwrap_or(0);
    for (row, line_width) in block.iter_mut().zip(widths) {
        row.extend(std::iter::repeat_n(TermCell::Space, width - line_width));
    }
}

/// Message line horizontally centered within `width` columns
fn centered(message: &str, width: usize) -> Vec<TermCell> {
    let leading = width.saturating_sub(message.chars().count()) / 2;
    let mut line = vec![TermCell::Space; leading];
    line.push(TermCell::Message(message.to_string()));
    line
}

fn border_width(cell: &TermCell) -> usize {
    match cell {
        TermCell::FieldCell(_) | TermCell::BorderHorizontal => 2,
        TermCell::BorderVertical
        | TermCell::BorderBottomLeft
        | TermCell::BorderBottomRight
        | TermCell::Space => 1,
        TermCell::Message(s) => s.chars().count(),
    }
}

pub struct PlainTermStyle;

impl TermStyle for PlainTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::FieldCell(CellType::Empty) => "  ",
            TermCell::FieldCell(_) => "[]",
            TermCell::BorderVertical => "|",
            TermCell::BorderHorizontal => "--",
            TermCell::BorderBottomLeft | TermCell::BorderBottomRight => "+",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }
    fn width(&self, cell: &TermCell) -> usize {
        border_width(cell)
    }
}

pub struct AnsiTermStyle;

impl TermStyle for AnsiTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::FieldCell(CellType::Empty) => "\x1b[0m  ",
            TermCell::FieldCell(CellType::Red) => "\x1b[0;31m[]",
            TermCell::FieldCell(CellType::Green) => "\x1b[0;32m[]",
            TermCell::FieldCell(CellType::Blue) => "\x1b[0;34m[]",
            TermCell::FieldCell(CellType::Orange) => "\x1b[38;5;208m[]",
            TermCell::FieldCell(CellType::Yellow) => "\x1b[0;93m[]",
            TermCell::FieldCell(CellType::Purple) => "\x1b[0;35m[]",
            TermCell::FieldCell(CellType::Cyan) => "\x1b[0;36m[]",
            TermCell::BorderVertical => "\x1b[0m│",
            TermCell::BorderBottomLeft => "\x1b[0m└",
            TermCell::BorderHorizontal => "\x1b[0m──",
            TermCell::BorderBottomRight => "\x1b[0m┘",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }
    fn width(&self, cell: &TermCell) -> usize {
        border_width(cell)
    }
}

impl TermRender for Board {
    fn output(&self, _style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        (0..self.rows())
            .filter_map(|y| self.row(y))
            .map(|row| row.iter().map(|&cell| TermCell::FieldCell(cell)).collect())
            .collect()
    }
}

/// One player's well with side and bottom borders and an optional message
/// over its middle row
pub struct WellField {
    well: Board,
    message: Option<String>,
}

impl WellField {
    pub fn new(well: Board, message: Option<String>) -> Self {
        Self { well, message }
    }

    /// Well of a session: game over wins over the paused notice
    pub fn from_session(name: &str, session: &SessionState, paused: bool) -> Self {
        let message = if session.game_over {
            Some(format!("{} Game Over", name))
        } else if paused {
            Some("Paused".to_string())
        } else {
            None
        };
        Self::new(session.well.clone(), message)
    }
}

impl TermRender for WellField {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut lines = self.well.output(style);
        if let Some(message) = &self.message {
            let width = lines.first().map(|l| line_width(l, style)).unwrap_or(0);
            let middle = lines.len() / 2;
            lines[middle] = centered(message, width);
            pad_block_right(&mut lines, style);
        }

        for line in &mut lines {
            line.insert(0, TermCell::BorderVertical);
            line.push(TermCell::BorderVertical);
        }
        let mut line = vec![TermCell::BorderBottomLeft];
        let inner = lines.first().map(|l| line_width(l, style) - 2).unwrap_or(0);
        // Bottom border stays aligned even when a message widened the block
        line.extend(std::iter::repeat_n(TermCell::BorderHorizontal, inner / 2));
        line.extend(std::iter::repeat_n(TermCell::Space, inner % 2));
        line.push(TermCell::BorderBottomRight);
        lines.push(line);
        lines
    }
}

/// Both wells side by side, player names under them, free text below
pub struct DuelView {
    player1: WellField,
    player2: WellField,
    legend: Vec<String>,
}

const WELL_GAP: usize = 4;

impl DuelView {
    pub fn new(state: &MatchState, legend: Vec<String>) -> Self {
        Self {
            player1: WellField::from_session("P1", &state.player1, state.paused),
            player2: WellField::from_session("P2", &state.player2, state.paused),
            legend,
        }
    }
}

impl TermRender for DuelView {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut left = self.player1.output(style);
        let mut right = self.player2.output(style);
        let left_width = left.first().map(|l| line_width(l, style)).unwrap_or(0);
        let right_width = right.first().map(|l| line_width(l, style)).unwrap_or(0);
        left.push(centered("Player 1", left_width));
        right.push(centered("Player 2", right_width));
        pad_block_right(&mut left, style);
        pad_block_right(&mut right, style);

        let height = left.len().max(right.len());
        let mut lines = Vec::with_capacity(height + self.legend.len() + 1);
        for i in 0..height {
            let mut line = match left.get(i) {
                Some(cells) => cells.clone(),
                None => vec![TermCell::Space; left_width],
            };
            line.extend(std::iter::repeat_n(TermCell::Space, WELL_GAP));
            if let Some(cells) = right.get(i) {
                line.extend(cells.iter().cloned());
            }
            lines.push(line);
        }

        if !self.legend.is_empty() {
            lines.push(Vec::new());
            for text in &self.legend {
                lines.push(vec![TermCell::Message(text.clone())]);
            }
        }
        pad_block_right(&mut lines, style);
        lines
    }
}
