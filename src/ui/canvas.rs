//! A character-cell surface: maps virtual-pixel drawing onto terminal cells.

use crate::game::{Bounds, PlayerPose, Sprite, Surface, TextStyle, Viewport};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Virtual pixels covered by one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl CellSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    symbol: char,
    style: Style,
}

const BLANK: Cell = Cell {
    symbol: ' ',
    style: Style::new(),
};

/// Grid of styled characters that implements [`Surface`].
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    cell: CellSize,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(cols: u16, rows: u16, cell: CellSize) -> Self {
        Self {
            cols,
            rows,
            cell,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    pub fn symbol_at(&self, col: u16, row: u16) -> Option<char> {
        self.index(col, row).map(|i| self.cells[i].symbol)
    }

    /// Text of one row, for inspection.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.symbol_at(col, row))
            .collect()
    }

    /// Rows as ratatui lines, merging runs of equal style into one span.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.rows as usize);
        for row in 0..self.rows as usize {
            let start = row * self.cols as usize;
            let cells = &self.cells[start..start + self.cols as usize];

            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_style = None;
            for cell in cells {
                if run_style != Some(cell.style) && !run.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut run),
                        run_style.unwrap_or_default(),
                    ));
                }
                run_style = Some(cell.style);
                run.push(cell.symbol);
            }
            if !run.is_empty() {
                spans.push(Span::styled(run, run_style.unwrap_or_default()));
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| row as usize * self.cols as usize + col as usize)
    }

    /// Cell span `[start, end)` covered by `[from, to)` pixels on one axis.
    fn span(from: f64, to: f64, unit: f64, limit: u16) -> (u16, u16) {
        let start = (from / unit).floor().clamp(0.0, limit as f64) as u16;
        let end = (to / unit).ceil().clamp(0.0, limit as f64) as u16;
        (start, end)
    }

    fn fill(&mut self, bounds: Bounds, cell: Cell) {
        let (col_start, col_end) =
            Self::span(bounds.x, bounds.right(), self.cell.width, self.cols);
        let (row_start, row_end) =
            Self::span(bounds.y, bounds.bottom(), self.cell.height, self.rows);
        for row in row_start..row_end {
            for col in col_start..col_end {
                if let Some(i) = self.index(col, row) {
                    self.cells[i] = cell;
                }
            }
        }
    }
}

fn sprite_cell(sprite: Sprite) -> Cell {
    match sprite {
        Sprite::Background => BLANK,
        Sprite::Player(pose) => Cell {
            symbol: match pose {
                PlayerPose::Rising => '▲',
                PlayerPose::Gliding => '►',
                PlayerPose::Diving => '▼',
            },
            style: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        },
        Sprite::ObstacleTop | Sprite::ObstacleBottom => Cell {
            symbol: '█',
            style: Style::default().fg(Color::Green),
        },
    }
}

impl Surface for CellCanvas {
    fn size(&self) -> Viewport {
        Viewport::new(
            self.cols as f64 * self.cell.width,
            self.rows as f64 * self.cell.height,
        )
    }

    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn draw_sprite(&mut self, sprite: Sprite, bounds: Bounds) {
        self.fill(bounds, sprite_cell(sprite));
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: TextStyle) {
        if self.rows == 0 {
            return;
        }
        let row = ((y / self.cell.height).floor().max(0.0) as u16).min(self.rows - 1);
        let col = (x / self.cell.width).floor().max(0.0) as u16;
        let style = match style {
            TextStyle::Hud => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            TextStyle::Banner => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        };
        for (offset, symbol) in text.chars().enumerate() {
            let Some(col) = col.checked_add(offset as u16) else {
                break;
            };
            match self.index(col, row) {
                Some(i) => self.cells[i] = Cell { symbol, style },
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CellCanvas {
        CellCanvas::new(20, 10, CellSize::new(10.0, 20.0))
    }

    #[test]
    fn test_size_in_virtual_pixels() {
        assert_eq!(canvas().size(), Viewport::new(200.0, 200.0));
    }

    #[test]
    fn test_sprite_fills_covered_cells() {
        let mut canvas = canvas();
        canvas.draw_sprite(Sprite::ObstacleTop, Bounds::new(15.0, 0.0, 20.0, 30.0));
        // x 15..35 covers cols 1..=3, y 0..30 covers rows 0..=1
        for col in 1..=3 {
            assert_eq!(canvas.symbol_at(col, 0), Some('█'));
            assert_eq!(canvas.symbol_at(col, 1), Some('█'));
        }
        assert_eq!(canvas.symbol_at(0, 0), Some(' '));
        assert_eq!(canvas.symbol_at(4, 0), Some(' '));
        assert_eq!(canvas.symbol_at(1, 2), Some(' '));
    }

    #[test]
    fn test_sprite_clipped_at_edges() {
        let mut canvas = canvas();
        canvas.draw_sprite(
            Sprite::ObstacleBottom,
            Bounds::new(-50.0, 150.0, 80.0, 500.0),
        );
        assert_eq!(canvas.symbol_at(0, 9), Some('█'));
        assert_eq!(canvas.symbol_at(2, 9), Some('█'));
        assert_eq!(canvas.symbol_at(3, 9), Some(' '));
    }

    #[test]
    fn test_player_glyph_follows_pose() {
        let mut canvas = canvas();
        canvas.draw_sprite(
            Sprite::Player(PlayerPose::Rising),
            Bounds::new(50.0, 40.0, 10.0, 20.0),
        );
        assert_eq!(canvas.symbol_at(5, 2), Some('▲'));
    }

    #[test]
    fn test_text_truncated_at_right_edge() {
        let mut canvas = canvas();
        canvas.draw_text("Score: 12", 150.0, 30.0, TextStyle::Hud);
        assert_eq!(canvas.row_text(1), "               Score");
    }

    #[test]
    fn test_clear_resets_cells() {
        let mut canvas = canvas();
        canvas.draw_text("hi", 0.0, 0.0, TextStyle::Banner);
        canvas.clear();
        assert_eq!(canvas.row_text(0), " ".repeat(20));
    }

    #[test]
    fn test_lines_merge_style_runs() {
        let mut canvas = canvas();
        canvas.draw_sprite(Sprite::ObstacleTop, Bounds::new(50.0, 0.0, 50.0, 20.0));
        let lines = canvas.lines();
        assert_eq!(lines.len(), 10);
        // blank | obstacle | blank
        assert_eq!(lines[0].spans.len(), 3);
        assert_eq!(lines[0].spans[1].content, "█████");
        assert_eq!(lines[1].spans.len(), 1);
    }
}
