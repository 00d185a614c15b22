use std::fmt::Write;

use mineboard_core::{Board, GameState, MinefieldGenerator};

use crate::theme::GlyphTheme;

/// Draws the board one row per line, `y = 0` on top.
pub fn render<G: MinefieldGenerator>(board: &Board<G>, theme: &GlyphTheme) -> String {
    let (width, _) = board.size();
    let mut out = String::new();

    for ((x, _), view) in board.cell_views() {
        if x > 0 {
            out.push_str(&theme.separator);
        }
        out.push_str(theme.glyph(&view));
        if x + 1 == width {
            out.push('\n');
        }
    }

    out
}

pub fn status<G: MinefieldGenerator>(board: &Board<G>) -> String {
    let label = match board.state() {
        GameState::Uninitialized | GameState::Generating => "generating",
        GameState::Playing => "playing",
        GameState::Won => "won",
        GameState::Lost => "lost",
    };

    let mut out = format!(
        "{label} | mines left: {} | opened {}/{}",
        board.mines_left(),
        board.opened_count(),
        board.safe_cell_count()
    );
    if let Some((x, y)) = board.triggered_mine() {
        let _ = write!(out, " | hit mine at {x},{y}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineboard_core::{MineLayout, PresetMinefieldGenerator};

    fn board(size: (u8, u8), mines: &[(u8, u8)]) -> Board<PresetMinefieldGenerator> {
        Board::with_layout(MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn closed_board_hides_mines() {
        let board = board((3, 2), &[(1, 1)]);

        assert_eq!(render(&board, &GlyphTheme::default()), "# # #\n# # #\n");
    }

    #[test]
    fn loss_reveals_mines_and_wrong_flags() {
        let mut board = board((3, 2), &[(1, 1), (2, 1)]);
        board.toggle_flag((0, 1)).unwrap();
        board.open_cell((2, 0)).unwrap();
        board.open_cell((1, 1)).unwrap();

        assert_eq!(render(&board, &GlyphTheme::default()), "# # 2\nx X *\n");
        assert_eq!(status(&board), "lost | mines left: 1 | opened 1/4 | hit mine at 1,1");
    }

    #[test]
    fn cascade_renders_counts() {
        let mut board = board((4, 1), &[(3, 0)]);
        board.open_cell((0, 0)).unwrap();

        assert_eq!(render(&board, &GlyphTheme::default()), ". . 1 *\n");
        assert_eq!(status(&board), "won | mines left: 1 | opened 3/3");
    }
}
