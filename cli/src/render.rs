use std::fmt::Write as _;
use sweeper_core::{BoardSnapshot, CellView, GameStatus, VisibleValue};

fn cell_char(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Flagged => 'F',
        CellView::Revealed(VisibleValue::Blank) => ' ',
        CellView::Revealed(VisibleValue::Mine) => '*',
        CellView::Revealed(VisibleValue::Count(count)) => char::from(b'0' + count),
    }
}

/// Text board with row and column numbers, flag counter and timer.
pub fn render(snapshot: &BoardSnapshot) -> String {
    let (rows, cols) = snapshot.size;
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..cols {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..rows {
        let _ = write!(out, "{:>3} ", row);
        for col in 0..cols {
            let coords = (row, col);
            let symbol = if snapshot.triggered_mine == Some(coords) {
                'X'
            } else {
                cell_char(snapshot.view_at(coords))
            };
            let _ = write!(out, "{:>3}", symbol);
        }
        out.push('\n');
    }

    let _ = write!(
        out,
        "Flags: {}  Time: {}s",
        snapshot.flags_remaining, snapshot.elapsed_secs
    );
    match snapshot.status {
        GameStatus::InProgress => {}
        GameStatus::Won => out.push_str("  You win!"),
        GameStatus::Lost => out.push_str("  Game Over"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{GameSession, MineField};

    fn session(mines: &[(u8, u8)]) -> GameSession {
        GameSession::from_minefield(MineField::from_mine_coords((2, 3), mines).unwrap(), 0)
    }

    #[test]
    fn renders_fresh_board() {
        let game = session(&[(0, 0)]);

        assert_eq!(
            render(&game.snapshot()),
            "      0  1  2\n  0   .  .  .\n  1   .  .  .\nFlags: 1  Time: 0s"
        );
    }

    #[test]
    fn renders_counts_flags_and_loss() {
        let mut game = session(&[(0, 0), (1, 2)]);
        game.toggle_flag((1, 2));
        game.reveal((1, 0));
        game.reveal((0, 0));

        let text = render(&game.snapshot());

        assert!(text.contains("  1   1  .  *\n"), "{text}");
        assert!(text.starts_with("      0  1  2\n  0   X"), "{text}");
        assert!(text.ends_with("Flags: 2  Time: 0s  Game Over"), "{text}");
    }
}
