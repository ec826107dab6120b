use anyhow::{Context, Result, bail};
use std::str::FromStr;
use sweeper_core::{Coord, Coord2, Difficulty};

pub const HELP: &str = "\
commands:
  r ROW COL      reveal a cell
  f ROW COL      flag or unflag a cell
  n [DIFFICULTY] new game, optionally easy, medium or hard
  s              show the board
  h              this help
  q              quit";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    New(Option<Difficulty>),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(Self::Show);
        };

        let command = match name {
            "r" | "reveal" => Self::Reveal(parse_coords(&mut parts)?),
            "f" | "flag" => Self::Flag(parse_coords(&mut parts)?),
            "n" | "new" => Self::New(parts.next().map(parse_difficulty).transpose()?),
            "s" | "show" => Self::Show,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" => Self::Quit,
            other => bail!("unknown command {other:?}, try 'h'"),
        };

        if let Some(extra) = parts.next() {
            bail!("unexpected argument {extra:?}");
        }
        Ok(command)
    }
}

fn parse_coords<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<Coord2> {
    let mut next = |axis: &str| -> Result<Coord> {
        let value = parts.next().with_context(|| format!("missing {axis}"))?;
        value
            .parse()
            .with_context(|| format!("invalid {axis} {value:?}"))
    };
    let row = next("row")?;
    let col = next("column")?;
    Ok((row, col))
}

pub fn parse_difficulty(name: &str) -> Result<Difficulty> {
    Difficulty::ALL
        .into_iter()
        .find(|difficulty| difficulty.name().eq_ignore_ascii_case(name))
        .with_context(|| format!("unknown difficulty {name:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 3 4".parse::<Command>().unwrap(), Command::Reveal((3, 4)));
        assert_eq!("flag 0 12".parse::<Command>().unwrap(), Command::Flag((0, 12)));
    }

    #[test]
    fn parses_new_game() {
        assert_eq!("n".parse::<Command>().unwrap(), Command::New(None));
        assert_eq!(
            "new Hard".parse::<Command>().unwrap(),
            Command::New(Some(Difficulty::Hard))
        );
        assert!("n impossible".parse::<Command>().is_err());
    }

    #[test]
    fn blank_line_shows_board() {
        assert_eq!("   ".parse::<Command>().unwrap(), Command::Show);
    }

    #[test]
    fn rejects_bad_input() {
        assert!("r 1".parse::<Command>().is_err());
        assert!("r 1 x".parse::<Command>().is_err());
        assert!("r 1 300".parse::<Command>().is_err());
        assert!("r 1 2 3".parse::<Command>().is_err());
        assert!("dig 1 2".parse::<Command>().is_err());
    }
}
