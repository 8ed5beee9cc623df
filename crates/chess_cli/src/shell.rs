//! Line-oriented interactive session over a single [`Game`].
//!
//! ```text
//! position startpos moves e2e4 e7e5
//! position fen <FEN> [moves ...]
//! moves | play <mv>... | undo | status | fen | board | quit
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use chess_rules::Game;
use tracing::debug;

use crate::report::{sorted_move_texts, status_name};

pub struct Shell {
    game: Game,
}

impl Shell {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Read commands until `quit` or end of input. Command errors are
    /// reported on `output` and the session continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading command")?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            let Some((&cmd, args)) = parts.split_first() else {
                continue;
            };
            if cmd == "quit" {
                break;
            }
            match self.execute(cmd, args) {
                Ok(reply) => {
                    if !reply.is_empty() {
                        writeln!(output, "{reply}")?;
                    }
                }
                Err(e) => {
                    debug!(command = %line, error = %e, "shell command failed");
                    writeln!(output, "error: {e:#}")?;
                }
            }
            output.flush()?;
        }
        Ok(())
    }

    fn execute(&mut self, cmd: &str, args: &[&str]) -> Result<String> {
        match cmd {
            "position" => {
                self.set_position(args)?;
                Ok(String::new())
            }
            "moves" => Ok(sorted_move_texts(&self.game.legal_moves()).join(" ")),
            "play" => {
                if args.is_empty() {
                    bail!("play needs at least one move");
                }
                for text in args {
                    self.game.play_text(text)?;
                }
                Ok(String::new())
            }
            "undo" => Ok(self.game.undo()?.to_string()),
            "status" => Ok(status_name(self.game.status()).to_string()),
            "fen" => Ok(self.game.fen()),
            "board" => Ok(self.game.board().to_string()),
            other => bail!("unknown command {other:?}"),
        }
    }

    /// `startpos [moves ...]` or `fen <six fields> [moves ...]`. The current
    /// game is kept if any part fails.
    fn set_position(&mut self, args: &[&str]) -> Result<()> {
        let (mut game, rest) = match args.split_first() {
            Some((&"startpos", rest)) => (Game::default(), rest),
            Some((&"fen", rest)) => {
                let end = rest.iter().position(|&t| t == "moves").unwrap_or(rest.len());
                let fen = rest[..end].join(" ");
                (Game::from_fen(&fen)?, &rest[end..])
            }
            _ => bail!("position needs 'startpos' or 'fen <FEN>'"),
        };
        if let Some((&"moves", moves)) = rest.split_first() {
            for text in moves {
                game.play_text(text)
                    .with_context(|| format!("applying {text}"))?;
            }
        } else if !rest.is_empty() {
            bail!("unexpected {:?} after position", rest.join(" "));
        }
        self.game = game;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_rules::STARTPOS_FEN;

    fn run(script: &str) -> (Shell, String) {
        let mut shell = Shell::new(Game::default());
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        (shell, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_position_with_moves() {
        let (shell, out) = run("position startpos moves e2e4 e7e5 g1f3\nfen\n");
        assert_eq!(
            out.trim(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
        assert_eq!(shell.game().moves().count(), 3);
    }

    #[test]
    fn test_position_fen_then_status() {
        let (_, out) = run(
            "position fen rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3\nstatus\nmoves\n",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["checkmate"]);
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let (shell, out) = run("play e2e5\nfrobnicate\nundo\nplay e2e4\nquit\nplay e7e5\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.starts_with("error: ")));
        assert_eq!(shell.game().moves().count(), 1);
    }

    #[test]
    fn test_bad_position_keeps_current_game() {
        let (shell, out) = run("play d2d4\nposition fen not/a/fen w - - 0 1\nposition startpos moves e2e5\n");
        assert_eq!(out.lines().count(), 2);
        assert_eq!(shell.game().moves().count(), 1);
        assert_ne!(shell.game().fen(), STARTPOS_FEN);
    }

    #[test]
    fn test_undo_prints_move() {
        let (shell, out) = run("play e2e4 e7e5\nundo\n");
        assert_eq!(out.trim(), "e7e5");
        assert_eq!(shell.game().moves().count(), 1);
    }

    #[test]
    fn test_extreme_clocks_survive_moves() {
        let (shell, out) = run("position fen 4k3/8/8/8/8/8/8/4K3 w - - 4294967295 1\nmoves\nplay e1d1\nfen\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "e1d1 e1d2 e1e2 e1f1 e1f2");
        assert_eq!(lines[1], "4k3/8/8/8/8/8/8/3K4 b - - 4294967295 1");
        assert_eq!(shell.game().moves().count(), 1);
    }
}
