use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
};
use hunt_core::{Coord2, HuntError, Reveal, RoundSnapshot};
use serde_json::json;
use std::io::{self, Write};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Player,
    Target,
    PlayerOnTarget,
}

impl Glyph {
    pub fn at(snapshot: &RoundSnapshot, coords: Coord2) -> Self {
        match (coords == snapshot.player, coords == snapshot.target) {
            (true, true) => Self::PlayerOnTarget,
            (true, false) => Self::Player,
            (false, true) => Self::Target,
            (false, false) => Self::Empty,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Player => '@',
            Self::Target => '$',
            Self::PlayerOnTarget => '*',
        }
    }
}

pub fn grid_lines(snapshot: &RoundSnapshot) -> Vec<String> {
    (0..snapshot.size)
        .map(|row| {
            (0..snapshot.size)
                .map(|col| Glyph::at(snapshot, (row, col)).symbol().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

pub fn status_line(snapshot: &RoundSnapshot) -> String {
    format!("Attempts left: {}", snapshot.attempts_remaining)
}

/// Whatever draws the rounds. Owned by the main loop, never by the core.
pub trait Frontend {
    fn draw(&mut self, snapshot: &RoundSnapshot, note: Option<&str>) -> io::Result<()>;

    fn announce(&mut self, reveal: &Reveal) -> io::Result<()>;

    fn reject(&mut self, error: &HuntError) -> io::Result<()>;
}

/// Draws the grid in a raw-mode terminal.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text), Print("\r\n"))
    }
}

impl<W: Write> Frontend for TerminalRenderer<W> {
    fn draw(&mut self, snapshot: &RoundSnapshot, note: Option<&str>) -> io::Result<()> {
        self.clear()?;
        for row in 0..snapshot.size {
            for col in 0..snapshot.size {
                let glyph = Glyph::at(snapshot, (row, col));
                let symbol = glyph.symbol();
                match glyph {
                    Glyph::Empty => queue!(self.out, Print(symbol))?,
                    Glyph::Player => queue!(self.out, PrintStyledContent(symbol.blue()))?,
                    Glyph::Target => queue!(self.out, PrintStyledContent(symbol.yellow()))?,
                    Glyph::PlayerOnTarget => {
                        queue!(self.out, PrintStyledContent(symbol.yellow().bold()))?
                    }
                }
                queue!(self.out, Print(' '))?;
            }
            self.line("")?;
        }
        self.line("")?;
        self.line(&status_line(snapshot))?;
        if let Some(note) = note {
            self.line(note)?;
        }
        self.line("w/a/s/d or arrows to move, q to quit")?;
        self.out.flush()
    }

    fn announce(&mut self, reveal: &Reveal) -> io::Result<()> {
        self.clear()?;
        for text in reveal.to_string().lines() {
            self.line(text)?;
        }
        self.out.flush()
    }

    fn reject(&mut self, error: &HuntError) -> io::Result<()> {
        self.line(&error.to_string())?;
        self.out.flush()
    }
}

/// One JSON object per line, for piping the game through other programs.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: serde_json::Value) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, &value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

impl<W: Write> Frontend for JsonRenderer<W> {
    fn draw(&mut self, snapshot: &RoundSnapshot, note: Option<&str>) -> io::Result<()> {
        self.emit(json!({
            "frame": snapshot,
            "grid": grid_lines(snapshot),
            "note": note
        }))
    }

    fn announce(&mut self, reveal: &Reveal) -> io::Result<()> {
        self.emit(json!({ "reveal": reveal, "message": reveal.to_string() }))
    }

    fn reject(&mut self, error: &HuntError) -> io::Result<()> {
        self.emit(json!({ "error": error.to_string() }))
    }
}
