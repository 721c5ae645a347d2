use anyhow::{Context, anyhow, bail};
use std::str::FromStr;

pub(crate) const HELP: &str = "\
commands:
  select <i> | s <i>     toggle the pick at linear index i
  s <x> <y>              toggle the pick at column x, row y
  reveal | r             show or hide the differences
  reset                  clear picks and hide the differences
  new | n                generate a new board
  size <n>               change the board dimension
  diffs <k>              change the number of differences
  scale <w> <h>          cell size for a w by h viewport
  show                   print the boards again
  help | ?               this text
  quit | q               leave";

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Select(u16),
    SelectAt(u8, u8),
    Reveal,
    Reset,
    New,
    Size(u8),
    Differences(u16),
    Scale(Viewport),
    Show,
    Help,
    Quit,
}

impl Command {
    /// `Ok(None)` for blank lines.
    pub(crate) fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("select" | "s", [index]) => Self::Select(number(index)?),
            ("select" | "s", [x, y]) => Self::SelectAt(number(x)?, number(y)?),
            ("reveal" | "r", []) => Self::Reveal,
            ("reset", []) => Self::Reset,
            ("new" | "n", []) => Self::New,
            ("size", [size]) => Self::Size(number(size)?),
            ("diffs" | "differences", [count]) => Self::Differences(number(count)?),
            ("scale", [width, height]) => {
                Self::Scale(Viewport::new(number(width)?, number(height)?)?)
            }
            ("show", []) => Self::Show,
            ("help" | "?", []) => Self::Help,
            ("quit" | "q" | "exit", []) => Self::Quit,
            (name, _) => bail!("unknown command or wrong arguments: {name}, try `help`"),
        };
        Ok(Some(command))
    }
}

fn number<T: FromStr>(word: &str) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    word.parse().with_context(|| format!("not a valid number: {word}"))
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Viewport {
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl Viewport {
    /// Both dimensions must be finite and positive.
    pub(crate) fn new(width: f64, height: f64) -> anyhow::Result<Self> {
        let is_valid = |length: f64| length.is_finite() && length > 0.0;
        if !is_valid(width) || !is_valid(height) {
            bail!("viewport dimensions must be positive, got {width}x{height}");
        }
        Ok(Self { width, height })
    }
}

impl FromStr for Viewport {
    type Err = anyhow::Error;

    /// Parses `WIDTHxHEIGHT`, e.g. `1200x800`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got {s}"))?;
        Self::new(number(width.trim())?, number(height.trim())?)
    }
}
