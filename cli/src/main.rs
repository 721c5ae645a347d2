use anyhow::Context;
use clap::Parser;
use rand::rngs::SmallRng;
use spotdiff_core as game;
use std::io::{self, BufRead, Write};

use command::{Command, HELP, Viewport};
use render::Style;

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Spot the differences between two color grids", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board dimension, both grids are size x size
    #[arg(short = 'n', long, default_value_t = 8)]
    size: u8,

    /// Number of differences, also the maximum number of picks
    #[arg(short, long, default_value_t = 3)]
    differences: u16,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Drop all picks when the differences are hidden again
    #[arg(long)]
    clear_on_hide: bool,

    /// Viewport used for cell size reports, as WIDTHxHEIGHT
    #[arg(long, default_value = "1200x800")]
    viewport: Viewport,

    /// Print color letters instead of ANSI colors
    #[arg(long)]
    plain: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

struct Session {
    engine: game::PlayEngine,
    rng: SmallRng,
    config: game::BoardConfig,
    viewport: Viewport,
    style: Style,
}

impl Session {
    fn new(args: &Args, seed: u64) -> anyhow::Result<Self> {
        let config = game::BoardConfig::new(args.size, args.differences)
            .context("invalid board settings")?;
        let mut rng = game::RandomBoardGenerator::new(seed).into_source();
        let policy = if args.clear_on_hide {
            game::HidePolicy::ClearSelection
        } else {
            game::HidePolicy::KeepSelection
        };
        let engine = game::PlayEngine::with_policy(game::generate(&mut rng, config), policy);
        Ok(Self {
            engine,
            rng,
            config,
            viewport: args.viewport,
            style: if args.plain { Style::Plain } else { Style::Ansi },
        })
    }

    fn apply(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
        match command {
            Command::Select(index) => {
                let outcome = self.engine.toggle_select(index);
                self.report_selection(outcome, out)?;
            }
            Command::SelectAt(x, y) => {
                let outcome = self.engine.toggle_select_at((x, y));
                self.report_selection(outcome, out)?;
            }
            Command::Reveal => {
                self.engine.toggle_reveal();
                self.show(out)?;
            }
            Command::Reset => {
                self.engine.reset();
                self.show(out)?;
            }
            Command::New => self.regenerate(self.config, out)?,
            Command::Size(size) => {
                let config = game::BoardConfig::clamped(size, self.config.differences);
                self.regenerate(config, out)?;
            }
            Command::Differences(differences) => {
                let config = game::BoardConfig::clamped(self.config.size, differences);
                self.regenerate(config, out)?;
            }
            Command::Scale(viewport) => {
                self.viewport = viewport;
                self.report_scale(out)?;
            }
            Command::Show => self.show(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn regenerate(&mut self, config: game::BoardConfig, out: &mut impl Write) -> anyhow::Result<()> {
        if config.size != self.config.size || config.differences != self.config.differences {
            log::info!(
                "board changed to {}x{} with {} differences",
                config.size,
                config.size,
                config.differences
            );
        }
        self.engine.regenerate(&mut self.rng, config)?;
        self.config = config;
        self.show(out)?;
        self.report_scale(out)
    }

    fn report_selection(
        &self,
        outcome: game::Result<game::SelectOutcome>,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        match outcome {
            Ok(game::SelectOutcome::NoChange) => {
                writeln!(out, "selection is full, deselect a cell first")?;
            }
            Ok(_) => self.show(out)?,
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(())
    }

    fn report_scale(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let Viewport { width, height } = self.viewport;
        let cell = game::cell_size(width, height, self.engine.size());
        writeln!(out, "cell size for {width}x{height}: {cell:.2}px")?;
        Ok(())
    }

    fn show(&self, out: &mut impl Write) -> anyhow::Result<()> {
        render::render(&self.engine, self.style, out)?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {seed}");

    let mut session = Session::new(&args, seed)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.show(&mut out)?;
    writeln!(out, "type `help` for commands")?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        match Command::parse(&line) {
            Ok(Some(command)) => {
                if session.apply(command, &mut out)? == Flow::Quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => writeln!(out, "{err:#}")?,
        }
        out.flush()?;
    }

    log::debug!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(extra: &[&str]) -> Session {
        let args = Args::try_parse_from(["spotdiff", "--plain"].iter().chain(extra)).unwrap();
        Session::new(&args, 42).unwrap()
    }

    fn run(session: &mut Session, command: Command) -> String {
        let mut out = Vec::new();
        session.apply(command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn invalid_settings_are_reported() {
        let args = Args::try_parse_from(["spotdiff", "--size", "2", "--differences", "5"]).unwrap();
        assert!(Session::new(&args, 1).is_err());
    }

    #[test]
    fn full_selection_is_reported() {
        let mut session = session(&["--differences", "1"]);
        run(&mut session, Command::Select(0));

        let text = run(&mut session, Command::Select(1));

        assert!(text.contains("selection is full"));
        assert_eq!(session.engine.selection().len(), 1);
    }

    #[test]
    fn resizing_clamps_and_resets() {
        let mut session = session(&["--size", "8", "--differences", "5"]);
        run(&mut session, Command::Select(4));
        run(&mut session, Command::Reveal);

        let text = run(&mut session, Command::Size(2));

        assert_eq!(session.config, game::BoardConfig::new_unchecked(2, 4));
        assert_eq!(session.engine.size(), 2);
        assert!(session.engine.selection().is_empty());
        assert_eq!(session.engine.reveal_state(), game::RevealState::Hidden);
        assert!(text.contains("cell size for 1200x800"));
    }

    #[test]
    fn out_of_range_pick_is_reported() {
        let mut session = session(&[]);
        let text = run(&mut session, Command::Select(64));
        assert!(text.contains("outside the current board"));
    }

    #[test]
    fn clear_on_hide_flag_sets_policy() {
        let session = session(&["--clear-on-hide"]);
        assert_eq!(session.engine.policy(), game::HidePolicy::ClearSelection);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut session = session(&[]);
        let mut out = Vec::new();
        assert_eq!(session.apply(Command::Quit, &mut out).unwrap(), Flow::Quit);
    }
}
