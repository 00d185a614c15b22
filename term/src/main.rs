use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use mineboard_core::{
    Board, BoardError, BoardEvent, Coord, Coord2, FlagOutcome, GameConfig, OpenOutcome,
};

use crate::render::{render, status};
use crate::theme::GlyphTheme;

mod render;
mod theme;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => GameConfig::beginner(),
            Preset::Intermediate => GameConfig::intermediate(),
            Preset::Expert => GameConfig::expert(),
        }
    }
}

/// Plays scripted moves on a generated minefield and prints the result
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Use a classic board size, overrides width, height and density
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    #[arg(long, default_value_t = 9)]
    width: Coord,

    #[arg(long, default_value_t = 9)]
    height: Coord,

    /// Fraction of cells holding a mine, exclusive on both ends
    #[arg(short, long, default_value_t = 0.15)]
    density: f64,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cell to flag as `x,y`, applied before any open
    #[arg(short, long = "flag", value_parser = parse_coords)]
    flags: Vec<Coord2>,

    /// Cell to open as `x,y`, applied in order
    #[arg(short, long = "open", value_parser = parse_coords)]
    opens: Vec<Coord2>,

    /// TOML file with the glyphs to draw
    #[arg(short, long)]
    theme: Option<PathBuf>,
}

fn parse_coords(text: &str) -> Result<Coord2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{text}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<Coord>()
            .map_err(|err| format!("bad coordinate `{part}`: {err}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn flag_summary(outcome: FlagOutcome) -> &'static str {
    if outcome.is_flagged() {
        "flagged"
    } else {
        "unflagged"
    }
}

fn open_summary(outcome: &OpenOutcome) -> String {
    if !outcome.has_update() {
        return "already open".into();
    }
    match outcome {
        OpenOutcome::Mine => "hit a mine".into(),
        _ => format!("opened {}", outcome.opened_count()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let theme = match &args.theme {
        Some(path) => GlyphTheme::load(path)?,
        None => GlyphTheme::default(),
    };

    let config = match args.preset {
        Some(preset) => preset.into(),
        None => GameConfig::new((args.width, args.height), args.density)
            .context("invalid board configuration")?,
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {seed}");

    let mut board = Board::new(config, seed)?;
    board.subscribe(|event: &BoardEvent| log::debug!("event: {event:?}"));

    for &coords in &args.flags {
        match board.toggle_flag(coords) {
            Ok(outcome) => log::info!("flag {coords:?}: {}", flag_summary(outcome)),
            Err(err) => log::warn!("flag {coords:?} rejected: {err}"),
        }
    }

    for &coords in &args.opens {
        match board.open_cell(coords) {
            Ok(outcome) => log::info!("open {coords:?}: {}", open_summary(&outcome)),
            Err(BoardError::GameOver) => {
                log::warn!("game over, skipping remaining opens");
                break;
            }
            Err(err) => log::warn!("open {coords:?} rejected: {err}"),
        }
    }

    print!("{}", render(&board, &theme));
    println!("{}", status(&board));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coords() {
        assert_eq!(parse_coords("3,4"), Ok((3, 4)));
        assert_eq!(parse_coords(" 0 , 12 "), Ok((0, 12)));
    }

    #[test]
    fn rejects_bad_coords() {
        assert!(parse_coords("3").is_err());
        assert!(parse_coords("3,-1").is_err());
        assert!(parse_coords("300,1").is_err());
    }

    #[test]
    fn summarizes_outcomes() {
        assert_eq!(open_summary(&OpenOutcome::AlreadyOpen), "already open");
        assert_eq!(open_summary(&OpenOutcome::Mine), "hit a mine");
        assert_eq!(open_summary(&OpenOutcome::Cleared(2)), "opened 1");
        assert_eq!(
            open_summary(&OpenOutcome::Cascade(vec![(0, 0), (1, 0), (0, 1)])),
            "opened 3"
        );
        assert_eq!(flag_summary(FlagOutcome::Flagged), "flagged");
        assert_eq!(flag_summary(FlagOutcome::Unflagged), "unflagged");
    }

    #[test]
    fn args_collect_moves_in_order() {
        let args = Args::try_parse_from([
            "mineboard", "--seed", "1", "-o", "1,1", "-o", "0,0", "-f", "2,2",
        ])
        .unwrap();

        assert_eq!(args.opens, [(1, 1), (0, 0)]);
        assert_eq!(args.flags, [(2, 2)]);
        assert_eq!(args.seed, Some(1));
    }

    #[test]
    fn preset_maps_to_config() {
        let args = Args::try_parse_from(["mineboard", "--preset", "expert"]).unwrap();

        assert_eq!(args.preset.map(GameConfig::from), Some(GameConfig::expert()));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
