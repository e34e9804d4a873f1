use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Arg, Command, value_parser};
use rangerscope_core::Galaxy;
use rangerscope_core::market::MarketRow;
use rangerscope_core::palette::Palette;
use rangerscope_data::loader::{load_palette_from_dir, load_palette_or_default};
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn command() -> Command {
    Command::new("rangerscope")
        .about("Summarizes a galaxy dump: markets, black holes and tech level")
        .arg(
            Arg::new("dump")
                .help("Galaxy dump file")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("colors")
                .short('c')
                .long("colors")
                .help("Map color configuration (map_colors.ron/json/toml)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log filter used when RUST_LOG is unset")
                .default_value("warn"),
        )
}

fn main() {
    if let Err(err) = run() {
        eprintln!("rangerscope: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let matches = command().get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::builder().parse(level))
        .context("invalid log filter")?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(io::stderr))
        .init();

    let dump = matches
        .get_one::<PathBuf>("dump")
        .context("missing dump path")?;
    let palette = match matches.get_one::<PathBuf>("colors") {
        Some(path) => load_palette_or_default(path),
        None => load_palette_from_dir(dump.parent().unwrap_or(Path::new("."))),
    };
    debug!(entries = palette.len(), "palette ready");

    let file = File::open(dump).with_context(|| format!("cannot open {}", dump.display()))?;
    let galaxy = Galaxy::from_dump(BufReader::new(file))
        .with_context(|| format!("cannot read dump {}", dump.display()))?;

    let stdout = io::stdout();
    report(&galaxy, &palette, &mut stdout.lock())?;
    Ok(())
}

fn distance(row_distance: f64) -> String {
    if row_distance.is_finite() {
        format!("{row_distance:.1}")
    } else {
        "-".to_string()
    }
}

/// Market rows nearest first. Rows without a star sort last.
fn markets_by_distance(galaxy: &Galaxy) -> Vec<MarketRow<'_>> {
    let mut rows: Vec<_> = galaxy.markets().collect();
    if galaxy.has_player() {
        rows.sort_by(|a, b| {
            a.distance_from_player()
                .total_cmp(&b.distance_from_player())
        });
    }
    rows
}

fn report(galaxy: &Galaxy, palette: &Palette, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "stars {}, planets {}, ships {}, black holes {}, equipment {}, markets {}",
        galaxy.star_count(),
        galaxy.planet_count(),
        galaxy.ship_count(),
        galaxy.black_hole_count(),
        galaxy.equipment_count(),
        galaxy.markets_count(),
    )?;
    writeln!(out, "day {}", galaxy.current_day())?;
    match galaxy.tech_level() {
        Some(level) => writeln!(out, "tech level {level}")?,
        None => writeln!(out, "tech level unknown")?,
    }

    let has_player = galaxy.has_player();

    writeln!(out)?;
    writeln!(out, "markets:")?;
    for row in markets_by_distance(galaxy) {
        let dist = if has_player {
            distance(row.distance_from_player())
        } else {
            "-".to_string()
        };
        let sale: Vec<String> = row.sale().0.iter().map(u32::to_string).collect();
        let buy: Vec<String> = row.buy().0.iter().map(u32::to_string).collect();
        writeln!(
            out,
            "  {:<20} {:<12} {:>8}  sale {}  buy {}",
            row.name(),
            row.star_name(),
            dist,
            sale.join(","),
            buy.join(","),
        )?;
    }

    writeln!(out)?;
    writeln!(out, "black holes:")?;
    for row in galaxy.black_hole_rows() {
        let (d1, d2) = if has_player {
            (distance(row.star1_distance()), distance(row.star2_distance()))
        } else {
            ("-".to_string(), "-".to_string())
        };
        writeln!(
            out,
            "  {} ({}) - {} ({}), closes in {}: {}",
            row.star1_name(),
            d1,
            row.star2_name(),
            d2,
            row.turns_to_close(),
            row.next_loot_changes(),
        )?;
    }

    let overlay = rangerscope_core::overlay::map_overlay(galaxy, palette);
    writeln!(out)?;
    writeln!(out, "stars:")?;
    for star in &overlay.stars {
        writeln!(
            out,
            "  {:<12} {:<10} {}{}{}",
            star.name,
            star.owner,
            star.fill,
            if star.bases.is_empty() {
                String::new()
            } else {
                format!("  bases {}", star.bases_label())
            },
            if star.has_black_hole { "  hole" } else { "" },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangerscope_core::test_utils::small_galaxy;

    #[test]
    fn markets_are_sorted_nearest_first() {
        let galaxy = small_galaxy();
        let names: Vec<&str> = markets_by_distance(&galaxy)
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["Earth", "Alpha base", "Boyd"]);
    }

    #[test]
    fn report_lists_every_section() {
        let mut out = Vec::new();
        report(&small_galaxy(), &Palette::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("stars 3, planets 3, ships 3, black holes 1, equipment 4, markets 3\n"));
        assert!(text.contains("day 10\n"));
        assert!(text.contains("Solar (0.0) - Vega (10.0), closes in 200: 22 May 3299; 07 August 3299; "));
        assert!(text.contains("bases Al"));
    }

    #[test]
    fn unknown_distance_prints_a_dash() {
        assert_eq!(distance(f64::INFINITY), "-");
        assert_eq!(distance(2.26), "2.3");
    }

    #[test]
    fn command_requires_a_dump() {
        assert!(command().try_get_matches_from(["rangerscope"]).is_err());
        let m = command()
            .try_get_matches_from(["rangerscope", "save.txt", "--colors", "c.ron"])
            .unwrap();
        assert_eq!(m.get_one::<PathBuf>("colors"), Some(&PathBuf::from("c.ron")));
    }
}
