//! Top-level section dispatcher.
//!
//! A dump is a flat sequence of top-level lines. Three exact section openers
//! hand control to a [`SectionParser`]; `IDay=` lines set the current day;
//! any other record is skipped whole and any other line is ignored.
//! Ingestion ends at end of stream.

use crate::graph::{Galaxy, GalaxyBuilder};
use crate::reader::{LineReader, record_label};
use crate::record::{BraceRecordParser, SectionParser};
use std::io::BufRead;
use tracing::{debug, info, warn};

pub const PLAYER_SECTION: &str = "Player ^{";
pub const STAR_SECTION: &str = "StarList ^{";
pub const HOLE_SECTION: &str = "HoleList ^{";
pub const DAY_PREFIX: &str = "IDay=";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that abort ingestion of a dump. Entities inserted before the
/// error stay in the builder.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// A field value could not be parsed into the type the record needs.
    #[error("line {line}: invalid value '{value}' for field {key}")]
    Field {
        line: usize,
        key: String,
        value: String,
    },

    /// A record label did not end in a numeric ID.
    #[error("line {line}: record '{label}' has no numeric id")]
    MissingId { line: usize, label: String },

    /// Reading the dump failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Dispatch
// ===========================================================================

/// Reads top-level lines until end of stream, routing sections to `parser`.
pub fn ingest<R, P>(
    reader: &mut LineReader<R>,
    parser: &mut P,
    galaxy: &mut GalaxyBuilder,
) -> Result<(), DumpError>
where
    R: BufRead,
    P: SectionParser,
{
    while let Some(line) = reader.next_line()? {
        match line.as_str() {
            PLAYER_SECTION => {
                debug!(line = reader.line_number(), "player section");
                parser.parse_player(reader, galaxy)?;
            }
            STAR_SECTION => {
                debug!(line = reader.line_number(), "star list section");
                parser.parse_star_list(reader, galaxy)?;
            }
            HOLE_SECTION => {
                debug!(line = reader.line_number(), "hole list section");
                parser.parse_hole_list(reader, galaxy)?;
            }
            _ => {
                if let Some(raw) = line.strip_prefix(DAY_PREFIX) {
                    match raw.trim().parse::<i32>() {
                        Ok(day) => {
                            debug!(day, "current day");
                            galaxy.set_current_day(day);
                        }
                        Err(_) => warn!(
                            line = reader.line_number(),
                            value = raw,
                            "ignoring unparseable day counter"
                        ),
                    }
                } else if let Some(label) = record_label(&line) {
                    let label = label.to_string();
                    let skipped = reader.skip_record()?;
                    debug!(%label, skipped, "skipped unrecognized record");
                }
            }
        }
    }
    Ok(())
}

impl GalaxyBuilder {
    /// Clears the builder and ingests a whole dump into it.
    pub fn reload<R, P>(&mut self, input: R, parser: &mut P) -> Result<(), DumpError>
    where
        R: BufRead,
        P: SectionParser,
    {
        self.clear();
        let mut reader = LineReader::new(input);
        ingest(&mut reader, parser, self)
    }
}

impl Galaxy {
    /// Builds a galaxy from a dump using the default record grammar.
    pub fn from_dump<R: BufRead>(input: R) -> Result<Galaxy, DumpError> {
        Self::from_dump_with(input, &mut BraceRecordParser::default())
    }

    /// Builds a galaxy from a dump with a custom section parser.
    pub fn from_dump_with<R, P>(input: R, parser: &mut P) -> Result<Galaxy, DumpError>
    where
        R: BufRead,
        P: SectionParser,
    {
        let mut builder = GalaxyBuilder::new();
        builder.reload(input, parser)?;
        let galaxy = builder.build();
        info!(
            stars = galaxy.star_count(),
            planets = galaxy.planet_count(),
            ships = galaxy.ship_count(),
            black_holes = galaxy.black_hole_count(),
            equipment = galaxy.equipment_count(),
            markets = galaxy.markets_count(),
            day = galaxy.current_day(),
            "dump loaded"
        );
        Ok(galaxy)
    }
}
