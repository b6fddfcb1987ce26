//! Minimal TSPLIB reader.
//!
//! Only the `NODE_COORD_SECTION` is interpreted: header lines before it are
//! skipped, then every `id x y` line becomes a city until an `EOF` marker or
//! the end of input. City ids are not checked; cities are indexed in file
//! order.

use super::types::City;
use crate::error::{Result, TspError};
use std::io::BufRead;

const SECTION_START: &str = "NODE_COORD_SECTION";
const SECTION_END: &str = "EOF";

pub(super) fn read_coordinates<R: BufRead>(reader: R) -> Result<Vec<City>> {
    let mut cities = Vec::new();
    let mut in_section = false;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();

        if !in_section {
            if trimmed.starts_with(SECTION_START) {
                in_section = true;
            }
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }
        if trimmed == SECTION_END {
            break;
        }

        cities.push(parse_city(trimmed, line_no)?);
    }

    if !in_section {
        return Err(TspError::Parse {
            line: 0,
            message: format!("missing {SECTION_START}"),
        });
    }

    Ok(cities)
}

fn parse_city(line: &str, line_no: usize) -> Result<City> {
    let mut fields = line.split_whitespace();
    let _id = fields.next();

    let mut coordinate = |name: &str| -> Result<f64> {
        let raw = fields.next().ok_or_else(|| TspError::Parse {
            line: line_no,
            message: format!("missing {name} coordinate"),
        })?;
        raw.parse::<f64>().map_err(|e| TspError::Parse {
            line: line_no,
            message: format!("invalid {name} coordinate '{raw}': {e}"),
        })
    };

    let x = coordinate("x")?;
    let y = coordinate("y")?;
    Ok(City::new(x, y))
}
