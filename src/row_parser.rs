// Turning spreadsheet rows back into matches.
//
// There are two policies and they stay separate. The lenient one rebuilds whatever it can from a
// live, hand-edited sheet and quietly skips junk. The strict one is for one-shot bulk imports
// where losing a row silently would be worse than refusing the whole load.

use log::{debug, info};

use crate::data_loader::{MatchRecord, Roster};
use crate::error::ImportError;
use crate::util::{is_numeric_cell, parse_score};

pub trait TabularMatchParser {
    fn parse(&self, rows: &[Vec<String>]) -> Result<Vec<MatchRecord>, ImportError>;
}

pub struct LenientRowParser {
    pub roster: Roster,
}

impl LenientRowParser {
    pub fn new(roster: Roster) -> Self {
        Self { roster }
    }
}

impl TabularMatchParser for LenientRowParser {
    fn parse(&self, rows: &[Vec<String>]) -> Result<Vec<MatchRecord>, ImportError> {
        Ok(parse_rows(rows, &self.roster))
    }
}

// Lenient parse. Rows come oldest first (column 0 = date text, column i+1 = roster[i]) and the
// result is newest first. Never fails.
//
// Any row whose first cell contains "date" in any casing is taken to be a header and skipped.
// That also drops a real match if someone types e.g. "update" into the date cell. Known and accepted.
pub fn parse_rows(rows: &[Vec<String>], roster: &Roster) -> Vec<MatchRecord> {
    let mut matches = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let row_number = idx + 1;

        let Some(date_cell) = row.first() else { continue; };
        if row.iter().all(|c| c.trim().is_empty()) { continue; }
        if date_cell.to_lowercase().contains("date") { continue; }

        // (player, score) for everyone with a usable number in their column, in roster order
        let scored: Vec<(&str, u32)> = roster.names()
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let cell = row.get(i + 1)?;
                parse_score(cell).map(|score| (name.as_str(), score))
            })
            .collect();

        if scored.len() < 2 {
            debug!("Skipping sheet row {row_number}: {} scored cell(s)", scored.len());
            continue;
        }
        if scored.len() > 2 {
            debug!("Sheet row {row_number} has {} scores, using the first two", scored.len());
        }

        matches.push(MatchRecord {
            player_a: scored[0].0.to_owned(),
            score_a: scored[0].1,
            player_b: scored[1].0.to_owned(),
            score_b: scored[1].1,
            date_time: Some(date_cell.clone()),
            source_row: Some(row_number),
        });
    }

    info!("Rebuilt {} matches from {} sheet rows", matches.len(), rows.len());

    matches.reverse();
    matches
}

// Strict parse. The first row is the header and names the player for every column; each
// remaining row must hold exactly two scores. Output keeps sheet order (oldest first), which
// is the order the rating wants.
pub struct StrictSheetParser;

impl TabularMatchParser for StrictSheetParser {
    fn parse(&self, rows: &[Vec<String>]) -> Result<Vec<MatchRecord>, ImportError> {
        parse_sheet_strict(rows)
    }
}

pub fn parse_sheet_strict(rows: &[Vec<String>]) -> Result<Vec<MatchRecord>, ImportError> {
    if rows.len() < 2 {
        return Err(ImportError::EmptySheet);
    }

    let (header, body) = rows.split_at(1);
    let header = &header[0];
    let mut matches = Vec::with_capacity(body.len());

    for (idx, row) in body.iter().enumerate() {
        // +1 for 1-based, +1 for the header
        let row_number = idx + 2;

        // Column 0 is the date and never a score
        let score_columns: Vec<usize> = (1..row.len())
            .filter(|&col| is_numeric_cell(&row[col]))
            .collect();

        if score_columns.len() != 2 {
            return Err(ImportError::WrongScoreCount { row: row_number, found: score_columns.len() });
        }

        let mut sides = Vec::with_capacity(2);
        for col in score_columns {
            let player = header.get(col)
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .ok_or(ImportError::MissingPlayerName { row: row_number, column: col + 1 })?;

            let score = parse_score(&row[col])
                .ok_or_else(|| ImportError::InvalidScore { row: row_number, cell: row[col].clone() })?;

            sides.push((player.to_owned(), score));
        }

        let (player_b, score_b) = sides.pop().ok_or(ImportError::WrongScoreCount { row: row_number, found: 0 })?;
        let (player_a, score_a) = sides.pop().ok_or(ImportError::WrongScoreCount { row: row_number, found: 1 })?;

        matches.push(MatchRecord {
            player_a,
            score_a,
            player_b,
            score_b,
            date_time: row.first().filter(|d| !d.trim().is_empty()).cloned(),
            source_row: Some(row_number),
        });
    }

    info!("Imported {} matches", matches.len());
    Ok(matches)
}
