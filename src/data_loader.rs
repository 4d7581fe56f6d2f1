use serde::*;
use serde_aux::field_attributes::{deserialize_number_from_string, deserialize_string_from_number};

use crate::error::ImportError;

// One finished game. Field names follow the JSON the rest of the app speaks, and the
// aliases let us read the older local-storage shape (player1/score1/sheetRow) as well.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    #[serde(alias = "player1")]
    pub player_a: String,
    #[serde(alias = "score1", deserialize_with = "deserialize_number_from_string")]
    pub score_a: u32,
    #[serde(alias = "player2")]
    pub player_b: String,
    #[serde(alias = "score2", deserialize_with = "deserialize_number_from_string")]
    pub score_b: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    // 1-based row in the backing sheet, header included. Only set for imported records.
    #[serde(default, alias = "sheetRow", skip_serializing_if = "Option::is_none")]
    pub source_row: Option<usize>,
}

impl MatchRecord {
    pub fn new(player_a: &str, score_a: u32, player_b: &str, score_b: u32) -> Self {
        Self {
            player_a: player_a.to_owned(),
            score_a,
            player_b: player_b.to_owned(),
            score_b,
            date_time: None,
            source_row: None,
        }
    }

    pub fn dated(mut self, date_time: &str) -> Self {
        self.date_time = Some(date_time.to_owned());
        self
    }

    pub fn is_in_game(&self, name: &str) -> bool {
        self.player_a == name || self.player_b == name
    }

    pub fn is_between(&self, first: &str, second: &str) -> bool {
        (self.player_a == first && self.player_b == second)
            || (self.player_a == second && self.player_b == first)
    }

    pub fn other_player(&self, name: &str) -> Option<&str> {
        if self.player_a == name { return Some(&self.player_b); }
        if self.player_b == name { return Some(&self.player_a); }
        None
    }

    // Score of `name` in this game. Side A is checked first, so a self-match reports side A.
    pub fn score_of(&self, name: &str) -> Option<u32> {
        if self.player_a == name { return Some(self.score_a); }
        if self.player_b == name { return Some(self.score_b); }
        None
    }

    // Side B takes ties. There is no draw in the data model.
    pub fn side_a_won(&self) -> bool {
        self.score_a > self.score_b
    }
}

// The fixed list of players a deployment tracks. Column i+1 of the sheet belongs to names[i].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self(names.iter().map(|n| n.as_ref().to_owned()).collect())
    }

    // "Dad, Luc,Alex" -> [Dad, Luc, Alex]
    pub fn from_list(list: &str) -> Self {
        Self(list
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned)
            .collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

// Sheets can hand back cells as strings or, with unformatted rendering, as raw numbers
#[derive(Deserialize, Debug)]
struct SheetCell(#[serde(deserialize_with = "deserialize_string_from_number")] String);

#[derive(Deserialize, Debug)]
struct SheetResponse {
    #[serde(default)]
    values: Vec<Vec<SheetCell>>,
}

// Pulls the raw value grid out of a spreadsheet values response. A response without
// `values` is an empty grid, not an error; emptiness is for the parser to judge.
pub fn decode_sheet_values(json: &str) -> Result<Vec<Vec<String>>, ImportError> {
    let response: SheetResponse = serde_json::from_str(json)?;

    Ok(response.values
        .into_iter()
        .map(|row| row.into_iter().map(|c| c.0).collect())
        .collect())
}

// Reads a CSV export of the sheet. Nothing is treated as a header here, the row parsers deal with that.
pub fn read_csv_rows(text: &str) -> Result<Vec<Vec<String>>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    Ok(rows)
}

// Matches as kept on the device: a JSON array, newest first
pub fn decode_local_matches(json: &str) -> Result<Vec<MatchRecord>, ImportError> {
    Ok(serde_json::from_str(json)?)
}

// Lays a match out the way the sheet stores it: date first, then one cell per roster
// player with only the two participants filled in.
pub fn to_sheet_row(m: &MatchRecord, roster: &Roster) -> Vec<String> {
    let mut row = Vec::with_capacity(roster.len() + 1);
    row.push(m.date_time.clone().unwrap_or_default());

    for name in roster.names() {
        let cell = match m.score_of(name) {
            Some(score) => score.to_string(),
            None => String::new(),
        };
        row.push(cell);
    }

    row
}

// Writes a full sheet export. Input is newest first, the way everything else holds matches,
// but the sheet is an append log so the file comes out oldest first.
pub fn write_csv_export(matches: &[MatchRecord], roster: &Roster) -> Result<String, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Date".to_owned()];
    header.extend(roster.names().iter().cloned());
    writer.write_record(&header)?;

    for m in matches.iter().rev() {
        writer.write_record(to_sheet_row(m, roster))?;
    }

    let bytes = writer.into_inner().map_err(|e| ImportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(&["Dad", "Luc", "Alex", "Mom"])
    }

    #[test]
    fn reads_local_storage_shape() {
        let json = r#"[
            {"player1":"Dad","player2":"Luc","score1":21,"score2":"10","dateTime":"2024-05-10T18:30:00.000Z"},
            {"player1":"Alex","player2":"Mom","score1":8,"score2":21,"dateTime":"2024-01-05T11:00:00.000Z","sheetRow":3}
        ]"#;

        let matches = decode_local_matches(json).expect("local json should decode");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].player_a, "Dad");
        assert_eq!(matches[0].score_b, 10);
        assert_eq!(matches[0].source_row, None);
        assert_eq!(matches[1].source_row, Some(3));
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let m = MatchRecord::new("Dad", 21, "Mom", 10);
        let json = serde_json::to_string(&m).expect("serialize");
        assert_eq!(json, r#"{"playerA":"Dad","scoreA":21,"playerB":"Mom","scoreB":10}"#);
    }

    #[test]
    fn sheet_cells_may_be_numbers() {
        let json = r#"{"values":[["Date","Dad","Luc"],["2024-05-10 18:30",21,"15"]]}"#;
        let rows = decode_sheet_values(json).expect("sheet json should decode");
        assert_eq!(rows[1], vec!["2024-05-10 18:30", "21", "15"]);
    }

    #[test]
    fn missing_values_is_an_empty_grid() {
        let rows = decode_sheet_values(r#"{"range":"Sheet1!A:E"}"#).expect("decode");
        assert!(rows.is_empty());
    }

    #[test]
    fn sheet_row_fills_only_participants() {
        let m = MatchRecord::new("Mom", 10, "Dad", 21).dated("2024-05-10 18:30");
        assert_eq!(to_sheet_row(&m, &roster()), vec!["2024-05-10 18:30", "21", "", "", "10"]);
    }

    #[test]
    fn csv_rows_keep_blank_cells() {
        let rows = read_csv_rows("Date,Dad,Luc,Alex,Mom\n2024-05-10 18:30,21,,,10\n").expect("csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["2024-05-10 18:30", "21", "", "", "10"]);
    }

    #[test]
    fn roster_list_is_trimmed() {
        let r = Roster::from_list(" Dad, Luc ,,Alex");
        assert_eq!(r.names(), &["Dad".to_owned(), "Luc".to_owned(), "Alex".to_owned()]);
        assert!(r.contains("Luc"));
        assert!(!r.contains("Mom"));
    }

    #[test]
    fn ties_go_to_side_b() {
        let m = MatchRecord::new("Dad", 15, "Luc", 15);
        assert!(!m.side_a_won());
        assert_eq!(m.other_player("Luc"), Some("Dad"));
        assert_eq!(m.other_player("Mom"), None);
    }
}
