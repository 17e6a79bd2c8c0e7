//! Tabular tracker file codec.
//!
//! Layout, one CSV record per line:
//!
//! ```text
//! Weapon,Range Start,Range End,Status,Kills,Active Weapon Index
//! ,,,,<counter>,<active index>
//! <name>,<start>,<end>,<status>
//! ...
//! ```

use std::path::Path;

use gunathon_core::{Milestone, MilestoneStatus, TrackerState};
use tokio::fs;

use super::{Result, StorageError};

/// Header row of the tracker file.
pub const HEADER: [&str; 6] = [
    "Weapon",
    "Range Start",
    "Range End",
    "Status",
    "Kills",
    "Active Weapon Index",
];

const KILLS_COLUMN: usize = 4;
const INDEX_COLUMN: usize = 5;

/// Decode tracker state from the tabular text format.
pub fn decode(text: &str) -> Result<TrackerState> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?;
    if headers.len() < 4 {
        return Err(malformed(1, format!("expected a header row, found {} columns", headers.len())));
    }

    let mut state = TrackerState::default();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(row as u64 + 2, |p| p.line());

        // The first row after the header only carries the two scalars.
        if row == 0 {
            state.counter = parse_cell(record.get(KILLS_COLUMN), line, "kills")?.unwrap_or(0);
            state.active_index =
                parse_cell(record.get(INDEX_COLUMN), line, "active weapon index")?.unwrap_or(0);
            continue;
        }

        let name = record.get(0).unwrap_or_default();
        if name.trim().is_empty() {
            continue;
        }

        let range_start = parse_cell(record.get(1), line, "range start")?
            .ok_or_else(|| malformed(line, "missing range start"))?;
        let range_end = parse_cell(record.get(2), line, "range end")?
            .ok_or_else(|| malformed(line, "missing range end"))?;
        let status: MilestoneStatus = record
            .get(3)
            .unwrap_or_default()
            .parse()
            .map_err(|e| malformed(line, e))?;

        state
            .items
            .push(Milestone::new(name, range_start, range_end).with_status(status));
    }

    Ok(state)
}

/// Encode tracker state into the tabular text format.
pub fn encode(state: &TrackerState) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    writer.write_record([
        "",
        "",
        "",
        "",
        &state.counter.to_string(),
        &state.active_index.to_string(),
    ])?;

    for item in &state.items {
        writer.write_record([
            item.name.as_str(),
            &item.range_start.to_string(),
            &item.range_end.to_string(),
            item.status.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| StorageError::Io(e.into_error()))
}

/// Read tracker state from `path`.
pub async fn read_state(path: &Path) -> Result<TrackerState> {
    let text = fs::read_to_string(path).await?;
    decode(&text)
}

/// Write tracker state to `path`, creating parent directories as needed.
pub async fn write_state(path: &Path, state: &TrackerState) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, encode(state)?).await?;
    Ok(())
}

fn parse_cell<T: std::str::FromStr>(cell: Option<&str>, line: u64, what: &str) -> Result<Option<T>> {
    match cell.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| malformed(line, format!("{what} is not a whole number: {value:?}"))),
    }
}

fn malformed(line: u64, reason: impl ToString) -> StorageError {
    StorageError::Malformed {
        line,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Weapon,Range Start,Range End,Status,Kills,Active Weapon Index
,,,,7,1
Nagant,-999,5,Complete
Nagant Precision,5,10,Active
Nagant Silencer,10,15,Incomplete
";

    #[test]
    fn test_decode_sample() {
        let state = decode(SAMPLE).unwrap();
        assert_eq!(state.counter, 7);
        assert_eq!(state.active_index, 1);
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.items[0].range_start, -999);
        assert_eq!(state.items[1].status, MilestoneStatus::Active);
        assert_eq!(state.items[2].name, "Nagant Silencer");
    }

    #[test]
    fn test_encode_layout() {
        let state = decode(SAMPLE).unwrap();
        let text = String::from_utf8(encode(&state).unwrap()).unwrap();
        assert_eq!(text, SAMPLE);
    }

    #[test]
    fn test_decode_tolerates_sparse_rows() {
        let text = "\
Weapon,Range Start,Range End,Status,Kills,Active Weapon Index
,,,,,
Katana,700,705
,,,
Machete,705,710,
";
        let state = decode(text).unwrap();
        assert_eq!(state.counter, 0);
        assert_eq!(state.active_index, 0);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].status, MilestoneStatus::Incomplete);
        assert_eq!(state.items[1].status, MilestoneStatus::Incomplete);
    }

    #[test]
    fn test_decode_names_with_commas() {
        let mut state = TrackerState::default();
        state.items.push(Milestone::new("Axe, Combat", 0, 5));
        let decoded = decode(std::str::from_utf8(&encode(&state).unwrap()).unwrap()).unwrap();
        assert_eq!(decoded.items[0].name, "Axe, Combat");
    }

    #[test]
    fn test_decode_rejects_bad_range() {
        let text = "\
Weapon,Range Start,Range End,Status,Kills,Active Weapon Index
,,,,0,0
Romero,forty,45,Incomplete
";
        match decode(text) {
            Err(StorageError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_unknown_status() {
        let text = "\
Weapon,Range Start,Range End,Status,Kills,Active Weapon Index
,,,,0,0
Romero,40,45,Unlocked
";
        assert!(matches!(decode(text), Err(StorageError::Malformed { .. })));
    }

    #[test]
    fn test_decode_rejects_empty_file() {
        assert!(matches!(decode(""), Err(StorageError::Malformed { line: 1, .. })));
    }
}
