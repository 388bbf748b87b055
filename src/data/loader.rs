use crate::config::DatePolicy;
use crate::data::dates::parse_close_time;
use crate::data::record::TradeRecord;
use crate::engine::classifier::{classify, RecordKind};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const ACTION_COLUMN: &str = "Action";
pub const CLOSE_DATE_COLUMN: &str = "Close Date";
pub const PROFIT_COLUMN: &str = "Profit";
pub const COMMISSION_COLUMN: &str = "Commission";
pub const SWAP_COLUMN: &str = "Swap";

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("The export contains no records")]
    Empty,
    #[error("Invalid export format: missing '{0}' column (expected a standard MT5 history export)")]
    MissingColumn(&'static str),
    #[error("Invalid close date '{value}' at line {line}")]
    InvalidDate { line: usize, value: String },
    #[error("Invalid number '{value}' in column '{column}' at line {line}")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
}

//column positions resolved from the header row
struct Columns {
    action: Option<usize>,
    close_date: usize,
    profit: usize,
    commission: Option<usize>,
    swap: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, IngestError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let profit = find(PROFIT_COLUMN).ok_or(IngestError::MissingColumn(PROFIT_COLUMN))?;
        let close_date =
            find(CLOSE_DATE_COLUMN).ok_or(IngestError::MissingColumn(CLOSE_DATE_COLUMN))?;

        Ok(Columns {
            action: find(ACTION_COLUMN),
            close_date,
            profit,
            commission: find(COMMISSION_COLUMN),
            swap: find(SWAP_COLUMN),
        })
    }
}

//loads trade records from a csv file, sorted chronologically
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    policy: DatePolicy,
) -> Result<Vec<TradeRecord>, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file, policy)?;
    info!(path = ?path, records = records.len(), "loaded trade history");
    Ok(records)
}

//reads trade records from any csv source, sorted chronologically
pub fn read_records<R: Read>(
    source: R,
    policy: DatePolicy,
) -> Result<Vec<TradeRecord>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

    if rows.is_empty() {
        return Err(IngestError::Empty);
    }

    let columns = Columns::resolve(&headers)?;
    let mut records = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        //header is line 1
        let line = index + 2;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");

        let raw_date = cell(Some(columns.close_date));
        let close_time = match parse_close_time(raw_date) {
            Some(ts) => ts,
            None => match policy {
                DatePolicy::RejectDataset => {
                    return Err(IngestError::InvalidDate {
                        line,
                        value: raw_date.to_string(),
                    })
                }
                DatePolicy::SkipRecord => {
                    warn!(line, value = raw_date, "skipping row with unparseable close date");
                    continue;
                }
            },
        };

        let action = cell(columns.action);
        let raw_profit = cell(Some(columns.profit));

        //profit only has to be a number on rows the engine will use
        let profit = match classify(action) {
            RecordKind::Ignored => lenient_amount(raw_profit, PROFIT_COLUMN, line),
            _ => parse_amount(raw_profit).ok_or_else(|| IngestError::InvalidNumber {
                line,
                column: PROFIT_COLUMN,
                value: raw_profit.to_string(),
            })?,
        };

        let record = TradeRecord {
            action: action.to_string(),
            close_time,
            profit,
            commission: lenient_amount(cell(columns.commission), COMMISSION_COLUMN, line),
            swap: lenient_amount(cell(columns.swap), SWAP_COLUMN, line),
            line,
        };

        records.push(record);
    }

    //stable, so rows sharing a close time keep file order
    records.sort_by(|a, b| a.close_time.cmp(&b.close_time));

    Ok(records)
}

//empty cells count as zero, spaces used as thousands separators are dropped
//nan and infinities are not amounts
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Some(0.0);
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

//cost cells and ignored rows fall back to zero instead of failing the load
fn lenient_amount(raw: &str, column: &'static str, line: usize) -> f64 {
    parse_amount(raw).unwrap_or_else(|| {
        warn!(line, column, value = raw, "unparseable amount, using 0");
        0.0
    })
}
