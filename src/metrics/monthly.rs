use crate::config::DisplayMode;
use crate::report::format::{format_signed_pct, format_signed_usd};
use indexmap::IndexMap;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

//pnl for a single calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub profit_usd: f64,
    //equity just before the month's first trade, set once
    pub start_equity: f64,
}

impl MonthBucket {
    fn opened_at(start_equity: f64) -> Self {
        MonthBucket {
            profit_usd: 0.0,
            start_equity,
        }
    }

    //month return relative to its starting equity
    pub fn pct(&self) -> f64 {
        if self.start_equity > 0.0 {
            self.profit_usd / self.start_equity * 100.0
        } else {
            0.0
        }
    }

    pub fn value(&self, mode: DisplayMode) -> f64 {
        match mode {
            DisplayMode::Usd => self.profit_usd,
            DisplayMode::Percent => self.pct(),
        }
    }
}

//derived yearly figure, never stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearTotal {
    pub profit_usd: f64,
    //start equity of the first month with a positive baseline
    pub baseline_equity: Option<f64>,
}

impl YearTotal {
    pub fn pct(&self) -> f64 {
        match self.baseline_equity {
            Some(baseline) => self.profit_usd / baseline * 100.0,
            None => 0.0,
        }
    }

    pub fn value(&self, mode: DisplayMode) -> f64 {
        match mode {
            DisplayMode::Usd => self.profit_usd,
            DisplayMode::Percent => self.pct(),
        }
    }
}

//year -> month -> bucket, both levels kept sorted by key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMatrix {
    years: IndexMap<i32, IndexMap<u32, MonthBucket>>,
}

impl MonthlyMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    //adds a trade result to its month
    //`equity_before` only becomes the baseline when the bucket is created here
    pub fn record_trade(&mut self, year: i32, month: u32, equity_before: f64, net_pnl: f64) {
        if !self.years.contains_key(&year) {
            self.years.insert(year, IndexMap::new());
            self.years.sort_keys();
        }
        let months = self.years.entry(year).or_default();

        if !months.contains_key(&month) {
            months.insert(month, MonthBucket::opened_at(equity_before));
            months.sort_keys();
        }
        if let Some(bucket) = months.get_mut(&month) {
            bucket.profit_usd += net_pnl;
        }
    }

    pub fn get(&self, year: i32, month: u32) -> Option<&MonthBucket> {
        self.years.get(&year).and_then(|months| months.get(&month))
    }

    //years in ascending order
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.years.keys().copied().collect();
        years.sort_unstable();
        years
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn year_total(&self, year: i32) -> Option<YearTotal> {
        let months = self.years.get(&year)?;

        let profit_usd = months.values().map(|b| b.profit_usd).sum();
        let baseline_equity = (1..=12)
            .filter_map(|m| months.get(&m))
            .map(|b| b.start_equity)
            .find(|&equity| equity > 0.0);

        Some(YearTotal {
            profit_usd,
            baseline_equity,
        })
    }

    //builds the year x month table, absent months show as "-"
    pub fn to_table(&self, mode: DisplayMode) -> Table {
        let mut table = Table::new();

        let mut header = vec![Cell::new("Year")];
        header.extend(MONTH_NAMES.iter().map(|m| Cell::new(m)));
        header.push(Cell::new("Total"));
        table.add_row(Row::new(header));

        if self.is_empty() {
            table.add_row(Row::new(vec![Cell::new(
                "No data available for matrix",
            )
            .with_hspan(14)]));
            return table;
        }

        for year in self.years() {
            let mut cells = vec![Cell::new(&year.to_string())];

            for month in 1..=12 {
                let text = match self.get(year, month) {
                    Some(bucket) => format_cell(bucket.value(mode), mode),
                    None => "-".to_string(),
                };
                cells.push(Cell::new(&text));
            }

            let total = self
                .year_total(year)
                .map(|t| format_cell(t.value(mode), mode))
                .unwrap_or_else(|| "-".to_string());
            cells.push(Cell::new(&total));

            table.add_row(Row::new(cells));
        }

        table
    }

    //prints the matrix in a formatted table
    pub fn pretty_print_table(&self, mode: DisplayMode) {
        self.to_table(mode).printstd();
    }
}

fn format_cell(value: f64, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Usd => format_signed_usd(value),
        DisplayMode::Percent => format_signed_pct(value),
    }
}
