use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//which fields make up the net result of a trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPolicy {
    //profit column only, commission and swap are read but not applied
    #[default]
    ProfitOnly,
    //profit + commission + swap (costs are signed in broker exports)
    IncludeCosts,
}

impl CostPolicy {
    //parse cost policy from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "profit" | "profit_only" => Some(CostPolicy::ProfitOnly),
            "costs" | "include_costs" | "net" => Some(CostPolicy::IncludeCosts),
            _ => None,
        }
    }
}

//what to do with a row whose close date is missing or unparseable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    //fail the whole load
    #[default]
    RejectDataset,
    //drop the row and keep going
    SkipRecord,
}

//which of the two parallel representations the renderer shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Usd,
    Percent,
}

impl DisplayMode {
    pub fn from_percent_flag(percent: bool) -> Self {
        if percent {
            DisplayMode::Percent
        } else {
            DisplayMode::Usd
        }
    }

    //flips between usd and percent
    pub fn toggle(self) -> Self {
        match self {
            DisplayMode::Usd => DisplayMode::Percent,
            DisplayMode::Percent => DisplayMode::Usd,
        }
    }
}

//complete analysis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    //net pnl composition
    pub cost_policy: CostPolicy,

    //handling of bad close dates during ingestion
    pub date_policy: DatePolicy,

    //initial display mode
    pub display_mode: DisplayMode,

    //optional output paths
    pub output_equity_csv: Option<PathBuf>,
    pub output_json: Option<PathBuf>,
}

impl AnalysisConfig {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
