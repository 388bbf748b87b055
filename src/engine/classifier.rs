use serde::{Deserialize, Serialize};

//category of an export row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    //deposit, withdrawal, opening balance or balance adjustment
    Funding,
    //closed buy or sell position
    Trade,
    //credit, empty action and other administrative rows
    Ignored,
}

//classifies a row by its action text
//funding: "deposit" or "balance" anywhere in the text, case-insensitive
//trade: exactly "Buy" or "Sell", case-sensitive
pub fn classify(action: &str) -> RecordKind {
    let lowered = action.to_lowercase();
    if lowered.contains("deposit") || lowered.contains("balance") {
        return RecordKind::Funding;
    }

    match action {
        "Buy" | "Sell" => RecordKind::Trade,
        _ => RecordKind::Ignored,
    }
}
