//! Bank files (JSON lists of stored arrays), config loading and TSV export.
use std::path::Path;

use anyhow::{Context, Result};

use arraylogic::bank::ArrayBank;
use arraylogic::config::LogicConfig;
use arraylogic::record::StoredArray;

/// Load a logic configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LogicConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: LogicConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Load a bank file. A missing file is an empty bank.
pub fn load_bank<P: AsRef<Path>>(path: P, config: &LogicConfig) -> Result<ArrayBank> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!("No bank at {}; starting empty", path.display());
        return Ok(ArrayBank::from_config(config));
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bank: {}", path.display()))?;
    let records: Vec<StoredArray> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse bank: {}", path.display()))?;
    let bank = ArrayBank::from_records(config.bank_capacity, &records)
        .with_context(|| format!("Invalid array in bank: {}", path.display()))?;
    Ok(bank)
}

pub fn save_bank<P: AsRef<Path>>(path: P, bank: &ArrayBank) -> Result<()> {
    let json = serde_json::to_string_pretty(&bank.to_records())?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write bank: {}", path.as_ref().display()))?;
    Ok(())
}

/// Write every array as a grid of last-axis rows.
///
/// Columns: label, slot, row, then one column per cell. Rows of a bank share
/// one file, so records are flexible in length.
pub fn export_tsv<P: AsRef<Path>>(path: P, bank: &ArrayBank) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("Failed to create TSV file: {}", path.as_ref().display()))?;

    for (slot, entry) in bank.iter().enumerate() {
        for (row, cells) in entry.array.rows().enumerate() {
            let mut record = vec![entry.label.clone(), slot.to_string(), row.to_string()];
            record.extend(cells.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
    }
    writer.flush()?;
    Ok(())
}
