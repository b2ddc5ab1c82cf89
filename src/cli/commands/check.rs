//! Check records command implementation
//!
//! This module implements the `check-records` command, which runs the
//! decrypted-record validator over a JSON Lines file and reports which
//! records would be skipped.

use crate::config::{load_config, ValidatorConfig};
use crate::core::validation::{ValidationSummary, Validator};
use crate::domain::{EncryptionBlock, RecordId, SourceRecord};
use crate::log_record_skipped;
use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::Args;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Arguments for the check-records command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON Lines file with one decrypted record per line
    #[arg(short, long)]
    pub input: String,

    /// Print every skipped record
    #[arg(short, long)]
    pub verbose: bool,
}

/// One line of the input file
#[derive(Debug, Deserialize)]
struct RecordInput {
    /// Checksum-prefixed record id, base64 encoded
    record_id: String,
    database: String,
    collection: String,
    #[serde(default)]
    last_modified: String,
    /// Decrypted payload text
    payload: String,
    #[serde(default)]
    data_length: Option<usize>,
    #[serde(default)]
    encryption: Option<EncryptionBlock>,
}

impl RecordInput {
    fn into_source_record(self) -> anyhow::Result<(SourceRecord, String)> {
        let raw_id = STANDARD
            .decode(self.record_id.trim())
            .context("record_id is not valid base64")?;
        let record_id = RecordId::from_prefixed(&raw_id).map_err(anyhow::Error::msg)?;
        let data_length = self.data_length.unwrap_or(self.payload.len());
        let encryption = self
            .encryption
            .unwrap_or_else(|| EncryptionBlock::new("", "", ""));
        let record = SourceRecord::new(
            record_id,
            data_length,
            encryption,
            self.database,
            self.collection,
            self.last_modified,
        );
        Ok((record, self.payload))
    }
}

fn read_record(line: &str) -> anyhow::Result<(SourceRecord, String)> {
    let input: RecordInput = serde_json::from_str(line).context("not a valid record")?;
    input.into_source_record()
}

impl CheckArgs {
    /// Execute the check-records command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Checking decrypted records");

        let validator_config = if Path::new(config_path).exists() {
            match load_config(config_path) {
                Ok(config) => config.validator,
                Err(e) => {
                    println!("❌ Configuration is invalid");
                    println!("   Error: {e}");
                    return Ok(2);
                }
            }
        } else {
            tracing::debug!(
                config_path = %config_path,
                "No configuration file, using validator defaults"
            );
            ValidatorConfig::default()
        };

        let content = match fs::read_to_string(&self.input) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to read input file {}: {e}", self.input);
                return Ok(2);
            }
        };

        let validator = Validator::from_config(&validator_config);
        let summary = self.check_lines(&validator, &content);

        summary.log_summary();
        Self::print_summary(&summary);

        Ok(if summary.skipped() == 0 { 0 } else { 1 })
    }

    fn check_lines(&self, validator: &Validator, content: &str) -> ValidationSummary {
        let mut summary = ValidationSummary::new();

        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let (record, payload) = match read_record(line) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(
                        line = line_no,
                        error = %format!("{e:#}"),
                        "Unreadable input line skipped"
                    );
                    if self.verbose {
                        println!("⚠️  line {line_no}: {e:#}");
                    }
                    summary.add_unreadable();
                    continue;
                }
            };

            match validator.validate(&record, &payload) {
                Ok(validated) => summary.add_valid(&validated),
                Err(e) => {
                    log_record_skipped!(&e);
                    if self.verbose {
                        println!("⚠️  line {line_no}: {e}");
                    }
                    summary.add_skipped(&e);
                }
            }
        }

        summary
    }

    fn print_summary(summary: &ValidationSummary) {
        println!();
        println!("📊 Validation Summary");
        println!("  Total records: {}", summary.total());
        println!("  Valid: {}", summary.valid);
        println!("  Skipped (malformed): {}", summary.malformed);
        println!("  Skipped (missing _id): {}", summary.missing_id);
        println!("  Skipped (unreadable input): {}", summary.unreadable);
        if !summary.by_type.is_empty() {
            println!("  Valid records by type:");
            for (record_type, count) in &summary.by_type {
                println!("    {record_type}: {count}");
            }
        }
        println!();
        if summary.skipped() == 0 {
            println!("✅ All records are valid");
        } else {
            println!("⚠️  {} record(s) would be skipped", summary.skipped());
        }
    }
}
