//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use skat_engine::services::series::GameRecord;
use skat_engine::SeriesReport;

use crate::OutputFormat;

/// One CSV row per simulated game.
#[derive(Debug, Serialize)]
pub struct CsvGameRow {
    pub table: usize,
    pub game_no: u32,
    pub declarer: String,
    pub game_type: String,
    pub won: String,
    pub game_value: i32,
    pub name0: String,
    pub delta0: i64,
    pub name1: String,
    pub delta1: i64,
    pub name2: String,
    pub delta2: i64,
}

impl CsvGameRow {
    fn new(table: usize, names: &[String; 3], record: &GameRecord) -> Self {
        let result = record.result.as_ref();
        Self {
            table,
            game_no: record.game_no,
            declarer: record.declarer.clone().unwrap_or_default(),
            game_type: record
                .game_type
                .map(|gt| format!("{gt:?}"))
                .unwrap_or_default(),
            won: result.map(|r| r.won.to_string()).unwrap_or_default(),
            game_value: result.map_or(0, |r| r.game_value),
            name0: names[0].clone(),
            delta0: record.deltas[0],
            name1: names[1].clone(),
            delta1: record.deltas[1],
            name2: names[2].clone(),
            delta2: record.deltas[2],
        }
    }
}

#[derive(Serialize)]
struct JsonGameLine<'a> {
    table: usize,
    names: &'a [String; 3],
    #[serde(flatten)]
    record: &'a GameRecord,
}

pub struct OutputWriter {
    jsonl_writer: Option<Box<dyn Write + Send>>,
    csv_writer: Option<csv::Writer<BufWriter<File>>>,
    jsonl_path: Option<PathBuf>,
    csv_path: Option<PathBuf>,
}

impl OutputWriter {
    pub fn new(
        output_dir: &str,
        format: OutputFormat,
        compress: bool,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");

        let mut writer = Self {
            jsonl_writer: None,
            csv_writer: None,
            jsonl_path: None,
            csv_path: None,
        };
        match format {
            OutputFormat::Jsonl => {
                let filename = format!("series_{timestamp}.jsonl");
                if compress {
                    let path = dir.join(format!("{filename}.gz"));
                    let gz = GzEncoder::new(File::create(&path)?, Compression::default());
                    writer.jsonl_writer = Some(Box::new(BufWriter::new(gz)));
                    writer.jsonl_path = Some(path);
                } else {
                    let path = dir.join(filename);
                    writer.jsonl_writer = Some(Box::new(BufWriter::new(create(&path)?)));
                    writer.jsonl_path = Some(path);
                }
            }
            OutputFormat::Csv => {
                let path = dir.join(format!("series_{timestamp}.csv"));
                writer.csv_writer = Some(csv::Writer::from_writer(BufWriter::new(create(&path)?)));
                writer.csv_path = Some(path);
            }
        }
        Ok(writer)
    }

    pub fn write_report(
        &mut self,
        table: usize,
        report: &SeriesReport,
    ) -> Result<(), Box<dyn std::error::Error>> {
        for record in &report.games {
            if let Some(ref mut writer) = self.jsonl_writer {
                let line = JsonGameLine {
                    table,
                    names: &report.names,
                    record,
                };
                writeln!(writer, "{}", serde_json::to_string(&line)?)?;
            }
            if let Some(ref mut writer) = self.csv_writer {
                writer.serialize(CsvGameRow::new(table, &report.names, record))?;
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref mut writer) = self.jsonl_writer {
            writer.flush()?;
        }
        if let Some(ref mut writer) = self.csv_writer {
            writer.flush()?;
        }
        Ok(())
    }

    pub fn output_paths(&self) -> (Option<&PathBuf>, Option<&PathBuf>) {
        (self.jsonl_path.as_ref(), self.csv_path.as_ref())
    }
}

fn create(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}
