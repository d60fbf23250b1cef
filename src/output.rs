use crate::config::OutputRecord;
use anyhow::{anyhow, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const CSV_VALUE_SEPARATOR: &str = ";";

pub enum Writer {
    Stdout(Box<dyn Write>),
    JsonFile(BufWriter<File>, bool), // bool tracks if we've written the opening bracket
    JsonlFile(BufWriter<File>),
    CsvFile(BufWriter<File>, Vec<String>, bool), // columns, headers written
}

impl Writer {
    pub fn write_batch(&mut self, records: &[OutputRecord]) -> Result<()> {
        match self {
            Writer::Stdout(writer) => {
                for record in records {
                    writeln!(writer, "{}", serde_json::to_string_pretty(record)?)?;
                }
            }
            Writer::JsonFile(writer, is_first) => {
                for record in records {
                    if *is_first {
                        write!(writer, "[")?;
                        *is_first = false;
                    } else {
                        write!(writer, ",")?;
                    }
                    let serialized = serde_json::to_string_pretty(record)?;
                    write!(writer, "\n{}", serialized)?;
                }
            }
            Writer::JsonlFile(writer) => {
                for record in records {
                    writeln!(writer, "{}", serde_json::to_string(record)?)?;
                }
            }
            Writer::CsvFile(writer, columns, headers_written) => {
                if !*headers_written {
                    let header: Vec<String> = columns.iter().map(|c| escape_csv_field(c)).collect();
                    writeln!(writer, "{}", header.join(","))?;
                    *headers_written = true;
                }

                for record in records {
                    let row: Vec<String> = columns
                        .iter()
                        .map(|c| {
                            let values = record.get(c).unwrap_or_default();
                            escape_csv_field(&join_csv_values(values))
                        })
                        .collect();
                    writeln!(writer, "{}", row.join(","))?;
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        match self {
            Writer::JsonFile(ref mut writer, is_first) => {
                if is_first {
                    write!(writer, "[")?;
                }
                writeln!(writer, "\n]")?;
                writer.flush()?;
            }
            Writer::JsonlFile(ref mut writer) | Writer::CsvFile(ref mut writer, _, _) => {
                writer.flush()?;
            }
            Writer::Stdout(ref mut writer) => {
                writer.flush()?;
            }
        }
        Ok(())
    }
}

/// `columns` are the canonical keys of the active format, used as the CSV header.
pub fn create_writer(output_arg: &str, columns: Vec<String>) -> Result<Writer> {
    match output_arg {
        "stdout" => Ok(Writer::Stdout(Box::new(io::stdout()))),
        path if path.ends_with(".jsonl") || path.ends_with(".ndjson") => {
            Ok(Writer::JsonlFile(open(path)?))
        }
        path if path.ends_with(".csv") => Ok(Writer::CsvFile(open(path)?, columns, false)),
        path if path.ends_with(".json") => Ok(Writer::JsonFile(open(path)?, true)),
        path => {
            // Default to JSON file if it looks like a path
            if path.contains('/') || path.contains('\\') || path.contains('.') {
                Ok(Writer::JsonFile(open(path)?, true))
            } else {
                Err(anyhow!(
                    "Unknown output format: {}. Use 'stdout' or a file path",
                    output_arg
                ))
            }
        }
    }
}

fn open(path: &str) -> Result<BufWriter<File>> {
    create_parent_dirs(path)?;
    Ok(BufWriter::new(File::create(path)?))
}

fn create_parent_dirs(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Elements holding the separator are quoted so `"a;b"` and `["a", "b"]` stay distinct.
fn join_csv_values(values: &[String]) -> String {
    values
        .iter()
        .map(|v| {
            if v.contains(CSV_VALUE_SEPARATOR) || v.contains('"') {
                format!("\"{}\"", v.replace('"', "\"\""))
            } else {
                v.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(CSV_VALUE_SEPARATOR)
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write(output_arg: &str, columns: Vec<String>, records: &[OutputRecord]) -> Result<()> {
    let mut writer = create_writer(output_arg, columns)?;
    writer.write_batch(records)?;
    writer.finish()
}
