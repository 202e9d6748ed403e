use crate::utils::{file_reader, open_file};
use log::{error, warn};
use shared::error::{ResolverError, ResolverErrorKind};
use shared::handle_resolver_error_result;
use shared::model::{ChannelId, ChannelRecord};
use std::io::{self, BufRead};
use std::path::Path;

const CSV_SEPARATOR: char = ';';
const HEADER_PREFIX: char = '#';
const FIELD_ID: &str = "id";
const FIELD_NAME: &str = "name";
const FIELD_LIVENESS: &str = "liveness_count";
const FIELD_SOURCE: &str = "source";
const FIELD_UNKNOWN: &str = "?";
const DEFAULT_COLUMNS: &[&str] = &[FIELD_ID, FIELD_NAME, FIELD_LIVENESS];

fn csv_parse_id(value: &str) -> ChannelId {
    value.parse::<i64>().map_or_else(|_| ChannelId::Text(value.to_string()), ChannelId::Num)
}

fn csv_assign_record_column(record: &mut ChannelRecord, header: &str, raw_value: &str) {
    let value = raw_value.trim();
    if value.is_empty() {
        return;
    }
    match header {
        FIELD_ID => record.id = csv_parse_id(value),
        FIELD_NAME => record.raw_name = value.to_string(),
        FIELD_LIVENESS => {
            record.liveness_count = value.parse::<u32>().unwrap_or_else(|e| {
                error!("Failed to parse liveness_count '{value}': {e}");
                0
            });
        }
        FIELD_SOURCE => record.source = value.to_string(),
        _ => {}
    }
}

/// Reads `;` separated catalog lines. An optional first line starting with
/// `#` names the columns; otherwise `id;name;liveness_count` is assumed.
/// Lines without an id are skipped.
pub fn csv_read_catalog_from_reader(reader: impl BufRead) -> Result<Vec<ChannelRecord>, io::Error> {
    let mut result = vec![];
    let mut columns: Vec<&str> = DEFAULT_COLUMNS.to_vec();
    let mut header_defined = false;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix(HEADER_PREFIX) {
            if !header_defined {
                header_defined = true;
                columns = header.split(CSV_SEPARATOR).map(|s| {
                    match s.trim() {
                        FIELD_ID => FIELD_ID,
                        FIELD_NAME => FIELD_NAME,
                        FIELD_LIVENESS | "stream_count" => FIELD_LIVENESS,
                        FIELD_SOURCE => FIELD_SOURCE,
                        other => {
                            error!("Field {other} is unsupported for csv catalogs");
                            FIELD_UNKNOWN
                        }
                    }
                }).collect();
            }
            continue;
        }

        let mut record = ChannelRecord::new(ChannelId::Text(String::new()), "", 0);
        for (&header, value) in columns.iter().zip(line.split(CSV_SEPARATOR)) {
            csv_assign_record_column(&mut record, header, value);
        }
        if record.id == ChannelId::Text(String::new()) {
            warn!("Skipping catalog line without id: {line}");
            continue;
        }
        result.push(record);
    }
    Ok(result)
}

fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()).is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Loads a catalog file. `.csv` files are read as `;` separated text,
/// everything else as a JSON array of records.
pub fn read_catalog(path: &Path) -> Result<Vec<ChannelRecord>, ResolverError> {
    let file = handle_resolver_error_result!(ResolverErrorKind::Info, open_file(path));
    let reader = file_reader(file);
    let records = if is_csv(path) {
        handle_resolver_error_result!(ResolverErrorKind::Info, csv_read_catalog_from_reader(reader))
    } else {
        handle_resolver_error_result!(ResolverErrorKind::Info, serde_json::from_reader::<_, Vec<ChannelRecord>>(reader))
    };
    Ok(records)
}
