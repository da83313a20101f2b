use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, ensure, Context, Result};
use arrow::array::{
    Array, AsArray, Date32Array, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::model::{month_start, MetricRecord, Observation, SegmentKey};

/// Upload limit of the original widget.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

const PARQUET_BATCH_SIZE: usize = 1024;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load observations (real vs. predicted counts). Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header `fecha,provincia,tipo_vehiculo,cantidad_real,cantidad_predicha`
/// * `.json`    – `[{ "fecha": "2025-01-01", "provincia": ..., ... }, ...]`
/// * `.parquet` – same column names (recommended for large exports)
///
/// The result is stable-sorted by month.
pub fn load_observations(path: &Path, max_bytes: u64) -> Result<Vec<Observation>> {
    check_size(path, max_bytes)?;

    let mut observations = match extension(path).as_str() {
        "csv" => read_csv_rows::<ObservationRow>(path)?
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.validate(i))
            .collect::<Result<Vec<_>>>()?,
        "json" => read_json_rows::<ObservationRow>(path)?
            .into_iter()
            .enumerate()
            .map(|(i, row)| row.validate(i))
            .collect::<Result<Vec<_>>>()?,
        "parquet" | "pq" => load_parquet_observations(path, PARQUET_BATCH_SIZE)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    observations.sort_by_key(|o| o.date);
    Ok(observations)
}

/// Load per-segment metrics. Dispatch by extension (`.csv` or `.json`).
///
/// Columns: `provincia,tipo_vehiculo,MAE,RMSE,changepoint_prior_scale,fourier_order`.
pub fn load_metrics(path: &Path, max_bytes: u64) -> Result<Vec<MetricRecord>> {
    check_size(path, max_bytes)?;

    let rows = match extension(path).as_str() {
        "csv" => read_csv_rows::<MetricRow>(path)?,
        "json" => read_json_rows::<MetricRow>(path)?,
        other => bail!("Unsupported metrics file extension: .{other}"),
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.validate(i))
        .collect()
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn check_size(path: &Path, max_bytes: u64) -> Result<()> {
    let len = std::fs::metadata(path)
        .with_context(|| format!("reading metadata of {}", path.display()))?
        .len();
    ensure!(
        len <= max_bytes,
        "File is too large: {len} bytes (limit {max_bytes})"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Row schemas
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ObservationRow {
    fecha: String,
    provincia: String,
    tipo_vehiculo: String,
    cantidad_real: i64,
    cantidad_predicha: f64,
}

impl ObservationRow {
    fn validate(self, row: usize) -> Result<Observation> {
        let date = parse_month(&self.fecha).with_context(|| format!("Row {row}: bad 'fecha'"))?;
        ensure!(
            self.cantidad_real >= 0,
            "Row {row}: cantidad_real is negative ({})",
            self.cantidad_real
        );
        ensure!(
            self.cantidad_predicha.is_finite() && self.cantidad_predicha >= 0.0,
            "Row {row}: cantidad_predicha must be a non-negative number, got {}",
            self.cantidad_predicha
        );
        Ok(Observation {
            date,
            segment: SegmentKey::new(self.provincia, self.tipo_vehiculo),
            actual_count: self.cantidad_real as u64,
            predicted_count: self.cantidad_predicha,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MetricRow {
    provincia: String,
    tipo_vehiculo: String,
    #[serde(rename = "MAE")]
    mae: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    changepoint_prior_scale: f64,
    fourier_order: i64,
}

impl MetricRow {
    fn validate(self, row: usize) -> Result<MetricRecord> {
        ensure!(
            self.mae.is_finite() && self.mae >= 0.0,
            "Row {row}: MAE must be a non-negative number, got {}",
            self.mae
        );
        ensure!(
            self.rmse.is_finite() && self.rmse >= 0.0,
            "Row {row}: RMSE must be a non-negative number, got {}",
            self.rmse
        );
        ensure!(
            self.changepoint_prior_scale.is_finite() && self.changepoint_prior_scale > 0.0,
            "Row {row}: changepoint_prior_scale must be positive, got {}",
            self.changepoint_prior_scale
        );
        let fourier_order = u32::try_from(self.fourier_order)
            .ok()
            .filter(|&fo| fo > 0)
            .with_context(|| {
                format!(
                    "Row {row}: fourier_order must be a positive integer, got {}",
                    self.fourier_order
                )
            })?;
        Ok(MetricRecord {
            segment: SegmentKey::new(self.provincia, self.tipo_vehiculo),
            mae: self.mae,
            rmse: self.rmse,
            changepoint_prior_scale: self.changepoint_prior_scale,
            fourier_order,
        })
    }
}

/// Accepts `YYYY-MM-DD` or `YYYY-MM`; the day is dropped.
fn parse_month(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .with_context(|| format!("'{s}' is not a YYYY-MM-DD or YYYY-MM date"))?;
    Ok(month_start(date))
}

// ---------------------------------------------------------------------------
// CSV / JSON readers
// ---------------------------------------------------------------------------

fn read_csv_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).context("opening CSV")?;
    csv_rows_from_reader(file)
}

fn csv_rows_from_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    reader
        .deserialize()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

/// Records-oriented array as written by
/// `df.to_json(orient='records', date_format='iso')`. Pandas' default epoch
/// dates are numbers and are rejected by the `fecha` field.
fn read_json_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing JSON: expected an array of records")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load observations from a Parquet file written by Pandas or Polars.
///
/// Expected schema:
/// - `fecha`: Utf8 (`YYYY-MM-DD` / `YYYY-MM`) or Date32
/// - `provincia`, `tipo_vehiculo`: Utf8 or LargeUtf8
/// - `cantidad_real`: Int64 or Int32
/// - `cantidad_predicha`: Float64, Float32 or Int64
///
/// Errors name the row within the whole file, not within the record batch.
fn load_parquet_observations(path: &Path, batch_size: usize) -> Result<Vec<Observation>> {
    let file = File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder
        .with_batch_size(batch_size)
        .build()
        .context("building parquet reader")?;

    let mut observations = Vec::new();
    let mut offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = ObservationColumns::from_batch(&batch)?;

        for row in 0..batch.num_rows() {
            let row_no = offset + row;
            let observation = columns
                .row(row)
                .and_then(|parsed| parsed.validate(row_no))
                .with_context(|| format!("parquet row {row_no}"))?;
            observations.push(observation);
        }
        offset += batch.num_rows();
    }

    Ok(observations)
}

// -- Parquet / Arrow helpers --

/// The five observation columns of one record batch.
struct ObservationColumns<'a> {
    fecha: &'a Arc<dyn Array>,
    provincia: &'a Arc<dyn Array>,
    tipo_vehiculo: &'a Arc<dyn Array>,
    cantidad_real: &'a Arc<dyn Array>,
    cantidad_predicha: &'a Arc<dyn Array>,
}

impl<'a> ObservationColumns<'a> {
    fn from_batch(batch: &'a RecordBatch) -> Result<Self> {
        Ok(Self {
            fecha: column(batch, "fecha")?,
            provincia: column(batch, "provincia")?,
            tipo_vehiculo: column(batch, "tipo_vehiculo")?,
            cantidad_real: column(batch, "cantidad_real")?,
            cantidad_predicha: column(batch, "cantidad_predicha")?,
        })
    }

    /// `row` is the index within the batch.
    fn row(&self, row: usize) -> Result<ObservationRow> {
        Ok(ObservationRow {
            fecha: extract_date(self.fecha, row).context("column 'fecha'")?,
            provincia: extract_string(self.provincia, row).context("column 'provincia'")?,
            tipo_vehiculo: extract_string(self.tipo_vehiculo, row)
                .context("column 'tipo_vehiculo'")?,
            cantidad_real: extract_i64(self.cantidad_real, row)
                .context("column 'cantidad_real'")?,
            cantidad_predicha: extract_f64(self.cantidad_predicha, row)
                .context("column 'cantidad_predicha'")?,
        })
    }
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn non_null(col: &Arc<dyn Array>, row: usize) -> Result<()> {
    if col.is_null(row) {
        bail!("unexpected null value");
    }
    Ok(())
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    non_null(col, row)?;
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

/// Dates come back as text so they share the CSV validation path.
fn extract_date(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    non_null(col, row)?;
    match col.data_type() {
        DataType::Date32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Date32Array>()
                .context("expected Date32Array")?;
            let date = arr
                .value_as_date(row)
                .context("Date32 out of range")?;
            Ok(date.format("%Y-%m-%d").to_string())
        }
        _ => extract_string(col, row),
    }
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    non_null(col, row)?;
    match col.data_type() {
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as i64)
        }
        other => bail!("Expected Int64 or Int32 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    non_null(col, row)?;
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 | DataType::Int32 => extract_i64(col, row).map(|v| v as f64),
        other => bail!("Expected a numeric column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::ArrayRef;
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const OBSERVATIONS_CSV: &str = "fecha,provincia,tipo_vehiculo,cantidad_real,cantidad_predicha
2025-02-01,CABA,Auto,1600,1620.4
2025-01-01,CABA,Auto,1500,1480
2025-01,CABA,Moto,800,820.0
";

    #[test]
    fn csv_observations_are_parsed_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "pred.csv", OBSERVATIONS_CSV);

        let obs = load_observations(&path, DEFAULT_MAX_FILE_BYTES).unwrap();
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(obs[0].actual_count, 1500);
        // Stable sort keeps the CABA/Moto January row after CABA/Auto.
        assert_eq!(obs[1].segment, SegmentKey::new("CABA", "Moto"));
        assert_eq!(obs[2].predicted_count, 1620.4);
    }

    #[test]
    fn csv_metrics_are_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "metrics.csv",
            "provincia,tipo_vehiculo,MAE,RMSE,changepoint_prior_scale,fourier_order
CABA,Auto,25.5,32.8,0.1,15
CABA,Moto,18.3,24.1,0.05,10
",
        );
        let metrics = load_metrics(&path, DEFAULT_MAX_FILE_BYTES).unwrap();
        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[1].segment, SegmentKey::new("CABA", "Moto"));
        assert_eq!(metrics[1].fourier_order, 10);
        assert_eq!(metrics[0].changepoint_prior_scale, 0.1);
    }

    #[test]
    fn json_records_are_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let pred = write_file(
            &dir,
            "pred.json",
            r#"[{"fecha":"2025-03-01","provincia":"Buenos Aires","tipo_vehiculo":"Auto","cantidad_real":3500,"cantidad_predicha":3450.0}]"#,
        );
        let metrics = write_file(
            &dir,
            "metrics.json",
            r#"[{"provincia":"Buenos Aires","tipo_vehiculo":"Auto","MAE":45.2,"RMSE":58.6,"changepoint_prior_scale":0.2,"fourier_order":20}]"#,
        );

        let observations = load_observations(&pred, DEFAULT_MAX_FILE_BYTES).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].segment.province, "Buenos Aires");
        let metrics = load_metrics(&metrics, DEFAULT_MAX_FILE_BYTES).unwrap();
        assert_eq!(metrics[0].mae, 45.2);
    }

    #[test]
    fn validation_errors_name_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "pred.csv",
            "fecha,provincia,tipo_vehiculo,cantidad_real,cantidad_predicha
2025-01-01,CABA,Auto,1500,1480
2025-02-01,CABA,Auto,-3,1620
",
        );
        let err = load_observations(&path, DEFAULT_MAX_FILE_BYTES).unwrap_err();
        assert!(format!("{err:#}").contains("Row 1"));

        let path = write_file(
            &dir,
            "metrics.csv",
            "provincia,tipo_vehiculo,MAE,RMSE,changepoint_prior_scale,fourier_order
CABA,Auto,25.5,32.8,0.1,0
",
        );
        let err = load_metrics(&path, DEFAULT_MAX_FILE_BYTES).unwrap_err();
        assert!(format!("{err:#}").contains("fourier_order"));
    }

    #[test]
    fn bad_date_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "pred.csv",
            "fecha,provincia,tipo_vehiculo,cantidad_real,cantidad_predicha
enero,CABA,Auto,1500,1480
",
        );
        assert!(load_observations(&path, DEFAULT_MAX_FILE_BYTES).is_err());
    }

    #[test]
    fn oversized_and_unknown_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "pred.csv", OBSERVATIONS_CSV);
        let err = load_observations(&path, 10).unwrap_err();
        assert!(err.to_string().contains("too large"));

        let path = write_file(&dir, "pred.xlsx", "x");
        let err = load_observations(&path, DEFAULT_MAX_FILE_BYTES).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn parquet_observations_are_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pred.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("fecha", DataType::Utf8, false),
            Field::new("provincia", DataType::Utf8, false),
            Field::new("tipo_vehiculo", DataType::Utf8, false),
            Field::new("cantidad_real", DataType::Int64, false),
            Field::new("cantidad_predicha", DataType::Float64, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["2025-02-01", "2025-01-01"])),
            Arc::new(StringArray::from(vec!["CABA", "CABA"])),
            Arc::new(StringArray::from(vec!["Auto", "Auto"])),
            Arc::new(Int64Array::from(vec![1600, 1500])),
            Arc::new(Float64Array::from(vec![1620.0, 1480.0])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let obs = load_observations(&path, DEFAULT_MAX_FILE_BYTES).unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].actual_count, 1500);
        assert_eq!(obs[1].predicted_count, 1620.0);
    }

    #[test]
    fn csv_reader_trims_fields() {
        let rows: Vec<MetricRow> = csv_rows_from_reader(
            "provincia, tipo_vehiculo, MAE, RMSE, changepoint_prior_scale, fourier_order
CABA, Auto, 1.0, 2.0, 0.5, 3
"
            .as_bytes(),
        )
        .unwrap();
        let record = rows.into_iter().next().unwrap().validate(0).unwrap();
        assert_eq!(record.segment.vehicle_type, "Auto");
    }

    fn write_parquet(path: &Path, schema: Schema, columns: Vec<ArrayRef>) {
        let schema = Arc::new(schema);
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
        let mut writer = ArrowWriter::try_new(File::create(path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    const METRICS_HEADER: &str =
        "provincia,tipo_vehiculo,MAE,RMSE,changepoint_prior_scale,fourier_order";

    #[test]
    fn out_of_range_metric_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            ("CABA,Auto,-1.0,32.8,0.1,15", "MAE"),
            ("CABA,Auto,inf,32.8,0.1,15", "MAE"),
            ("CABA,Auto,25.5,-0.5,0.1,15", "RMSE"),
            ("CABA,Auto,25.5,NaN,0.1,15", "RMSE"),
            ("CABA,Auto,25.5,32.8,0,15", "changepoint_prior_scale"),
            ("CABA,Auto,25.5,32.8,-0.1,15", "changepoint_prior_scale"),
            ("CABA,Auto,25.5,32.8,inf,15", "changepoint_prior_scale"),
        ];
        for (row, field) in cases {
            let path = write_file(&dir, "metrics.csv", &format!("{METRICS_HEADER}\n{row}\n"));
            let err = load_metrics(&path, DEFAULT_MAX_FILE_BYTES).unwrap_err();
            let msg = format!("{err:#}");
            assert!(msg.contains(field), "{row}: {msg}");
            assert!(msg.contains("Row 0"), "{row}: {msg}");
        }
    }

    #[test]
    fn out_of_range_predictions_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for value in ["-1480", "inf"] {
            let path = write_file(
                &dir,
                "pred.csv",
                &format!(
                    "fecha,provincia,tipo_vehiculo,cantidad_real,cantidad_predicha\n\
                     2025-01-01,CABA,Auto,1500,{value}\n"
                ),
            );
            let err = load_observations(&path, DEFAULT_MAX_FILE_BYTES).unwrap_err();
            assert!(format!("{err:#}").contains("cantidad_predicha"));
        }
    }

    #[test]
    fn json_epoch_dates_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "pred.json",
            r#"[{"fecha":1735689600000,"provincia":"CABA","tipo_vehiculo":"Auto","cantidad_real":1500,"cantidad_predicha":1480.0}]"#,
        );
        assert!(load_observations(&path, DEFAULT_MAX_FILE_BYTES).is_err());
    }

    #[test]
    fn parquet_date32_int32_float32_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pred.parquet");
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let day = |m: u32, d: u32| {
            (NaiveDate::from_ymd_opt(2025, m, d).unwrap() - epoch).num_days() as i32
        };

        write_parquet(
            &path,
            Schema::new(vec![
                Field::new("fecha", DataType::Date32, false),
                Field::new("provincia", DataType::Utf8, false),
                Field::new("tipo_vehiculo", DataType::Utf8, false),
                Field::new("cantidad_real", DataType::Int32, false),
                Field::new("cantidad_predicha", DataType::Float32, false),
            ]),
            vec![
                Arc::new(Date32Array::from(vec![day(2, 14), day(1, 20)])),
                Arc::new(StringArray::from(vec!["CABA", "CABA"])),
                Arc::new(StringArray::from(vec!["Moto", "Moto"])),
                Arc::new(Int32Array::from(vec![850, 800])),
                Arc::new(Float32Array::from(vec![830.5, 820.0])),
            ],
        );

        let obs = load_observations(&path, DEFAULT_MAX_FILE_BYTES).unwrap();
        assert_eq!(obs.len(), 2);
        // Truncated to the month and sorted.
        assert_eq!(obs[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(obs[0].actual_count, 800);
        assert_eq!(obs[1].date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(obs[1].predicted_count, 830.5);
    }

    #[test]
    fn parquet_null_reports_file_row_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pred.parquet");

        write_parquet(
            &path,
            Schema::new(vec![
                Field::new("fecha", DataType::Utf8, false),
                Field::new("provincia", DataType::Utf8, false),
                Field::new("tipo_vehiculo", DataType::Utf8, false),
                Field::new("cantidad_real", DataType::Int64, true),
                Field::new("cantidad_predicha", DataType::Float64, false),
            ]),
            vec![
                Arc::new(StringArray::from(vec!["2025-01-01", "2025-02-01", "2025-03-01"])),
                Arc::new(StringArray::from(vec!["CABA", "CABA", "CABA"])),
                Arc::new(StringArray::from(vec!["Auto", "Auto", "Auto"])),
                Arc::new(Int64Array::from(vec![Some(1500), Some(1600), None])),
                Arc::new(Float64Array::from(vec![1480.0, 1620.0, 1680.0])),
            ],
        );

        // One row per batch, so the null sits at index 0 of the third batch.
        let err = load_parquet_observations(&path, 1).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("parquet row 2"), "{msg}");
        assert!(msg.contains("cantidad_real"), "{msg}");
        assert!(msg.contains("unexpected null"), "{msg}");

        assert!(load_observations(&path, DEFAULT_MAX_FILE_BYTES).is_err());
    }
}
