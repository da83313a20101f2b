use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Write a synthetic forecast dataset (predictions + per-segment metrics).
#[derive(Debug, Parser)]
struct Args {
    /// Output directory
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of months per segment, starting January 2025
    #[arg(long, default_value_t = 12)]
    months: u32,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Debug, Serialize)]
struct PredictionRow {
    fecha: String,
    provincia: String,
    tipo_vehiculo: String,
    cantidad_real: i64,
    cantidad_predicha: f64,
}

#[derive(Debug, Serialize)]
struct MetricRow {
    provincia: String,
    tipo_vehiculo: String,
    #[serde(rename = "MAE")]
    mae: f64,
    #[serde(rename = "RMSE")]
    rmse: f64,
    changepoint_prior_scale: f64,
    fourier_order: u32,
}

/// Monthly registrations: base level, mild trend and a yearly seasonality.
fn expected_count(base: f64, month_idx: u32) -> f64 {
    let t = month_idx as f64;
    let season = (2.0 * std::f64::consts::PI * t / 12.0).sin();
    base * (1.0 + 0.01 * t + 0.08 * season)
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[PredictionRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("fecha", DataType::Utf8, false),
        Field::new("provincia", DataType::Utf8, false),
        Field::new("tipo_vehiculo", DataType::Utf8, false),
        Field::new("cantidad_real", DataType::Int64, false),
        Field::new("cantidad_predicha", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.fecha.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.provincia.as_str()))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.tipo_vehiculo.as_str()),
            )),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.cantidad_real))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.cantidad_predicha),
            )),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let segments: [(&str, &str, f64); 8] = [
        ("CABA", "Auto", 1500.0),
        ("CABA", "Moto", 800.0),
        ("Buenos Aires", "Auto", 3500.0),
        ("Buenos Aires", "Moto", 1400.0),
        ("Cordoba", "Auto", 1200.0),
        ("Cordoba", "Moto", 650.0),
        ("Santa Fe", "Auto", 1100.0),
        ("Mendoza", "Auto", 700.0),
    ];
    let prior_scales = [0.01, 0.05, 0.1, 0.2, 0.5];
    let fourier_orders = [5u32, 10, 15, 20];

    let mut predictions = Vec::new();
    let mut metrics = Vec::new();

    for &(province, vehicle_type, base) in &segments {
        let noise = 0.02 * base;
        let mut abs_err = 0.0;
        let mut sq_err = 0.0;

        for m in 0..args.months {
            let date = NaiveDate::from_ymd_opt(2025 + (m / 12) as i32, m % 12 + 1, 1)
                .context("month out of range")?;
            let expected = expected_count(base, m);
            let actual = rng.gauss(expected, noise).round().max(0.0);
            let predicted = (expected + rng.gauss(0.0, noise * 0.6)).max(0.0);

            let err = actual - predicted;
            abs_err += err.abs();
            sq_err += err * err;

            predictions.push(PredictionRow {
                fecha: date.format("%Y-%m-%d").to_string(),
                provincia: province.to_string(),
                tipo_vehiculo: vehicle_type.to_string(),
                cantidad_real: actual as i64,
                cantidad_predicha: (predicted * 100.0).round() / 100.0,
            });
        }

        let n = args.months.max(1) as f64;
        metrics.push(MetricRow {
            provincia: province.to_string(),
            tipo_vehiculo: vehicle_type.to_string(),
            mae: (abs_err / n * 100.0).round() / 100.0,
            rmse: ((sq_err / n).sqrt() * 100.0).round() / 100.0,
            changepoint_prior_scale: *rng.pick(&prior_scales),
            fourier_order: *rng.pick(&fourier_orders),
        });
    }

    // Chronological order across segments, as the viewer expects.
    predictions.sort_by(|a, b| a.fecha.cmp(&b.fecha));

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    write_csv(&args.out_dir.join("predicciones.csv"), &predictions)?;
    write_parquet(&args.out_dir.join("predicciones.parquet"), &predictions)?;
    write_csv(&args.out_dir.join("metricas.csv"), &metrics)?;

    println!(
        "Wrote {} predictions and {} metric records to {}",
        predictions.len(),
        metrics.len(),
        args.out_dir.display()
    );
    Ok(())
}
