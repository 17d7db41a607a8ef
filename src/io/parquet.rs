/*!
# Saving Sample Matrices to Parquet

Enable via the `parquet` feature. Uses the same schema as [`save_arrow`](super::arrow::save_arrow).
*/

use std::error::Error;
use std::fs::File;

use ndarray::ArrayView2;
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

use super::arrow::record_batch;

/// Saves a `[draws x params]` sample matrix to a Parquet file.
///
/// # Example
///
/// ```rust
/// # use mcmc_trace::io::parquet::save_parquet;
/// let samples = ndarray::arr2(&[[42.0_f64, 7.0]]);
/// let names = vec!["a".to_string(), "b".to_string()];
/// save_parquet(&names, samples.view(), "/tmp/draws.parquet")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn save_parquet(
    names: &[String],
    samples: ArrayView2<f64>,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let (schema, record_batch) = record_batch(names, samples)?;

    let file = File::create(filename)?;
    let props = WriterProperties::builder().build();
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;

    writer.write(&record_batch)?;
    // Close the writer to ensure metadata is written
    writer.close()?;

    Ok(())
}
