/*!
# Saving Sample Matrices to Apache Arrow

Enable via the `arrow` feature.
*/

use std::error::Error;
use std::fs::File;
use std::sync::Arc;

use arrow::{
    array::{ArrayRef, Float64Array},
    datatypes::{DataType, Field, Schema},
    ipc::writer::FileWriter,
    record_batch::RecordBatch,
};
use ndarray::{ArrayView2, Axis};

/// Builds one record batch with a non-nullable Float64 column per parameter.
pub(crate) fn record_batch(
    names: &[String],
    samples: ArrayView2<f64>,
) -> Result<(Arc<Schema>, RecordBatch), Box<dyn Error>> {
    super::check_columns(names, &samples)?;

    let fields: Vec<Field> = names
        .iter()
        .map(|name| Field::new(name, DataType::Float64, false))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let columns: Vec<ArrayRef> = samples
        .axis_iter(Axis(1))
        .map(|column| Arc::new(Float64Array::from_iter_values(column.iter().copied())) as ArrayRef)
        .collect();
    let record_batch = RecordBatch::try_new(schema.clone(), columns)?;
    Ok((schema, record_batch))
}

/// Saves a `[draws x params]` sample matrix as an Apache Arrow (IPC) file.
///
/// # Arguments
///
/// * `names`    - Parameter names, one per column of `samples`.
/// * `samples`  - The sample matrix.
/// * `filename` - The path to the Arrow file to create.
pub fn save_arrow(
    names: &[String],
    samples: ArrayView2<f64>,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let (schema, record_batch) = record_batch(names, samples)?;

    // Write the RecordBatch (possibly zero rows) to an Arrow IPC file
    let file = File::create(filename)?;
    let mut writer = FileWriter::try_new(file, &schema)?;
    writer.write(&record_batch)?;
    writer.finish()?;

    Ok(())
}
