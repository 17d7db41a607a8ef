/*!
# Exporting Sample Matrices

Writers for a loaded `[draws x params]` sample matrix, one column per parameter.
Each format sits behind a feature of the same name.
*/

#[cfg(feature = "arrow")]
pub mod arrow;

#[cfg(feature = "csv")]
pub mod csv;

#[cfg(feature = "parquet")]
pub mod parquet;

#[cfg(any(feature = "csv", feature = "arrow"))]
fn check_columns(names: &[String], samples: &ndarray::ArrayView2<f64>) -> Result<(), String> {
    if names.len() != samples.ncols() {
        return Err(format!(
            "Got {} parameter names for {} sample columns",
            names.len(),
            samples.ncols()
        ));
    }
    Ok(())
}
