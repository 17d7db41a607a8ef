/*!
# Saving Sample Matrices to CSV

Enable via the `csv` feature.
*/

use ndarray::ArrayView2;
use std::error::Error;
use std::fs::File;

use csv::Writer;

/**
Saves a `[draws x params]` sample matrix as a CSV file.

The resulting CSV file will have:
- A header row holding the parameter names, in column order.
- One row per draw.

# Arguments

* `names` - Parameter names, one per column of `samples`.
* `samples` - The sample matrix, e.g. [`TraceSampler::samples`](crate::sampler::TraceSampler::samples).
* `filename` - The file path where the CSV data will be written.

# Returns

Returns `Ok(())` if successful, or an error if the names do not match the columns
or any I/O or CSV formatting issue occurs.

# Examples

```rust
use mcmc_trace::io::csv::save_csv;
use ndarray::arr2;

let samples = arr2(&[[1.0, 10.0], [2.0, 20.0]]);
let names = vec!["a".to_string(), "b".to_string()];
save_csv(&names, samples.view(), "/tmp/draws.csv")?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn save_csv(
    names: &[String],
    samples: ArrayView2<f64>,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    super::check_columns(names, &samples)?;
    let mut wtr = Writer::from_writer(File::create(filename)?);
    wtr.write_record(names)?;
    for row in samples.rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::Reader;
    use ndarray::{arr2, Array2};
    use std::fs;
    use tempfile::NamedTempFile;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_save_csv_no_draws() {
        let samples = Array2::<f64>::zeros((0, 2));
        let file = NamedTempFile::new().expect("Could not create temp file");
        let filename = file.path().to_str().unwrap();

        save_csv(&names(&["a", "b"]), samples.view(), filename).unwrap();

        // Only the header is written.
        let contents = fs::read_to_string(filename).unwrap();
        assert_eq!(contents.trim(), "a,b");
    }

    #[test]
    fn test_save_csv_rows_follow_draws() {
        let samples = arr2(&[[1.0, 10.5], [2.0, 20.0], [3.25, 30.0]]);
        let file = NamedTempFile::new().expect("Could not create temp file");
        let filename = file.path().to_str().unwrap();

        save_csv(&names(&["a", "b"]), samples.view(), filename).unwrap();

        let contents = fs::read_to_string(filename).unwrap();
        let expected = "\
a,b
1,10.5
2,20
3.25,30";
        assert_eq!(contents.trim(), expected);
    }

    #[test]
    fn test_save_csv_values_parse_back() -> Result<(), Box<dyn Error>> {
        let samples = arr2(&[[0.1, -2.5e-7], [1e12, 3.0]]);
        let file = NamedTempFile::new()?;
        let filename = file.path().to_str().unwrap();
        save_csv(&names(&["x", "y"]), samples.view(), filename)?;

        let mut rdr = Reader::from_path(filename)?;
        assert_eq!(rdr.headers()?.iter().collect::<Vec<_>>(), vec!["x", "y"]);
        let parsed: Vec<Vec<f64>> = rdr
            .records()
            .map(|r| r.map(|rec| rec.iter().map(|f| f.parse().unwrap()).collect()))
            .collect::<Result<_, _>>()?;
        assert_eq!(parsed, vec![vec![0.1, -2.5e-7], vec![1e12, 3.0]]);
        Ok(())
    }

    #[test]
    fn test_save_csv_name_mismatch() {
        let samples = arr2(&[[1.0, 2.0]]);
        let file = NamedTempFile::new().expect("Could not create temp file");
        let filename = file.path().to_str().unwrap();

        let result = save_csv(&names(&["a"]), samples.view(), filename);
        assert!(result.is_err(), "Expected an error for one name over two columns");
    }
}
