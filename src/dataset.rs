use crate::error::{GbError, GbResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub has_header: bool,
    /// Treat the last column as a 0/1 outlier label.
    pub label_column: bool,
    /// Min-max scale every feature column into [0, 1].
    pub scale: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            label_column: false,
            scale: true,
        }
    }
}

/// Numeric samples in file order. Sample id = row position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub labels: Option<Vec<u8>>,
}

impl Dataset {
    pub fn new(features: Vec<Vec<f64>>) -> GbResult<Self> {
        check_rectangular(&features)?;
        Ok(Self {
            features,
            labels: None,
        })
    }

    pub fn with_labels(mut self, labels: Vec<u8>) -> GbResult<Self> {
        if labels.len() != self.features.len() {
            return Err(GbError::Validation(format!(
                "{} labels for {} samples",
                labels.len(),
                self.features.len()
            )));
        }
        self.labels = Some(labels);
        Ok(self)
    }

    pub fn load_csv<P: AsRef<Path>>(path: P, opts: LoadOptions) -> GbResult<Self> {
        let path = path.as_ref();
        info!("📂 Loading dataset: {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file, opts)
    }

    pub fn from_reader<R: Read>(reader: R, opts: LoadOptions) -> GbResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(opts.has_header)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut features = Vec::new();
        let mut labels = Vec::new();
        let mut width = None;

        for (row_idx, result) in rdr.records().enumerate() {
            let rec = result?;
            if rec.iter().all(|c| c.is_empty()) {
                continue;
            }
            let expected = *width.get_or_insert(rec.len());
            if rec.len() != expected {
                return Err(GbError::Validation(format!(
                    "Row {} has {} columns, expected {}",
                    row_idx + 1,
                    rec.len(),
                    expected
                )));
            }

            let mut values = rec
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    cell.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                        GbError::Validation(format!(
                            "Row {}, column {}: '{}' is not a finite number",
                            row_idx + 1,
                            col,
                            cell
                        ))
                    })
                })
                .collect::<GbResult<Vec<f64>>>()?;

            if opts.label_column {
                let raw = values.pop().unwrap_or(f64::NAN);
                let label = match raw {
                    v if v == 0.0 => 0,
                    v if v == 1.0 => 1,
                    _ => {
                        return Err(GbError::Validation(format!(
                            "Row {}: label must be 0 or 1, got {}",
                            row_idx + 1,
                            raw
                        )))
                    }
                };
                labels.push(label);
            }
            features.push(values);
        }

        check_rectangular(&features)?;
        let mut data = Self {
            features,
            labels: opts.label_column.then_some(labels),
        };
        if opts.scale {
            data.scale_features();
        }

        debug!(
            "   -> {} samples, {} features, labels: {}",
            data.len(),
            data.dim(),
            data.labels.is_some()
        );
        Ok(data)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.features.first().map_or(0, Vec::len)
    }

    /// Min-max scales each feature column. Constant columns become 0.
    pub fn scale_features(&mut self) {
        for col in 0..self.dim() {
            let (lo, hi) = self
                .features
                .iter()
                .map(|r| r[col])
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            let range = hi - lo;
            for row in &mut self.features {
                row[col] = if range > 0.0 { (row[col] - lo) / range } else { 0.0 };
            }
        }
    }

    /// Feature rows with the sample id appended as a trailing column.
    pub fn with_ids(&self) -> Vec<Vec<f64>> {
        self.features
            .iter()
            .enumerate()
            .map(|(id, row)| {
                let mut r = Vec::with_capacity(row.len() + 1);
                r.extend_from_slice(row);
                r.push(id as f64);
                r
            })
            .collect()
    }
}

fn check_rectangular(features: &[Vec<f64>]) -> GbResult<()> {
    let Some(first) = features.first() else {
        return Ok(());
    };
    if first.is_empty() {
        return Err(GbError::Validation("Samples have no feature columns".to_string()));
    }
    if let Some((idx, row)) = features
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != first.len())
    {
        return Err(GbError::Validation(format!(
            "Row {} has {} features, expected {}",
            idx + 1,
            row.len(),
            first.len()
        )));
    }
    Ok(())
}
