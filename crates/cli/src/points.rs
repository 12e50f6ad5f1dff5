use anyhow::{bail, Context, Result};
use clap::Args;
use planar::geom::rand::rand_points;
use planar::Vec2;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Where the input point set comes from.
#[derive(Args, Debug, Clone)]
pub struct Source {
    /// CSV file with `x` and `y` columns (plane coordinates)
    #[arg(long, conflicts_with = "random")]
    pub input: Option<PathBuf>,
    /// Draw N uniform random points instead of reading a file
    #[arg(long)]
    pub random: Option<usize>,
    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Half side length of the square --random draws from
    #[arg(long, default_value_t = 1000.0)]
    pub extent: f64,
}

impl Source {
    pub fn load(&self) -> Result<Vec<Vec2<f64>>> {
        match (&self.input, self.random) {
            (Some(path), _) => read_points_csv(path),
            (None, Some(n)) => {
                check_extent(self.extent)?;
                Ok(rand_points(n, self.extent, self.seed))
            }
            (None, None) => bail!("either --input or --random is required"),
        }
    }
}

/// Uniform sampling over `[-extent, extent]` needs the range width to stay finite.
pub fn check_extent(extent: f64) -> Result<()> {
    if !(extent.is_finite() && extent >= 0.0 && extent <= f64::MAX / 4.0) {
        bail!(
            "--extent must be finite, non-negative and at most {:e}, got {extent}",
            f64::MAX / 4.0
        );
    }
    Ok(())
}

/// Read `x`,`y` columns as f64; rows with a missing coordinate are an error.
pub fn read_points_csv(path: &Path) -> Result<Vec<Vec2<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x,y from {}", path.display()))?;
    tracing::info!(rows = df.height(), path = %path.display(), "input_csv_points");
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Vec2::new(x, y)),
            _ => bail!("row {row}: missing coordinate"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_xy_columns_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pts.csv");
        std::fs::write(&path, "label,x,y\na,0,0\nb,3,4\nc,1.5,-1\n").unwrap();
        let pts = read_points_csv(&path).unwrap();
        assert_eq!(
            pts,
            vec![Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), Vec2::new(1.5, -1.0)]
        );
    }

    #[test]
    fn random_source_is_reproducible() {
        let src = Source {
            input: None,
            random: Some(25),
            seed: 9,
            extent: 10.0,
        };
        let a = src.load().unwrap();
        let b = src.load().unwrap();
        assert_eq!(a.len(), 25);
        assert_eq!(a, b);
    }

    #[test]
    fn unusable_extent_is_an_error() {
        for extent in [f64::INFINITY, f64::NAN, 1e308, -3.0] {
            let src = Source {
                input: None,
                random: Some(4),
                seed: 0,
                extent,
            };
            assert!(src.load().is_err(), "extent {extent}");
        }
    }

    #[test]
    fn missing_source_is_an_error() {
        let src = Source {
            input: None,
            random: None,
            seed: 0,
            extent: 1.0,
        };
        assert!(src.load().is_err());
    }
}
