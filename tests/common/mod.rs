#![allow(dead_code)]

use gbmad::config::RadiusMode;
use gbmad::dataset::Dataset;
use gbmad::granulation::Granulation;

/// Two tight blobs of `per_blob` samples each, plus one far-away sample
/// (the last id).
pub fn blobs_with_outlier(per_blob: usize) -> Dataset {
    let mut rows = Vec::new();
    for i in 0..per_blob {
        let jitter = (i % 5) as f64 * 0.05;
        rows.push(vec![jitter, (i / 5) as f64 * 0.05]);
    }
    for i in 0..per_blob {
        let jitter = (i % 5) as f64 * 0.05;
        rows.push(vec![3.0 + jitter, 3.0 + (i / 5) as f64 * 0.05]);
    }
    rows.push(vec![12.0, -9.0]);
    Dataset::new(rows).unwrap()
}

/// Balls of `chunk` consecutive ids inside each blob, with the outlier alone.
pub fn chunked_granulation(data: &Dataset, per_blob: usize, chunk: usize) -> Granulation {
    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for blob in 0..2 {
        let ids: Vec<usize> = (blob * per_blob..(blob + 1) * per_blob).collect();
        for c in ids.chunks(chunk) {
            clusters.push(c.to_vec());
        }
    }
    clusters.push(vec![2 * per_blob]);
    Granulation::from_clusters(data, &clusters, RadiusMode::Mean).unwrap()
}

/// Hand-made granulation with explicit centers and radii, one sample per ball.
pub fn point_balls(centers: &[[f64; 2]], radius: f64) -> Granulation {
    let mut g = Granulation::default();
    for (id, c) in centers.iter().enumerate() {
        g.blocks.push(vec![vec![c[0], c[1], id as f64]]);
        g.radii.push(radius);
        g.centers.push(c.to_vec());
    }
    g
}
