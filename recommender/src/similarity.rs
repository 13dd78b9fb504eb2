//! Pairwise cosine similarity between job and candidate feature rows.

use feature_pipeline::FeatureTable;
use ndarray::Array2;

use crate::artifact::{ArtifactError, SimilarityArtifact};

/// Computes the dense job × candidate cosine-similarity matrix.
///
/// The two tables are first projected onto their common feature columns;
/// any column present on only one side is ignored for scoring. Rows are
/// L2-normalized with zero vectors left untouched, so a job or candidate
/// with no overlapping features scores exactly 0 everywhere, never NaN.
/// All contributing columns are weighted equally.
pub fn compute_similarity(
    jobs: &FeatureTable,
    candidates: &FeatureTable,
) -> Result<SimilarityArtifact, ArtifactError> {
    let common = jobs.common_columns(candidates);
    if common.is_empty() {
        log::warn!("job and candidate tables share no feature columns; all scores will be zero");
    }
    log::info!(
        "scoring {} jobs against {} candidates over {} common columns",
        jobs.len(),
        candidates.len(),
        common.len()
    );

    let job_matrix = normalize_rows(projection(jobs, &common));
    let candidate_matrix = normalize_rows(projection(candidates, &common));
    let matrix = job_matrix.dot(&candidate_matrix.t());

    SimilarityArtifact::new(matrix, jobs.ids().to_vec(), candidates.ids().to_vec())
}

fn projection(table: &FeatureTable, columns: &[String]) -> Array2<f64> {
    let values = table.project_row_major(columns);
    Array2::from_shape_vec((table.len(), columns.len()), values)
        .expect("projection yields exactly rows x columns values")
}

fn normalize_rows(mut matrix: Array2<f64>) -> Array2<f64> {
    for mut row in matrix.rows_mut() {
        let norm = row.iter().map(|value| value * value).sum::<f64>().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|value| value / norm);
        }
    }
    matrix
}
