//! The computed similarity artifact and its alignment invariant.

use ndarray::Array2;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ArtifactError {
    #[error(
        "id lists do not match the matrix shape: {rows}x{cols} matrix with \
         {job_ids} job ids and {candidate_ids} candidate ids"
    )]
    Misaligned {
        rows: usize,
        cols: usize,
        job_ids: usize,
        candidate_ids: usize,
    },
}

/// A dense job × candidate similarity matrix with its positional indexes:
/// row `i` scores `job_ids[i]` against every candidate, column `j` scores
/// every job against `candidate_ids[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityArtifact {
    matrix: Array2<f64>,
    job_ids: Vec<String>,
    candidate_ids: Vec<String>,
}

impl SimilarityArtifact {
    /// Validates the alignment invariant before accepting the parts.
    pub fn new(
        matrix: Array2<f64>,
        job_ids: Vec<String>,
        candidate_ids: Vec<String>,
    ) -> Result<Self, ArtifactError> {
        if job_ids.len() != matrix.nrows() || candidate_ids.len() != matrix.ncols() {
            return Err(ArtifactError::Misaligned {
                rows: matrix.nrows(),
                cols: matrix.ncols(),
                job_ids: job_ids.len(),
                candidate_ids: candidate_ids.len(),
            });
        }
        Ok(Self {
            matrix,
            job_ids,
            candidate_ids,
        })
    }

    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    pub fn job_ids(&self) -> &[String] {
        &self.job_ids
    }

    pub fn candidate_ids(&self) -> &[String] {
        &self.candidate_ids
    }

    pub fn job_index(&self, id: &str) -> Option<usize> {
        self.job_ids.iter().position(|candidate| candidate == id)
    }

    pub fn candidate_index(&self, id: &str) -> Option<usize> {
        self.candidate_ids
            .iter()
            .position(|candidate| candidate == id)
    }

    /// Scores of one job row against every candidate.
    pub fn job_scores(&self, row: usize) -> Vec<f64> {
        self.matrix.row(row).to_vec()
    }

    /// Scores of every job against one candidate column.
    pub fn candidate_scores(&self, column: usize) -> Vec<f64> {
        self.matrix.column(column).to_vec()
    }
}
