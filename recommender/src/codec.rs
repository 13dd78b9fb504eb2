//! Binary wire format for persisted similarity matrices.
//!
//! Layout, all little-endian: 4 magic bytes `SIM1`, u32 format version,
//! u64 row count, u64 column count, then rows × cols f64 values in
//! row-major order. The header is self-describing so stored blobs can be
//! decoded without this crate's types.

use ndarray::Array2;
use thiserror::Error;

const MAGIC: &[u8; 4] = b"SIM1";
const VERSION: u32 = 1;
const HEADER_LEN: usize = 4 + 4 + 8 + 8;

#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("matrix blob too short: {0} bytes")]
    Truncated(usize),
    #[error("bad magic bytes, not a similarity matrix blob")]
    BadMagic,
    #[error("unsupported matrix format version {0}")]
    UnsupportedVersion(u32),
    #[error("matrix blob payload is {actual} bytes, expected {expected} for a {rows}x{cols} matrix")]
    PayloadMismatch {
        rows: u64,
        cols: u64,
        expected: usize,
        actual: usize,
    },
}

pub fn encode_matrix(matrix: &Array2<f64>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + matrix.len() * 8);
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&(matrix.nrows() as u64).to_le_bytes());
    bytes.extend_from_slice(&(matrix.ncols() as u64).to_le_bytes());
    for value in matrix.iter() {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

pub fn decode_matrix(bytes: &[u8]) -> Result<Array2<f64>, CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Truncated(bytes.len()));
    }
    if &bytes[0..4] != MAGIC {
        return Err(CodecError::BadMagic);
    }
    let version = u32::from_le_bytes(bytes[4..8].try_into().expect("sliced to width"));
    if version != VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }
    let rows = u64::from_le_bytes(bytes[8..16].try_into().expect("sliced to width"));
    let cols = u64::from_le_bytes(bytes[16..24].try_into().expect("sliced to width"));

    let payload = &bytes[HEADER_LEN..];
    let expected = (rows as usize)
        .checked_mul(cols as usize)
        .and_then(|cells| cells.checked_mul(8));
    let expected = match expected {
        Some(expected) => expected,
        None => {
            return Err(CodecError::PayloadMismatch {
                rows,
                cols,
                expected: usize::MAX,
                actual: payload.len(),
            })
        }
    };
    if payload.len() != expected {
        return Err(CodecError::PayloadMismatch {
            rows,
            cols,
            expected,
            actual: payload.len(),
        });
    }

    let values = payload
        .chunks_exact(8)
        .map(|chunk| f64::from_le_bytes(chunk.try_into().expect("chunked to width")))
        .collect();
    Ok(Array2::from_shape_vec((rows as usize, cols as usize), values)
        .expect("payload length was checked against the shape"))
}
