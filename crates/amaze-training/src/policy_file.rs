//! Trained-policy files.
//!
//! A policy file is the flat gene array of a chromosome: `gene_count` little-endian
//! IEEE-754 `f32` values and nothing else. There is no header, so the reader must know how
//! many genes to expect (`FeatureScheme::gene_count`). A file of any other length is
//! rejected instead of being reinterpreted.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use crate::genetic::Chromosome;

const GENE_BYTES: usize = size_of::<f32>();

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PolicyFileError {
    #[display("I/O error on {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display(
        "policy file {} holds {actual_bytes} bytes, expected {expected_genes} genes",
        path.display()
    )]
    FormatMismatch {
        path: PathBuf,
        expected_genes: usize,
        actual_bytes: usize,
    },
}

#[must_use]
pub fn encode(genes: &[f32]) -> Vec<u8> {
    genes.iter().flat_map(|g| g.to_le_bytes()).collect()
}

/// Parses exactly `expected_genes` genes, or returns `None` on a length mismatch.
#[must_use]
pub fn decode(bytes: &[u8], expected_genes: usize) -> Option<Vec<f32>> {
    if bytes.len() != expected_genes.checked_mul(GENE_BYTES)? {
        return None;
    }
    let genes = bytes
        .chunks_exact(GENE_BYTES)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    Some(genes)
}

/// Writes the genes of `chromosome` to `path`.
pub fn save<P>(path: P, chromosome: &Chromosome) -> Result<(), PolicyFileError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let io_error = |source| PolicyFileError::Io {
        path: path.to_owned(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    writer
        .write_all(&encode(chromosome.genes()))
        .and_then(|()| writer.flush())
        .map_err(io_error)?;
    log::debug!(
        "saved {} genes to {}",
        chromosome.genes().len(),
        path.display()
    );
    Ok(())
}

/// Reads a policy of exactly `expected_genes` genes from `path`.
///
/// The returned chromosome has no fitness.
pub fn load<P>(path: P, expected_genes: usize) -> Result<Chromosome, PolicyFileError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| PolicyFileError::Io {
        path: path.to_owned(),
        source,
    })?;
    let genes = decode(&bytes, expected_genes).ok_or_else(|| PolicyFileError::FormatMismatch {
        path: path.to_owned(),
        expected_genes,
        actual_bytes: bytes.len(),
    })?;
    Ok(Chromosome::from_genes(genes))
}
