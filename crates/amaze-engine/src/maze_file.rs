//! Binary maze files and maze corpus directories.
//!
//! # File Layout
//!
//! All integers are little-endian:
//!
//! ```text
//! offset  size     field
//! 0       8        width  (u64)
//! 8       8        height (u64)
//! 16      w*h      wall masks, one byte per cell in row-major order,
//!                  4-bit mask in the low nibble (see `WallMask`)
//! ```
//!
//! There is no magic number and no version field; a file is valid exactly when
//! its length matches the header and every mask describes a consistent maze.
//!
//! # Corpus Directories
//!
//! A corpus is a directory of `*.mz` files. [`load_corpus`] reads all of them
//! in lexicographic path order, so the corpus order is stable across runs.
//! Loading is all-or-nothing: one bad file fails the whole load and nothing is
//! returned.

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use crate::{GridMaze, MazeError, WallMask};

pub const MAZE_FILE_EXTENSION: &str = "mz";

const HEADER_LEN: usize = 16;

/// Malformed maze file contents.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum FormatError {
    #[display("file is {actual} bytes long, shorter than the 16-byte header")]
    MissingHeader { actual: usize },
    #[display("header dimensions {width}x{height} do not fit in memory")]
    Oversized { width: u64, height: u64 },
    #[display("expected {expected} bytes for the declared dimensions, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[display("invalid maze data")]
    Invalid { source: MazeError },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MazeFileError {
    #[display("I/O error on {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed maze file {}", path.display())]
    Format { path: PathBuf, source: FormatError },
}

impl MazeFileError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_owned(),
            source,
        }
    }

    /// Returns the file or directory the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Format { path, .. } => path,
        }
    }
}

/// Serializes `maze` into the binary file layout.
#[must_use]
pub fn encode(maze: &GridMaze) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + maze.cell_count());
    bytes.extend_from_slice(&(maze.width() as u64).to_le_bytes());
    bytes.extend_from_slice(&(maze.height() as u64).to_le_bytes());
    bytes.extend(maze.wall_masks().iter().map(|mask| mask.bits()));
    bytes
}

/// Parses the binary file layout.
pub fn decode(bytes: &[u8]) -> Result<GridMaze, FormatError> {
    let missing = || FormatError::MissingHeader {
        actual: bytes.len(),
    };
    let (width, rest) = bytes.split_first_chunk::<8>().ok_or_else(missing)?;
    let (height, cells) = rest.split_first_chunk::<8>().ok_or_else(missing)?;
    let width = u64::from_le_bytes(*width);
    let height = u64::from_le_bytes(*height);

    let oversized = || FormatError::Oversized { width, height };
    let w = usize::try_from(width).map_err(|_| oversized())?;
    let h = usize::try_from(height).map_err(|_| oversized())?;
    let cell_count = w.checked_mul(h).ok_or_else(oversized)?;
    if cells.len() != cell_count {
        return Err(FormatError::SizeMismatch {
            expected: HEADER_LEN.saturating_add(cell_count),
            actual: bytes.len(),
        });
    }

    let masks = cells
        .iter()
        .enumerate()
        .map(|(index, &bits)| {
            WallMask::from_bits(bits).ok_or(MazeError::InvalidWallMask { index, bits })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| FormatError::Invalid { source })?;
    GridMaze::from_wall_masks(w, h, masks).map_err(|source| FormatError::Invalid { source })
}

/// Writes `maze` to `path`, replacing any existing file.
pub fn save<P>(path: P, maze: &GridMaze) -> Result<(), MazeFileError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| MazeFileError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&encode(maze))
        .and_then(|()| writer.flush())
        .map_err(|e| MazeFileError::io(path, e))?;
    log::debug!(
        "saved {}x{} maze to {}",
        maze.width(),
        maze.height(),
        path.display()
    );
    Ok(())
}

/// Reads a maze from `path`.
///
/// Nothing is mutated on failure; callers keep whatever maze they had.
pub fn load<P>(path: P) -> Result<GridMaze, MazeFileError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| MazeFileError::io(path, e))?;
    decode(&bytes).map_err(|source| MazeFileError::Format {
        path: path.to_owned(),
        source,
    })
}

/// Lists the maze files of a corpus directory in load order.
pub fn corpus_files<P>(dir: P) -> Result<Vec<PathBuf>, MazeFileError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    let mut files = vec![];
    for entry in fs::read_dir(dir).map_err(|e| MazeFileError::io(dir, e))? {
        let entry = entry.map_err(|e| MazeFileError::io(dir, e))?;
        let path = entry.path();
        let is_file = entry
            .file_type()
            .map_err(|e| MazeFileError::io(&path, e))?
            .is_file();
        if is_file && path.extension().is_some_and(|ext| ext == MAZE_FILE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads every maze file in `dir`.
pub fn load_corpus<P>(dir: P) -> Result<Vec<GridMaze>, MazeFileError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    let mazes = corpus_files(dir)?
        .iter()
        .map(load)
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("loaded {} mazes from {}", mazes.len(), dir.display());
    Ok(mazes)
}

/// Writes `mazes` into `dir` as `maze-0000.mz`, `maze-0001.mz`, ...
///
/// The directory is created if needed. Returns the written paths.
pub fn save_corpus<P>(dir: P, mazes: &[GridMaze]) -> Result<Vec<PathBuf>, MazeFileError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| MazeFileError::io(dir, e))?;
    mazes
        .iter()
        .enumerate()
        .map(|(i, maze)| {
            let path = dir.join(format!("maze-{i:04}.{MAZE_FILE_EXTENSION}"));
            save(&path, maze)?;
            Ok(path)
        })
        .collect()
}
