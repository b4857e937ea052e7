use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::export::BookExport;
use crate::glossary::Glossary;
use crate::models::Book;
use crate::parsing::{ParseError, parse_book};

pub const BOOK_EXTENSION: &str = "xml";
pub const GLOSSARY_FILE: &str = "glossary.json";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid data directory: {0}")]
    InvalidDataDir(String),
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("Invalid glossary {path}: {source}")]
    Glossary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize export: {0}")]
    Export(#[source] serde_json::Error),
}

/// Read-through cache of parsed books in a data directory.
///
/// Books are parsed on first access and kept for the lifetime of the store.
/// Two threads missing at once both parse; the first insert wins.
#[derive(Debug)]
pub struct BookStore {
    data_dir: PathBuf,
    cache: RwLock<HashMap<String, Arc<Book>>>,
}

impl BookStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loads a book by id. A missing file, a document without a book, or an
    /// id that could not name a file in the data directory are all `Ok(None)`.
    pub fn book(&self, id: &str) -> Result<Option<Arc<Book>>, IoError> {
        if !is_valid_book_id(id) {
            return Ok(None);
        }
        if let Some(book) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            return Ok(Some(Arc::clone(book)));
        }

        let path = self.book_path(id);
        let Some(book) = read_book_file(&path)? else {
            return Ok(None);
        };
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let cached = cache.entry(id.to_string()).or_insert_with(|| {
            log::debug!("Cached book {id} from {}", path.display());
            Arc::new(book)
        });
        Ok(Some(Arc::clone(cached)))
    }

    /// Ids of the books available in the data directory, sorted.
    pub fn book_ids(&self) -> Result<Vec<String>, IoError> {
        validate_data_dir(&self.data_dir)?;
        let mut ids = vec![];
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != BOOK_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && is_valid_book_id(stem)
            {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Every available book, in id order.
    pub fn books(&self) -> Result<Vec<Arc<Book>>, IoError> {
        let mut books = vec![];
        for id in self.book_ids()? {
            if let Some(book) = self.book(&id)? {
                books.push(book);
            }
        }
        Ok(books)
    }

    /// The glossary stored alongside the books.
    pub fn glossary(&self) -> Result<Glossary, IoError> {
        load_glossary(&self.data_dir.join(GLOSSARY_FILE))
    }

    fn book_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(id).with_extension(BOOK_EXTENSION)
    }
}

/// Book ids are ASCII alphanumerics, `-` and `_`.
pub fn is_valid_book_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Reads and parses one book file. A missing file is `Ok(None)`.
pub fn read_book_file(path: &Path) -> Result<Option<Book>, IoError> {
    let xml = match fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let book = parse_book(&xml).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if book.is_none() {
        log::warn!("No book found in {}", path.display());
    }
    Ok(book)
}

pub fn load_glossary(path: &Path) -> Result<Glossary, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let json = fs::read_to_string(path)?;
    Glossary::from_json(&json).map_err(|source| IoError::Glossary {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a legacy export as pretty JSON, creating parent directories.
pub fn write_export(path: &Path, export: &BookExport) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(export).map_err(IoError::Export)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn validate_data_dir(path: &Path) -> Result<(), IoError> {
    if !path.is_dir() {
        return Err(IoError::InvalidDataDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }
    Ok(())
}
