//! Row source: resource loading, decoding and lazy line iteration.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::CurveError;
use crate::Result;

/// Text encodings accepted for resources. A leading byte-order mark is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    pub fn decode(self, id: &str, bytes: Vec<u8>) -> Result<String> {
        let decode_err = |reason: String| CurveError::Decode {
            id: id.to_string(),
            encoding: self,
            reason,
        };
        match self {
            TextEncoding::Utf8 => {
                let mut text = String::from_utf8(bytes).map_err(|e| decode_err(e.to_string()))?;
                if text.starts_with('\u{feff}') {
                    text.drain(..'\u{feff}'.len_utf8());
                }
                Ok(text)
            }
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
                if bytes.len() % 2 != 0 {
                    return Err(decode_err(format!("odd byte length {}", bytes.len())));
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| match self {
                        TextEncoding::Utf16Le => u16::from_le_bytes([pair[0], pair[1]]),
                        _ => u16::from_be_bytes([pair[0], pair[1]]),
                    })
                    .collect();
                let body = units.strip_prefix(&[0xFEFF_u16]).unwrap_or(&units[..]);
                String::from_utf16(body).map_err(|e| decode_err(e.to_string()))
            }
        }
    }
}

/// Resolves a path-like resource id to its raw bytes.
pub trait ResourceLoader {
    fn load(&self, id: &str) -> Result<Vec<u8>>;
}

/// Loads resources from a directory. Ids may omit the file extension.
#[derive(Clone, Debug)]
pub struct FsResourceLoader {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FsResourceLoader {
    /// Loader rooted at `root`, trying `id`, `id.csv`, then `id.txt`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec!["csv".into(), "txt".into()],
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, id: &str) -> Vec<PathBuf> {
        let mut out = Vec::with_capacity(self.extensions.len() + 1);
        out.push(self.root.join(id));
        for ext in &self.extensions {
            out.push(self.root.join(format!("{id}.{ext}")));
        }
        out
    }
}

impl ResourceLoader for FsResourceLoader {
    fn load(&self, id: &str) -> Result<Vec<u8>> {
        let searched = self.candidates(id);
        for path in &searched {
            if path.is_file() {
                log::debug!("resource '{id}' resolved to {}", path.display());
                return fs::read(path).map_err(|source| CurveError::Io {
                    path: path.clone(),
                    source,
                });
            }
        }
        Err(CurveError::ResourceNotFound {
            id: id.to_string(),
            searched,
        })
    }
}

/// In-memory resources keyed by id.
#[derive(Clone, Debug, Default)]
pub struct MemoryResourceLoader {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryResourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(id.into(), bytes.into());
    }

    pub fn with(mut self, id: impl Into<String>, text: &str) -> Self {
        self.insert(id, text.as_bytes().to_vec());
        self
    }
}

impl ResourceLoader for MemoryResourceLoader {
    fn load(&self, id: &str) -> Result<Vec<u8>> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| CurveError::ResourceNotFound {
                id: id.to_string(),
                searched: Vec::new(),
            })
    }
}

/// Forward-only, single-pass iterator over the lines of one resource.
///
/// The text reader is released on exhaustion or on [`RowSource::close`],
/// whichever happens first; later calls to either are no-ops.
#[derive(Debug)]
pub struct RowSource {
    id: String,
    reader: Option<Cursor<String>>,
    line: usize,
}

impl RowSource {
    pub fn open<L>(loader: &L, id: &str, skip_header: bool, encoding: TextEncoding) -> Result<Self>
    where
        L: ResourceLoader + ?Sized,
    {
        let bytes = loader.load(id)?;
        let text = encoding.decode(id, bytes)?;
        Ok(Self::from_text(id, text, skip_header))
    }

    pub fn from_text(id: impl Into<String>, text: String, skip_header: bool) -> Self {
        let mut source = Self {
            id: id.into(),
            reader: Some(Cursor::new(text)),
            line: 0,
        };
        if skip_header {
            let _header = source.next();
        }
        source
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// 1-based number of the line most recently returned (header included).
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Release the reader. Returns `false` if it was already released.
    pub fn close(&mut self) -> bool {
        match self.reader.take() {
            Some(_) => {
                log::debug!("row source '{}' closed after {} lines", self.id, self.line);
                true
            }
            None => false,
        }
    }
}

impl Iterator for RowSource {
    type Item = String;

    /// Lines end at `\n`, `\r\n` or a lone `\r`.
    fn next(&mut self) -> Option<String> {
        let reader = self.reader.as_mut()?;
        let start = reader.position() as usize;
        let text = reader.get_ref();
        if start >= text.len() {
            self.close();
            return None;
        }
        let rest = &text[start..];
        let (line, consumed) = match rest.find(['\r', '\n']) {
            Some(i) => {
                let terminator = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                (rest[..i].to_string(), i + terminator)
            }
            None => (rest.to_string(), rest.len()),
        };
        reader.set_position((start + consumed) as u64);
        self.line += 1;
        Some(line)
    }
}
