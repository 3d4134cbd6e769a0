//! Text corpora feeding the glyph stream.
//!
//! A corpus is the filtered character sequence of one text file. Directories
//! are expanded to every file whose leading bytes sniff as text.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::MosaicError;

/// Number of leading bytes inspected when sniffing a file's content type.
const SNIFF_LEN: usize = 512;

/// Markup prefixes that identify HTML documents, matched case-insensitively.
const HTML_SIGNATURES: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// Signatures of formats whose header is ASCII but which are not text.
const BINARY_SIGNATURES: &[&[u8]] = &[b"%PDF-", b"%!PS-Adobe-"];

/// Capability that turns a corpus identifier into its filtered characters.
pub trait CorpusLoader {
    fn load(&self, path: &Path) -> io::Result<Vec<char>>;
}

impl<F> CorpusLoader for F
where
    F: Fn(&Path) -> io::Result<Vec<char>>,
{
    fn load(&self, path: &Path) -> io::Result<Vec<char>> {
        self(path)
    }
}

/// Reads corpora from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileCorpusLoader;

impl CorpusLoader for FileCorpusLoader {
    fn load(&self, path: &Path) -> io::Result<Vec<char>> {
        let content = fs::read(path)?;
        Ok(filter_corpus(&String::from_utf8_lossy(&content)))
    }
}

/// Whether `ch` may be used as a glyph.
///
/// Keeps the space, printable ASCII and everything above the ASCII range;
/// newlines, tabs and other control characters are dropped.
pub fn is_glyph(ch: char) -> bool {
    ch == ' ' || ('!'..='~').contains(&ch) || u32::from(ch) > 126
}

pub fn filter_corpus(text: &str) -> Vec<char> {
    text.chars().filter(|&ch| is_glyph(ch)).collect()
}

/// Sniff whether `content` (the start of a file) is text.
pub fn sniff_is_text(content: &[u8]) -> bool {
    let content = &content[..content.len().min(SNIFF_LEN)];

    if content.starts_with(&[0xfe, 0xff])
        || content.starts_with(&[0xff, 0xfe])
        || content.starts_with(&[0xef, 0xbb, 0xbf])
    {
        return true;
    }

    let first = content.iter().position(|byte| !is_whitespace(*byte)).unwrap_or(content.len());
    let trimmed = &content[first..];
    if is_markup(trimmed) {
        return true;
    }

    if BINARY_SIGNATURES.iter().any(|signature| content.starts_with(signature)) {
        return false;
    }

    !content.iter().any(|byte| is_binary(*byte))
}

/// Sniff the file at `path`. Unreadable files are not text.
pub fn is_text_file(path: &Path) -> bool {
    let mut buffer = Vec::with_capacity(SNIFF_LEN);
    let read = File::open(path)
        .and_then(|file| file.take(SNIFF_LEN as u64).read_to_end(&mut buffer));
    read.is_ok() && sniff_is_text(&buffer)
}

/// Recursively collect every text file under `dir`, in file name order.
pub fn discover_text_files(dir: &Path) -> Result<Vec<PathBuf>, MosaicError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            MosaicError::TextSourceNotFound { path, source: io::Error::from(err) }
        })?;

        if !entry.file_type().is_dir() && is_text_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!("found {} text files under {}", files.len(), dir.display());
    Ok(files)
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')
}

fn is_binary(byte: u8) -> bool {
    matches!(byte, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f)
}

fn is_markup(content: &[u8]) -> bool {
    if content.starts_with(b"<?xml") {
        return true;
    }

    HTML_SIGNATURES.iter().any(|signature| {
        content.len() > signature.len()
            && content[..signature.len()].eq_ignore_ascii_case(signature)
            && matches!(content[signature.len()], b' ' | b'>')
    })
}
