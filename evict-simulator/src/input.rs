//! Input data handling for trace simulation
//!
//! Parses request traces from plain text files: one integer key per line,
//! `#` comments and blank lines skipped. A `seq,key` CSV form is also
//! accepted (the last comma-separated field is the key, a non-numeric first
//! line is treated as a header). Files can be discovered from a directory
//! or through a glob pattern, and are streamed one key at a time.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Error types for trace parsing
#[derive(Debug)]
pub enum TraceParseError {
    #[allow(dead_code)]
    IoError(io::Error), // Keeping io::Error for proper error conversion
    #[allow(dead_code)]
    ParseError(String), // Keeping String for error details
}

impl From<io::Error> for TraceParseError {
    fn from(err: io::Error) -> Self {
        TraceParseError::IoError(err)
    }
}

/// How trace files are discovered
enum Discovery {
    Dir(PathBuf),
    Pattern(String),
}

/// Reader for request trace files
pub struct TraceReader {
    discovery: Discovery,
}

impl TraceReader {
    /// Create a reader over all trace files in the given directory
    pub fn new<P: AsRef<Path>>(input_dir: P) -> Self {
        Self {
            discovery: Discovery::Dir(input_dir.as_ref().to_path_buf()),
        }
    }

    /// Create a reader over all files matching a glob pattern
    pub fn with_pattern<S: Into<String>>(pattern: S) -> Self {
        Self {
            discovery: Discovery::Pattern(pattern.into()),
        }
    }

    /// Get all trace files for this reader, sorted by name
    pub fn get_trace_files(&self) -> Result<Vec<PathBuf>, TraceParseError> {
        let mut trace_files = Vec::new();

        match &self.discovery {
            Discovery::Dir(dir) => {
                let entries = fs::read_dir(dir)?;
                for entry in entries {
                    let path = entry?.path();
                    if path.is_file() {
                        // Consider .log, .csv and .txt files
                        if let Some(ext) = path.extension() {
                            if ext == "log" || ext == "csv" || ext == "txt" {
                                trace_files.push(path);
                            }
                        }
                    }
                }
            }
            Discovery::Pattern(pattern) => {
                let paths = glob::glob(pattern).map_err(|err| {
                    TraceParseError::ParseError(format!("Invalid glob pattern '{pattern}': {err}"))
                })?;
                for path in paths {
                    let path = path.map_err(|err| TraceParseError::IoError(err.into_error()))?;
                    if path.is_file() {
                        trace_files.push(path);
                    }
                }
            }
        }

        // Sort files by name for consistent ordering
        trace_files.sort();

        Ok(trace_files)
    }

    /// Parse a single line into a key.
    /// The last comma-separated field is the key, so plain key-per-line
    /// files and `seq,key` CSV files share one code path.
    fn parse_line(line: &str, line_num: usize) -> Result<Option<u64>, TraceParseError> {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let field = line.rsplit(',').next().unwrap_or(line).trim();

        match field.parse::<u64>() {
            Ok(key) => Ok(Some(key)),
            // A non-numeric first line is a CSV header
            Err(_) if line_num == 0 => Ok(None),
            Err(_) => Err(TraceParseError::ParseError(format!(
                "Invalid key in line {}: {}",
                line_num + 1,
                field
            ))),
        }
    }

    /// Create a streaming iterator over all keys in all trace files.
    /// This processes one key at a time without loading everything into memory.
    pub fn stream_keys(&self) -> Result<KeyIterator, TraceParseError> {
        let trace_files = self.get_trace_files()?;
        Ok(KeyIterator::new(trace_files))
    }

    /// Load the whole trace into memory in file order.
    /// The offline-optimal simulator needs the full trace up front.
    pub fn read_all(&self) -> Result<Vec<u64>, TraceParseError> {
        self.stream_keys()?.collect()
    }
}

/// Iterator that streams keys from multiple trace files without loading all into memory
pub struct KeyIterator {
    files: Vec<PathBuf>,
    current_file_index: usize,
    current_reader: Option<BufReader<File>>,
    current_line_num: usize,
    line_buffer: String,
}

impl KeyIterator {
    fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            current_file_index: 0,
            current_reader: None,
            current_line_num: 0,
            line_buffer: String::with_capacity(256),
        }
    }

    /// Open the next file for reading
    fn open_next_file(&mut self) -> io::Result<bool> {
        if self.current_file_index >= self.files.len() {
            return Ok(false);
        }

        let file = File::open(&self.files[self.current_file_index])?;
        // Use 1MB buffer for better I/O performance
        self.current_reader = Some(BufReader::with_capacity(1024 * 1024, file));
        self.current_line_num = 0;
        self.current_file_index += 1;
        Ok(true)
    }
}

impl Iterator for KeyIterator {
    type Item = Result<u64, TraceParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // If we don't have a reader, try to open the next file
            if self.current_reader.is_none() {
                match self.open_next_file() {
                    Ok(true) => {}
                    Ok(false) => return None, // No more files
                    Err(e) => return Some(Err(TraceParseError::IoError(e))),
                }
            }

            // Try to read the next line
            if let Some(reader) = &mut self.current_reader {
                self.line_buffer.clear();
                match reader.read_line(&mut self.line_buffer) {
                    Ok(0) => {
                        // EOF on current file, move to next
                        self.current_reader = None;
                        continue;
                    }
                    Ok(_) => {
                        let line_num = self.current_line_num;
                        self.current_line_num += 1;

                        match TraceReader::parse_line(&self.line_buffer, line_num) {
                            Ok(Some(key)) => return Some(Ok(key)),
                            Ok(None) => continue, // Skip empty/comment/header lines
                            Err(e) => return Some(Err(e)),
                        }
                    }
                    Err(e) => return Some(Err(TraceParseError::IoError(e))),
                }
            }
        }
    }
}
