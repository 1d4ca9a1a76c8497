//! Encoding detection and transcoding module
//!
//! The wordlist manager reads its inputs as UTF-8. The strip tools sniff the
//! input encoding, work on a UTF-8 copy and write the result back in the
//! same encoding family.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolError};
use crate::line::Line;

/// Size of the sample handed to the detector
const SAMPLE_SIZE: usize = 64 * 1024;

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a byte sample
pub fn detect_encoding(sample: &[u8]) -> EncodingInfo {
    if sample.is_empty() {
        return EncodingInfo::default();
    }

    if let Some(encoding) = detect_bom(sample) {
        return EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        };
    }

    if is_utf8_sample(sample) {
        return EncodingInfo::default();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    let encoding = detector.guess(None, true);

    EncodingInfo {
        name: encoding.name(),
        confidence: if encoding == encoding_rs::UTF_8 { 0.5 } else { 0.8 },
        encoding,
    }
}

/// Valid UTF-8, allowing a multi-byte sequence cut off at the end of the sample
fn is_utf8_sample(sample: &[u8]) -> bool {
    match std::str::from_utf8(sample) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

/// Detect the encoding of a file by sampling its content
pub fn detect_file_encoding(path: &Path) -> Result<EncodingInfo> {
    let file = File::open(path).map_err(|e| ToolError::read(path, e))?;
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    file.take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)
        .map_err(|e| ToolError::read(path, e))?;

    Ok(detect_encoding(&sample))
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(content).map(|(encoding, _)| encoding)
}

/// A whole file decoded to UTF-8, remembering where it came from
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static Encoding,
}

impl DecodedText {
    /// Encode `text` back into the source's encoding family.
    ///
    /// UTF-16 inputs come back as UTF-8, since encoding_rs only encodes to
    /// ASCII-compatible encodings.
    pub fn encode<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, [u8]> {
        let (bytes, used, had_unmappable) = self.encoding.output_encoding().encode(text);
        if had_unmappable {
            log::warn!(
                "Some characters could not be represented in {}, numeric references were used",
                used.name()
            );
        }
        bytes
    }
}

/// Read a file completely, transcoding it to UTF-8
pub fn read_text(path: &Path) -> Result<DecodedText> {
    let info = detect_file_encoding(path)?;
    log::debug!("{}: detected {} ({:.1})", path.display(), info.name, info.confidence);

    let file = File::open(path).map_err(|e| ToolError::read(path, e))?;
    let mut reader = DecodeReaderBytesBuilder::new()
        .encoding(Some(info.encoding))
        .bom_override(true)
        .strip_bom(true)
        .build(file);

    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| ToolError::read(path, e))?;

    Ok(DecodedText {
        text,
        encoding: info.encoding,
    })
}

/// A line iterator over a UTF-8 file
///
/// Invalid byte sequences are replaced rather than failing the whole file.
pub struct Utf8LineIterator {
    reader: BufReader<File>,
    path: PathBuf,
    line_buffer: Vec<u8>,
    lossy_lines: u64,
}

impl Utf8LineIterator {
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ToolError::read(path, e))?;

        Ok(Self {
            reader: BufReader::with_capacity(SAMPLE_SIZE, file),
            path: path.to_path_buf(),
            line_buffer: Vec::with_capacity(4096),
            lossy_lines: 0,
        })
    }

    /// Number of lines that needed a lossy conversion so far
    pub fn lossy_lines(&self) -> u64 {
        self.lossy_lines
    }
}

impl Iterator for Utf8LineIterator {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line_buffer.clear();

        match self.reader.read_until(b'\n', &mut self.line_buffer) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.line_buffer.last(), Some(&(b'\n' | b'\r'))) {
                    self.line_buffer.pop();
                }

                let text = match String::from_utf8(std::mem::take(&mut self.line_buffer)) {
                    Ok(s) => s,
                    Err(e) => {
                        self.lossy_lines += 1;
                        log::debug!("{}: invalid UTF-8 in line", self.path.display());
                        String::from_utf8_lossy(e.as_bytes()).into_owned()
                    }
                };
                Some(Ok(Line::new(text)))
            }
            Err(e) => Some(Err(ToolError::read(&self.path, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_utf8_detection() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Hello, World!").unwrap();
        writeln!(file, "Привет мир!").unwrap();

        let info = detect_file_encoding(file.path()).unwrap();
        assert_eq!(info.name, "UTF-8");
    }

    #[test]
    fn test_bom_detection() {
        let info = detect_encoding(&[0xFF, 0xFE, b'a', 0x00]);
        assert_eq!(info.encoding, encoding_rs::UTF_16LE);
        assert_eq!(info.confidence, 1.0);
    }

    #[test]
    fn test_truncated_sequence_at_sample_end() {
        // "é" is C3 A9; the sample stops after C3
        assert_eq!(detect_encoding(&[b'c', b'a', b'f', 0xC3]).encoding, encoding_rs::UTF_8);
        // a bad byte in the middle is not a truncation
        assert!(detect_encoding(&[0xC3, b'x', b'a', b'b']).confidence < 1.0);
    }

    #[test]
    fn test_utf8_file_split_at_sample_boundary() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&vec![b'a'; SAMPLE_SIZE - 1]).unwrap();
        file.write_all("é\n".as_bytes()).unwrap();

        let info = detect_file_encoding(file.path()).unwrap();
        assert_eq!(info.encoding, encoding_rs::UTF_8);
        assert_eq!(info.confidence, 1.0);
    }

    #[test]
    fn test_read_text_strips_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        file.write_all(b"/api/users\n").unwrap();

        let decoded = read_text(file.path()).unwrap();
        assert_eq!(decoded.text, "/api/users\n");
        assert_eq!(decoded.encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_latin1_round_trip() {
        let mut file = NamedTempFile::new().unwrap();
        // "café\n" in windows-1252
        file.write_all(&[b'c', b'a', b'f', 0xE9, b'\n']).unwrap();

        let decoded = read_text(file.path()).unwrap();
        assert!(decoded.text.starts_with("caf"));
        assert_ne!(decoded.encoding, encoding_rs::UTF_8);

        let bytes = decoded.encode(&decoded.text);
        assert_eq!(&*bytes, &[b'c', b'a', b'f', 0xE9, b'\n'][..]);
    }

    #[test]
    fn test_line_iterator() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "line1").unwrap();
        write!(file, "line2\r\n").unwrap();
        write!(file, "line3").unwrap();

        let iter = Utf8LineIterator::new(file.path()).unwrap();
        let lines: Vec<_> = iter.filter_map(|r| r.ok()).map(Line::into_raw).collect();

        assert_eq!(lines, vec!["line1", "line2", "line3"]);
    }

    #[test]
    fn test_line_iterator_lossy() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'a', 0xFF, b'\n', b'b', b'\n']).unwrap();

        let mut iter = Utf8LineIterator::new(file.path()).unwrap();
        let first = iter.next().unwrap().unwrap();
        assert_eq!(first.raw(), "a\u{FFFD}");
        assert_eq!(iter.lossy_lines(), 1);
        assert_eq!(iter.next().unwrap().unwrap().raw(), "b");
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = Utf8LineIterator::new(Path::new("/definitely/not/here.txt")).err().unwrap();
        assert!(matches!(err, ToolError::MissingInput(_)));
    }
}
