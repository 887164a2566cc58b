//! Line reader for dump files
//!
//! Dump lines carry tab-separated columns (`type key revision last_modified`)
//! before the JSON object, so the object is located by its first `{`.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
};

use crate::error::{AppError, AppResult, LineError};

/// A numbered dump line, or why its bytes are not text
pub type DumpLine = (u64, Result<String, LineError>);

/// Sequential reader over the lines of a dump file.
///
/// The file handle is owned by the reader and closed when it is dropped.
/// Lines are decoded one at a time so a bad byte only costs its own line.
pub struct DumpReader {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_no: u64,
}

impl DumpReader {
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .await
            .map_err(|e| AppError::io(&path, e))?;

        Ok(Self {
            reader: BufReader::new(file),
            buf: Vec::new(),
            path,
            line_no: 0,
        })
    }

    /// Next line with its 1-based number, or `None` at end of file
    pub async fn next_line(&mut self) -> AppResult<Option<DumpLine>> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|e| AppError::io(&self.path, e))?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        if self.buf.ends_with(b"\n") {
            self.buf.pop();
            if self.buf.ends_with(b"\r") {
                self.buf.pop();
            }
        }

        let line = String::from_utf8(std::mem::take(&mut self.buf))
            .map_err(|e| LineError::InvalidEncoding(e.utf8_error().to_string()));
        Ok(Some((self.line_no, line)))
    }
}

/// Parse the JSON object starting at the first `{` of a dump line.
pub fn json_object(line: &str) -> Result<Map<String, Value>, LineError> {
    let start = line.find('{').ok_or(LineError::NoJsonObject)?;
    match serde_json::from_str::<Value>(&line[start..])? {
        Value::Object(object) => Ok(object),
        _ => Err(LineError::NoJsonObject),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_json_object_with_prefix() {
        let line = "/type/author\t/authors/OL1A\t1\t2008-04-01T03:28:50.625462\t{\"key\": \"/authors/OL1A\"}";
        let object = json_object(line).unwrap();
        assert_eq!(object["key"], "/authors/OL1A");
    }

    #[test]
    fn test_json_object_bare() {
        let object = json_object(r#"{"name": "x"}"#).unwrap();
        assert_eq!(object["name"], "x");
    }

    #[test]
    fn test_json_object_missing_brace() {
        assert_eq!(json_object("no object here"), Err(LineError::NoJsonObject));
        assert_eq!(json_object(""), Err(LineError::NoJsonObject));
    }

    #[test]
    fn test_json_object_invalid() {
        assert!(matches!(
            json_object("prefix\t{\"key\": "),
            Err(LineError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn test_reader_numbers_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "third").unwrap();

        let mut reader = DumpReader::open(file.path()).await.unwrap();
        assert_eq!(reader.next_line().await.unwrap(), Some((1, Ok("first".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), Some((2, Ok(String::new()))));
        assert_eq!(reader.next_line().await.unwrap(), Some((3, Ok("third".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reader_crlf_and_missing_final_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"first\r\nlast").unwrap();

        let mut reader = DumpReader::open(file.path()).await.unwrap();
        assert_eq!(reader.next_line().await.unwrap(), Some((1, Ok("first".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), Some((2, Ok("last".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reader_invalid_utf8_is_line_local() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\nbad \xff\xfe\nok again\n").unwrap();

        let mut reader = DumpReader::open(file.path()).await.unwrap();
        assert_eq!(reader.next_line().await.unwrap(), Some((1, Ok("ok".to_string()))));

        let (line_no, line) = reader.next_line().await.unwrap().unwrap();
        assert_eq!(line_no, 2);
        assert!(matches!(line, Err(LineError::InvalidEncoding(_))));

        assert_eq!(reader.next_line().await.unwrap(), Some((3, Ok("ok again".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let err = DumpReader::open("/nonexistent/dump.txt").await.err().unwrap();
        assert!(err.is_io());
    }
}
