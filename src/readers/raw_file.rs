use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{ProcessingError, Result};
use crate::schema::strip_int_annotation;
use crate::utils::constants::PREAMBLE_LINES;
use crate::utils::filename::FileStamp;

/// One raw instrument-archive file, split into metadata, preamble and rows.
///
/// Rows keep their cells as strings keyed positionally against `header`;
/// typing happens in the normalizer.
#[derive(Debug, Clone)]
pub struct RawMeasurementFile {
    pub path: PathBuf,
    pub stamp: FileStamp,
    pub cruise: String,
    pub pi: String,
    pub pi_email: String,
    /// Raw line 0 — the first free-text legal/metadata line.
    pub preamble_1: String,
    /// Raw line 2 — the second free-text legal/metadata line.
    pub preamble_2: String,
    /// Column header tokens with the `(int)` annotation repaired.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawMeasurementFile {
    /// Header rendering attached to failure-log entries.
    pub fn header_snapshot(&self) -> String {
        self.header.join(",")
    }
}

/// Parses raw MAN archive files.
///
/// Archives are legacy Latin-1 encoded, so decoding is permissive single-byte
/// rather than UTF-8.
pub struct RawFileReader {
    use_mmap: bool,
}

impl RawFileReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    /// Memory-mapped reads for the large all-points files.
    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    pub fn read(&self, path: &Path) -> Result<RawMeasurementFile> {
        let stamp = FileStamp::parse(path)?;
        let content = self.decode_file(path)?;
        self.parse_content(path, stamp, &content)
    }

    fn decode_file(&self, path: &Path) -> Result<String> {
        if self.use_mmap {
            let file = File::open(path)?;
            let mmap = unsafe { Mmap::map(&file)? };
            Ok(encoding_rs::mem::decode_latin1(&mmap).into_owned())
        } else {
            let bytes = std::fs::read(path)?;
            Ok(encoding_rs::mem::decode_latin1(&bytes).into_owned())
        }
    }

    fn parse_content(
        &self,
        path: &Path,
        stamp: FileStamp,
        content: &str,
    ) -> Result<RawMeasurementFile> {
        let file_name = path.display().to_string();
        let lines: Vec<&str> = content.lines().collect();

        if lines.len() < PREAMBLE_LINES {
            return Err(ProcessingError::parse(
                file_name,
                format!(
                    "expected at least {} header lines, found {}",
                    PREAMBLE_LINES,
                    lines.len()
                ),
            ));
        }

        let cruise = lines[1]
            .split(',')
            .next()
            .unwrap_or_default()
            .to_string();

        let (pi, pi_email) = parse_pi_line(&file_name, lines[3])?;

        let header: Vec<String> = lines[4]
            .trim()
            .split(',')
            .map(|token| strip_int_annotation(token).to_string())
            .collect();

        let rows: Vec<Vec<String>> = lines[PREAMBLE_LINES..]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim().split(',').map(str::to_string).collect())
            .collect();

        Ok(RawMeasurementFile {
            path: path.to_path_buf(),
            stamp,
            cruise,
            pi,
            pi_email,
            preamble_1: lines[0].to_string(),
            preamble_2: lines[2].to_string(),
            header,
            rows,
        })
    }
}

impl Default for RawFileReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits `PI=<name>,...,Email=<email>` into (name, email).
///
/// The record format downstream is comma-delimited, so embedded commas in
/// either field are neutralized to semicolons.
fn parse_pi_line(file_name: &str, line: &str) -> Result<(String, String)> {
    let after_eq = line
        .split_once('=')
        .ok_or_else(|| ProcessingError::parse(file_name, "PI line has no '='"))?
        .1;
    let pi = after_eq
        .split(',')
        .next()
        .unwrap_or_default()
        .replace(',', ";");

    let email = line
        .split_once(",Email=")
        .ok_or_else(|| ProcessingError::parse(file_name, "PI line has no Email token"))?
        .1
        .replace(',', ";");

    Ok((pi, email))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::variant::{Frequency, QualityLevel, Retrieval};
    use std::io::Write;

    fn write_raw_file(dir: &Path, name: &str, body: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(body).unwrap();
        path
    }

    fn sample_aod_body() -> Vec<u8> {
        let text = "Level 1.5 Maritime Aerosol Network (MAN) Measurements\n\
            Cruise1,Version 3 direct sun algorithm\n\
            The public domain data you are about to download are contributed by the Maritime Aerosol Network\n\
            PI=Smith,John,Email=jsmith@example.org\n\
            Date(dd:mm:yyyy),Time(hh:mm:ss),Air Mass,Latitude,Longitude,AOD_340nm,AOD_500nm(int),Last_Processing_Date(dd:mm:yyyy),AERONET_Number,Microtops_Number\n\
            02:04:2019,12:30:05,1.5,11.25,-42.5,0.2,0.0831,05:04:2019,77,5410\n\
            03:04:2019,09:10:00,1.2,11.30,-42.1,0.21,0.0820,05:04:2019,77,5410\n";
        text.as_bytes().to_vec()
    }

    #[test]
    fn test_parse_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_raw_file(dir.path(), "Cruise1_daily.lev15", &sample_aod_body());

        let parsed = RawFileReader::new().read(&path).unwrap();
        assert_eq!(parsed.cruise, "Cruise1");
        assert_eq!(parsed.pi, "Smith");
        assert_eq!(parsed.pi_email, "jsmith@example.org");
        assert_eq!(parsed.stamp.retrieval, Retrieval::Aod);
        assert_eq!(parsed.stamp.frequency, Frequency::Daily);
        assert_eq!(parsed.stamp.level, QualityLevel::Lev15);
        assert_eq!(parsed.rows.len(), 2);
        // The (int) annotation is repaired in the header keys.
        assert!(parsed.header.iter().any(|h| h == "AOD_500nm"));
        assert!(!parsed.header.iter().any(|h| h.contains("(int)")));
    }

    #[test]
    fn test_latin1_bytes_are_tolerated() {
        // 0xE9/0xED are 'é'/'í' in Latin-1 and invalid UTF-8 start bytes.
        let mut raw: Vec<u8> = Vec::new();
        raw.extend_from_slice(b"Level 1.5 MAN Measurements\n");
        raw.extend_from_slice(b"Cruise1,Version 3\n");
        raw.extend_from_slice(b"Public domain data\n");
        raw.extend_from_slice(b"PI=Jos\xE9 Mart\xEDn,Email=jose@example.org\n");
        raw.extend_from_slice(b"Date(dd:mm:yyyy),Time(hh:mm:ss),Latitude,Longitude\n");
        raw.extend_from_slice(b"02:04:2019,12:30:05,11.25,-42.5\n");

        let dir = tempfile::tempdir().unwrap();
        let path = write_raw_file(dir.path(), "Cruise1_daily.lev15", &raw);

        let parsed = RawFileReader::new().read(&path).unwrap();
        assert_eq!(parsed.pi, "José Martín");
        assert_eq!(parsed.pi_email, "jose@example.org");
    }

    #[test]
    fn test_mmap_read_matches_buffered() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_raw_file(dir.path(), "Cruise1_series.lev20", &sample_aod_body());

        let buffered = RawFileReader::new().read(&path).unwrap();
        let mapped = RawFileReader::with_mmap(true).read(&path).unwrap();
        assert_eq!(buffered.header, mapped.header);
        assert_eq!(buffered.rows, mapped.rows);
    }

    #[test]
    fn test_pi_line_with_embedded_commas() {
        let (pi, email) =
            parse_pi_line("f", "PI=Smith,John,Email=jsmith@example.org,backup@example.org")
                .unwrap();
        assert_eq!(pi, "Smith");
        assert_eq!(email, "jsmith@example.org;backup@example.org");
    }

    #[test]
    fn test_malformed_pi_line_is_a_parse_error() {
        assert!(parse_pi_line("f", "no equals sign here").is_err());
        assert!(parse_pi_line("f", "PI=Smith,John").is_err());
    }

    #[test]
    fn test_truncated_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_raw_file(dir.path(), "Cruise1_daily.lev15", b"only\ntwo lines\n");
        assert!(RawFileReader::new().read(&path).is_err());
    }
}
