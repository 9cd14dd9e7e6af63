//! Streaming state for one download: status tracking, lazy destination-file
//! creation, byte accounting, and megabyte progress triggers.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::content_disposition::parse_content_disposition_filename;

const MIB: u64 = 1024 * 1024;

/// Receives header lines and body chunks for one GET and writes the body to
/// a file in the working directory.
///
/// The destination name comes from `Content-Disposition` when the header
/// carries a usable `filename=` token, otherwise from the fallback name.
/// The file is created lazily on the first body chunk, after all headers of
/// the final response have been seen. Body bytes of non-2xx responses
/// (redirect hops, error pages) are discarded without touching the
/// filesystem.
///
/// `on_megabyte` fires whenever the cumulative byte count is evenly
/// divisible by 1 MiB at the moment a chunk completes. Coarse on purpose:
/// it mirrors the counter, not a timer.
pub(crate) struct ArchiveSink<F: FnMut(u64)> {
    work_dir: PathBuf,
    fallback_name: String,
    status: u32,
    filename: Option<String>,
    out: Option<(PathBuf, File)>,
    bytes_written: u64,
    on_megabyte: F,
}

impl<F: FnMut(u64)> ArchiveSink<F> {
    pub(crate) fn new(work_dir: &Path, fallback_name: String, on_megabyte: F) -> Self {
        Self {
            work_dir: work_dir.to_path_buf(),
            fallback_name,
            status: 0,
            filename: None,
            out: None,
            bytes_written: 0,
            on_megabyte,
        }
    }

    /// Feed one response header line. A status line starts a new response,
    /// so only the final response in a redirect chain names the file.
    pub(crate) fn header_line(&mut self, line: &str) {
        let line = line.trim_end();
        if line.starts_with("HTTP/") {
            self.status = parse_status_line(line).unwrap_or(0);
            self.filename = None;
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-disposition") {
                self.filename = parse_content_disposition_filename(value.trim());
            }
        }
    }

    /// Feed one body chunk.
    pub(crate) fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        if data.is_empty() || !(200..300).contains(&self.status) {
            return Ok(());
        }
        if self.out.is_none() {
            let path = self.work_dir.join(self.destination_name());
            let file = File::create(&path)?;
            self.out = Some((path, file));
        }
        if let Some((_, file)) = self.out.as_mut() {
            file.write_all(data)?;
        }
        self.bytes_written += data.len() as u64;
        if self.bytes_written % MIB == 0 {
            (self.on_megabyte)(self.bytes_written / MIB);
        }
        Ok(())
    }

    /// Total body bytes written so far.
    pub(crate) fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Close the destination file and return its path.
    ///
    /// An empty 2xx body still produces the (empty) destination file, so the
    /// returned path always exists.
    pub(crate) fn finish(mut self) -> io::Result<PathBuf> {
        match self.out.take() {
            Some((path, file)) => {
                file.sync_all()?;
                Ok(path)
            }
            None => {
                let path = self.work_dir.join(self.destination_name());
                File::create(&path)?;
                Ok(path)
            }
        }
    }

    fn destination_name(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| self.fallback_name.clone())
    }
}

fn parse_status_line(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_headers(sink: &mut ArchiveSink<impl FnMut(u64)>, disposition: Option<&str>) {
        sink.header_line("HTTP/1.1 200 OK");
        if let Some(d) = disposition {
            sink.header_line(&format!("Content-Disposition: {}", d));
        }
        sink.header_line("");
    }

    #[test]
    fn three_mib_in_8_kib_chunks_fires_exactly_three_times() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = Vec::new();
        let chunk = [0u8; 8192];
        let path = {
            let mut sink =
                ArchiveSink::new(dir.path(), "fallback.zip".to_string(), |mib| events.push(mib));
            ok_headers(&mut sink, None);
            for _ in 0..(3 * MIB / 8192) {
                sink.write_chunk(&chunk).unwrap();
            }
            assert_eq!(sink.bytes_written(), 3 * MIB);
            sink.finish().unwrap()
        };
        assert_eq!(events, vec![1, 2, 3]);
        assert_eq!(std::fs::metadata(path).unwrap().len(), 3 * MIB);
    }

    #[test]
    fn unaligned_chunks_do_not_fire() {
        let dir = tempfile::tempdir().unwrap();
        let mut events = Vec::new();
        {
            let mut sink =
                ArchiveSink::new(dir.path(), "fallback.zip".to_string(), |mib| events.push(mib));
            ok_headers(&mut sink, None);
            for _ in 0..3 {
                sink.write_chunk(&[0u8; 1000]).unwrap();
            }
            sink.finish().unwrap();
        }
        assert!(events.is_empty());
    }

    #[test]
    fn file_named_from_content_disposition() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let mut sink = ArchiveSink::new(dir.path(), "fallback.zip".to_string(), |_| {});
            ok_headers(&mut sink, Some("attachment; filename=\"data.zip\""));
            sink.write_chunk(b"zip bytes").unwrap();
            sink.finish().unwrap()
        };
        assert_eq!(path, dir.path().join("data.zip"));
        assert_eq!(std::fs::read(path).unwrap(), b"zip bytes");
    }

    #[test]
    fn fallback_name_used_without_disposition() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let mut sink = ArchiveSink::new(dir.path(), "dataset#7442@17.zip".to_string(), |_| {});
            ok_headers(&mut sink, None);
            sink.write_chunk(b"x").unwrap();
            sink.finish().unwrap()
        };
        assert_eq!(path, dir.path().join("dataset#7442@17.zip"));
    }

    #[test]
    fn redirect_hop_body_and_headers_are_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let mut sink = ArchiveSink::new(dir.path(), "fallback.zip".to_string(), |_| {});
            sink.header_line("HTTP/1.1 302 Found");
            sink.header_line("Content-Disposition: attachment; filename=\"hop.zip\"");
            sink.write_chunk(b"redirect page").unwrap();
            ok_headers(&mut sink, None);
            sink.write_chunk(b"real body").unwrap();
            sink.finish().unwrap()
        };
        assert_eq!(path, dir.path().join("fallback.zip"));
        assert_eq!(std::fs::read(path).unwrap(), b"real body");
    }

    #[test]
    fn empty_success_body_still_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let mut sink = ArchiveSink::new(dir.path(), "fallback.zip".to_string(), |_| {});
            ok_headers(&mut sink, None);
            sink.finish().unwrap()
        };
        assert!(path.exists());
        assert_eq!(std::fs::metadata(path).unwrap().len(), 0);
    }
}
