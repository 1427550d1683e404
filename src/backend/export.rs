use csv::{QuoteStyle, Terminator};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::{Builder, NamedTempFile};

use super::error::ConvertError;
use super::parser::ReviewRecord;

pub const CSV_HEADER: [&str; 4] = ["Name", "Date", "Review", "People_Found_Helpful"];

/// Writes the records as CSV, header first, and returns how many rows were written.
pub fn write_csv(records: &[ReviewRecord], output_path: &Path) -> Result<usize, ConvertError> {
    write_atomically(output_path, |out| {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(out);

        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    })?;

    Ok(records.len())
}

/// Writes the records as a JSON array keyed by the CSV column names.
pub fn write_json(records: &[ReviewRecord], output_path: &Path) -> Result<usize, ConvertError> {
    write_atomically(output_path, |out| {
        serde_json::to_writer_pretty(&mut *out, records)?;
        out.write_all(b"\n")?;
        Ok(())
    })?;

    Ok(records.len())
}

/// Runs `write` against a temp file next to `output_path` and only replaces
/// the destination once everything has been flushed.
fn write_atomically<F>(output_path: &Path, write: F) -> Result<(), ConvertError>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> io::Result<()>,
{
    let failure = |source: io::Error| ConvertError::WriteFailure {
        path: output_path.to_path_buf(),
        source,
    };

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = create_temp(dir, output_path).map_err(failure)?;

    {
        let mut out = BufWriter::new(&mut tmp);
        write(&mut out).map_err(failure)?;
        out.flush().map_err(failure)?;
    }
    tmp.as_file().sync_all().map_err(failure)?;

    tmp.persist(output_path).map_err(|e| failure(e.error))?;
    Ok(())
}

/// Temp files default to owner-only access. Give the replacement the same
/// mode as the file it overwrites, or the umask default for a new file.
fn create_temp(dir: &Path, output_path: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;

    if let Ok(existing) = fs::metadata(output_path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    Ok(tmp)
}
