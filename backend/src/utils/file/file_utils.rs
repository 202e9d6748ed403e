use log::debug;
use shared::error::ResolverError;
use shared::info_err_res;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const IO_BUFFER_SIZE: usize = 256 * 1024; // 256kb

pub fn file_writer<W>(w: W) -> std::io::BufWriter<W>
where
    W: std::io::Write,
{
    std::io::BufWriter::with_capacity(IO_BUFFER_SIZE, w)
}

pub fn file_reader<R>(r: R) -> std::io::BufReader<R>
where
    R: std::io::Read,
{
    std::io::BufReader::with_capacity(IO_BUFFER_SIZE, r)
}

#[inline]
pub fn open_file(file_name: &Path) -> Result<File, std::io::Error> {
    File::open(file_name)
}

pub fn path_exists(file_path: &Path) -> bool {
    if let Ok(metadata) = file_path.metadata() {
        return metadata.is_file();
    }
    false
}

/// Writes `value` as pretty printed JSON to `output`, or to stdout when no
/// path is given.
pub fn write_json<T>(output: Option<&Path>, value: &T) -> Result<(), ResolverError>
where
    T: serde::Serialize,
{
    let result = match output {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = file_writer(file);
            serde_json::to_writer_pretty(&mut writer, value).map_err(std::io::Error::from)?;
            writer.flush()
        }),
        None => {
            let mut writer = file_writer(std::io::stdout().lock());
            serde_json::to_writer_pretty(&mut writer, value).map_err(std::io::Error::from)
                .and_then(|()| writer.write_all(b"\n"))
                .and_then(|()| writer.flush())
        }
    };
    match result {
        Ok(()) => {
            if let Some(path) = output {
                debug!("written: {}", path.display());
            }
            Ok(())
        }
        Err(err) => info_err_res!("failed to write output {}: {err}", output.map_or_else(|| "stdout".to_string(), |p| p.display().to_string())),
    }
}
