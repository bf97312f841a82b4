//! Writing transforms to "Insight Transform File" text files.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::dispatch::{self, TransformEntry};
use crate::error::Result;
use crate::transform::Transform;
use crate::util::is_gz_file;

/// Options and flags which can be used to configure how a transform file is
/// written.
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    /// Where to write the transform.
    path: PathBuf,
    /// GZip compression level, used if the path ends with ".gz".
    compression: Compression,
}

impl WriterOptions {
    /// Creates a new set of options with the given target path. If the
    /// file's name ends with ".gz", the file is GZip compressed. An existing
    /// file is overwritten.
    pub fn new<P: AsRef<Path>>(path: P) -> WriterOptions {
        WriterOptions {
            path: path.as_ref().to_path_buf(),
            compression: Compression::default(),
        }
    }

    /// Sets the compression level used for ".gz" files.
    pub fn compression(mut self, compression: Compression) -> WriterOptions {
        self.compression = compression;
        self
    }

    /// Write a transform file.
    ///
    /// # Errors
    ///
    /// - `TransformError::Io` if the file cannot be written.
    /// - `TransformError::Unsupported` if a composite transform holds
    /// another composite transform.
    pub fn write_transform(&self, transform: &Transform) -> Result<()> {
        let entries = dispatch::to_entries(transform.as_any())?;
        let f = File::create(&self.path)?;
        let mut writer = BufWriter::new(f);
        if is_gz_file(&self.path) {
            let mut e = GzEncoder::new(writer, self.compression);
            write_entries(&mut e, &entries)?;
            e.finish()?.flush()?;
        } else {
            write_entries(&mut writer, &entries)?;
            writer.flush()?;
        }
        Ok(())
    }
}

/// Write a transform to a file with the default options.
pub fn write_transform<P: AsRef<Path>>(transform: &Transform, path: P) -> Result<()> {
    WriterOptions::new(path).write_transform(transform)
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write transform entries in the text format.
pub fn write_entries<W: Write>(writer: &mut W, entries: &[TransformEntry]) -> Result<()> {
    writeln!(writer, "#Insight Transform File V1.0")?;
    for (i, entry) in entries.iter().enumerate() {
        writeln!(writer, "#Transform {}", i)?;
        writeln!(
            writer,
            "Transform: {}_double_{}_{}",
            entry.class_name, entry.input_dimension, entry.output_dimension
        )?;
        if entry.class_name == "CompositeTransform" {
            continue;
        }
        writeln!(writer, "Parameters: {}", join(&entry.parameters))?;
        writeln!(writer, "FixedParameters: {}", join(&entry.fixed_parameters))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_entries;

    #[test]
    fn text_layout() {
        let entries = vec![TransformEntry {
            class_name: "TranslationTransform".to_string(),
            input_dimension: 2,
            output_dimension: 2,
            parameters: vec![1.5, -2.],
            fixed_parameters: vec![],
        }];
        let mut out = Vec::new();
        write_entries(&mut out, &entries).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "#Insight Transform File V1.0\n\
             #Transform 0\n\
             Transform: TranslationTransform_double_2_2\n\
             Parameters: 1.5 -2\n\
             FixedParameters: \n"
        );
        assert_eq!(parse_entries(text.as_bytes()).unwrap(), entries);
    }

    #[test]
    fn values_are_exact() {
        let values = [0.1, 1.0 / 3.0, -1e-300, 12345.678901234567];
        let text = join(&values);
        let back: Vec<f64> = text.split(' ').map(|v| v.parse().unwrap()).collect();
        assert_eq!(back, values.to_vec());
    }
}
