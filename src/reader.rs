//! Reading transforms from "Insight Transform File" text files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::bufread::GzDecoder;

use crate::dispatch::{self, MultipleTransformPolicy, TransformEntry};
use crate::error::{Result, TransformError};
use crate::transform::Transform;
use crate::util::is_gz_file;

/// Options and flags which can be used to configure how a transform file is
/// read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReaderOptions {
    multiple_transforms: MultipleTransformPolicy,
}

impl ReaderOptions {
    /// Creates a blank new set of options ready for configuration.
    pub fn new() -> ReaderOptions {
        ReaderOptions::default()
    }

    /// Sets what to do when the file holds more than one top-level
    /// transform. Uses the first one with a warning by default.
    pub fn multiple_transforms(mut self, policy: MultipleTransformPolicy) -> Self {
        self.multiple_transforms = policy;
        self
    }

    /// Read a transform from a file. If the file's name ends with ".gz",
    /// the file is assumed to need GZip decoding.
    ///
    /// The result is always a composite transform: a composite stored in
    /// the file is used directly, any other transform is wrapped in one.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Transform> {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            self.read_from(BufReader::new(GzDecoder::new(file)))
        } else {
            self.read_from(file)
        }
    }

    /// Read a transform from the text of a transform file.
    pub fn read_from<R: BufRead>(&self, source: R) -> Result<Transform> {
        let entries = parse_entries(source)?;
        let transform = dispatch::from_entries(&entries, self.multiple_transforms)?;
        Ok(Transform::from_any(transform))
    }
}

/// Read a transform from a file with the default options.
pub fn read_transform<P: AsRef<Path>>(path: P) -> Result<Transform> {
    ReaderOptions::new().read_file(path)
}

/// Split a decorated class name such as `"AffineTransform_double_3_3"`
/// into the class name and its input and output dimensions.
fn parse_class(line: usize, decorated: &str) -> Result<(String, usize, usize)> {
    let invalid = || {
        TransformError::InvalidFormat(line, format!("malformed transform type {:?}", decorated))
    };
    let mut parts = decorated.rsplitn(4, '_');
    let output = parts.next().and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    let input = parts.next().and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    match parts.next() {
        Some("double") | Some("float") => {}
        _ => return Err(invalid()),
    }
    let class = parts.next().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    Ok((class.to_string(), input, output))
}

fn parse_values(line: usize, text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|v| {
            v.parse::<f64>().map_err(|_| {
                TransformError::InvalidFormat(line, format!("{:?} is not a number", v))
            })
        })
        .collect()
}

/// Parse every transform entry of a transform file, in file order.
pub fn parse_entries<R: BufRead>(source: R) -> Result<Vec<TransformEntry>> {
    let mut entries: Vec<TransformEntry> = Vec::new();
    for (i, text) in source.lines().enumerate() {
        let text = text?;
        let line = i + 1;
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let (key, value) = match text.find(':') {
            Some(pos) => (text[..pos].trim(), text[pos + 1..].trim()),
            None => {
                return Err(TransformError::InvalidFormat(
                    line,
                    format!("expected a \"key: value\" line, got {:?}", text),
                ))
            }
        };
        if key == "Transform" {
            let (class_name, input_dimension, output_dimension) = parse_class(line, value)?;
            entries.push(TransformEntry {
                class_name,
                input_dimension,
                output_dimension,
                parameters: Vec::new(),
                fixed_parameters: Vec::new(),
            });
            continue;
        }
        let current = entries.last_mut().ok_or_else(|| {
            TransformError::InvalidFormat(line, format!("{} found before any transform", key))
        })?;
        match key {
            "Parameters" => current.parameters = parse_values(line, value)?,
            "FixedParameters" => current.fixed_parameters = parse_values(line, value)?,
            _ => debug!("Ignoring unknown transform file key {:?} at line {}", key, line),
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names() {
        assert_eq!(
            parse_class(1, "AffineTransform_double_3_3").unwrap(),
            ("AffineTransform".to_string(), 3, 3)
        );
        assert_eq!(
            parse_class(1, "MatrixOffsetTransformBase_float_2_2").unwrap(),
            ("MatrixOffsetTransformBase".to_string(), 2, 2)
        );
        assert!(parse_class(1, "AffineTransform_3_3").is_err());
        assert!(parse_class(1, "_double_3_3").is_err());
        assert!(parse_class(1, "AffineTransform_double_3").is_err());
    }

    #[test]
    fn entries() {
        let text = "#Insight Transform File V1.0\n\
                    #Transform 0\n\
                    Transform: Euler2DTransform_double_2_2\n\
                    Parameters: 0.5 1 -2\n\
                    FixedParameters: 0 0\n";
        let entries = parse_entries(text.as_bytes()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].class_name, "Euler2DTransform");
        assert_eq!(entries[0].parameters, vec![0.5, 1., -2.]);
        assert_eq!(entries[0].fixed_parameters, vec![0., 0.]);
    }

    #[test]
    fn malformed_lines() {
        match parse_entries("Parameters: 1 2\n".as_bytes()) {
            Err(TransformError::InvalidFormat(1, _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        let text = "Transform: TranslationTransform_double_2_2\nParameters: 1 x\n";
        match parse_entries(text.as_bytes()) {
            Err(TransformError::InvalidFormat(2, _)) => {}
            other => panic!("unexpected result {:?}", other),
        }
        assert!(parse_entries("nonsense\n".as_bytes()).is_err());
    }

    #[test]
    fn empty_file_has_no_transform() {
        match ReaderOptions::new().read_from("#Insight Transform File V1.0\n".as_bytes()) {
            Err(TransformError::NoTransform) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
