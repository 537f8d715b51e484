//!
//! Files written for each predicted entry
//!
//! * `{id}.summary`: a line `{start} {end} {pretty_name}` per segment
//! * `{id}.annotation`: `>{id} {description}` and the path wrapped in 79 columns
//! * `{id}.plot`: posterior table with a header `inside membrane outside`
//! * `{id}.json`: id, log probabilities, path and segments
//!
use super::fasta::FastaEntry;
use crate::common::GROUPS;
use crate::error::Result;
use crate::predict::{Prediction, Segment};
use ndarray::Array2;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// line width of the path in annotation files
pub const ANNOTATION_WIDTH: usize = 79;

pub fn write_summary<W: Write>(writer: &mut W, segments: &[Segment]) -> std::io::Result<()> {
    for segment in segments {
        writeln!(writer, "{}", segment)?;
    }
    Ok(())
}

pub fn write_annotation<W: Write>(
    writer: &mut W,
    id: &str,
    description: &str,
    path: &str,
) -> std::io::Result<()> {
    writeln!(writer, ">{} {}", id, description)?;
    for line in path.as_bytes().chunks(ANNOTATION_WIDTH) {
        writer.write_all(line)?;
        writeln!(writer)?;
    }
    Ok(())
}

///
/// Shortest representation of a float that reads back to the same value,
/// always with a fractional part or an exponent (`0.0`, `0.25`, `1e-05`).
///
pub fn format_float(x: f64) -> String {
    let a = x.abs();
    if a == 0.0 || (1e-4..1e16).contains(&a) || !x.is_finite() {
        let s = x.to_string();
        if s.contains('.') || !x.is_finite() {
            s
        } else {
            format!("{}.0", s)
        }
    } else {
        let s = format!("{:e}", x);
        match s.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => s,
        }
    }
}

pub fn write_posterior<W: Write>(writer: &mut W, posterior: &Array2<f64>) -> std::io::Result<()> {
    let names: Vec<&str> = GROUPS.iter().map(|g| g.column_name()).collect();
    writeln!(writer, "{}", names.join(" "))?;
    for row in posterior.rows() {
        writeln!(
            writer,
            "{} {} {}",
            format_float(row[0]),
            format_float(row[1]),
            format_float(row[2])
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct PredictionRecord<'a> {
    id: &'a str,
    log_prob: f64,
    log_likelihood: Option<f64>,
    path: &'a str,
    segments: Vec<Segment>,
}

pub fn write_json<W: Write>(writer: &mut W, id: &str, prediction: &Prediction) -> Result<()> {
    let record = PredictionRecord {
        id,
        log_prob: prediction.log_prob,
        log_likelihood: prediction.log_likelihood,
        path: &prediction.path,
        segments: prediction.segments(),
    };
    serde_json::to_writer_pretty(&mut *writer, &record).map_err(std::io::Error::from)?;
    writeln!(writer)?;
    Ok(())
}

fn create<P: AsRef<Path>>(dir: P, id: &str, ext: &str) -> std::io::Result<(PathBuf, BufWriter<File>)> {
    let path = dir.as_ref().join(format!("{}.{}", id, ext));
    let file = File::create(&path)?;
    Ok((path, BufWriter::new(file)))
}

///
/// Write all artifacts of an entry into `dir` and returns the written paths.
///
/// `.plot` is written only if the prediction has a posterior table.
///
pub fn write_outputs<P: AsRef<Path>>(
    dir: P,
    entry: &FastaEntry,
    prediction: &Prediction,
    json: bool,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    let (path, mut w) = create(&dir, &entry.id, "summary")?;
    write_summary(&mut w, &prediction.segments())?;
    w.flush()?;
    paths.push(path);

    let (path, mut w) = create(&dir, &entry.id, "annotation")?;
    write_annotation(&mut w, &entry.id, &entry.description, &prediction.path)?;
    w.flush()?;
    paths.push(path);

    if let Some(posterior) = &prediction.posterior {
        let (path, mut w) = create(&dir, &entry.id, "plot")?;
        write_posterior(&mut w, posterior)?;
        w.flush()?;
        paths.push(path);
    }

    if json {
        let (path, mut w) = create(&dir, &entry.id, "json")?;
        write_json(&mut w, &entry.id, prediction)?;
        w.flush()?;
        paths.push(path);
    }

    Ok(paths)
}
