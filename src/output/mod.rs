// mod.rs - Output formatters module

use crate::core::{DistanceMatrix, MetricResult};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Supported matrix formats
pub const FORMATS: [&str; 4] = ["tsv", "csv", "phylip", "nexus"];

fn write_err(e: std::io::Error) -> String {
    format!("Write error: {}", e)
}

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(|e| {
                format!("Failed to create parent directory '{}': {}", parent.display(), e)
            })?;
        }
    }
    Ok(())
}

fn create_writer(file_path: &str) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    Ok(BufWriter::new(file))
}

fn generated_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn cell(value: Option<usize>, missing: &str) -> String {
    match value {
        Some(d) => d.to_string(),
        None => missing.to_string(),
    }
}

/// Square matrix with a header row, `NA` for missing pairs
pub fn write_delimited<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    delimiter: char,
    command_line: &str,
) -> Result<(), String> {
    writeln!(writer, "# Command: {}", command_line).map_err(write_err)?;
    writeln!(writer, "# Generated: {}", generated_at()).map_err(write_err)?;
    writeln!(writer, "# hladist v{}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;

    write!(writer, "Sample").map_err(write_err)?;
    for label in matrix.labels() {
        write!(writer, "{}{}", delimiter, label).map_err(write_err)?;
    }
    writeln!(writer).map_err(write_err)?;

    for (label, row) in matrix.labels().iter().zip(matrix.rows()) {
        write!(writer, "{}", label).map_err(write_err)?;
        for &value in row {
            write!(writer, "{}{}", delimiter, cell(value, "NA")).map_err(write_err)?;
        }
        writeln!(writer).map_err(write_err)?;
    }
    Ok(())
}

/// Lower-triangle PHYLIP matrix; comments trail the data
pub fn write_phylip<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    writeln!(writer, "    {}", matrix.len()).map_err(write_err)?;
    for (i, label) in matrix.labels().iter().enumerate() {
        write!(writer, "{:<10}", label).map_err(write_err)?;
        for j in 0..=i {
            write!(writer, "  {}", cell(matrix.get(i, j), "NA")).map_err(write_err)?;
        }
        writeln!(writer).map_err(write_err)?;
    }

    writeln!(writer).map_err(write_err)?;
    writeln!(writer, "# Command: {}", command_line).map_err(write_err)?;
    writeln!(writer, "# Generated: {}", generated_at()).map_err(write_err)?;
    writeln!(writer, "# hladist v{}", env!("CARGO_PKG_VERSION")).map_err(write_err)?;
    Ok(())
}

/// NEXUS DISTANCES block, lower triangle, `?` for missing pairs
pub fn write_nexus<W: Write>(
    writer: &mut W,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    writeln!(writer, "#NEXUS").map_err(write_err)?;
    writeln!(writer, "[Command: {}]", command_line).map_err(write_err)?;
    writeln!(writer, "[Generated: {}]", generated_at()).map_err(write_err)?;
    writeln!(writer, "[hladist v{}]", env!("CARGO_PKG_VERSION")).map_err(write_err)?;
    writeln!(writer, "BEGIN DISTANCES;").map_err(write_err)?;
    writeln!(writer, "    DIMENSIONS NTAX={};", matrix.len()).map_err(write_err)?;
    writeln!(writer, "    FORMAT LABELS LOWER NODIAGONAL;").map_err(write_err)?;
    writeln!(writer, "    MATRIX").map_err(write_err)?;

    for (i, label) in matrix.labels().iter().enumerate() {
        write!(writer, "        {}", label).map_err(write_err)?;
        for j in 0..i {
            write!(writer, " {}", cell(matrix.get(i, j), "?")).map_err(write_err)?;
        }
        writeln!(writer).map_err(write_err)?;
    }

    writeln!(writer, "    ;").map_err(write_err)?;
    writeln!(writer, "END;").map_err(write_err)?;
    Ok(())
}

/// Write distance matrix in the specified format
pub fn write_matrix(
    file_path: &str,
    format: &str,
    matrix: &DistanceMatrix,
    command_line: &str,
) -> Result<(), String> {
    let format = format.to_lowercase();
    if !FORMATS.contains(&format.as_str()) {
        return Err(format!(
            "Unsupported output format: {}. Use: {}",
            format,
            FORMATS.join(", ")
        ));
    }

    let mut writer = create_writer(file_path)?;
    match format.as_str() {
        "csv" => write_delimited(&mut writer, matrix, ',', command_line)?,
        "phylip" => write_phylip(&mut writer, matrix, command_line)?,
        "nexus" => write_nexus(&mut writer, matrix, command_line)?,
        _ => write_delimited(&mut writer, matrix, '\t', command_line)?,
    }
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;

    println!("✅ Distance matrix written to: {} ({})", file_path, format.to_uppercase());
    Ok(())
}

/// Write the full metric result (matrix, per-pair gene detail, skipped pairs) as JSON
pub fn write_details(file_path: &str, result: &MetricResult) -> Result<(), String> {
    let mut writer = create_writer(file_path)?;
    serde_json::to_writer_pretty(&mut writer, result)
        .map_err(|e| format!("Failed to serialize details: {}", e))?;
    writeln!(writer).map_err(write_err)?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    println!("✅ Pair details written to: {}", file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DistanceMatrix {
        let labels = vec!["s1".to_string(), "s2".to_string(), "s3".to_string()];
        DistanceMatrix::from_upper_triangle(labels, &[17, 18, 19]).unwrap()
    }

    fn data_lines(text: &str) -> Vec<&str> {
        text.lines()
            .filter(|l| !l.starts_with('#') && !l.starts_with('[') && !l.is_empty())
            .collect()
    }

    #[test]
    fn test_tsv_output() {
        let mut buf = Vec::new();
        write_delimited(&mut buf, &matrix(), '\t', "hladist test").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("# Command: hladist test"));
        assert_eq!(
            data_lines(&text),
            vec!["Sample\ts1\ts2\ts3", "s1\t0\t17\t18", "s2\t17\t0\t19", "s3\t18\t19\t0"]
        );
    }

    #[test]
    fn test_csv_output_with_missing() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let m = DistanceMatrix::from_outcomes(labels, &[]);
        let mut buf = Vec::new();
        write_delimited(&mut buf, &m, ',', "").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(data_lines(&text), vec!["Sample,a,b", "a,0,NA", "b,NA,0"]);
    }

    #[test]
    fn test_phylip_output() {
        let mut buf = Vec::new();
        write_phylip(&mut buf, &matrix(), "").unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines = data_lines(&text);
        assert_eq!(lines[0], "    3");
        assert_eq!(lines[2], "s2          17  0");
        assert_eq!(lines[3], "s3          18  19  0");
    }

    #[test]
    fn test_nexus_output() {
        let mut buf = Vec::new();
        write_nexus(&mut buf, &matrix(), "").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("DIMENSIONS NTAX=3;"));
        assert!(text.contains("        s3 18 19\n"));
        assert!(text.trim_end().ends_with("END;"));
    }

    #[test]
    fn test_unknown_format() {
        let err = write_matrix("/nonexistent/out.txt", "xml", &matrix(), "").unwrap_err();
        assert!(err.contains("Unsupported output format"));
    }

    #[test]
    fn test_write_matrix_to_file() {
        let dir = std::env::temp_dir().join(format!("hladist_out_{}", std::process::id()));
        let path = dir.join("m.csv");
        let path_str = path.to_string_lossy().to_string();
        write_matrix(&path_str, "CSV", &matrix(), "cmd").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("s1,0,17,18"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
