//! Output serialization: pipe-joined report files.

use crate::error::Result;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Derives the output file path from a template file name.
///
/// Substitutes the `{dbdNo}`, `{assetId}`, `{yyyymmdd}` placeholders and
/// joins the result onto the output directory.
pub fn derive_output_path(
    output_dir: &Path,
    template_file_name: &str,
    dbd_no: &str,
    asset_id: &str,
    yyyymmdd: &str,
) -> PathBuf {
    let file_name = template_file_name
        .replace("{dbdNo}", dbd_no)
        .replace("{assetId}", asset_id)
        .replace("{yyyymmdd}", yyyymmdd);
    output_dir.join(file_name)
}

/// Writes the header line followed by one line per row, all pipe-joined.
///
/// Creates the output directory if absent and overwrites any existing file
/// at the path.
pub fn write_report(path: &Path, fields: &[String], rows: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    writeln!(file, "{}", fields.join("|"))?;
    for row in rows {
        writeln!(file, "{}", row.join("|"))?;
    }
    file.flush()?;

    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_placeholder_substitution() {
        let path = derive_output_path(
            Path::new("output"),
            "ICOPortal_DA_CusData_{dbdNo}_{assetId}_{yyyymmdd}.csv",
            "111",
            "4846",
            "20250307",
        );
        assert_eq!(
            path,
            Path::new("output/ICOPortal_DA_CusData_111_4846_20250307.csv")
        );
    }

    #[test]
    fn test_write_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("report.csv");

        let fields = vec!["a".to_string(), "b".to_string()];
        let rows = vec![
            vec!["1".to_string(), "2".to_string()],
            vec!["3".to_string(), "".to_string()],
        ];
        write_report(&path, &fields, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "a|b\n1|2\n3|\n");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");

        write_report(&path, &["x".to_string()], &[vec!["old".to_string()]]).unwrap();
        write_report(&path, &["x".to_string()], &[vec!["new".to_string()]]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "x\nnew\n");
    }

    #[test]
    fn test_round_trip_with_reader() {
        use crate::reader::read_delimited;

        let dir = tempdir().unwrap();
        let path = dir.path().join("round_trip.csv");

        let fields = vec!["id".to_string(), "name".to_string()];
        let rows = vec![
            vec!["1".to_string(), "Somchai".to_string()],
            vec!["2".to_string(), "Maria".to_string()],
        ];
        write_report(&path, &fields, &rows).unwrap();

        let records = read_delimited(&path, b'|');
        assert_eq!(records.len(), 2);
        for (record, row) in records.iter().zip(&rows) {
            let names: Vec<_> = record.names().collect();
            assert_eq!(names, vec!["id", "name"]);
            let values: Vec<_> = record.values().map(str::to_string).collect();
            assert_eq!(&values, row);
        }
    }
}
