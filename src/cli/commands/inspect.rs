//! Dataset inspection command.

use console::style;

use crate::config::Settings;
use crate::dataset::Table;

/// Load the dataset and print its shape, summary and filters.
pub fn cmd_inspect(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let outcome = super::load_dataset(settings);
    let failure = outcome.failure().map(str::to_string);
    let table = outcome.into_table();

    if json {
        let report = serde_json::json!({
            "path": settings.data_path.display().to_string(),
            "loaded": failure.is_none(),
            "error": failure,
            "records": table.len(),
            "columns": table.columns().names(),
            "stats": table.summary(),
            "filters": table.filters(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(settings, failure.as_deref(), &table);
    }

    match failure {
        Some(reason) => Err(anyhow::anyhow!("Failed to load crime data: {}", reason)),
        None => Ok(()),
    }
}

fn print_report(settings: &Settings, failure: Option<&str>, table: &Table) {
    println!("{}", style("Crime Data").bold());
    println!("  File:      {}", settings.data_path.display());
    match failure {
        None => println!("  Status:    {}", style("loaded").green()),
        Some(reason) => {
            println!("  Status:    {}", style("failed").red());
            println!("  Error:     {}", reason);
            return;
        }
    }
    println!("  Records:   {}", table.len());
    println!("  Columns:   {}", table.columns().names().join(", "));

    let summary = table.summary();
    let filters = table.filters();
    let years: Vec<String> = summary.available_years.iter().map(i64::to_string).collect();

    println!();
    println!("{}", style("Summary").bold());
    println!("  Total crimes:      {}", summary.total_crimes);
    println!("  Districts covered: {}", summary.districts_covered);
    println!("  Years:             {}", years.join(", "));

    if !filters.districts.is_empty() {
        println!();
        println!("{}", style("Districts").bold());
        for district in &filters.districts {
            println!("  {}", district);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_inspect_fails_when_data_is_missing() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            data_path: dir.path().join("absent.csv"),
            ..Settings::default()
        };
        let err = cmd_inspect(&settings, false).unwrap_err();
        assert!(err.to_string().contains("absent.csv"));
        assert!(cmd_inspect(&settings, true).is_err());
    }

    #[test]
    fn test_inspect_reports_loaded_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crimes.csv");
        std::fs::write(&path, "District,Year,Total Crimes\nMandya,2020,9\nHassan,2021,4\n").unwrap();
        let settings = Settings {
            data_path: path,
            ..Settings::default()
        };
        assert!(cmd_inspect(&settings, true).is_ok());
        assert!(cmd_inspect(&settings, false).is_ok());
    }
}
