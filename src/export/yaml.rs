//! YAML backup export
//!
//! Human-readable rendering of the same structure as the JSON backup.

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::export::json::FullExport;
use crate::models::AppState;

/// Export the full store to YAML format
pub fn export_full_yaml<W: Write>(state: &AppState, writer: &mut W) -> FinanceResult<()> {
    let export = FullExport::from_state(state);

    writeln!(writer, "# finmaster full backup").map_err(|e| FinanceError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthName, MonthRecord};

    #[test]
    fn test_yaml_export() {
        let mut state = AppState::default();
        state.months.push(MonthRecord::new(MonthName::Marco, 2025));

        let mut output = Vec::new();
        export_full_yaml(&state, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# finmaster full backup"));
        assert!(yaml.contains("schema_version:"));

        let parsed: FullExport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.data, state);
    }
}
