use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::config::{Settings, load_forecast};

/// Write the native forecast table as CSV to `output` (`-` for stdout).
pub fn export_table(settings: &Settings, output: &Path) -> Result<()> {
    let (_, table) = load_forecast(settings)?;

    if output == Path::new("-") {
        let stdout = std::io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        table.write_csv(&mut writer)?;
        writer.flush()?;
    } else {
        let file = File::create(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        table.write_csv(&mut writer)?;
        writer.flush()?;
        info!(rows = table.len(), "Forecast table written to {}", output.display());
    }

    Ok(())
}
