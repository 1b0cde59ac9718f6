use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::io::Write;
use tracing::debug;

use crate::error::Result;
use crate::table::ForecastTable;

impl ForecastTable {
    /// Native rows as a DataFrame with `timestamp`, `date`, `lower` and `upper` columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows = self.rows();
        let timestamps: Vec<NaiveDateTime> = rows.iter().map(|r| r.timestamp).collect();
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.timestamp.date()).collect();
        let lower: Vec<f64> = rows.iter().map(|r| r.lower).collect();
        let upper: Vec<f64> = rows.iter().map(|r| r.upper).collect();

        let df = DataFrame::new(vec![
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("date".into(), dates).into(),
            Series::new("lower".into(), lower).into(),
            Series::new("upper".into(), upper).into(),
        ])?;

        Ok(df)
    }

    /// Write the native rows as CSV with a header line.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut df = self.to_dataframe()?;
        debug!(rows = df.height(), "Writing forecast table as CSV");
        CsvWriter::new(writer).include_header(true).finish(&mut df)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::horizon::ForecastHorizon;
    use crate::table::{DailyReduction, build_forecast_table};
    use crate::testing::{LinearForecaster, date, midnight};

    fn table() -> crate::table::ForecastTable {
        let model = LinearForecaster::hourly(midnight(2024, 1, 1));
        let horizon = ForecastHorizon::new(date(2024, 1, 1), date(2024, 1, 3)).unwrap();
        build_forecast_table(&model, horizon, 0.05, DailyReduction::First).unwrap()
    }

    #[test]
    fn test_dataframe_shape() {
        let table = table();
        let df = table.to_dataframe().unwrap();
        assert_eq!(df.height(), table.len());
        assert_eq!(df.height(), 2 * 24 + 1);
        let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["timestamp", "date", "lower", "upper"]);
    }

    #[test]
    fn test_csv_has_one_line_per_row() {
        let table = table();
        let mut buf: Vec<u8> = Vec::new();
        table.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "timestamp,date,lower,upper");
        assert_eq!(lines.len(), table.len() + 1);
        assert!(lines[1].contains(",2024-01-01,"));
        assert!(lines.last().unwrap().contains(",2024-01-03,"));
    }
}
