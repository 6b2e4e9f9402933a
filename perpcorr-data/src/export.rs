use crate::analysis::AnalysisResult;

/// Column header of the CSV export, always written even when there are no results.
pub const CSV_HEADER: [&str; 4] = ["symbol", "market_cap", "volume_24h", "correlation"];

/// Render `results` as CSV, one row per result in the provided order.
///
/// A `NaN` correlation is written as an empty field.
pub fn to_csv(results: &[AnalysisResult]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for result in results {
        let correlation = if result.correlation.is_nan() {
            String::new()
        } else {
            result.correlation.to_string()
        };

        writer.write_record([
            result.symbol.as_str(),
            result.market_cap.to_string().as_str(),
            result.volume_24h.to_string().as_str(),
            correlation.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|error| csv::Error::from(error.into_error()))
}
