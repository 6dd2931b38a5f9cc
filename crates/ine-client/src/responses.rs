use serde::Deserialize;

/// One statistical series as returned by `DATOS_TABLA/{table_id}`.
///
/// The INE payload uses Spanish PascalCase field names; everything is
/// optional in practice, so the defaults keep partial series parseable.
#[derive(Debug, Clone, Deserialize)]
pub struct SeriesResponse {
    /// Series display name, e.g. "Madrid. Índice.". The leading segment is
    /// the zone; the rest describes the measure.
    #[serde(rename = "Nombre", default)]
    pub name: String,

    /// INE series code.
    #[serde(rename = "COD", default)]
    pub code: Option<String>,

    /// The series' observations.
    #[serde(rename = "Data", default)]
    pub data: Vec<DataPoint>,
}

/// One observation inside a series.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DataPoint {
    /// The observed value. Absent for suppressed periods.
    #[serde(rename = "Valor", default)]
    pub value: Option<f64>,

    /// Period timestamp in epoch milliseconds.
    #[serde(rename = "Fecha", default)]
    pub timestamp_ms: Option<i64>,

    /// Statistical-secrecy flag; flagged observations must be dropped.
    #[serde(rename = "Secreto", default)]
    pub confidential: Option<bool>,
}
