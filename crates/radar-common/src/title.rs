//! Figure title and image name derived from a scan filename.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::RadarResult;
use crate::time::{final_segment, parse_scan_time, to_local};
use crate::variable::RadarVariable;

/// Title strings for one (variable, scan) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedTitle {
    pub variable: RadarVariable,
    /// Scan start as encoded in the filename.
    pub utc: DateTime<Utc>,
    /// Scan start in local (UTC-6) time.
    pub local: NaiveDateTime,
    /// `IMN-Radar {label} YYYY/MM/DD HH:MM:SS (Local)`
    pub title: String,
    /// `{tag}_YYYYMMDD-HHMMSS.png` in local time.
    ///
    /// Not used for the saved artifact, which always goes to
    /// `{tag}_actual[Red].png`.
    pub image_name: String,
}

/// Derive the title and timestamped image name for a scan file.
///
/// The variable tag is resolved first, so an unknown tag is reported even
/// when the filename is also malformed.
pub fn derive_title(variable_tag: &str, file_id: &str) -> RadarResult<DerivedTitle> {
    let variable: RadarVariable = variable_tag.parse()?;
    derive_title_for(variable, file_id)
}

/// Same as [`derive_title`] for an already-resolved variable.
pub fn derive_title_for(variable: RadarVariable, file_id: &str) -> RadarResult<DerivedTitle> {
    let utc = parse_scan_time(file_id)?;
    let local = to_local(utc);

    let title = format!(
        "IMN-Radar {} {} (Local)",
        variable.label(),
        local.format("%Y/%m/%d %H:%M:%S")
    );
    let image_name = format!("{}_{}.png", variable.tag(), local.format("%Y%m%d-%H%M%S"));

    tracing::debug!(
        file = final_segment(file_id),
        variable = %variable,
        title = %title,
        image_name = %image_name,
        "Derived scan title"
    );

    Ok(DerivedTitle {
        variable,
        utc,
        local,
        title,
        image_name,
    })
}
