//! Common test fixtures for climdata tests.
//!
//! Job configurations and `levelout` values covering the shapes found in
//! real retrieval jobs.

/// Sample `levelout` values, grouped by how they should classify.
pub mod levels {
    /// Symbolic level sets. Accepted on their own, rendered without a unit.
    pub const KEYWORDS: [&str; 4] = ["sfc", "plev37", "plev19", "plev8"];

    /// Single numeric levels
    pub const NUMERIC: [&str; 6] = ["0", "1", "500", "850hPa", "1000hPa", "000123"];

    /// Strings that are neither a keyword nor a numeric level
    pub const INVALID: [&str; 10] = [
        "",
        "abc",
        "hPa500",
        "hPa",
        "500hpa",
        "500 hPa",
        " 500",
        "SFC",
        "plev",
        "500.0",
    ];
}

/// A complete ERA5 pressure-level job with every field set.
pub const FULL_CONFIG: &str = r#"
tmpdir: /scratch/climdata/tmp
storedir: /work/climdata/era5
dataset: reanalysis-era5-pressure-levels
varlist: [temperature, geopotential]
year:
  begin: 1979
  end: 1981
  update: false
levelout: ['500', '750hPa', '1000']
freq: mon
grid: "0.25x0.25"
area: [90, -180, -90, 180]
nprocs: 4
download_request: yearly
do_retrieve: true
do_postproc: true
do_align: false
"#;

/// Only the required fields, surface data.
pub const MINIMAL_CONFIG: &str = r#"
tmpdir: /tmp/climdata
storedir: /data/climdata
dataset: reanalysis-era5-single-levels
varlist: 2m_temperature
year:
  begin: 2010
  end: 2010
levelout: sfc
freq: 1h
grid: "0.5x0.5"
area: global
download_request: monthly
"#;

/// A job configuration with `levelout` replaced by the given YAML fragment.
///
/// ```ignore
/// let yaml = config_with_levelout("[500, 'abc']");
/// ```
pub fn config_with_levelout(levelout: &str) -> String {
    MINIMAL_CONFIG.replace("levelout: sfc", &format!("levelout: {}", levelout))
}
