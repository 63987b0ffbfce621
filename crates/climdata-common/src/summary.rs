//! Human-readable summary of a job configuration.

use std::fmt;

use crate::config::JobConfig;

/// Displays the options of a job before it runs.
pub struct Summary<'a>(pub &'a JobConfig);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;

        writeln!(f)?;
        writeln!(f, "Downloading files in {}", config.tmpdir.display())?;
        writeln!(f, "Storing final files in {}", config.storedir.display())?;
        writeln!(f, "Downloading {} from {}", config.varlist, config.dataset)?;
        writeln!(f, "Data range: {}-{}", config.year.begin, config.year.end)?;
        if config.year.update {
            writeln!(f, "Updating existing datasets...")?;
        }
        writeln!(f, "Vertical levels: {}", config.levelout)?;
        writeln!(f, "Data frequency: {}", config.freq)?;
        writeln!(f, "Grid selection: {}", config.grid)?;
        writeln!(f, "Area: {}", config.area)?;
        writeln!(f, "Number of parallel processes: {}", config.nprocs)?;
        writeln!(f, "Download {} chunks", config.download_request)?;
        writeln!(f, "Actions:")?;
        for stage in config.actions() {
            writeln!(f, "\t - {}", stage.description())?;
        }
        writeln!(f)
    }
}
