//! Mechanism for loading and sharing the selection configuration

use crate::{numeric::Float, Result};

use eyre::{ensure, eyre, Report, WrapErr};
use tracing::info;

use std::{fmt, fs, path::Path, str::FromStr};

/// Cut values of the object selections and of the b-tag veto
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    /// Minimal transverse momentum of the tag muon (GeV)
    pub muon_min_pt: Float,

    /// Maximal |η| of the tag muon
    pub muon_max_abs_eta: Float,

    /// Maximal relative isolation (isolation / pt) of the tag muon
    pub muon_max_iso_ratio: Float,

    /// Minimal transverse momentum of the tau (GeV)
    pub tau_min_pt: Float,

    /// Maximal |η| of the tau
    pub tau_max_abs_eta: Float,

    /// Maximal longitudinal impact parameter of the tau (cm)
    pub tau_max_dz: Float,

    /// Minimal transverse momentum of the jet (GeV)
    pub jet_min_pt: Float,

    /// Minimal jet identification working point
    pub jet_min_id: Float,

    /// Minimal ΔR between objects of different categories
    pub min_separation: Float,

    /// Minimal transverse momentum of b-tagged jets (GeV)
    pub btag_min_pt: Float,

    /// Maximal |η| of b-tagged jets
    pub btag_max_abs_eta: Float,

    /// b-tag discriminant threshold
    pub btag_min_score: Float,
}
//
impl Default for Configuration {
    fn default() -> Self {
        Self {
            muon_min_pt: 24.,
            muon_max_abs_eta: 2.1,
            muon_max_iso_ratio: 0.1,
            tau_min_pt: 18.,
            tau_max_abs_eta: 2.1,
            tau_max_dz: 0.2,
            jet_min_pt: 18.,
            jet_min_id: 2.,
            min_separation: 0.5,
            btag_min_pt: 20.,
            btag_max_abs_eta: 2.4,
            btag_min_score: 0.0494,
        }
    }
}
//
impl Configuration {
    /// Load the configuration from a file, check it, and log it
    pub fn load(file_name: impl AsRef<Path>) -> Result<Self> {
        let file_name = file_name.as_ref();
        let config_str = fs::read_to_string(file_name)
            .wrap_err_with(|| format!("Failed to read {}", file_name.display()))?;
        let config = config_str.parse::<Self>()?;
        info!("Loaded selection configuration from {}", file_name.display());
        info!("\n{config}");
        Ok(config)
    }

    /// Check that the cut values make sense
    fn check(&self) -> Result<()> {
        for (name, value) in [
            ("muon_min_pt", self.muon_min_pt),
            ("muon_max_iso_ratio", self.muon_max_iso_ratio),
            ("tau_min_pt", self.tau_min_pt),
            ("jet_min_pt", self.jet_min_pt),
            ("min_separation", self.min_separation),
            ("btag_min_pt", self.btag_min_pt),
        ] {
            ensure!(value >= 0., "{name} must not be negative, got {value}");
        }
        for (name, value) in [
            ("muon_max_abs_eta", self.muon_max_abs_eta),
            ("tau_max_abs_eta", self.tau_max_abs_eta),
            ("btag_max_abs_eta", self.btag_max_abs_eta),
        ] {
            ensure!(value > 0., "{name} must be positive, got {value}");
        }
        Ok(())
    }
}

impl FromStr for Configuration {
    type Err = Report;

    /// Decode a configuration in the plain text format: the first
    /// non-whitespace chunk of each non-blank line is a value, fields come in
    /// a fixed order, the rest of the line is free-form commentary.
    fn from_str(config_str: &str) -> Result<Self> {
        let mut config_iter = config_str
            .lines()
            .filter_map(|line| line.split_whitespace().next());

        // Fetch the next configuration item, tagged with the name of the
        // field that it is supposed to fill for error reporting purposes
        let mut next_item = |name: &'static str| -> Result<ConfigItem> {
            config_iter
                .next()
                .map(|data| ConfigItem::new(name, data))
                .ok_or_else(|| eyre!("Missing configuration of {}", name))
        };

        let config = Configuration {
            muon_min_pt: next_item("muon_min_pt")?.parse()?,
            muon_max_abs_eta: next_item("muon_max_abs_eta")?.parse()?,
            muon_max_iso_ratio: next_item("muon_max_iso_ratio")?.parse()?,
            tau_min_pt: next_item("tau_min_pt")?.parse()?,
            tau_max_abs_eta: next_item("tau_max_abs_eta")?.parse()?,
            tau_max_dz: next_item("tau_max_dz")?.parse()?,
            jet_min_pt: next_item("jet_min_pt")?.parse()?,
            jet_min_id: next_item("jet_min_id")?.parse()?,
            min_separation: next_item("min_separation")?.parse()?,
            btag_min_pt: next_item("btag_min_pt")?.parse()?,
            btag_max_abs_eta: next_item("btag_max_abs_eta")?.parse()?,
            btag_min_score: next_item("btag_min_score")?.parse()?,
        };

        config.check().wrap_err("Invalid selection configuration")?;
        Ok(config)
    }
}

impl fmt::Display for Configuration {
    /// Display the configuration as aligned NAME : value lines
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MUON_MIN_PT        : {}", self.muon_min_pt)?;
        writeln!(f, "MUON_MAX_ABS_ETA   : {}", self.muon_max_abs_eta)?;
        writeln!(f, "MUON_MAX_ISO_RATIO : {}", self.muon_max_iso_ratio)?;
        writeln!(f, "TAU_MIN_PT         : {}", self.tau_min_pt)?;
        writeln!(f, "TAU_MAX_ABS_ETA    : {}", self.tau_max_abs_eta)?;
        writeln!(f, "TAU_MAX_DZ         : {}", self.tau_max_dz)?;
        writeln!(f, "JET_MIN_PT         : {}", self.jet_min_pt)?;
        writeln!(f, "JET_MIN_ID         : {}", self.jet_min_id)?;
        writeln!(f, "MIN_SEPARATION     : {}", self.min_separation)?;
        writeln!(f, "BTAG_MIN_PT        : {}", self.btag_min_pt)?;
        writeln!(f, "BTAG_MAX_ABS_ETA   : {}", self.btag_max_abs_eta)?;
        write!(f, "BTAG_MIN_SCORE     : {}", self.btag_min_score)
    }
}

/// A value from the configuration file, tagged with the struct field which it
/// is supposed to map for error reporting purposes.
struct ConfigItem<'data> {
    name: &'static str,
    data: &'data str,
}
//
impl<'data> ConfigItem<'data> {
    /// Build a config item from a struct field tag and raw iterator data
    fn new(name: &'static str, data: &'data str) -> Self {
        Self { name, data }
    }

    /// Parse this data using Rust's standard parsing logic
    fn parse<T: FromStr>(self) -> Result<T>
    where
        <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    {
        self.data
            .parse::<T>()
            .map_err(Report::new)
            .wrap_err_with(|| format!("Could not parse configuration of {}", self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_CUTS: &str = "\
24      muon_min_pt
2.1     muon_max_abs_eta
0.1     muon_max_iso_ratio

18      tau_min_pt
2.1     tau_max_abs_eta
0.2     tau_max_dz

18      jet_min_pt
2       jet_min_id
0.5     min_separation

20      btag_min_pt
2.4     btag_max_abs_eta
0.0494  btag_min_score
";

    #[test]
    fn file_format_round_trips_the_defaults() {
        let config = DEFAULT_CUTS.parse::<Configuration>().unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn missing_items_are_reported_by_name() {
        let truncated = DEFAULT_CUTS.lines().take(6).collect::<Vec<_>>().join("\n");
        let err = truncated.parse::<Configuration>().unwrap_err();
        assert!(err.to_string().contains("tau_max_dz"), "{err}");
    }

    #[test]
    fn bad_items_are_reported_by_name() {
        let bad = DEFAULT_CUTS.replacen("0.2 ", "zero ", 1);
        let err = bad.parse::<Configuration>().unwrap_err();
        assert!(err.to_string().contains("tau_max_dz"), "{err}");
    }

    #[test]
    fn nonsensical_cuts_are_rejected() {
        let bad = DEFAULT_CUTS.replacen("0.5 ", "-0.5 ", 1);
        let err = bad.parse::<Configuration>().unwrap_err();
        assert!(format!("{err:?}").contains("min_separation"), "{err:?}");
    }

    #[test]
    fn display_lists_every_cut() {
        let shown = Configuration::default().to_string();
        assert_eq!(shown.lines().count(), 12);
        assert!(shown.contains("BTAG_MIN_SCORE     : 0.0494"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Configuration::load("/nonexistent/selection.cuts").is_err());
    }
}
