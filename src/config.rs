use clap::Parser;

use crate::error::Result;
use crate::params::ParameterInputs;
use crate::remote::PatternEndpoint;

#[derive(Parser, Debug)]
#[command(author, version, about = "Live 3D preview of a tube bent around a fold", long_about = None)]
pub struct Config {
    /// Base URL of the pattern server
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub server: String,

    /// Initial bend radius (R)
    #[arg(long, default_value = "4")]
    pub major_radius: String,

    /// Initial tube radius (r)
    #[arg(long, default_value = "2")]
    pub minor_radius: String,

    /// Initial fold angle in degrees
    #[arg(long, default_value = "90")]
    pub phi: String,

    /// Initial wall thickness (t)
    #[arg(long, default_value = "0.25")]
    pub thickness: String,

    #[arg(long, default_value_t = 1600)]
    pub width: u32,

    #[arg(long, default_value_t = 900)]
    pub height: u32,

    /// Present frames without waiting for vertical sync
    #[arg(long)]
    pub no_vsync: bool,
}

impl Config {
    /// Field text the panel starts with. Kept as typed, like anything entered later.
    pub fn initial_inputs(&self) -> ParameterInputs {
        ParameterInputs::new(
            &self.major_radius,
            &self.minor_radius,
            &self.phi,
            &self.thickness,
        )
    }

    pub fn pattern_endpoint(&self) -> Result<PatternEndpoint> {
        PatternEndpoint::parse(&self.server)
    }

    pub fn vsync(&self) -> bool {
        !self.no_vsync
    }
}
