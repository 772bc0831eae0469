//! Command-line configuration for the relay server.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "parley-server", version, about = "Reference relay server for Parley")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,
}
