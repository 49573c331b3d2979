use clap::Parser;

use crate::cluster::Role;
use crate::variant::Variant;

/// Event-loop blocking demo server
#[derive(Debug, Parser)]
#[command(name = "perf-example", version)]
pub struct Cli {
    /// Which server variant to run
    #[arg(long, value_enum, default_value_t = Variant::Basic)]
    pub variant: Variant,

    /// Process role; set by the primary on the replicas it spawns
    #[arg(long, value_enum, default_value_t = Role::Primary, hide = true)]
    pub role: Role,

    /// Print the OpenAPI description of the selected variant and exit
    #[arg(long)]
    pub print_openapi: bool,
}
