use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "geo-punch")]
#[command(about = "Geo-fenced attendance punches")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "geo-punch.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Record a check-in or check-out
    Punch(PunchArgs),
    /// Report which fence, if any, contains a point
    Check {
        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,
    },
    /// Attendance summary for one user
    Summary {
        /// User whose punches to summarize
        #[arg(long)]
        user: String,
        /// Identity of the caller
        #[arg(long)]
        viewer: String,
        #[arg(long, default_value = "Employee")]
        role: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Attendance logs for admins, newest first
    Logs {
        /// Identity of the caller
        #[arg(long)]
        viewer: String,
        #[arg(long, default_value = "Employee")]
        role: String,
        #[arg(long)]
        employee: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct PunchArgs {
    #[arg(long)]
    pub user: String,
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<String>,
    /// check-in or check-out
    #[arg(long = "type")]
    pub punch_type: String,
    #[arg(long)]
    pub battery: Option<String>,
    #[arg(long)]
    pub network: Option<String>,
    #[arg(long)]
    pub photo: Option<String>,
}

impl From<PunchArgs> for crate::core::desk::PunchForm {
    fn from(args: PunchArgs) -> Self {
        Self {
            user_id: args.user,
            latitude: args.latitude,
            longitude: args.longitude,
            punch_type: args.punch_type,
            battery_status: args.battery,
            network_status: args.network,
            photo_url: args.photo,
        }
    }
}
