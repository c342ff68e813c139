use anyhow::Context;
use clap::Parser;
use geo_punch::config::cli::{CliConfig, Command};
use geo_punch::core::geofence::matching_fence;
use geo_punch::core::report::{self, DateRange, LogFilter};
use geo_punch::domain::model::{Point, PunchDecision, Role, Viewer};
use geo_punch::domain::ports::{AttendanceStore, FenceSource};
use geo_punch::utils::error::ErrorSeverity;
use geo_punch::utils::{logger, validation::Validate};
use geo_punch::{PunchDesk, PunchError, PunchForm, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = TomlConfig::from_file(&cli.config)
        .with_context(|| format!("Failed to load config file '{}'", cli.config))?;

    if config.json_logs() {
        logger::init_json_logger(if cli.verbose { "debug" } else { config.log_level() });
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting {}", config.service.name);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(command: Command, config: &TomlConfig) -> Result<(), PunchError> {
    match command {
        Command::Punch(args) => {
            let desk = PunchDesk::new(
                config.fence_source(),
                config.attendance_store(),
                config.photo_store(),
            );

            match desk.submit(PunchForm::from(args)).await? {
                PunchDecision::Accepted(record) => {
                    println!("✅ Punch recorded successfully");
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
                PunchDecision::Rejected(reason) => {
                    println!("❌ {}", reason);
                    std::process::exit(5);
                }
            }
        }
        Command::Check {
            longitude,
            latitude,
        } => {
            let fences = config.fence_source().load_fences().await?;
            match matching_fence(&Point::new(longitude, latitude), &fences) {
                Some(fence) => println!("✅ Inside '{}' ({})", fence.name, fence.id),
                None => println!("❌ Outside all {} configured fences", fences.len()),
            }
        }
        Command::Summary {
            user,
            viewer,
            role,
            from,
            to,
        } => {
            let viewer = caller(viewer, &role)?;
            if !report::can_view_summary(&viewer, &user) {
                return Err(PunchError::ValidationError {
                    message: "Not authorized to view this attendance summary".to_string(),
                });
            }

            let range = parse_range(from.as_deref(), to.as_deref())?;
            let records = config.attendance_store().list().await?;
            let summary = report::summarize(&user, &records, range.as_ref());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Logs {
            viewer,
            role,
            employee,
            from,
            to,
        } => {
            let viewer = caller(viewer, &role)?;
            if !report::can_view_logs(&viewer) {
                return Err(PunchError::ValidationError {
                    message: "Not authorized to view attendance logs".to_string(),
                });
            }

            let filter = LogFilter {
                employee_id: employee,
                range: parse_range(from.as_deref(), to.as_deref())?,
            };
            let records = config.attendance_store().list().await?;
            let logs = report::filter_logs(&records, &filter);
            println!("{}", serde_json::to_string_pretty(&logs)?);
        }
    }

    Ok(())
}

fn caller(user_id: String, role: &str) -> Result<Viewer, PunchError> {
    let role = role
        .parse::<Role>()
        .map_err(|message| PunchError::ValidationError { message })?;
    Ok(Viewer { user_id, role })
}

fn parse_range(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>, PunchError> {
    let start = from.map(report::parse_date_bound).transpose()?;
    let end = to.map(report::parse_date_bound).transpose()?;
    Ok(DateRange::from_bounds(start, end))
}
