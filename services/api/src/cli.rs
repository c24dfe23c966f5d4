use crate::report::{
    run_attendance_report, run_payroll_report, AttendanceReportArgs, PayrollReportArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hr_dashboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HR Dashboard",
    about = "Serve and report on reconciled attendance and payroll data from the HR backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Daily attendance reports
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommand,
    },
    /// Payroll reports
    Payroll {
        #[command(subcommand)]
        command: PayrollCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AttendanceCommand {
    /// Print the reconciled attendance table and KPI cards, optionally writing a CSV export
    Report(AttendanceReportArgs),
}

#[derive(Subcommand, Debug)]
enum PayrollCommand {
    /// Print the reconciled payroll table, totals and status breakdown
    Report(PayrollReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured HR backend base URL
    #[arg(long)]
    pub(crate) backend_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Attendance {
            command: AttendanceCommand::Report(args),
        } => run_attendance_report(args).await,
        Command::Payroll {
            command: PayrollCommand::Report(args),
        } => run_payroll_report(args).await,
    }
}
