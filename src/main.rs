use clap::Parser;
use pipeline_fixtures::{
    cli::{self, Args},
    core::{AppError, DefaultErrorReporter, ErrorReporter},
    logging::{self, LoggingConfig},
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    let reporter = DefaultErrorReporter::new();

    let _logging = match LoggingConfig::load(args.command.config_path())
        .and_then(|config| logging::init(&config))
    {
        Ok(guard) => Some(guard),
        Err(err) => {
            reporter.report_warning("logging disabled", Some(format!("{:#}", err)));
            None
        }
    };

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<AppError>() {
                Some(app_error) => reporter.report_error(app_error),
                None => eprintln!("[ERROR] {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
