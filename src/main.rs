use std::{
    io::{self, Write},
    process,
};

use nbfolio::{
    application::{error::AppError, export, intake, preview::CellPresenter, scaffold},
    config::{self, PreviewFormat},
    infra::{error::InfraError, telemetry},
    presentation::listing,
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::from(InfraError::configuration(err.to_string())))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        config::Command::Preview(args) => run_preview(&settings, &args),
        config::Command::Export(args) => run_export(&settings, &args),
    }
}

fn run_preview(settings: &config::Settings, args: &config::PreviewArgs) -> Result<(), AppError> {
    let notebook = intake::load_notebook(&args.file)?;
    let cells = CellPresenter::new().present_notebook(&notebook);

    let rendered = match settings.preview.format {
        PreviewFormat::Json => listing::render_json_listing(&cells)
            .map_err(|err| AppError::unexpected(format!("failed to encode preview: {err}")))?,
        PreviewFormat::Text => listing::render_text_listing(&cells),
    };

    write_stdout(&rendered)?;
    info!(
        target = "nbfolio::preview",
        cells = cells.len(),
        "Preview completed"
    );
    Ok(())
}

fn run_export(settings: &config::Settings, args: &config::ExportArgs) -> Result<(), AppError> {
    let notebook = intake::load_notebook(&args.file)?;
    let export_settings = &settings.export;

    info!(
        target = "nbfolio::export",
        path = %args.file.display(),
        output_dir = %export_settings.output_dir.display(),
        "Starting export"
    );

    let written = scaffold::write_project(
        &notebook,
        &export_settings.output_dir,
        export_settings.write_cells,
    )?;

    let excerpt_chars = export_settings.excerpt_chars.get();
    let summaries: Vec<(String, String)> = written
        .iter()
        .map(|file| {
            (
                file.path.display().to_string(),
                export::excerpt(&file.content, excerpt_chars),
            )
        })
        .collect();
    let summary = listing::render_export_summary(
        summaries
            .iter()
            .map(|(path, excerpt)| (path.as_str(), excerpt.as_str())),
    );

    write_stdout(&summary)?;
    info!(
        target = "nbfolio::export",
        files = written.len(),
        "Export completed"
    );
    Ok(())
}

fn write_stdout(text: &str) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    let mut emit = || -> io::Result<()> {
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()
    };
    emit().map_err(|err| AppError::from(InfraError::io("<stdout>", err)))
}
