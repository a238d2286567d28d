use crate::{
    cli::args::{ScanArgs, ScanOutput, TemplateStepArgs},
    core::{
        apply_transform, load_document, render_document, ConfigLoader, ConfigValidator,
        DefaultErrorReporter, DocumentFormat, ErrorReporter, RuntimeInputScanner,
        StepTemplateTransform,
    },
    utils::serialization::{FileSerializer, FileUtils, JsonSerializer, Serializer, YamlSerializer},
    Result,
};
use std::io::{self, Write};

/// Handles `pipeline-fixtures scan`.
pub fn scan(args: ScanArgs) -> Result<()> {
    let mut config = ConfigLoader::load(args.config.as_deref())?;
    if let Some(sentinel) = args.sentinel {
        config.scan.sentinel = sentinel;
        ConfigValidator::validate(&config)?;
    }
    let qualified = args.qualified || config.scan.qualified;

    let doc = load_document(&args.file, args.format)?;
    let scanner = RuntimeInputScanner::from_config(&config.scan);
    let fields = scanner.scan(&doc);
    tracing::info!(
        file = %args.file.display(),
        count = fields.len(),
        "runtime inputs collected"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.output {
        ScanOutput::Text => {
            for field in &fields {
                if qualified {
                    writeln!(out, "{}", field.path)?;
                } else {
                    writeln!(out, "{}", field.key)?;
                }
            }
        }
        ScanOutput::Json => {
            let rendered = if qualified {
                JsonSerializer.serialize(&fields)?
            } else {
                let keys: Vec<&str> = fields.iter().map(|field| field.key.as_str()).collect();
                JsonSerializer.serialize(&keys)?
            };
            out.write_all(&rendered)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Handles `pipeline-fixtures template-step`.
pub fn template_step(args: TemplateStepArgs) -> Result<()> {
    // scan.* is unused here, so it is not validated.
    let config = ConfigLoader::resolve(args.config.as_deref())?;
    let doc = load_document(&args.file, args.format)?;
    let rewritten = apply_transform(&doc, &StepTemplateTransform)?;
    if rewritten == doc {
        DefaultErrorReporter.report_info(&format!(
            "{}: step already templated; document unchanged",
            args.file.display()
        ));
    }

    let format = args.emit.unwrap_or(config.output.format);
    match args.output {
        Some(path) => {
            match format {
                DocumentFormat::Yaml => FileUtils.save_to_file(&path, &rewritten, &YamlSerializer)?,
                DocumentFormat::Json => FileUtils.save_to_file(&path, &rewritten, &JsonSerializer)?,
            }
            tracing::info!(output = %path.display(), %format, "wrote templated document");
        }
        None => {
            let rendered = render_document(&rewritten, format)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(rendered.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}
