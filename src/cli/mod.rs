pub mod args;
pub mod commands;

pub use args::{ScanArgs, ScanOutput, TemplateStepArgs};
use crate::core::ConfigLoader;
use clap::{Parser, Subcommand};
use std::path::Path;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
FIXTURE COMMANDS:\n{subcommands}\n\
{after-help}\n";

#[derive(Parser, Debug)]
#[command(name = "pipeline-fixtures")]
#[command(version = crate::VERSION)]
#[command(about = "Runtime-input scanning and step-template rewriting for pipeline YAML")]
#[command(help_template = HELP_TEMPLATE)]
#[command(after_long_help = long_help_footer())]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "List fields whose value is <+input>",
        long_about = "Scan walks the document depth-first and prints every mapping key whose value is the runtime-input sentinel, in document order.",
        after_help = "Example:\n    pipeline-fixtures scan pipeline.yaml --qualified"
    )]
    Scan(ScanArgs),
    #[command(
        about = "Wrap the first step in template inputs",
        long_about = "TemplateStep moves every field of pipeline.stages[0].stage.spec.execution.steps[0].step except identifier under template.templateInputs. Steps that already have a template are left unchanged.",
        after_help = "Example:\n    pipeline-fixtures template-step pipeline.yaml --output templated.yaml"
    )]
    TemplateStep(TemplateStepArgs),
}

impl Command {
    /// Config file named on the command line, if any.
    pub fn config_path(&self) -> Option<&Path> {
        match self {
            Command::Scan(args) => args.config.as_deref(),
            Command::TemplateStep(args) => args.config.as_deref(),
        }
    }
}

fn long_help_footer() -> String {
    let mut footer = String::from(
        "Typical flow: scan a pipeline for <+input> fields, then derive a template-wrapped fixture with template-step.\n\nENVIRONMENT:\n",
    );
    for line in ConfigLoader::env_var_documentation() {
        footer.push_str("    ");
        footer.push_str(line);
        footer.push('\n');
    }
    footer
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Scan(scan_args) => commands::scan(scan_args),
        Command::TemplateStep(template_args) => commands::template_step(template_args),
    }
}
