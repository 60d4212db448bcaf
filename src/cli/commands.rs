use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::Converter;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::TreeNodeConvert;
use crate::infrastructure::MemoryDocument;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Convert { file, output }) => {
            _convert(cli.config.as_deref(), file, output.as_deref())
        }
        Some(Commands::Tree { file }) => _tree(cli.config.as_deref(), file),
        Some(Commands::Config { command }) => _config(cli.config.as_deref(), command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage("no command given, see --help".to_string())),
    }
}

fn load_input(file: &Path) -> CliResult<MemoryDocument> {
    if file.is_dir() {
        return Err(CliError::InvalidArgs(format!(
            "expected a file, got directory: {}",
            file.display()
        )));
    }
    Ok(MemoryDocument::load(file)?)
}

#[instrument]
fn _convert(config: Option<&Path>, file: &Path, out: Option<&Path>) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let converter = Converter::from_settings(&settings)?;
    let mut document = load_input(file)?;

    let report = converter.convert(&mut document);
    debug!("report: {:?}", report);

    match out {
        Some(path) => {
            document.save(path)?;
            output::success(&format!(
                "{} paragraphs converted to {}",
                report.paragraphs,
                path.display()
            ));
        }
        None => {
            for paragraph in document.paragraphs() {
                output::info(&output::paragraph(paragraph));
            }
        }
    }

    for failure in &report.failures {
        output::warning(&format!(
            "paragraph {} skipped ({}): {}",
            failure.index + 1,
            failure.message,
            failure.original_text
        ));
    }
    Ok(())
}

#[instrument]
fn _tree(config: Option<&Path>, file: &Path) -> CliResult<()> {
    let settings = Settings::load(config)?;
    let converter = Converter::from_settings(&settings)?;
    let document = load_input(file)?;

    let tree = converter.list_tree(&document)?;
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument]
fn _config(config: Option<&Path>, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(config)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::error("no config directory available on this platform"),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
