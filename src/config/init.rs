use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::companies::DEFAULT_PAGE_SIZE;
use crate::config::{get_config_path, Config};
use crate::thesis::{validate_thesis, FundThesis, FundingStage, ThesisTag};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a comma-separated list of funding stages ("Seed, Series A").
fn parse_stage_list(s: &str) -> Result<Vec<FundingStage>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().map_err(|e| format!("{}", e)))
        .collect()
}

fn join_stages(stages: &[FundingStage]) -> String {
    stages.iter().map(FundingStage::as_str).collect::<Vec<_>>().join(", ")
}

fn join_tags(tags: &[ThesisTag]) -> String {
    tags.iter().map(ThesisTag::as_str).collect::<Vec<_>>().join(",")
}

/// Write `config` as YAML to `path`, creating parent directories.
/// Refuses to replace an existing file unless `force` is set.
pub fn write_config(path: &Path, config: &Config, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite.",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, &yaml)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}

/// Interactively customise the fund thesis, starting from the defaults.
fn prompt_thesis() -> Result<FundThesis> {
    let defaults = FundThesis::default();

    println!();
    println!("The thesis drives scoring: content mentioning a focus tag earns the biggest boost.");
    let name = prompt_with_default("Thesis name", &defaults.name)?;

    println!();
    println!(
        "Focus tags, comma-separated. Available: {}",
        join_tags(&ThesisTag::ALL)
    );
    let focus_tags = loop {
        let input = prompt_with_default("Focus tags", &join_tags(&defaults.focus_tags))?;
        match ThesisTag::parse_list(&input) {
            Ok(tags) if !tags.is_empty() => break tags,
            Ok(_) => println!("  At least one focus tag is required. Try again."),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    println!();
    let preferred_stages = loop {
        let input =
            prompt_with_default("Preferred stages", &join_stages(&defaults.preferred_stages))?;
        match parse_stage_list(&input) {
            Ok(stages) if !stages.is_empty() => break stages,
            Ok(_) => println!("  At least one stage is required. Try again."),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let geography = prompt_with_default(
        "Geography bias (\"none\" to clear)",
        defaults.geography_bias.as_deref().unwrap_or("none"),
    )?;
    let geography_bias = if geography.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(geography)
    };

    let description = prompt_with_default("One-line description", &defaults.description)?;

    let id = name
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    Ok(FundThesis {
        id: if id.is_empty() { defaults.id } else { id },
        name,
        focus_tags,
        description,
        preferred_stages,
        geography_bias,
    })
}

/// Run the init wizard to create a config file.
///
/// With `use_defaults` no questions are asked and the built-in defaults are
/// written to `default_path` (or the standard config path).
pub fn run_init_wizard(default_path: Option<PathBuf>, use_defaults: bool, force: bool) -> Result<()> {
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if use_defaults {
        let config = Config {
            thesis: Some(FundThesis::default()),
            ..Config::default()
        };
        write_config(&default_config_path, &config, force)?;
        println!("Config written to {}", default_config_path.display());
        return Ok(());
    }

    println!();
    println!("Precision Scout Configuration");
    println!("=============================");

    let thesis = if prompt_yes_no("Customise the fund thesis? (n accepts defaults)", false)? {
        prompt_thesis()?
    } else {
        FundThesis::default()
    };
    if let Err(errors) = validate_thesis(&thesis) {
        anyhow::bail!("Invalid thesis: {}", errors.join("; "));
    }

    println!();
    let companies_file = prompt_with_default(
        "Companies JSON file (\"none\" for the built-in sample universe)",
        "none",
    )?;
    let companies_file = if companies_file.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(PathBuf::from(companies_file))
    };

    let page_size = loop {
        let input = prompt_with_default("Companies per page", &DEFAULT_PAGE_SIZE.to_string())?;
        match input.parse::<usize>() {
            Ok(n) if n >= 1 => break n,
            _ => println!("  Invalid: must be a whole number of at least 1. Try again."),
        }
    };

    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    let mut overwrite = force;
    if config_path.exists() && !force {
        overwrite = prompt_yes_no(
            &format!("Config already exists at {}. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        thesis: Some(thesis),
        companies_file,
        page_size,
    };
    write_config(&config_path, &config, overwrite)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `scout companies` to browse, or `scout score payload.json` to score an enrichment.");

    Ok(())
}
