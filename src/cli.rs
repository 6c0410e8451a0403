// src/cli.rs
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::config::SiteConfig;
use crate::core::config_manager::ConfigManager;
use crate::core::extraction::{build_gateway, Provider, SourceDocument};
use crate::core::fs_ops::FsOps;
use crate::core::theme_engine::render_batch;
use crate::core::theme_registry::{get_renderer, list_themes, theme_ids};
use crate::error::{PipelineError, SchemaError};
use crate::generator::{extract_record, load_record, SiteGenerator};
use crate::types::ResumeRecord;
use crate::utils::has_extension;

#[derive(Parser)]
#[command(name = "homepage-forge")]
#[command(about = "Turn a résumé into a themed static homepage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Also write JSON logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List available themes
    Themes {
        #[arg(long)]
        json: bool,
    },
    /// Validate a résumé JSON file and print the normalized record
    Validate { input: PathBuf },
    /// Render one theme to a file or stdout
    Render {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render every theme (or a selection) as homepage_<id>.html
    RenderAll {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long, value_delimiter = ',')]
        themes: Vec<String>,
    },
    /// Extract résumé JSON from a PDF or page images
    Extract {
        #[arg(long)]
        source: PathBuf,
        #[arg(long, value_enum, default_value_t = Provider::Gemini)]
        provider: Provider,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Full pipeline: extract (unless the source is JSON), render, package
    Build {
        #[arg(long)]
        source: PathBuf,
        #[arg(long, value_enum, default_value_t = Provider::Gemini)]
        provider: Provider,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        theme: Option<String>,
        #[arg(long)]
        dest: Option<PathBuf>,
        /// Delete an existing destination directory first
        #[arg(long)]
        replace: bool,
    },
}

pub async fn run(cli: Cli, config: &ConfigManager) -> Result<(), PipelineError> {
    match cli.command {
        Command::Themes { json } => {
            let themes = list_themes();
            if json {
                let text = serde_json::to_string_pretty(&themes).map_err(SchemaError::from)?;
                println!("{}", text);
            } else {
                for theme in themes {
                    println!("{:<18} {:<18} {}", theme.id, theme.display_name, theme.description);
                }
            }
            Ok(())
        }

        Command::Validate { input } => {
            let record = load_record(&input)?;
            app_log!(
                info,
                "✅ {} is valid: {} section(s)",
                input.display(),
                record.sections.len()
            );
            println!("{}", to_pretty_json(&record)?);
            Ok(())
        }

        Command::Render {
            input,
            theme,
            output,
        } => {
            let record = load_record(&input)?;
            let theme = theme.unwrap_or_else(|| config.environment.default_theme.clone());
            let html = get_renderer(&theme)?.render(&record);

            match output {
                Some(path) => {
                    FsOps::write_file_safe(&path, html.as_bytes())?;
                    app_log!(info, "✅ Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
            Ok(())
        }

        Command::RenderAll {
            input,
            out_dir,
            themes,
        } => {
            let record = load_record(&input)?;
            let ids: Vec<String> = if themes.is_empty() {
                theme_ids().into_iter().map(str::to_string).collect()
            } else {
                themes
            };
            render_all(&record, &ids, &out_dir)
        }

        Command::Extract {
            source,
            provider,
            api_key,
            output,
        } => {
            let document = SourceDocument::load(&source)?;
            let gateway = build_gateway(provider, api_key, &config.extraction)?;
            let record = extract_record(gateway.as_ref(), &document).await?;
            let text = to_pretty_json(&record)?;

            match output {
                Some(path) => {
                    FsOps::write_file_safe(&path, text.as_bytes())?;
                    app_log!(info, "✅ Extracted résumé saved to {}", path.display());
                }
                None => println!("{}", text),
            }
            Ok(())
        }

        Command::Build {
            source,
            provider,
            api_key,
            theme,
            dest,
            replace,
        } => {
            let mut site =
                SiteConfig::from_environment(&config.environment).with_replace_existing(replace);
            if let Some(theme) = theme {
                site = site.with_theme(&theme);
            }
            if let Some(dest) = dest {
                site = site.with_output_dir(dest);
            }
            let generator = SiteGenerator::new(site)?;

            let result = if has_extension(&source, &["json"]) {
                generator.build_from_record(&load_record(&source)?)?
            } else {
                let document = SourceDocument::load(&source)?;
                let gateway = build_gateway(provider, api_key, &config.extraction)?;
                generator
                    .build_from_source(gateway.as_ref(), &document)
                    .await?
            };

            println!("{}", result.index_path.display());
            println!("{}", result.readme_path.display());
            println!("{}", result.archive_path.display());
            Ok(())
        }
    }
}

/// Write `homepage_<id>.html` for every known id. Unknown ids are reported and
/// skipped; the first of them is returned once the rest are written.
fn render_all(record: &ResumeRecord, ids: &[String], out_dir: &Path) -> Result<(), PipelineError> {
    let mut first_failure = None;

    for outcome in render_batch(record, ids) {
        match outcome.result {
            Ok(html) => {
                let id = get_renderer(&outcome.theme_id)?.id();
                let path = out_dir.join(format!("homepage_{}.html", id));
                FsOps::write_file_safe(&path, html.as_bytes())?;
                app_log!(info, "✅ {} → {}", id, path.display());
            }
            Err(err) => {
                app_log!(error, "❌ {}", err);
                if first_failure.is_none() {
                    first_failure = Some(err);
                }
            }
        }
    }

    match first_failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn to_pretty_json(record: &ResumeRecord) -> Result<String, PipelineError> {
    Ok(serde_json::to_string_pretty(record).map_err(SchemaError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record() -> ResumeRecord {
        ResumeRecord::from_json_str(r#"{"name": "Ada Lovelace", "sections": []}"#).unwrap()
    }

    #[test]
    fn test_render_all_writes_known_themes() {
        let tmp = TempDir::new().unwrap();
        let ids = vec!["academic_light".to_string(), "retro".to_string(), "aurora".to_string()];

        let err = render_all(&record(), &ids, tmp.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Theme(_)));
        assert!(tmp.path().join("homepage_academic-light.html").exists());
        assert!(tmp.path().join("homepage_aurora.html").exists());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "homepage-forge",
            "build",
            "--source",
            "cv.pdf",
            "--provider",
            "openai",
            "--replace",
        ])
        .unwrap();

        match cli.command {
            Command::Build {
                provider, replace, ..
            } => {
                assert_eq!(provider, Provider::OpenAi);
                assert!(replace);
            }
            _ => panic!("expected build"),
        }

        let cli = Cli::try_parse_from([
            "homepage-forge",
            "render-all",
            "--input",
            "cv.json",
            "--out-dir",
            "out",
            "--themes",
            "aurora,neon-cyber",
        ])
        .unwrap();
        match cli.command {
            Command::RenderAll { themes, .. } => assert_eq!(themes, vec!["aurora", "neon-cyber"]),
            _ => panic!("expected render-all"),
        }
    }
}
