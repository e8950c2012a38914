use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::assistant::Assistant;
use crate::clipboard::{ClipboardProvider, copy_with_provider, open_clipboard};
use crate::config::{Config, Overrides};
use crate::history::read_history_file;
use crate::models::HistoryEntry;
use crate::server;
use crate::templates::{Bindings, TemplateEngine, TemplateError, field_label};
use crate::tui;
use crate::utils::{display_snippet, format_path_with_tilde, strip_ansi_codes};

/// History entries shown when no count is given
const DEFAULT_HISTORY_COUNT: usize = 5;
/// Preview width for long history responses
const HISTORY_PREVIEW_CHARS: usize = 70;

#[derive(Parser)]
#[command(name = "quickreply")]
#[command(version)]
#[command(about = "Quick responses and message templates for chat support", long_about = None)]
pub struct Cli {
    /// Directory holding the response document and history log
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (the default)
    Menu,
    /// Print a response, copy it and record the use
    Get {
        /// Exact response code
        code: String,
    },
    /// Search responses by code or message text
    Search {
        /// Case-insensitive keyword; empty lists everything
        #[arg(default_value = "")]
        term: String,
    },
    /// Add a new response
    Add {
        code: String,
        message: String,
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Fill a template and copy the result
    Fill {
        template: String,
        /// Placeholder value, repeatable
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// List templates with their placeholders
    Templates,
    /// List categories
    Categories,
    /// Show recently used responses
    History {
        #[arg(short = 'n', long, default_value_t = DEFAULT_HISTORY_COUNT)]
        count: usize,
        /// Show the whole log, oldest first
        #[arg(long)]
        all: bool,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Do not read or write the response document
        #[arg(long)]
        in_memory: bool,
    },
}

impl Cli {
    /// Log filter used when `QUICKREPLY_LOG` is unset
    pub fn default_log_directive(&self) -> &'static str {
        match &self.command {
            None | Some(Commands::Menu) => "error",
            Some(Commands::Serve { .. }) => "info",
            Some(_) => "warn",
        }
    }

    fn overrides(&self) -> Overrides {
        let (host, port) = match &self.command {
            Some(Commands::Serve { host, port, .. }) => (host.clone(), *port),
            _ => (None, None),
        };
        Overrides { data_dir: self.data_dir.clone(), host, port }
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.overrides())?;

    match cli.command {
        None | Some(Commands::Menu) => {
            let assistant = open_assistant(&config)?;
            tui::run_interactive(assistant, open_clipboard())?;
        }
        Some(Commands::Get { code }) => {
            let mut assistant = open_assistant(&config)?;
            show_response(&mut assistant, &code, open_clipboard().as_mut());
        }
        Some(Commands::Search { term }) => {
            let assistant = open_assistant(&config)?;
            show_search(&assistant, &term);
        }
        Some(Commands::Add { code, message, category }) => {
            let mut assistant = open_assistant(&config)?;
            add_response(&mut assistant, &code, &message, &category)?;
        }
        Some(Commands::Fill { template, fields }) => {
            let assistant = open_assistant(&config)?;
            let bindings: Bindings = fields.into_iter().collect();
            fill_template(&assistant, &template, &bindings, open_clipboard().as_mut());
        }
        Some(Commands::Templates) => {
            show_templates(&TemplateEngine::builtin());
        }
        Some(Commands::Categories) => {
            let assistant = open_assistant(&config)?;
            for category in assistant.categories() {
                println!("{}", strip_ansi_codes(&category));
            }
        }
        Some(Commands::History { count, all }) => {
            show_history(&config, count, all)?;
        }
        Some(Commands::Serve { in_memory, .. }) => {
            let assistant = if in_memory {
                info!("Starting with in-memory responses");
                Assistant::in_memory()
            } else {
                Assistant::open_or_degrade(config.data_dir())
            };
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(server::run(&config, assistant))?;
        }
    }

    Ok(())
}

fn open_assistant(config: &Config) -> Result<Assistant> {
    Assistant::open(config.data_dir()).with_context(|| {
        format!("Failed to open data directory {}", format_path_with_tilde(config.data_dir()))
    })
}

/// Report a copy attempt on stderr so stdout carries only the text
fn report_copy(text: &str, clipboard: &mut dyn ClipboardProvider) {
    match copy_with_provider(text, clipboard) {
        Ok(()) => eprintln!("✓ Copiado para a área de transferência"),
        Err(e) => eprintln!("✗ Não foi possível copiar: {}", e),
    }
}

fn show_response(assistant: &mut Assistant, code: &str, clipboard: &mut dyn ClipboardProvider) {
    match assistant.get_response(code) {
        Some(response) => {
            println!("{}", strip_ansi_codes(&response.message));
            report_copy(&response.message, clipboard);
        }
        None => println!("Resposta '{}' não encontrada.", code),
    }
}

fn show_search(assistant: &Assistant, term: &str) {
    let results = assistant.search(term);
    if results.is_empty() {
        println!("Nenhuma resposta encontrada para '{}'.", term);
        return;
    }

    println!("{} resultado(s):", results.len());
    for (code, response) in &results {
        println!();
        println!("[{}] ({})", code, strip_ansi_codes(&response.category));
        println!("  {}", strip_ansi_codes(&response.message));
    }
}

fn add_response(assistant: &mut Assistant, code: &str, message: &str, category: &str) -> Result<()> {
    match assistant.add_response(code, message, category) {
        Ok(added) => {
            println!("Resposta '{}' adicionada na categoria '{}'.", code.trim(), added.category);
            Ok(())
        }
        Err(e) if e.is_validation() => {
            println!("{}", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn fill_template(
    assistant: &Assistant,
    template: &str,
    bindings: &Bindings,
    clipboard: &mut dyn ClipboardProvider,
) {
    match assistant.fill_template(template, bindings) {
        Ok(message) => {
            println!("{}", message);
            report_copy(&message, clipboard);
        }
        Err(e) => {
            println!("{}", e);
            if let TemplateError::MissingFields { fields, .. } = &e {
                for field in fields {
                    println!("  -f {}=...  ({})", field, field_label(field));
                }
            }
        }
    }
}

fn show_templates(engine: &TemplateEngine) {
    for (i, template) in engine.templates().iter().enumerate() {
        println!("{:2}. {:<15} {}", i + 1, template.name(), template.pattern());
        if !template.placeholders().is_empty() {
            println!("    campos: {}", template.placeholders().join(", "));
        }
    }
}

fn show_history(config: &Config, count: usize, all: bool) -> Result<()> {
    let entries = read_history_file(&config.history_path())?;
    if entries.is_empty() {
        println!("Nenhum registro no histórico ainda.");
        return Ok(());
    }

    let shown: Vec<&HistoryEntry> = if all {
        entries.iter().collect()
    } else {
        entries.iter().rev().take(count).collect()
    };

    for (i, entry) in shown.iter().enumerate() {
        println!("{}. {}", i + 1, entry.timestamp);
        println!("   {}", strip_ansi_codes(&entry.context));
        println!("   {}", display_snippet(&entry.response, HISTORY_PREVIEW_CHARS));
    }

    Ok(())
}
