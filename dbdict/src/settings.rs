//! Settings resolution for a dictionary run.
//!
//! Flags and their primary environment variables arrive through [`Cli`];
//! the legacy `MYSQL_*` variables are consulted here as a second choice.
//! What is still missing afterwards is either an error ([`EnvResolver`]) or
//! a prompt ([`InteractiveResolver`]).
//!
//! # Security
//! - Passwords go straight into [`Credentials`] and are never logged
//! - Connection URLs are only ever logged in redacted form

use crate::cli::Cli;
use dbdict_core::Result;
use dbdict_core::config::{
    ConnectionConfig, DEFAULT_HOST, DEFAULT_OUTPUT_DIR, DEFAULT_PORT, GenerationConfig,
};
use dbdict_core::error::{DbDictError, redact_database_url};
use dbdict_core::security::{Credentials, parse_connection_string};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// Everything a run needs, fixed before the first connection attempt.
#[derive(Debug)]
pub struct ResolvedSettings {
    /// Where to connect
    pub connection: ConnectionConfig,
    /// Login
    pub credentials: Credentials,
    /// Output, masking and sampling settings
    pub generation: GenerationConfig,
}

/// Strategy for filling in settings the command line left open.
pub trait ConfigResolver {
    /// Resolves and validates all settings.
    ///
    /// # Errors
    /// Returns a configuration error when a required value is missing or a
    /// resolved value fails validation
    fn resolve(&mut self, cli: &Cli) -> Result<ResolvedSettings>;
}

/// True for `true`, `1`, `yes` and `on`, case-insensitively.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// True when a Y/n answer turns the feature off. An empty answer keeps it on.
pub fn is_declined(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "n" | "no" | "false" | "0" | "off"
    )
}

/// Parses a port, warning and falling back to 3306 on bad input.
pub fn parse_port(raw: &str) -> u16 {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => port,
        _ => {
            warn!("Invalid port number '{}'. Using default port {}.", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }
    }
}

fn with_fallback(primary: Option<&str>, fallback_var: &str) -> Option<String> {
    primary
        .map(str::to_string)
        .or_else(|| std::env::var(fallback_var).ok())
        .filter(|value| !value.trim().is_empty())
}

fn require_username(user: Option<String>) -> Result<String> {
    user.map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| DbDictError::configuration("Username is required"))
}

/// Host and port, login, and the database named in a connection URL.
type UrlConnection = (ConnectionConfig, Credentials, Option<String>);

/// Values found on the command line or in the environment.
#[derive(Debug, Default)]
struct Sources {
    host: Option<String>,
    port: Option<String>,
    user: Option<String>,
    password: Option<String>,
    database_url: Option<String>,
    output_dir: Option<PathBuf>,
    pii_protection: Option<bool>,
    databases: Vec<String>,
    sample_size: u32,
}

impl Sources {
    fn collect(cli: &Cli) -> Self {
        let sources = Self {
            host: with_fallback(cli.host.as_deref(), "MYSQL_HOST"),
            port: with_fallback(cli.port.as_deref(), "MYSQL_PORT"),
            user: with_fallback(cli.user.as_deref(), "MYSQL_USER"),
            password: cli
                .password
                .clone()
                .or_else(|| std::env::var("MYSQL_PASSWORD").ok()),
            database_url: cli
                .database_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
            output_dir: cli
                .output_dir
                .clone()
                .filter(|dir| !dir.as_os_str().is_empty()),
            pii_protection: cli.pii_protection.as_deref().map(is_truthy),
            databases: cli.databases.clone(),
            sample_size: cli.sample_size,
        };

        let mut found = Vec::new();
        if sources.host.is_some() {
            found.push("host");
        }
        if sources.port.is_some() {
            found.push("port");
        }
        if sources.user.is_some() {
            found.push("user");
        }
        if sources.password.is_some() {
            found.push("password");
        }
        if sources.database_url.is_some() {
            found.push("database_url");
        }
        if sources.output_dir.is_some() {
            found.push("output_dir");
        }
        if found.is_empty() {
            info!("No connection settings found in flags or environment");
        } else {
            info!("Found settings for: {}", found.join(", "));
        }

        sources
    }

    /// Connection settings from the URL, if one was given.
    fn url_connection(&self) -> Result<Option<UrlConnection>> {
        let Some(url) = self.database_url.as_deref() else {
            return Ok(None);
        };

        info!("Using connection string: {}", redact_database_url(url));
        let parsed = parse_connection_string(url)?;
        require_username(Some(parsed.credentials.username().to_string()))?;
        Ok(Some((parsed.config, parsed.credentials, parsed.database)))
    }

    fn finish(
        self,
        connection: ConnectionConfig,
        credentials: Credentials,
        url_database: Option<String>,
        output_dir: PathBuf,
        pii_protection: bool,
    ) -> Result<ResolvedSettings> {
        let databases = if self.databases.is_empty() {
            url_database.into_iter().collect()
        } else {
            self.databases
        };

        let generation = GenerationConfig::new()
            .with_output_dir(output_dir)
            .with_pii_protection(pii_protection)
            .with_databases(databases)
            .with_sample_size(self.sample_size);

        connection.validate()?;
        generation.validate()?;

        info!("Using server: {}", connection);
        Ok(ResolvedSettings {
            connection,
            credentials,
            generation,
        })
    }
}

/// Non-interactive resolution: defaults where they exist, errors otherwise.
///
/// Username and password are both required unless a connection URL
/// supplies them.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvResolver;

impl ConfigResolver for EnvResolver {
    fn resolve(&mut self, cli: &Cli) -> Result<ResolvedSettings> {
        let sources = Sources::collect(cli);

        let (connection, credentials, url_database) = match sources.url_connection()? {
            Some(parsed) => parsed,
            None => {
                let host = sources
                    .host
                    .clone()
                    .unwrap_or_else(|| DEFAULT_HOST.to_string());
                let port = sources.port.as_deref().map_or(DEFAULT_PORT, parse_port);
                let user = require_username(sources.user.clone())?;
                let password = sources.password.clone().ok_or_else(|| {
                    DbDictError::configuration(
                        "Password is required; set DB_PASSWORD or pass --password",
                    )
                })?;
                (
                    ConnectionConfig::new(host).with_port(port),
                    Credentials::new(user, Some(password).filter(|p| !p.is_empty())),
                    None,
                )
            }
        };

        let output_dir = sources
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let pii_protection = sources.pii_protection.unwrap_or(true);

        sources.finish(
            connection,
            credentials,
            url_database,
            output_dir,
            pii_protection,
        )
    }
}

/// Source of answers for [`InteractiveResolver`].
pub trait Prompter {
    /// Shows `prompt` and returns the trimmed answer.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be read
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Like [`Prompter::ask`] but without echoing the answer.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be read
    fn ask_hidden(&mut self, prompt: &str) -> Result<String>;
}

/// Prompts on stdout and reads stdin; passwords go through `rpassword`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        show_prompt(prompt)?;

        let mut line = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| DbDictError::io("Failed to read answer from stdin", e))?;
        Ok(line.trim().to_string())
    }

    fn ask_hidden(&mut self, prompt: &str) -> Result<String> {
        show_prompt(prompt)?;
        rpassword::read_password()
            .map(|answer| answer.trim().to_string())
            .map_err(|e| DbDictError::io("Failed to read password", e))
    }
}

fn show_prompt(prompt: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", prompt)
        .and_then(|()| stdout.flush())
        .map_err(|e| DbDictError::io("Failed to flush stdout before reading input", e))
}

/// Interactive resolution: prompts for host, port, username, password,
/// output directory and the PII toggle when they are not already set.
#[derive(Debug)]
pub struct InteractiveResolver<P = TerminalPrompter> {
    prompter: P,
}

impl InteractiveResolver<TerminalPrompter> {
    /// Creates a resolver that prompts on the terminal.
    pub fn terminal() -> Self {
        Self::new(TerminalPrompter)
    }
}

impl<P: Prompter> InteractiveResolver<P> {
    /// Creates a resolver using `prompter` for missing values.
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }

    /// Returns the prompter, e.g. to inspect which questions were asked.
    pub fn into_prompter(self) -> P {
        self.prompter
    }

    fn ask_or(&mut self, prompt: &str, default: &str) -> Result<String> {
        let answer = self.prompter.ask(prompt)?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }
}

impl<P: Prompter> ConfigResolver for InteractiveResolver<P> {
    fn resolve(&mut self, cli: &Cli) -> Result<ResolvedSettings> {
        let sources = Sources::collect(cli);

        let (connection, credentials, url_database) = match sources.url_connection()? {
            Some(parsed) => parsed,
            None => {
                let host = match sources.host.clone() {
                    Some(host) => host,
                    None => self.ask_or("MySQL Host (default: localhost): ", DEFAULT_HOST)?,
                };
                let port = match sources.port.as_deref() {
                    Some(raw) => parse_port(raw),
                    None => parse_port(&self.ask_or("MySQL Port (default: 3306): ", "3306")?),
                };
                let user = match sources.user.clone() {
                    Some(user) => user,
                    None => self.prompter.ask("MySQL Username: ")?,
                };
                let user = require_username(Some(user))?;
                let password = match sources.password.clone() {
                    Some(password) => password,
                    None => self.prompter.ask_hidden("MySQL Password: ")?,
                };
                (
                    ConnectionConfig::new(host).with_port(port),
                    Credentials::new(user, Some(password).filter(|p| !p.is_empty())),
                    None,
                )
            }
        };

        let output_dir = match sources.output_dir.clone() {
            Some(dir) => dir,
            None => PathBuf::from(
                self.ask_or("Output Directory (default: data_dictionary): ", DEFAULT_OUTPUT_DIR)?,
            ),
        };

        let pii_protection = match sources.pii_protection {
            Some(enabled) => enabled,
            None => !is_declined(&self.prompter.ask("Enable PII Protection? (Y/n): ")?),
        };

        sources.finish(
            connection,
            credentials,
            url_database,
            output_dir,
            pii_protection,
        )
    }
}
