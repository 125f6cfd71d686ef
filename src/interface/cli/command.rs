//! CLI 명령 파싱 모듈.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::audit::Platform;

#[derive(Debug, Parser)]
#[command(name = "vidaudit")]
#[command(version)]
#[command(about = "Brand audit for short-form video scripts and links")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Target platform (tiktok, instagram, facebook, youtube, x, linkedin)
    #[arg(long, short, value_parser = parse_platform)]
    platform: Option<Platform>,

    /// Video script, caption or description to audit
    #[arg(long, conflicts_with_all = ["script_file", "url"])]
    script: Option<String>,

    /// Read the script from a file
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    script_file: Option<PathBuf>,

    /// Video URL to audit
    #[arg(long)]
    url: Option<String>,

    /// API key for the completion endpoint (defaults to config / GROQ_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Print the raw audit JSON instead of the dashboard
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and where the API key comes from
    Config,
}

/// 폼 초기값을 덮어쓰는 CLI 옵션.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    pub platform: Option<Platform>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditInput {
    Script(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditOptions {
    pub session: SessionOptions,
    pub input: AuditInput,
    pub json: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    Interactive(SessionOptions),
    InspectConfig,
    Audit(AuditOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        Cli::parse().into_action()
    }

    /// 입력이 없으면 대화형 폼, 있으면 단발 감사로 해석한다.
    pub fn into_action(self) -> Result<CliAction, String> {
        if let Some(Commands::Config) = self.command {
            return Ok(CliAction::InspectConfig);
        }

        let session = SessionOptions {
            platform: self.platform,
            api_key: self.api_key,
        };

        let input = if let Some(script) = self.script {
            AuditInput::Script(script)
        } else if let Some(path) = self.script_file {
            let script = fs::read_to_string(&path)
                .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
            AuditInput::Script(script)
        } else if let Some(url) = self.url {
            AuditInput::Url(url)
        } else {
            return Ok(CliAction::Interactive(session));
        };

        Ok(CliAction::Audit(AuditOptions {
            session,
            input,
            json: self.json,
        }))
    }
}

fn parse_platform(raw: &str) -> Result<Platform, String> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> Result<CliAction, String> {
        Cli::try_parse_from(args)
            .map_err(|err| err.to_string())?
            .into_action()
    }

    #[test]
    fn no_input_starts_interactive_form() {
        assert_eq!(
            action(&["vidaudit", "-p", "ig"]).unwrap(),
            CliAction::Interactive(SessionOptions {
                platform: Some(Platform::Instagram),
                api_key: None,
            })
        );
    }

    #[test]
    fn script_flag_builds_audit() {
        let parsed =
            action(&["vidaudit", "--script", "Hello", "--api-key", "k", "--json"]).unwrap();
        assert_eq!(
            parsed,
            CliAction::Audit(AuditOptions {
                session: SessionOptions {
                    platform: None,
                    api_key: Some("k".to_string()),
                },
                input: AuditInput::Script("Hello".to_string()),
                json: true,
            })
        );
    }

    #[test]
    fn script_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.txt");
        fs::write(&path, "From file").unwrap();

        let parsed = action(&["vidaudit", "--script-file", path.to_str().unwrap()]).unwrap();
        let CliAction::Audit(options) = parsed else {
            panic!("expected audit action");
        };
        assert_eq!(options.input, AuditInput::Script("From file".to_string()));
    }

    #[test]
    fn script_and_url_conflict() {
        assert!(action(&["vidaudit", "--script", "a", "--url", "https://x.com/v"]).is_err());
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = action(&["vidaudit", "--platform", "vine", "--url", "u"]).unwrap_err();
        assert!(err.contains("unknown platform"));
    }

    #[test]
    fn config_subcommand() {
        assert_eq!(action(&["vidaudit", "config"]).unwrap(), CliAction::InspectConfig);
    }
}
