use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use hrdesk_auth::create_access_token;
use hrdesk_cli::commands::{self, DiffReport};
use hrdesk_config::JwtConfig;

#[derive(Parser)]
#[command(name = "hrdesk-cli")]
#[command(about = "HRDesk CLI - Permission schema and token tools", long_about = None)]
struct Cli {
    /// Permission schema file (builtin schema when omitted)
    #[arg(long, global = true, env = "PERMISSION_SCHEMA_PATH")]
    schema: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List modules in display order with their scope columns
    Modules,
    /// Load and validate a schema file
    ValidateSchema {
        #[arg(short = 'f', long)]
        file: String,
    },
    /// Check whether a token set grants a permission (exit 1 when denied)
    Check {
        #[arg(short = 'm', long)]
        module: String,

        #[arg(short = 'a', long)]
        action: String,

        /// self, team, all or -
        #[arg(short = 's', long, allow_hyphen_values = true)]
        scope: String,

        #[arg(long)]
        super_user: bool,

        /// Permission tokens held
        tokens: Vec<String>,
    },
    /// Compare two comma-separated token sets
    Diff {
        #[arg(long, default_value = "")]
        current: String,

        #[arg(long, default_value = "")]
        baseline: String,
    },
    /// Issue an access token for local testing (uses JWT_SECRET)
    IssueToken {
        #[arg(short = 'u', long)]
        username: String,

        #[arg(short = 'e', long)]
        email: Option<String>,

        #[arg(long)]
        super_user: bool,

        /// Permission tokens to embed
        permissions: Vec<String>,
    },
}

fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Modules => handle_modules(cli.schema.as_deref()),
        Commands::ValidateSchema { file } => handle_validate_schema(&file),
        Commands::Check {
            module,
            action,
            scope,
            super_user,
            tokens,
        } => handle_check(&module, &action, &scope, super_user, &tokens),
        Commands::Diff { current, baseline } => Ok(handle_diff(&current, &baseline)),
        Commands::IssueToken {
            username,
            email,
            super_user,
            permissions,
        } => handle_issue_token(&username, email, super_user, permissions),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::from(2)
        }
    }
}

fn handle_modules(schema: Option<&str>) -> anyhow::Result<ExitCode> {
    let schema = commands::load_schema(schema)?;
    for line in commands::modules(&schema) {
        println!(
            "{:<28} {:<28} {}",
            line.module,
            line.label,
            line.scopes.join(" ")
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_validate_schema(file: &str) -> anyhow::Result<ExitCode> {
    let schema = commands::load_schema(Some(file))?;
    println!(
        "✅ {} is valid ({} modules)",
        file,
        schema.list_modules().len()
    );
    Ok(ExitCode::SUCCESS)
}

fn handle_check(
    module: &str,
    action: &str,
    scope: &str,
    super_user: bool,
    tokens: &[String],
) -> anyhow::Result<ExitCode> {
    if commands::check(module, action, scope, super_user, tokens)? {
        println!("granted");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("denied");
        Ok(ExitCode::FAILURE)
    }
}

fn handle_diff(current: &str, baseline: &str) -> ExitCode {
    let DiffReport {
        has_changes,
        added,
        removed,
    } = commands::diff(&commands::parse_csv(current), &commands::parse_csv(baseline));

    if !has_changes {
        println!("No changes");
        return ExitCode::SUCCESS;
    }
    for token in added {
        println!("+ {token}");
    }
    for token in removed {
        println!("- {token}");
    }
    ExitCode::SUCCESS
}

fn handle_issue_token(
    username: &str,
    email: Option<String>,
    super_user: bool,
    permissions: Vec<String>,
) -> anyhow::Result<ExitCode> {
    let email = email.unwrap_or_else(|| format!("{username}@localhost"));
    let token = create_access_token(
        username,
        &email,
        permissions,
        super_user,
        &JwtConfig::from_env(),
    )
    .map_err(|e| e.error)?;
    println!("{token}");
    Ok(ExitCode::SUCCESS)
}
