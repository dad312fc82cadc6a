use clap::{Parser, Subcommand};

use screenpop_api::auth::{TokenService, TokenSubject, ROLE_ADMIN, ROLE_QA};
use screenpop_api::config::ScreenPopConfig;

#[derive(Parser)]
#[command(name = "token-cli")]
#[command(about = "Issue test bearer tokens for the Screen Pop API", long_about = None)]
struct Cli {
    /// Signing secret; defaults to SCREENPOP_JWT_SECRET or the dev secret.
    #[arg(short, long)]
    secret: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print ready-to-paste tokens for the fixed test users
    TestTokens,
    /// Issue a token for a custom identity
    Issue {
        #[arg(long)]
        id: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = ROLE_QA)]
        role: String,
        /// Lifetime in hours
        #[arg(long)]
        ttl_hours: Option<i64>,
    },
}

/// Fixed users for development and testing.
fn test_users() -> Vec<(&'static str, TokenSubject)> {
    vec![
        (
            "Admin",
            TokenSubject::new("admin-001", "admin@company.com", ROLE_ADMIN),
        ),
        ("QA", TokenSubject::new("qa-001", "qa@company.com", ROLE_QA)),
        (
            "Tester",
            TokenSubject::new("tester-001", "tester@company.com", ROLE_QA),
        ),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = ScreenPopConfig::from_env();
    if let Some(secret) = cli.secret {
        config.auth.jwt_secret = secret;
    }
    let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);

    match cli.command {
        Commands::TestTokens => {
            println!(
                "TEST TOKENS (expire in {} hours)\n",
                config.auth.token_ttl_hours
            );
            for (label, user) in test_users() {
                let token = tokens.issue(&user)?;
                println!("{label} token ({}, role {}):", user.email, user.role);
                println!("  {token}\n");
            }
        }
        Commands::Issue {
            id,
            email,
            role,
            ttl_hours,
        } => {
            let subject = TokenSubject::new(id, email, role);
            let token = match ttl_hours {
                Some(hours) => tokens.issue_with_ttl(&subject, chrono::Duration::hours(hours))?,
                None => tokens.issue(&subject)?,
            };
            println!("{token}");
        }
    }

    Ok(())
}
