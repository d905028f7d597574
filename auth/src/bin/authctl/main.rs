use auth::AuthConfig;
use auth::BearerExtractor;
use auth::PasswordHasher;
use auth::TokenCodec;
use auth::TokenLifetime;
use auth::UserId;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Operator tool for seeding credentials and inspecting access tokens.
#[derive(Parser)]
#[command(name = "authctl")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password for storage
    HashPassword { password: String },

    /// Check a password against a stored hash
    VerifyPassword { password: String, hash: String },

    /// Issue an access token signed with the configured secret
    IssueToken {
        user_id: UserId,

        /// Requested lifetime; 0 or anything above the configured maximum uses the maximum
        #[arg(long)]
        expires_in_seconds: Option<u64>,
    },

    /// Validate an access token and print its subject
    ValidateToken {
        token: String,

        /// Treat the input as a full `Authorization` header value
        #[arg(long)]
        header: bool,
    },
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth=info,authctl=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let hasher = PasswordHasher::new();

    match cli.command {
        Commands::HashPassword { password } => {
            println!("{}", hasher.hash(&password)?);
        }
        Commands::VerifyPassword { password, hash } => {
            hasher.verify(&password, &hash)?;
            println!("ok");
        }
        Commands::IssueToken {
            user_id,
            expires_in_seconds,
        } => {
            let config = AuthConfig::load()?;
            let lifetime = TokenLifetime::from_requested_seconds(
                expires_in_seconds,
                config.jwt.default_lifetime(),
            );
            let token = TokenCodec::new().issue(
                &user_id,
                config.jwt.secret_bytes(),
                lifetime.as_duration(),
            )?;

            tracing::info!(user_id = %user_id, expires_in = lifetime.as_secs(), "Token issued");
            println!(
                "{}",
                serde_json::json!({
                    "token": token,
                    "expires_in": lifetime.as_secs(),
                })
            );
        }
        Commands::ValidateToken { token: raw, header } => {
            let config = AuthConfig::load()?;
            let token = if header {
                BearerExtractor::extract(Some(raw.as_str()))?
            } else {
                raw.as_str()
            };

            let user_id = TokenCodec::new().validate(token, config.jwt.secret_bytes())?;
            println!("{}", serde_json::json!({ "user_id": user_id }));
        }
    }

    Ok(())
}
