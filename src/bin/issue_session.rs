use clap::Parser;
use consult_site::utils::validation::{validate_email, validate_resolved};
use consult_site::{SessionSigner, SiteConfig};

#[derive(Parser)]
#[command(name = "issue-session")]
#[command(about = "Mint a signed session token for the checkout endpoint")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "site-config.toml")]
    config: String,

    /// Email address the session belongs to
    #[arg(short, long)]
    email: String,

    /// Lifetime in hours; defaults to auth.session_ttl_hours
    #[arg(long)]
    ttl_hours: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = SiteConfig::from_file(&args.config)?;
    validate_resolved("auth.session_secret", &config.auth.session_secret)?;
    validate_email("email", &args.email)?;

    let ttl = args.ttl_hours.unwrap_or(config.auth.session_ttl_hours);
    if ttl <= 0 {
        anyhow::bail!("ttl must be positive, got {}", ttl);
    }

    let signer = SessionSigner::new(&config.auth.session_secret);
    println!("{}", signer.issue(&args.email, chrono::Duration::hours(ttl))?);
    Ok(())
}
