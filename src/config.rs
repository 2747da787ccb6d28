use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "ictus-gateway")]
#[command(about = "Rate-limiting front door for the Ictus Flow backend")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Hosted identity/database service base URL
    #[arg(short, long, default_value = "http://localhost:54321")]
    pub backend_url: String,

    // Service API key forwarded to the backend
    #[arg(long, default_value = "")]
    pub service_key: String,

    // Login attempts allowed per window (checked per email and per IP)
    #[arg(long, default_value_t = 5)]
    pub auth_limit: u32,

    // Login window in seconds
    #[arg(long, default_value_t = 60)]
    pub auth_window: u64,

    // Password reset / magic link emails allowed per window (per email)
    #[arg(long, default_value_t = 3)]
    pub email_limit: u32,

    // Password reset / magic link window in seconds
    #[arg(long, default_value_t = 3600)]
    pub email_window: u64,

    // AI report requests allowed per window (per IP)
    #[arg(long, default_value_t = 10)]
    pub report_limit: u32,

    // AI report window in seconds
    #[arg(long, default_value_t = 60)]
    pub report_window: u64,

    // Interval between sweeps of stale limiter entries, in seconds
    #[arg(long, default_value_t = 300)]
    pub sweep_interval: u64,
}
