use nu_ansi_term::{Color, Style};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tracing_subscriber::fmt::format::FmtSpan;

/// Used when `RUST_LOG` is unset: dashboard events at debug, request spans
/// from `tower_http` at info, everything else at warn.
pub const DEFAULT_DIRECTIVES: &str = "warn,smartbank_analytics=debug,tower_http=info";

pub fn dashboard_filter(env: Option<&str>) -> EnvFilter {
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Request spans are logged when they close
/// so each line carries the request latency.
pub fn init_dashboard_logging() {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(dashboard_filter(env.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_span_events(FmtSpan::CLOSE)
                .compact()
        )
        .init();
}

/// Startup banner printed once the server address is known
pub fn banner(base_url: &str, source: &str) -> String {
    let title = Style::new().bold().fg(Color::Purple);
    let key = Color::Cyan;

    format!(
        "\n{}\n{} {}\n{} {}\n{} {}\n",
        title.paint("🛡️  SmartBank Analytics - Fraud Detection"),
        key.paint("📍 Listening on"),
        base_url,
        key.paint("📊 Dashboard:  "),
        format!("{}/", base_url),
        key.paint("🗂️  Data source:"),
        source,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_enables_dashboard_debug() {
        let filter = dashboard_filter(None);
        assert_eq!(filter.to_string(), EnvFilter::new(DEFAULT_DIRECTIVES).to_string());
        assert!(filter.to_string().contains("smartbank_analytics=debug"));
    }

    #[test]
    fn env_directives_override_default() {
        let filter = dashboard_filter(Some("error"));
        assert!(!filter.to_string().contains("smartbank_analytics"));
    }

    #[test]
    fn banner_mentions_address_and_source() {
        let text = banner("http://localhost:8080", "built-in");
        assert!(text.contains("http://localhost:8080/"));
        assert!(text.contains("built-in"));
        assert!(text.contains("Fraud Detection"));
    }
}
