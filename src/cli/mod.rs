//! Command-line interface.

pub mod commands;
pub mod context;
pub mod output;
pub mod types;

pub use context::AppContext;
pub use types::{Cli, Commands};

/// A failure the command already printed as its own output.
///
/// The process still exits non-zero, but no error message follows.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AlreadyReported(pub &'static str);

/// Render an error for stderr, or `None` when the command already reported it.
pub fn error_report(err: &anyhow::Error, json_mode: bool) -> Option<String> {
    if err.is::<AlreadyReported>() {
        return None;
    }
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        Some(serde_json::to_string_pretty(&body).unwrap_or_default())
    } else {
        Some(format!("Error: {err:#}"))
    }
}

/// Print an error the way the chosen output mode expects and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if let Some(report) = error_report(&err, json_mode) {
        eprintln!("{report}");
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_report_modes() {
        let err = anyhow::anyhow!("connection refused").context("Failed to list posts");

        let human = error_report(&err, false).unwrap();
        assert_eq!(human, "Error: Failed to list posts: connection refused");

        let json: serde_json::Value =
            serde_json::from_str(&error_report(&err, true).unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to list posts");
        assert_eq!(json["causes"][0], "connection refused");
    }

    #[test]
    fn test_already_reported_prints_nothing() {
        let err = anyhow::Error::new(AlreadyReported("store check failed"));
        assert!(error_report(&err, true).is_none());
        assert!(error_report(&err, false).is_none());
    }
}
