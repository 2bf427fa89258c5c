//! Open the gateway in the user's default browser.

use std::process::Command;

/// Platform opener and its arguments for `url`.
pub fn browser_command(url: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "macos") {
        ("open", vec![url.to_string()])
    } else if cfg!(target_os = "windows") {
        ("rundll32", vec!["url.dll,FileProtocolHandler".to_string(), url.to_string()])
    } else {
        ("xdg-open", vec![url.to_string()])
    }
}

/// Fire and forget; failures are only logged.
pub fn launch(url: &str) {
    let (cmd, args) = browser_command(url);
    if let Err(e) = Command::new(cmd).args(&args).spawn() {
        tracing::warn!("Failed to launch browser: {}", e);
    }
}
