use tokio::sync::mpsc;
use tracing::{info, warn};

/// Presents the provider consent page to whoever operates the service
pub trait ConsentLauncher: Send + Sync {
    fn launch(&self, consent_url: &str);
}

/// Opens the consent page in the operator's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl ConsentLauncher for SystemBrowser {
    fn launch(&self, consent_url: &str) {
        match webbrowser::open(consent_url) {
            Ok(()) => info!("opened consent page in the system browser"),
            Err(e) => warn!(
                error = %e,
                consent_url = %consent_url,
                "could not open a browser; visit the consent URL manually"
            ),
        }
    }
}

/// Headless deployments: the URL only goes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyLauncher;

impl ConsentLauncher for LogOnlyLauncher {
    fn launch(&self, consent_url: &str) {
        info!(consent_url = %consent_url, "visit the consent URL to authorize the import");
    }
}

/// Hands consent URLs to a channel so a harness can play the provider's part
#[derive(Debug, Clone)]
pub struct ChannelLauncher {
    sender: mpsc::UnboundedSender<String>,
}

impl ChannelLauncher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ConsentLauncher for ChannelLauncher {
    fn launch(&self, consent_url: &str) {
        if self.sender.send(consent_url.to_string()).is_err() {
            warn!("consent URL receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_launcher_forwards_urls() {
        let (launcher, mut urls) = ChannelLauncher::new();
        launcher.launch("https://accounts.example/oauth/v2/auth?client_id=x");
        assert_eq!(
            urls.recv().await.as_deref(),
            Some("https://accounts.example/oauth/v2/auth?client_id=x")
        );
    }
}
