//! Handing tile URLs to a browser

use std::cell::RefCell;
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::rc::Rc;
use std::thread::{self, JoinHandle};

use url::Url;

use crate::catalog::{validate_url, Tile};
use crate::credential::CredentialVerifier;
use crate::error::{LaunchpadError, Result};
use crate::flow::FlowController;
use crate::session::SessionStore;

/// Something that can open a URL
pub trait Navigator {
    fn open(&mut self, url: &Url) -> Result<()>;
}

impl<N: Navigator + ?Sized> Navigator for Box<N> {
    fn open(&mut self, url: &Url) -> Result<()> {
        (**self).open(url)
    }
}

/// Opens URLs with the platform's default handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNavigator;

impl SystemNavigator {
    #[cfg(target_os = "macos")]
    fn command(url: &Url) -> Command {
        let mut command = Command::new("open");
        command.arg(url.as_str());
        command
    }

    #[cfg(windows)]
    fn command(url: &Url) -> Command {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url.as_str()]);
        command
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    fn command(url: &Url) -> Command {
        let mut command = Command::new("xdg-open");
        command.arg(url.as_str());
        command
    }
}

impl Navigator for SystemNavigator {
    fn open(&mut self, url: &Url) -> Result<()> {
        spawn_opener(Self::command(url), url).map(|_| ())
    }
}

/// Start the opener detached from the terminal and reap it on a helper
/// thread so finished openers do not linger as zombies
fn spawn_opener(mut command: Command, url: &Url) -> Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| LaunchpadError::Navigation(format!("Failed to open {}: {}", url, e)))?;

    let target = url.to_string();
    Ok(thread::spawn(move || {
        let status = child.wait();
        match &status {
            Ok(status) if !status.success() => {
                tracing::warn!(url = %target, %status, "URL opener exited with failure")
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(url = %target, "Could not wait for URL opener: {}", e),
        }
        status
    }))
}

/// Navigator that only remembers what it was asked to open
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    opened: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs opened so far, oldest first
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open(&mut self, url: &Url) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

/// Opens tiles, but only while the flow is on the dashboard
pub struct Launcher<N> {
    navigator: N,
}

impl<N: Navigator> Launcher<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    pub fn launch<S, V>(&mut self, flow: &FlowController<S, V>, tile: &Tile) -> Result<()>
    where
        S: SessionStore,
        V: CredentialVerifier,
    {
        if !flow.is_authenticated() {
            return Err(LaunchpadError::NotAuthenticated);
        }

        let url = validate_url(&tile.url)?;
        tracing::info!(tile = %tile.id, "Launching {}", url);
        self.navigator.open(&url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_tiles;
    use crate::credential::PlainVerifier;
    use crate::session::KvSessionStore;
    use crate::store::{keys, KeyValueStore, MemoryStore};

    #[cfg(unix)]
    #[test]
    fn test_opener_is_reaped() {
        let url = Url::parse("https://example.com").unwrap();

        let status = spawn_opener(Command::new("true"), &url)
            .unwrap()
            .join()
            .unwrap()
            .unwrap();
        assert!(status.success());

        let status = spawn_opener(Command::new("false"), &url)
            .unwrap()
            .join()
            .unwrap()
            .unwrap();
        assert!(!status.success());
    }

    #[test]
    fn test_missing_opener_is_a_navigation_error() {
        let url = Url::parse("https://example.com").unwrap();
        let result = spawn_opener(Command::new("launchpad-no-such-opener"), &url);
        assert!(matches!(result, Err(LaunchpadError::Navigation(_))));
    }

    #[test]
    fn test_launch_requires_authentication() {
        let navigator = RecordingNavigator::new();
        let mut launcher = Launcher::new(navigator.clone());
        let flow = FlowController::new(
            KvSessionStore::new(MemoryStore::new()),
            PlainVerifier::default(),
        );

        let tile = &builtin_tiles()[0];
        assert!(matches!(
            launcher.launch(&flow, tile),
            Err(LaunchpadError::NotAuthenticated)
        ));
        assert!(navigator.opened().is_empty());
    }

    #[test]
    fn test_launch_when_active() {
        let mut store = MemoryStore::new();
        store.set(keys::SESSION, "true").unwrap();
        let flow = FlowController::new(KvSessionStore::new(store), PlainVerifier::default());

        let navigator = RecordingNavigator::new();
        let mut launcher = Launcher::new(navigator.clone());
        launcher.launch(&flow, &builtin_tiles()[1]).unwrap();

        assert_eq!(
            navigator.opened(),
            vec!["https://routes-vm-faizzz7348.replit.app/".to_string()]
        );
    }

    #[test]
    fn test_launch_rejects_bad_stored_url() {
        let mut store = MemoryStore::new();
        store.set(keys::SESSION, "true").unwrap();
        let flow = FlowController::new(KvSessionStore::new(store), PlainVerifier::default());

        let mut tile = builtin_tiles()[0].clone();
        tile.url = "file:///etc/passwd".to_string();

        let mut launcher = Launcher::new(RecordingNavigator::new());
        assert!(matches!(
            launcher.launch(&flow, &tile),
            Err(LaunchpadError::InvalidUrl { .. })
        ));
    }
}
