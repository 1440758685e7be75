use appdex_resolver::{LaunchError, Launcher};
use std::io;
use std::process::Command;

/// Launches a resolved target as a detached OS process. Direct spawn first;
/// when the target is not directly executable (shortcuts, documents,
/// desktop entries) it goes through the platform default-open mechanism.
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, target: &str) -> Result<(), LaunchError> {
        spawn(target).map_err(|err| LaunchError(format!("{target}: {err}")))
    }
}

#[cfg(target_os = "windows")]
fn spawn(target: &str) -> io::Result<()> {
    match Command::new(target).spawn() {
        Ok(_) => Ok(()),
        Err(_) => Command::new("cmd")
            .args(["/C", "start", "", target])
            .spawn()
            .map(|_| ()),
    }
}

#[cfg(target_os = "macos")]
fn spawn(target: &str) -> io::Result<()> {
    Command::new("open").arg(target).spawn().map(|_| ())
}

#[cfg(all(unix, not(target_os = "macos")))]
fn spawn(target: &str) -> io::Result<()> {
    if target.ends_with(".desktop") {
        return Command::new("gio").args(["launch", target]).spawn().map(|_| ());
    }
    match Command::new(target).spawn() {
        Ok(_) => Ok(()),
        Err(_) => Command::new("xdg-open").arg(target).spawn().map(|_| ()),
    }
}
