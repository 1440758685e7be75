use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Last-resort synonym table: common ways users name OS utilities, mapped
/// to the shell command that starts them. Consulted only after every match
/// strategy, including fuzzy, came up empty.
#[cfg(target_os = "windows")]
static BUILTIN_FALLBACKS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("calculator", "calc.exe"),
        ("calc", "calc.exe"),
        ("notepad", "notepad.exe"),
        ("paint", "mspaint.exe"),
        ("control panel", "control.exe"),
        ("control", "control.exe"),
        ("task manager", "taskmgr.exe"),
        ("file explorer", "explorer.exe"),
        ("explorer", "explorer.exe"),
        ("command prompt", "cmd.exe"),
        ("cmd", "cmd.exe"),
        ("wordpad", "write.exe"),
    ])
});

#[cfg(not(target_os = "windows"))]
static BUILTIN_FALLBACKS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("calculator", "gnome-calculator"),
        ("calc", "gnome-calculator"),
        ("files", "nautilus"),
        ("file manager", "nautilus"),
        ("text editor", "gedit"),
        ("notepad", "gedit"),
        ("terminal", "x-terminal-emulator"),
        ("settings", "gnome-control-center"),
        ("control panel", "gnome-control-center"),
        ("system monitor", "gnome-system-monitor"),
        ("task manager", "gnome-system-monitor"),
    ])
});

/// Looks up a normalized query in the builtin synonym table.
pub fn builtin_command(normalized_query: &str) -> Option<&'static str> {
    BUILTIN_FALLBACKS.get(normalized_query).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonym_resolves_to_command() {
        let command = builtin_command("calculator").expect("builtin");
        assert!(command.contains("calc"));
    }

    #[test]
    fn task_manager_synonym_present_on_all_platforms() {
        assert!(builtin_command("task manager").is_some());
    }

    #[test]
    fn unknown_name_has_no_builtin() {
        assert!(builtin_command("zzqqxx").is_none());
    }
}
