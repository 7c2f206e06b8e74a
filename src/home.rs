//! Best-effort lookup of the user's home (or config) directory.

use std::env;

/// Resolve the directory history files are placed under.
///
/// - Windows: `HOMEDRIVE` + `HOMEPATH`, falling back to `USERPROFILE`.
/// - Linux: `XDG_CONFIG_HOME`, falling back to `HOME`.
/// - Elsewhere: `HOME`.
///
/// Returns an empty string when none of these are set.
pub fn user_home_dir() -> String {
    resolve(env::consts::OS, |key| env::var(key).ok())
}

fn resolve(os: &str, var: impl Fn(&str) -> Option<String>) -> String {
    let get = |key: &str| var(key).unwrap_or_default();
    match os {
        "windows" => {
            let home = get("HOMEDRIVE") + &get("HOMEPATH");
            if home.is_empty() {
                get("USERPROFILE")
            } else {
                home
            }
        }
        "linux" => match var("XDG_CONFIG_HOME") {
            Some(dir) if !dir.is_empty() => dir,
            _ => get("HOME"),
        },
        _ => get("HOME"),
    }
}
