/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "OBJTRACK_CONFIG";

/// Returns the default config file path based on platform conventions.
/// Search order:
/// 1. `OBJTRACK_CONFIG`, when set
/// 2. System-wide config: `%PROGRAMDATA%\objtrack\objtrack.toml` (Windows) or `/etc/objtrack/objtrack.toml` (Linux/macOS)
/// 3. Local fallback: `./objtrack.toml`
pub fn default_config_path() -> String {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return path;
        }
    }
    #[cfg(windows)]
    {
        let programdata = std::env::var("PROGRAMDATA")
            .unwrap_or_else(|_| r"C:\ProgramData".to_string());
        let system_path = format!(r"{}\objtrack\objtrack.toml", programdata);
        if std::path::Path::new(&system_path).exists() {
            return system_path;
        }
    }
    #[cfg(not(windows))]
    {
        let system_path = "/etc/objtrack/objtrack.toml";
        if std::path::Path::new(system_path).exists() {
            return system_path.to_string();
        }
    }
    "objtrack.toml".to_string()
}
