//! Init command implementation

use std::io::Write;
use std::path::PathBuf;

use mdstyle_core::CONFIG_FILES;
use miette::{IntoDiagnostic, Result};
use tracing::info;

const STARTER_CONFIG: &str = r#"{
  // Enable every rule, then adjust individual rules below.
  "default": true,
  "rules": {
    "MD013": { "line_length": 100, "code_blocks": false },
    "MD009": { "br_spaces": 2 },
    "MD012": false
  },
  "exclude": ["**/node_modules/**", "**/target/**"]
}
"#;

pub fn run_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILES[0]);

    loop {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);

        match options.open(&config_path) {
            Ok(mut file) => {
                file.write_all(STARTER_CONFIG.as_bytes()).into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "Config file already exists. Use --force to overwrite."
                    ));
                }

                match std::fs::remove_file(&config_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdstyle_core::{Linter, LinterConfig};

    #[test]
    fn starter_config_is_valid() {
        let config = LinterConfig::from_jsonc(STARTER_CONFIG).unwrap();
        let linter = Linter::new(config).unwrap();
        let effective = linter.effective_config();
        assert!(!effective.is_enabled("MD012"));
        assert_eq!(
            effective.get("MD013").unwrap().params.integer("line_length"),
            Ok(100)
        );
    }
}
