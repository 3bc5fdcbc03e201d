//! First-time materialization of local config files
//!
//! A local config is copied from the system default only when it does not
//! exist yet. Existing user configuration is never overwritten here.

use std::fs;
use std::path::{Path, PathBuf};

use super::{update_config, ConfigDocument, ConfigError};
use crate::echo::{msg, Echo};

/// Config file the engine reads from inside a workflow-profile directory
pub const PROFILE_CONFIG_FILE: &str = "config.yaml";

/// Path of the config file inside a workflow-profile directory
pub fn workflow_profile_config(workflow_profile: &Path) -> PathBuf {
    workflow_profile.join(PROFILE_CONFIG_FILE)
}

/// Copy `system` to `local` unless `local` already exists.
///
/// With a non-empty `merge`, the system default is read, merged and written
/// to `local`; otherwise the bytes are copied verbatim. Missing parent
/// directories of `local` are created.
pub fn copy_config(
    local: &Path,
    system: &Path,
    merge: Option<&ConfigDocument>,
    echo: &dyn Echo,
) -> Result<(), ConfigError> {
    if local.is_file() {
        msg(
            echo,
            &format!(
                "Config file {} already exists. Using existing config file.",
                local.display()
            ),
        );
        return Ok(());
    }

    if let Some(parent) = local.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }
    msg(
        echo,
        &format!("Copying system default config to {}", local.display()),
    );

    match merge.filter(|m| !m.is_empty()) {
        Some(patch) => update_config(system, patch, Some(local), echo),
        None => {
            tracing::debug!(from = %system.display(), to = %local.display(), "copying config");
            fs::copy(system, local).map_err(|e| ConfigError::io(system, e))?;
            Ok(())
        }
    }
}

/// Materialize the primary config and, optionally, a workflow-profile config.
///
/// The profile config is only initialised when both `workflow_profile` (a
/// directory) and `system_workflow_profile` are given. The two copies do not
/// read each other.
pub fn initialise_config(
    configfile: &Path,
    system_config: &Path,
    merge: Option<&ConfigDocument>,
    workflow_profile: Option<&Path>,
    system_workflow_profile: Option<&Path>,
    echo: &dyn Echo,
) -> Result<(), ConfigError> {
    copy_config(configfile, system_config, merge, echo)?;

    if let (Some(profile_dir), Some(system_profile)) = (workflow_profile, system_workflow_profile) {
        copy_config(
            &workflow_profile_config(profile_dir),
            system_profile,
            None,
            echo,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::echo::CaptureEcho;
    use tempfile::TempDir;

    const LEFT_YAML: &str = "key1: value1\n\
                             key2:\n  nested_key1: nested_value1\n  nested_key2: nested_value2\n\
                             key3:\n- item1\n- item2\n";

    const RIGHT_YAML: &str = "key1: value1\n\
                              key2:\n  nested_key2: new_nested_value2\n  nested_key3: nested_value3\n\
                              key4: value4\n";

    const MERGED_YAML: &str = "key1: new_value1\n\
                               key2:\n  nested_key1: nested_value1\n  nested_key2: new_nested_value2\n  nested_key3: nested_value3\n\
                               key3:\n- item1\n- item2\n\
                               key4: value4\n";

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn right_patch() -> ConfigDocument {
        serde_yaml::from_str(
            "key1: new_value1\n\
             key2:\n  nested_key2: new_nested_value2\n  nested_key3: nested_value3\n\
             key4: value4\n",
        )
        .unwrap()
    }

    #[test]
    fn test_copy_config_byte_identical() {
        let dir = TempDir::new().unwrap();
        // Comments and formatting survive a plain copy
        let system = write(&dir, "system.yaml", "# defaults\nkey:   value\n");
        let local = dir.path().join("nested").join("dirs").join("config.yaml");

        let echo = CaptureEcho::with_timestamp("");
        copy_config(&local, &system, None, &echo).unwrap();

        assert_eq!(fs::read(&local).unwrap(), fs::read(&system).unwrap());
        assert_eq!(
            echo.contents(),
            format!("Copying system default config to {}\n", local.display())
        );
    }

    #[test]
    fn test_copy_config_with_merge() {
        let dir = TempDir::new().unwrap();
        let system = write(&dir, "left_config.yaml", LEFT_YAML);
        let local = dir.path().join("config.yaml");

        copy_config(&local, &system, Some(&right_patch()), &CaptureEcho::new()).unwrap();

        assert_eq!(fs::read_to_string(&local).unwrap(), MERGED_YAML);
        assert_eq!(fs::read_to_string(&system).unwrap(), LEFT_YAML);
    }

    #[test]
    fn test_copy_config_empty_merge_copies_bytes() {
        let dir = TempDir::new().unwrap();
        let system = write(&dir, "system.yaml", "# keep me\nkey: value\n");
        let local = dir.path().join("config.yaml");

        copy_config(&local, &system, Some(&ConfigDocument::new()), &CaptureEcho::new()).unwrap();

        assert_eq!(fs::read_to_string(&local).unwrap(), "# keep me\nkey: value\n");
    }

    #[test]
    fn test_copy_config_existing_untouched() {
        let dir = TempDir::new().unwrap();
        let system = write(&dir, "system.yaml", LEFT_YAML);
        let local = write(&dir, "config.yaml", "user: edited\n");

        let echo = CaptureEcho::with_timestamp("");
        copy_config(&local, &system, Some(&right_patch()), &echo).unwrap();

        assert_eq!(fs::read_to_string(&local).unwrap(), "user: edited\n");
        assert_eq!(
            echo.contents(),
            format!(
                "Config file {} already exists. Using existing config file.\n",
                local.display()
            )
        );
    }

    #[test]
    fn test_copy_config_missing_system() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("config.yaml");

        let err = copy_config(
            &local,
            &dir.path().join("absent.yaml"),
            None,
            &CaptureEcho::new(),
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(!local.exists());
    }

    #[test]
    fn test_initialise_config() {
        let dir = TempDir::new().unwrap();
        let left = write(&dir, "left_config.yaml", LEFT_YAML);
        let right = write(&dir, "right_config.yaml", RIGHT_YAML);
        let config_out = dir.path().join("config.yaml");
        let profile_out = dir.path().join("profile");

        initialise_config(
            &config_out,
            &left,
            None,
            Some(&profile_out),
            Some(&right),
            &CaptureEcho::new(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&config_out).unwrap(), LEFT_YAML);
        assert_eq!(
            fs::read_to_string(profile_out.join("config.yaml")).unwrap(),
            RIGHT_YAML
        );
    }

    #[test]
    fn test_initialise_config_profile_independent() {
        let dir = TempDir::new().unwrap();
        let left = write(&dir, "left_config.yaml", LEFT_YAML);
        let right = write(&dir, "right_config.yaml", RIGHT_YAML);
        let config_out = write(&dir, "config.yaml", "existing: true\n");
        let profile_out = dir.path().join("profile");

        initialise_config(
            &config_out,
            &left,
            None,
            Some(&profile_out),
            Some(&right),
            &CaptureEcho::new(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&config_out).unwrap(), "existing: true\n");
        assert!(workflow_profile_config(&profile_out).is_file());
    }

    #[test]
    fn test_initialise_config_without_system_profile() {
        let dir = TempDir::new().unwrap();
        let left = write(&dir, "left_config.yaml", LEFT_YAML);
        let config_out = dir.path().join("config.yaml");
        let profile_out = dir.path().join("profile");

        initialise_config(
            &config_out,
            &left,
            None,
            Some(&profile_out),
            None,
            &CaptureEcho::new(),
        )
        .unwrap();

        assert!(config_out.is_file());
        assert!(!profile_out.exists());
    }
}
