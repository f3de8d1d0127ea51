//! Tests for capturing overrides from the process environment.

use figment::Jail;
use twinpack_config::{EnvOverrides, ProjectLoader, Settings};

#[test]
fn captured_values_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("PUBLIC_PATH", "/cdn/");
        jail.set_env("DEV_SERVER_PUBLIC", "https://dev.example.test");
        jail.set_env("DEV_SERVER_PORT", "3000");

        let env = EnvOverrides::capture();
        let settings = Settings::default().with_env(env);
        assert_eq!(settings.public_path(), "/cdn/");
        assert_eq!(settings.dev_server_public(), "https://dev.example.test");
        assert_eq!(settings.dev_server_port(), "3000");
        assert_eq!(settings.dev_server_host(), "localhost");
        Ok(())
    });
}

#[test]
fn port_is_not_validated() {
    Jail::expect_with(|jail| {
        jail.set_env("DEV_SERVER_PORT", "not-a-port");
        let env = EnvOverrides::capture();
        assert_eq!(env.dev_server_port.as_deref(), Some("not-a-port"));
        Ok(())
    });
}

#[test]
fn loader_snapshots_environment_once() {
    Jail::expect_with(|jail| {
        jail.set_env("DEV_SERVER_HOST", "0.0.0.0");
        let project = ProjectLoader::new(jail.directory())
            .load()
            .map_err(|e| e.to_string())?;

        // later changes are not observed by the loaded settings
        jail.set_env("DEV_SERVER_HOST", "example.test");
        assert_eq!(project.settings.dev_server_host(), "0.0.0.0");
        Ok(())
    });
}

#[test]
fn bracketed_ipv6_host_is_kept() {
    Jail::expect_with(|jail| {
        jail.set_env("DEV_SERVER_HOST", "[::1]");
        let env = EnvOverrides::capture();
        assert_eq!(env.dev_server_host.as_deref(), Some("[::1]"));

        let project = ProjectLoader::new(jail.directory())
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(project.settings.dev_server_host(), "[::1]");
        Ok(())
    });
}

#[test]
fn numeric_looking_values_keep_their_spelling() {
    Jail::expect_with(|jail| {
        jail.set_env("DEV_SERVER_PORT", "08080");
        jail.set_env("PUBLIC_PATH", "1.10");
        jail.set_env("DEV_SERVER_HTTPS", "true");

        let settings = Settings::default().with_env(EnvOverrides::capture());
        assert_eq!(settings.dev_server_port(), "08080");
        assert_eq!(settings.public_path(), "1.10");
        assert_eq!(settings.dev_server_https(), "true");
        Ok(())
    });
}
