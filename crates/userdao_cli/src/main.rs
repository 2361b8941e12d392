//! CLI smoke entry point.
//!
//! Runs the add/count/list scenario against an in-memory store and prints
//! deterministic lines, to check `userdao_core` wiring.
//!
//! Logs go to `$USERDAO_LOG_DIR` (absolute) or `<tmp>/userdao-logs`.

use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use userdao_core::{
    default_log_level, init_logging, DataSource, Level, SqliteUserDao, User, UserDao,
};

const LOG_DIR_ENV: &str = "USERDAO_LOG_DIR";
const DEFAULT_LOG_SUBDIR: &str = "userdao-logs";

fn main() -> ExitCode {
    let log_dir = resolve_log_dir(std::env::var(LOG_DIR_ENV).ok());
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("userdao_cli warning: logging disabled: {err}");
    }

    match run() {
        Ok(()) => {
            info!("event=cli_run module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("userdao_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Non-blank env override, else the shared temp directory.
fn resolve_log_dir(env_value: Option<String>) -> PathBuf {
    match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value.trim()),
        _ => std::env::temp_dir().join(DEFAULT_LOG_SUBDIR),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("userdao_core version={}", userdao_core::core_version());

    let ds = DataSource::in_memory()?;
    let dao = SqliteUserDao::try_new(&ds)?;
    for user in [
        User::new("gyumee", "박성철", "springno1", "user1@ksug.org", Level::Basic, 1, 0),
        User::new("leegw700", "이길원", "springno2", "user2@ksug.org", Level::Silver, 55, 10),
        User::new("bumjin", "박범진", "springno3", "user3@ksug.org", Level::Gold, 100, 40),
    ] {
        dao.add(&user)?;
    }

    println!("count={}", dao.get_count()?);
    let ids: Vec<String> = dao.get_all()?.into_iter().map(|user| user.id).collect();
    println!("ids={}", ids.join(","));
    Ok(())
}
