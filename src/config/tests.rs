// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.

use tempfile::TempDir;

use super::*;
use crate::data::basics::TokenAmount;

const TESTDIR: &'static str = "testdir_iKywQ1m8eeAVRwURWaR0zQMLIdXSoqfpZlo8Wsuz";

#[test]
fn load_missing() {
    let res = Local::load_from_disk(&TESTDIR);
    assert!(res.is_err());
}

#[test]
fn missing_falls_back_to_defaults() {
    let c = Local::load_or_default(&TESTDIR).unwrap();
    assert_eq!(c, Local::default());
}

#[test]
fn defaults() {
    let c = Local::default();
    assert_eq!(c.params.max_participants, 50);
    assert_eq!(c.params.fee_bps, 500);
    assert_eq!(c.params.faucet_amount, TokenAmount::tokens(10_000));
    assert_eq!(c.log_level().unwrap(), tracing::Level::INFO);
    assert_eq!(c.log_dir().unwrap(), None);
}

#[test]
fn save_then_load() {
    let dir = TempDir::new().unwrap();
    let mut c1 = Local::default();
    c1.params.fee_bps = 250;
    c1.log_level = "debug".to_owned();
    c1.save_to_disk(&dir.path()).unwrap();

    let c2 = Local::load_from_disk(&dir.path()).unwrap();
    assert_eq!(c1, c2);
}

#[test]
fn merge_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILENAME),
        r#"{ "params": { "max_participants": 12 }, "should_not_exist": 3 }"#,
    )
    .unwrap();

    // Everything not in the file comes from the defaults.
    let c = Local::load_from_disk(&dir.path()).unwrap();
    assert_eq!(c.params.max_participants, 12);
    assert_eq!(c.params.fee_bps, DEFAULT_PARAMS.fee_bps);
    assert_eq!(c.log_level, "info");
}

#[test]
fn invalid_params() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILENAME),
        r#"{ "params": { "fee_bps": 10001 } }"#,
    )
    .unwrap();
    assert!(matches!(
        Local::load_from_disk(&dir.path()),
        Err(ConfigError::FeeTooHigh(10001))
    ));

    let params = Params {
        max_participants: 1,
        ..Params::default()
    };
    assert!(matches!(
        params.validate(),
        Err(ConfigError::MaxParticipantsTooLow(1, 2))
    ));
}

#[test]
fn invalid_log_level() {
    let c = Local {
        log_level: "loud".to_owned(),
        ..Local::default()
    };
    assert!(matches!(c.log_level(), Err(ConfigError::InvalidLogLevel(_))));
}
