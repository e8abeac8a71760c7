//! Unit tests for admin session configuration.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temporary key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn valid_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn release_vars(key_path: String) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_path),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should have been rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_explicit_settings(valid_key: NamedTempFile) {
    let env = mock_env(release_vars(path_of(&valid_key)));

    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_missing_toggle(valid_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(path_of(&valid_key));
    vars.remove(missing);

    let error = release_error(vars);

    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_rejects_unparseable_cookie_secure(valid_key: NamedTempFile, #[case] value: &str) {
    let mut vars = release_vars(path_of(&valid_key));
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());

    let error = release_error(vars);

    assert!(matches!(
        error,
        SessionConfigError::InvalidEnv { name: COOKIE_SECURE_ENV, .. }
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys(valid_key: NamedTempFile) {
    let mut vars = release_vars(path_of(&valid_key));
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file() {
    let missing = std::env::temp_dir().join("wedding-session-key-does-not-exist");
    let vars = release_vars(missing.to_string_lossy().into_owned());

    assert!(matches!(release_error(vars), SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_rejects_short_key() {
    let short = key_file(32);
    let error = release_error(release_vars(path_of(&short)));

    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length: 32, min_len: SESSION_KEY_MIN_LEN, .. }
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure_cookie(valid_key: NamedTempFile) {
    let mut vars = release_vars(path_of(&valid_key));
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());

    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn debug_defaults_fill_every_gap() {
    let env = mock_env(HashMap::new());

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_short_key_and_bad_same_site() {
    let short = key_file(8);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, path_of(&short)),
        (SAMESITE_ENV, "sideways".to_owned()),
    ]));

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug fallbacks");

    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn key_file_contents_determine_the_key(valid_key: NamedTempFile) {
    let env = mock_env(release_vars(path_of(&valid_key)));

    let first = session_settings_from_env(&env, BuildMode::Release).expect("first read");
    let second = session_settings_from_env(&env, BuildMode::Release).expect("second read");

    assert_eq!(
        fingerprint::key_fingerprint(&first.key),
        fingerprint::key_fingerprint(&second.key)
    );
}
