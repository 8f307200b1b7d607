//! Unit tests for session configuration.

use super::*;
use rstest::{fixture, rstest};
use std::io::Write;
use tempfile::NamedTempFile;

#[fixture]
fn settings() -> GuideSettings {
    GuideSettings {
        bind_addr: None,
        storage_dir: None,
        form_id: None,
        form_endpoint: None,
        session_key_file: None,
        allow_ephemeral_session_key: false,
        cookie_secure: true,
    }
}

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'a'; len]).expect("write key material");
    file
}

fn missing_key_path() -> PathBuf {
    std::env::temp_dir().join(format!("cafe-guide-missing-key-{}", uuid::Uuid::new_v4()))
}

#[rstest]
fn release_reads_key_from_file(mut settings: GuideSettings) {
    let file = key_file(SESSION_KEY_MIN_LEN);
    settings.session_key_file = Some(file.path().to_path_buf());

    let session = session_settings(&settings, BuildMode::Release).expect("valid key");
    assert!(session.cookie_secure);
    assert_eq!(session.same_site, SameSite::Lax);
}

#[rstest]
fn identical_key_material_derives_identical_keys(mut settings: GuideSettings) {
    let file = key_file(SESSION_KEY_MIN_LEN);
    settings.session_key_file = Some(file.path().to_path_buf());

    let first = session_settings(&settings, BuildMode::Release).expect("valid key");
    let second = session_settings(&settings, BuildMode::Release).expect("valid key");
    assert_eq!(first.key.master(), second.key.master());
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn short_keys_are_rejected(mut settings: GuideSettings, #[case] mode: BuildMode) {
    let file = key_file(16);
    settings.session_key_file = Some(file.path().to_path_buf());

    let Err(err) = session_settings(&settings, mode) else {
        panic!("short key should be rejected");
    };
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort {
            length: 16,
            min_len: SESSION_KEY_MIN_LEN,
            ..
        }
    ));
}

#[rstest]
fn release_requires_a_readable_key(mut settings: GuideSettings) {
    settings.session_key_file = Some(missing_key_path());

    let Err(err) = session_settings(&settings, BuildMode::Release) else {
        panic!("missing key should be rejected");
    };
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
#[case(BuildMode::Debug, false)]
#[case(BuildMode::Release, true)]
fn missing_key_falls_back_when_permitted(
    mut settings: GuideSettings,
    #[case] mode: BuildMode,
    #[case] allow_ephemeral: bool,
) {
    settings.session_key_file = Some(missing_key_path());
    settings.allow_ephemeral_session_key = allow_ephemeral;

    assert!(session_settings(&settings, mode).is_ok());
}
