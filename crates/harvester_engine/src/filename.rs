use harvester_core::ArtifactKind;
use rand::distributions::Alphanumeric;
use rand::Rng;

pub const TOKEN_LEN: usize = 16;

const LOWERCASE_ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Character set the random filename token is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAlphabet {
    /// `[A-Za-z0-9]`
    Alphanumeric,
    /// `[a-z0-9]`, safe on case-insensitive filesystems.
    LowercaseAlphanumeric,
}

pub fn random_token(alphabet: TokenAlphabet) -> String {
    let mut rng = rand::thread_rng();
    match alphabet {
        TokenAlphabet::Alphanumeric => (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect(),
        TokenAlphabet::LowercaseAlphanumeric => (0..TOKEN_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..LOWERCASE_ALPHANUMERIC.len());
                char::from(LOWERCASE_ALPHANUMERIC[idx])
            })
            .collect(),
    }
}

/// `{token}.{js|html}`
pub fn artifact_filename(token: &str, kind: ArtifactKind) -> String {
    format!("{token}.{}", kind.extension())
}
