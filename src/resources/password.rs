use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Accept a plaintext `password` in place of `password_hash`. The plaintext is
/// hashed (SHA-256, hex) and never stored.
pub(super) fn hash_plaintext_password(payload: &mut Map<String, Value>) {
    let Some(Value::String(plain)) = payload.remove("password") else {
        return;
    };

    let has_hash = matches!(payload.get("password_hash"), Some(Value::String(h)) if !h.is_empty());
    if has_hash || plain.is_empty() {
        return;
    }

    payload.insert("password_hash".to_string(), Value::String(sha256_hex(&plain)));
}

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}
