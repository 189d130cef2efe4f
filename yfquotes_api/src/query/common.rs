//! Query-string encoding shared by every request.

use url::form_urlencoded;

/// Encodes `pairs` as `application/x-www-form-urlencoded`, keeping their
/// insertion order. Some endpoints sign or cache on the raw query string, so
/// the same pairs must always encode to the same string.
pub fn encode_params<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}
