use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use log::error;
use serde_json::Value;

/// Decode the payload segment of a JWT without verifying the signature.
///
/// The token is only used to derive the user id the server embedded in it;
/// verification is the server's job.
fn decode_payload(token: &str) -> Option<Value> {
    // JWT format: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = parts[1].trim_end_matches('=');
    let decoded = match URL_SAFE_NO_PAD.decode(payload) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Error decoding JWT payload: {}", e);
            return None;
        }
    };

    match serde_json::from_slice::<Value>(&decoded) {
        Ok(json) => Some(json),
        Err(e) => {
            error!("Error parsing JWT payload: {}", e);
            None
        }
    }
}

fn claim(json: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| json.get(k).and_then(Value::as_str))
        .map(str::to_string)
}

/// Extract the user id claim from a bearer token.
pub fn user_id_from_token(token: &str) -> Option<String> {
    let json = decode_payload(token)?;
    // "nameid" is what ASP.NET Identity emits; the rest are common variants.
    claim(&json, &["sub", "userId", "id", "nameid"])
}

/// Extract the email claim from a bearer token.
pub fn email_from_token(token: &str) -> Option<String> {
    let json = decode_payload(token)?;
    claim(&json, &["email", "unique_name"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload);
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn extracts_sub_claim_as_user_id() {
        let token = make_token(r#"{"sub":"user-42","email":"a@b.c"}"#);
        assert_eq!(user_id_from_token(&token), Some("user-42".to_string()));
        assert_eq!(email_from_token(&token), Some("a@b.c".to_string()));
    }

    #[test]
    fn falls_back_to_nameid_claim() {
        let token = make_token(r#"{"nameid":"u7","unique_name":"x@y.z"}"#);
        assert_eq!(user_id_from_token(&token), Some("u7".to_string()));
        assert_eq!(email_from_token(&token), Some("x@y.z".to_string()));
    }

    #[test]
    fn malformed_token_yields_none() {
        assert_eq!(user_id_from_token("not-a-jwt"), None);
        assert_eq!(user_id_from_token("a.b"), None);
        assert_eq!(user_id_from_token("a.%%%.c"), None);
    }
}
