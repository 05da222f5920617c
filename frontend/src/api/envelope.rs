//! Login response envelopes.
//!
//! Backend versions have answered a successful login with two different
//! shapes. Both are accepted; neither is treated as authoritative until the
//! backend contract is settled.

use serde::Deserialize;

use crate::session::Credentials;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LoginEnvelope {
    /// `{ "status": .., "message": .., "data": { "token", "email" } }`
    Data { data: DataBody },
    /// `{ "result": { "token", "username" } }`
    Result { result: ResultBody },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataBody {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultBody {
    pub token: String,
    pub username: String,
}

impl LoginEnvelope {
    /// Extracts credentials; `None` when the token or account id is blank.
    pub fn into_credentials(self) -> Option<Credentials> {
        match self {
            Self::Data { data } => Credentials::new(data.token, data.email),
            Self::Result { result } => Credentials::new(result.token, result.username),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_envelope() {
        let env: LoginEnvelope = serde_json::from_value(json!({
            "status": 200, "message": "ok",
            "data": { "token": "t-1", "email": "ana@example.com" }
        }))
        .unwrap();
        let creds = env.into_credentials().unwrap();
        assert_eq!(creds.token(), "t-1");
        assert_eq!(creds.email(), "ana@example.com");
    }

    #[test]
    fn result_envelope() {
        let env: LoginEnvelope = serde_json::from_value(json!({
            "result": { "token": "t-2", "username": "ana@example.com" }
        }))
        .unwrap();
        assert!(matches!(env, LoginEnvelope::Result { .. }));
        assert_eq!(env.into_credentials().unwrap().token(), "t-2");
    }

    #[test]
    fn unknown_envelope_fails() {
        assert!(serde_json::from_value::<LoginEnvelope>(json!({ "token": "t" })).is_err());
    }

    #[test]
    fn blank_token_yields_no_credentials() {
        let env: LoginEnvelope = serde_json::from_value(json!({
            "data": { "token": "", "email": "ana@example.com" }
        }))
        .unwrap();
        assert!(env.into_credentials().is_none());
    }
}
