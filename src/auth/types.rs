use serde::{Deserialize, Serialize};

/// JWT claims issued for a registered user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthClaims {
    pub sub: String, // User id
    pub email: String,
    pub roles: Vec<String>,
    pub exp: usize, // Expiration timestamp (standard JWT claim)
    pub iat: usize, // Issued at timestamp (standard JWT claim)
}

/// Authenticated caller, inserted into request extensions by `jwt_auth`
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_claims_serialization() {
        let claims = AuthClaims {
            sub: "user-1".to_string(),
            email: "ada@example.com".to_string(),
            roles: vec!["user".to_string()],
            exp: 1234567890,
            iat: 1234567800,
        };

        let json = serde_json::to_string(&claims).unwrap();
        assert!(json.contains("\"sub\":\"user-1\""));

        let deserialized: AuthClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, claims);
    }
}
