use secrecy::{ExposeSecret, Secret};

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
}

/// Body of `POST /GenerateToken`.
///
/// The service answers 200 with a null `token` when the credentials are
/// rejected, so every field is optional.
#[derive(serde::Deserialize, Debug, Default)]
pub struct TokenResponse {
    pub token: Option<String>,
    pub expires: Option<String>,
    pub status: Option<String>,
    pub result: Option<String>,
}

/// Bearer token handed out by the account service. Never refreshed.
#[derive(Clone, Debug)]
pub struct Token {
    value: Secret<String>,
    expires: Option<String>,
}

impl Token {
    pub fn new(value: String, expires: Option<String>) -> Self {
        Self {
            value: Secret::new(value),
            expires,
        }
    }

    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn secret(&self) -> Secret<String> {
        self.value.clone()
    }

    pub fn expires(&self) -> Option<&str> {
        self.expires.as_deref()
    }
}

impl TryFrom<TokenResponse> for Token {
    type Error = TokenResponse;

    fn try_from(response: TokenResponse) -> Result<Self, Self::Error> {
        match response.token {
            Some(value) if !value.is_empty() => Ok(Token::new(value, response.expires)),
            _ => Err(response),
        }
    }
}
