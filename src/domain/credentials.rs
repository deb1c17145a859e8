use crate::configuration::AccountSettings;
use secrecy::Secret;

#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: Secret<String>,
}

impl From<&AccountSettings> for Credentials {
    fn from(settings: &AccountSettings) -> Self {
        Self {
            username: settings.username.clone(),
            password: settings.password.clone(),
        }
    }
}
