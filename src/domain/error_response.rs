use serde_aux::field_attributes::deserialize_string_from_number;

/// Error payload of the Bookstore API, e.g.
/// `{"code":"1205","message":"ISBN supplied is not available in Books Collection!"}`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(alias = "Code", deserialize_with = "deserialize_string_from_number")]
    pub code: String,
    #[serde(alias = "Message")]
    pub message: String,
}
