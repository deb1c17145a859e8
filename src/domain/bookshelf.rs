/// A single `{isbn}` entry, used both in requests and in the 201 body.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IsbnEntry {
    #[serde(alias = "Isbn")]
    pub isbn: String,
}

impl From<String> for IsbnEntry {
    fn from(isbn: String) -> Self {
        Self { isbn }
    }
}

/// Body of `POST /Books`. The service validates the ISBNs, not us.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AddBookRequest {
    #[serde(rename = "UserId")]
    pub user_id: String,
    #[serde(rename = "collectionOfIsbns")]
    pub collection_of_isbns: Vec<IsbnEntry>,
}

impl AddBookRequest {
    pub fn many<I, S>(user_id: impl Into<String>, isbns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id: user_id.into(),
            collection_of_isbns: isbns
                .into_iter()
                .map(|isbn| IsbnEntry::from(isbn.into()))
                .collect(),
        }
    }

    pub fn single(user_id: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self::many(user_id, [isbn.into()])
    }

    pub fn isbns(&self) -> impl Iterator<Item = &str> {
        self.collection_of_isbns.iter().map(|e| e.isbn.as_str())
    }
}

/// 201 body of `POST /Books`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AddBookResponse {
    #[serde(default, alias = "Books")]
    pub books: Vec<IsbnEntry>,
}

impl AddBookResponse {
    pub fn isbns(&self) -> impl Iterator<Item = &str> {
        self.books.iter().map(|e| e.isbn.as_str())
    }
}
