use crate::suite::auth_token;

#[tokio::test]
async fn the_fixture_hands_out_a_non_empty_token() {
    let token = auth_token().await;

    assert!(!token.expose().is_empty());
    tracing::info!(expires = ?token.expires(), "Token received from fixture");
}

#[tokio::test]
async fn every_test_observes_the_same_token() {
    let first = auth_token().await;
    let second = auth_token().await;

    assert!(std::ptr::eq(first, second));
}
