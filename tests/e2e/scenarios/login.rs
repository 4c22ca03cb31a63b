//! Login failure modes and authentication gating.

use crate::harness::{alice_publisher, FakeDirectory, FakePds, TEST_ENDPOINT};
use atpub_core::{DidDocument, DocumentInput, PubError, Publisher};

#[tokio::test]
async fn test_wrong_password() {
    let mut publisher = alice_publisher();
    let err = publisher.login("alice.test", "wrong").await.unwrap_err();
    assert!(matches!(err, PubError::Authentication(_)));
    assert!(!publisher.is_authenticated());
}

#[tokio::test]
async fn test_unknown_handle() {
    let mut publisher = alice_publisher();
    let err = publisher.login("bob.test", "hunter2").await.unwrap_err();
    assert!(matches!(err, PubError::IdentityResolution { .. }));
}

#[tokio::test]
async fn test_did_document_without_pds_endpoint() {
    let directory = FakeDirectory::new().with_document(
        "did:plc:noservice",
        DidDocument {
            id: "did:plc:noservice".to_string(),
            also_known_as: vec![],
            service: vec![],
        },
    );
    let mut publisher = Publisher::new(directory, FakePds::new());

    let err = publisher.login("did:plc:noservice", "pw").await.unwrap_err();
    assert!(matches!(err, PubError::EndpointNotFound(_)));
}

#[tokio::test]
async fn test_unsupported_did_method() {
    let mut publisher = alice_publisher();
    let err = publisher
        .login("did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK", "pw")
        .await
        .unwrap_err();
    assert!(matches!(err, PubError::UnsupportedDidMethod(_)));
}

#[tokio::test]
async fn test_record_operations_gated_on_login() {
    let publisher = alice_publisher();

    let err = publisher
        .publish_document(DocumentInput::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PubError::NotAuthenticated));

    let err = publisher.delete_document("3jzfcijpj2z2a").await.unwrap_err();
    assert!(matches!(err, PubError::NotAuthenticated));

    let err = publisher.list_publications(5).await.unwrap_err();
    assert!(matches!(err, PubError::NotAuthenticated));
}

#[tokio::test]
async fn test_login_resolves_session_from_directory() {
    let mut publisher = alice_publisher();
    publisher.login("alice.test", "hunter2").await.unwrap();

    let session = publisher.session().unwrap();
    assert_eq!(session.did(), "did:plc:alice");
    assert_eq!(session.endpoint(), TEST_ENDPOINT);
}
