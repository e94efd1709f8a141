//! Execution bridge tests: payload normalization and wallet outcomes

use serde_json::json;
use shoal_client::wallet::MockWallet;
use shoal_client::{normalize_transaction_payload, ExecutionBridge, WalletError};

#[test]
fn all_three_encodings_normalize_to_identical_bytes() {
    let expected = vec![7u8, 200, 0, 45];

    let as_array = json!([7, 200, 0, 45]);
    // Byte-indexed object, keys deliberately out of lexicographic order
    let as_object = json!({"2": 0, "0": 7, "1": 200, "3": 45});
    let as_string = json!(as_object.to_string());

    let from_array = normalize_transaction_payload(&as_array).unwrap();
    let from_object = normalize_transaction_payload(&as_object).unwrap();
    let from_string = normalize_transaction_payload(&as_string).unwrap();

    assert_eq!(from_array, expected);
    assert_eq!(from_object, expected);
    assert_eq!(from_string, expected);
}

#[test]
fn base64_strings_also_normalize() {
    let expected = b"unsigned-tx".to_vec();
    let encoded = json!("dW5zaWduZWQtdHg=");
    assert_eq!(normalize_transaction_payload(&encoded).unwrap(), expected);
}

#[test]
fn malformed_payloads_are_rejected() {
    for bad in [
        json!([300]),
        json!({"x": 1}),
        json!("@@not-base64@@"),
        json!(null),
        json!(42),
    ] {
        assert!(matches!(
            normalize_transaction_payload(&bad),
            Err(WalletError::MalformedPayload(_))
        ));
    }
}

#[tokio::test]
async fn executes_through_a_connected_wallet() {
    let wallet = MockWallet::connected();
    let digest = ExecutionBridge::execute(&wallet, &json!([1, 2, 3]))
        .await
        .unwrap();
    assert!(!digest.digest.is_empty());

    let signed = wallet.signed.lock().unwrap();
    assert_eq!(signed.as_slice(), &[vec![1u8, 2, 3]]);
}

#[tokio::test]
async fn disconnected_wallet_fails_before_any_reconstruction() {
    let wallet = MockWallet::disconnected();
    // The payload is malformed; a connectivity-first bridge must report
    // NotConnected, proving it never attempted normalization
    let err = ExecutionBridge::execute(&wallet, &json!("@@not-a-tx@@"))
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::NotConnected);
}

#[tokio::test]
async fn user_rejection_is_a_terminal_error() {
    let wallet = MockWallet::rejecting();
    let err = ExecutionBridge::execute(&wallet, &json!([1, 2, 3]))
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::Rejected);
    // No automatic retry: nothing was signed
    assert!(wallet.signed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn sequential_approvals_are_separate_calls() {
    // deposit -> stake, each its own wallet approval
    let wallet = MockWallet::connected();
    let deposit = json!([1, 1, 1]);
    let stake = json!([2, 2, 2]);

    ExecutionBridge::execute(&wallet, &deposit).await.unwrap();
    ExecutionBridge::execute(&wallet, &stake).await.unwrap();

    let signed = wallet.signed.lock().unwrap();
    assert_eq!(signed.as_slice(), &[vec![1u8, 1, 1], vec![2u8, 2, 2]]);
}
