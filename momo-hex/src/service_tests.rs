//! CollectionService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use momo_types::{
        ApiUserDetails, AppError, AuthToken, Balance, CollectionApi, CreateApiUserRequest,
        MomoError, Oauth2Token, Payer, PaymentRequest, PaymentResult, PaymentStatus, ReferenceId,
        TransportError, TransportErrorKind,
    };

    use crate::CollectionService;

    /// How the mock answers every call.
    #[derive(Clone, Copy)]
    pub enum Outcome {
        Ok,
        ApiError(u16),
        Unreachable,
    }

    /// In-memory provider that records every call it receives.
    pub struct MockApi {
        outcome: Outcome,
        calls: Mutex<Vec<String>>,
    }

    impl MockApi {
        pub fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn answer<T>(&self, call: String, value: T) -> Result<T, MomoError> {
            self.calls.lock().unwrap().push(call);
            match self.outcome {
                Outcome::Ok => Ok(value),
                Outcome::ApiError(status) => Err(MomoError::api(
                    status,
                    r#"{"code":"INTERNAL_ERROR","message":"provider failure"}"#,
                )),
                Outcome::Unreachable => Err(TransportError::new(
                    TransportErrorKind::Connect,
                    "connection refused",
                )
                .into()),
            }
        }
    }

    #[async_trait]
    impl CollectionApi for MockApi {
        async fn create_api_user(
            &self,
            reference_id: &str,
            callback_host: &str,
        ) -> Result<(), MomoError> {
            if callback_host.is_empty() {
                return Err(MomoError::Validation("callback host is required".into()));
            }
            self.answer(format!("create_api_user:{reference_id}:{callback_host}"), ())
        }

        async fn create_api_key(&self, reference_id: &str) -> Result<String, MomoError> {
            self.answer(format!("create_api_key:{reference_id}"), "api-key".into())
        }

        async fn get_api_user_details(
            &self,
            reference_id: &str,
        ) -> Result<ApiUserDetails, MomoError> {
            let mut details = ApiUserDetails::new();
            details.insert("targetEnvironment".into(), "sandbox".into());
            self.answer(format!("get_api_user_details:{reference_id}"), details)
        }

        async fn get_auth_token(&self) -> Result<AuthToken, MomoError> {
            self.answer(
                "get_auth_token".into(),
                AuthToken {
                    access_token: "tok".into(),
                    token_type: "Bearer".into(),
                    expires_in: 3600,
                },
            )
        }

        async fn create_oauth2_token(&self, auth_req_id: &str) -> Result<Oauth2Token, MomoError> {
            self.answer(
                format!("create_oauth2_token:{auth_req_id}"),
                Oauth2Token {
                    access_token: "tok".into(),
                    ..Default::default()
                },
            )
        }

        async fn get_account_balance(&self, bearer_token: &str) -> Result<Balance, MomoError> {
            self.answer(
                format!("get_account_balance:{bearer_token}"),
                Balance {
                    available_balance: "1000".into(),
                    currency: "USD".into(),
                },
            )
        }

        async fn request_to_pay(
            &self,
            bearer_token: &str,
            request: &PaymentRequest,
        ) -> Result<ReferenceId, MomoError> {
            self.answer(
                format!("request_to_pay:{bearer_token}:{}", request.external_id),
                ReferenceId::generate(),
            )
        }

        async fn get_payment_status(
            &self,
            reference_id: &str,
            bearer_token: &str,
        ) -> Result<PaymentResult, MomoError> {
            self.answer(
                format!("get_payment_status:{reference_id}:{bearer_token}"),
                PaymentResult {
                    status: PaymentStatus::Successful,
                    ..Default::default()
                },
            )
        }
    }

    fn payment_request() -> PaymentRequest {
        PaymentRequest {
            amount: "100".into(),
            currency: "EUR".into(),
            external_id: "ext-1".into(),
            payer: Payer::msisdn("46733123453"),
            payer_message: String::new(),
            payee_note: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_api_user_keeps_given_reference_id() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let reference_id = service
            .create_api_user(CreateApiUserRequest {
                reference_id: "my-ref".into(),
                callback_host: "cb.example.com".into(),
            })
            .await
            .unwrap();

        assert_eq!(reference_id.as_str(), "my-ref");
        assert_eq!(
            service.api().calls(),
            vec!["create_api_user:my-ref:cb.example.com"]
        );
    }

    #[tokio::test]
    async fn test_create_api_user_generates_missing_reference_id() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let reference_id = service
            .create_api_user(CreateApiUserRequest {
                reference_id: "  ".into(),
                callback_host: "cb.example.com".into(),
            })
            .await
            .unwrap();

        assert_eq!(reference_id.as_str().len(), 36);
        assert_eq!(
            service.api().calls(),
            vec![format!("create_api_user:{reference_id}:cb.example.com")]
        );
    }

    #[tokio::test]
    async fn test_create_api_user_invalid_reference_id_is_bad_request() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let result = service
            .create_api_user(CreateApiUserRequest {
                reference_id: "not/valid".into(),
                callback_host: "cb.example.com".into(),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(service.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_api_user_missing_callback_is_bad_request() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let result = service
            .create_api_user(CreateApiUserRequest::default())
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_api_key_requires_reference_id() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let result = service.create_api_key("").await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Reference ID is required"));
        assert!(service.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_api_key_success() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let api_key = service.create_api_key("my-ref").await.unwrap();

        assert_eq!(api_key, "api-key");
    }

    #[tokio::test]
    async fn test_provider_error_is_internal() {
        let service = CollectionService::new(MockApi::new(Outcome::ApiError(500)));

        let result = service.get_account_balance("tok").await;

        match result {
            Err(AppError::Internal(msg)) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("INTERNAL_ERROR"));
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_internal() {
        let service = CollectionService::new(MockApi::new(Outcome::Unreachable));

        let result = service.get_auth_token().await;

        assert!(matches!(result, Err(AppError::Internal(msg)) if msg.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_request_to_pay_forwards_token_and_body() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let reference_id = service
            .request_to_pay("tok", payment_request())
            .await
            .unwrap();

        assert!(!reference_id.as_str().is_empty());
        assert_eq!(service.api().calls(), vec!["request_to_pay:tok:ext-1"]);
    }

    #[tokio::test]
    async fn test_get_payment_status_success() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let result = service.get_payment_status("ref-1", "tok").await.unwrap();

        assert_eq!(result.status, PaymentStatus::Successful);
        assert_eq!(service.api().calls(), vec!["get_payment_status:ref-1:tok"]);
    }

    #[tokio::test]
    async fn test_oauth2_and_details_pass_through() {
        let service = CollectionService::new(MockApi::new(Outcome::Ok));

        let token = service.create_oauth2_token("req-1").await.unwrap();
        let details = service.get_api_user_details("my-ref").await.unwrap();

        assert_eq!(token.access_token, "tok");
        assert_eq!(details["targetEnvironment"], "sandbox");
    }
}
